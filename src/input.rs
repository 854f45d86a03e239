use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Action {
    Quit,
    Pause,
    Reshuffle,
    PanelVisible,
    Select(i32),
    Adjust { steps: i32, fine: bool },
    Toggle,
    Orbit { left: f32, up: f32 },
    Zoom(f32),
    PointerAt(u16, u16),
    Press(u16, u16),
    DragTo(u16, u16),
    Release,
}

const KEY_ORBIT: f32 = 0.12;
const ZOOM_STEP: f32 = 0.95;

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<Event>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        out.push(event::read()?);
        if out.len() >= 64 {
            break;
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_action(ev: &Event) -> Option<Action> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat => map_key(k),
        Event::Mouse(m) => map_mouse(m),
        _ => None,
    }
}

fn map_key(k: &KeyEvent) -> Option<Action> {
    let fine = k.modifiers.contains(KeyModifiers::SHIFT);
    if k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('c')) {
        return Some(Action::Quit);
    }
    let action = match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reshuffle,
        KeyCode::Tab => Action::PanelVisible,

        KeyCode::Up => Action::Select(-1),
        KeyCode::Down => Action::Select(1),
        KeyCode::Left => Action::Adjust { steps: -1, fine },
        KeyCode::Right => Action::Adjust { steps: 1, fine },
        KeyCode::Enter => Action::Toggle,

        KeyCode::Char('a') | KeyCode::Char('A') => Action::Orbit { left: KEY_ORBIT, up: 0.0 },
        KeyCode::Char('d') | KeyCode::Char('D') => Action::Orbit { left: -KEY_ORBIT, up: 0.0 },
        KeyCode::Char('w') | KeyCode::Char('W') => Action::Orbit { left: 0.0, up: KEY_ORBIT },
        KeyCode::Char('s') | KeyCode::Char('S') => Action::Orbit { left: 0.0, up: -KEY_ORBIT },
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Zoom(ZOOM_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => Action::Zoom(1.0 / ZOOM_STEP),
        _ => return None,
    };
    Some(action)
}

/// Left-button gesture: a press that is released without moving is a click,
/// anything else orbits the camera.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DragState {
    last: Option<(u16, u16)>,
    press: Option<(u16, u16)>,
    moved: bool,
}

impl DragState {
    pub(crate) fn press(&mut self, x: u16, y: u16) {
        self.last = Some((x, y));
        self.press = Some((x, y));
        self.moved = false;
    }

    /// Cell delta since the previous pointer position, if a press is active.
    pub(crate) fn drag_to(&mut self, x: u16, y: u16) -> Option<(i32, i32)> {
        let (px, py) = self.last.replace((x, y))?;
        let d = (x as i32 - px as i32, y as i32 - py as i32);
        if d != (0, 0) {
            self.moved = true;
        }
        Some(d)
    }

    /// Ends the gesture; yields the press cell when it never moved.
    pub(crate) fn release(&mut self) -> Option<(u16, u16)> {
        self.last = None;
        let press = self.press.take();
        if self.moved {
            None
        } else {
            press
        }
    }
}

fn map_mouse(m: &MouseEvent) -> Option<Action> {
    let (x, y) = (m.column, m.row);
    let action = match m.kind {
        MouseEventKind::Moved => Action::PointerAt(x, y),
        MouseEventKind::Down(MouseButton::Left) => Action::Press(x, y),
        MouseEventKind::Drag(MouseButton::Left) => Action::DragTo(x, y),
        MouseEventKind::Up(MouseButton::Left) => Action::Release,
        MouseEventKind::ScrollUp => Action::Zoom(ZOOM_STEP),
        MouseEventKind::ScrollDown => Action::Zoom(1.0 / ZOOM_STEP),
        _ => return None,
    };
    Some(action)
}
