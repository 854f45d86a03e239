use crate::camera::OrbitCamera;
use crate::cli::Args;
use crate::cloud::Cloud;
use crate::input::{collect_input_nonblocking, map_event_to_action, Action, DragState};
use crate::panel::ControlPanel;
use crate::render::{draw_panel, draw_status, label_rows, panel_width, Status, Terminal, TerminalPointer};
use crate::scene::{draw_labels, fog_bg, HitMap};
use crate::typeface::{Typeface, DEFAULT_FACE};
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub(crate) struct App {
    panel: ControlPanel,
    cloud: Cloud<StdRng>,
    camera: OrbitCamera,
    font: Rc<Typeface>,
    term: Terminal,
    hits: HitMap,
    fps: u32,
    clock: Clock,
    drag: DragState,
    should_quit: bool,
}

impl App {
    fn init(args: &Args) -> anyhow::Result<Self> {
        let config = args.cloud_config().context("invalid cloud options")?;

        let font = match Typeface::load(&args.font) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("{e}; falling back to {DEFAULT_FACE}");
                Typeface::load(DEFAULT_FACE)?
            }
        };
        let font = Rc::new(font);

        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::info!(
            "starting: {:?}, face {}, seed {:?}",
            config,
            font,
            args.seed
        );

        let cloud = Cloud::new(&config, Rc::clone(&font), rng, Box::new(TerminalPointer::new()))?;
        let term = Terminal::begin()?;
        let hits = HitMap::new(term.cols, term.rows);

        Ok(Self {
            panel: ControlPanel::new(config),
            cloud,
            camera: OrbitCamera::default(),
            font,
            term,
            hits,
            fps: args.fps.clamp(10, 240),
            clock: Clock::default(),
            drag: DragState::default(),
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(1.0 / self.fps as f32);
        let mut last = Instant::now();

        while !self.should_quit {
            let frame_start = Instant::now();
            self.term.resize_if_needed()?;

            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(action) = map_event_to_action(&ev) {
                    self.apply(action);
                }
            }

            let now = Instant::now();
            let dt = now.saturating_duration_since(last).as_secs_f64().min(0.1);
            last = now;
            self.clock.advance(dt);

            let config = self.panel.snapshot();
            self.cloud.reshape(&config);
            self.camera.update();
            self.cloud.tick(&config, self.clock.seconds(), &self.camera);

            self.render_frame()?;

            spin_sleep(frame_dt, frame_start);
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Pause => self.clock.paused = !self.clock.paused,
            Action::Reshuffle => self.cloud.rebuild(),
            Action::PanelVisible => self.panel.visible = !self.panel.visible,
            Action::Select(d) => self.panel.select(d),
            Action::Adjust { steps, fine } => self.panel.adjust(steps, fine),
            Action::Toggle => self.panel.toggle(),
            Action::Orbit { left, up } => self.camera.rotate(left, up),
            Action::Zoom(f) => self.camera.dolly(f),
            Action::PointerAt(x, y) => self.cloud.pointer(self.hits.at(x, y)),
            Action::Press(x, y) => self.drag.press(x, y),
            Action::DragTo(x, y) => {
                if let Some((dx, dy)) = self.drag.drag_to(x, y) {
                    self.camera.drag(dx, dy, self.term.rows);
                }
                self.cloud.pointer(self.hits.at(x, y));
            }
            Action::Release => {
                if let Some((x, y)) = self.drag.release() {
                    self.cloud.click(self.hits.at(x, y));
                }
            }
        }
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let buf = &mut self.term.cur;
        buf.clear(fog_bg());

        let view_w = buf.w - panel_width(&self.panel, buf.w, buf.h);
        let rows = label_rows(buf.h);
        draw_labels(
            buf,
            &mut self.hits,
            self.cloud.labels(),
            &self.camera,
            view_w,
            rows,
        );
        draw_panel(buf, &self.panel);
        draw_status(
            buf,
            &Status {
                paused: self.clock.paused,
                labels: self.cloud.labels().len(),
                generation: self.cloud.generation(),
                hovered: self.cloud.hovered().map(|l| l.text()),
                face: self.font.name(),
                time: self.clock.seconds(),
            },
        );

        self.term.present()
    }

    fn shutdown(&mut self) -> anyhow::Result<()> {
        self.cloud.pointer(None);
        self.term.end()
    }
}

pub(crate) fn run(args: Args) -> anyhow::Result<()> {
    let mut app = App::init(&args)?;
    let res = app.run();
    let end = app.shutdown();
    log::info!("shutdown after {:.1}s", app.clock.elapsed);
    res.and(end)
}

/// Animation time. Stops while paused.
#[derive(Clone, Copy, Debug, Default)]
struct Clock {
    elapsed: f64,
    paused: bool,
}

impl Clock {
    fn advance(&mut self, dt: f64) {
        if !self.paused {
            self.elapsed += dt;
        }
    }

    fn seconds(&self) -> f32 {
        self.elapsed as f32
    }
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, start: Instant) {
    let end = start + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
