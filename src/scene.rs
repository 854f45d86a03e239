//! Draws the cloud into a cell buffer: perspective, depth ordering, fog,
//! and the cell-to-label map used for pointer hit tests.

use crate::camera::OrbitCamera;
use crate::color::{LinearRgb, FOG};
use crate::label::Label;
use crate::math::clamp01;
use crate::render::{Cell, CellBuffer};
use std::ops::Range;

pub(crate) const FOG_NEAR: f32 = 0.0;
pub(crate) const FOG_FAR: f32 = 140.0;

pub(crate) fn fog_factor(depth: f32) -> f32 {
    clamp01((depth - FOG_NEAR) / (FOG_FAR - FOG_NEAR))
}

/// Per-cell depth and owning label for the last drawn frame.
pub(crate) struct HitMap {
    w: u16,
    h: u16,
    depth: Vec<f32>,
    owner: Vec<Option<usize>>,
}

impl HitMap {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        let n = (w as usize) * (h as usize);
        Self {
            w,
            h,
            depth: vec![f32::INFINITY; n],
            owner: vec![None; n],
        }
    }

    pub(crate) fn reset(&mut self, w: u16, h: u16) {
        if w != self.w || h != self.h {
            *self = HitMap::new(w, h);
            return;
        }
        self.depth.fill(f32::INFINITY);
        self.owner.fill(None);
    }

    /// Label index under cell `(x, y)`, nearest one wins.
    pub(crate) fn at(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.w || y >= self.h {
            return None;
        }
        self.owner[(y as usize) * (self.w as usize) + (x as usize)]
    }

    fn claim(&mut self, x: i32, y: i32, depth: f32, label: usize) -> bool {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return false;
        }
        let i = (y as usize) * (self.w as usize) + (x as usize);
        if depth >= self.depth[i] {
            return false;
        }
        self.depth[i] = depth;
        self.owner[i] = Some(label);
        true
    }
}

/// Paint every label into `buf` (which must already hold the background)
/// over a view `view_w` cells wide starting at column 0. Only `rows` are
/// drawn and made pickable; the projection still spans the full height.
pub(crate) fn draw_labels(
    buf: &mut CellBuffer,
    hits: &mut HitMap,
    labels: &[Label],
    camera: &OrbitCamera,
    view_w: u16,
    rows: Range<u16>,
) {
    let view_w = view_w.min(buf.w);
    hits.reset(buf.w, buf.h);
    let fog = FOG.to_linear();

    for label in labels {
        if !label.position.is_finite() {
            continue;
        }
        let Some(center) = camera.project(label.position, view_w, buf.h) else {
            continue;
        };

        // Slope of the label's +X axis on screen; words run one glyph per cell along it.
        let along = label.position + label.orientation.right * label.font().advance();
        let slope = match camera.project(along, view_w, buf.h) {
            Some(p) if (p.x - center.x).abs() > 1e-3 => ((p.y - center.y) / (p.x - center.x)).clamp(-1.0, 1.0),
            _ => 0.0,
        };

        let color = shade(label.color, fog, center.depth);
        let bold = center.depth < camera.distance();
        let n = label.glyphs().len() as f32;

        for (i, &ch) in label.glyphs().iter().enumerate() {
            let k = i as f32 - (n - 1.0) * 0.5;
            let x = (center.x + k).floor() as i32;
            let y = (center.y + slope * k).floor() as i32;
            if x >= view_w as i32 || y < rows.start as i32 || y >= rows.end as i32 {
                continue;
            }
            if hits.claim(x, y, center.depth, label.index()) {
                let bg = buf.get(x as u16, y as u16).map(|c| c.bg).unwrap_or(fog_bg());
                buf.set(
                    x as u16,
                    y as u16,
                    Cell {
                        ch,
                        fg: color.to_srgb().to_color(),
                        bg,
                        bold,
                    },
                );
            }
        }
    }
}

pub(crate) fn fog_bg() -> crossterm::style::Color {
    FOG.to_color()
}

fn shade(color: LinearRgb, fog: LinearRgb, depth: f32) -> LinearRgb {
    color.lerp(fog, fog_factor(depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HOVER;
    use crate::math::{Spherical, Vec3};
    use crate::render::{draw_status, label_rows, Status};
    use crate::typeface::Typeface;
    use std::rc::Rc;

    fn label_at(index: usize, text: &'static str, pos: Vec3) -> Label {
        let font = Rc::new(Typeface::load("plain").unwrap());
        let mut l = Label::new(index, text, Spherical::new(0.0, 0.0, 0.0), font);
        l.position = pos;
        l
    }

    fn text_on_row(buf: &CellBuffer, y: u16) -> String {
        (0..buf.w).map(|x| buf.get(x, y).map(|c| c.ch).unwrap_or(' ')).collect()
    }

    #[test]
    fn fog_is_linear_and_clamped() {
        assert_eq!(fog_factor(0.0), 0.0);
        assert!((fog_factor(70.0) - 0.5).abs() < 1e-6);
        assert_eq!(fog_factor(500.0), 1.0);
    }

    #[test]
    fn word_centered_on_target() {
        let cam = OrbitCamera::default();
        let mut l = label_at(0, "Serene", Vec3::ZERO);
        l.orient(cam.rotation(), cam.position(), false);
        let mut buf = CellBuffer::new(80, 24);
        buf.clear(fog_bg());
        let mut hits = HitMap::new(80, 24);

        draw_labels(&mut buf, &mut hits, std::slice::from_ref(&l), &cam, 80, 0..24);

        assert!(text_on_row(&buf, 12).contains("Serene"));
        assert_eq!(hits.at(40, 12), Some(0));
        assert_eq!(hits.at(10, 12), None);
        assert_eq!(buf.get(40, 12).map(|c| c.bg), Some(fog_bg()));
    }

    #[test]
    fn nearer_label_wins_the_cell() {
        let cam = OrbitCamera::default();
        let toward_cam = cam.position() * 0.3;
        let mut far = label_at(0, "Opulent", Vec3::ZERO);
        let mut near = label_at(1, "Enigma", toward_cam);
        for l in [&mut far, &mut near] {
            l.orient(cam.rotation(), cam.position(), false);
        }
        let mut buf = CellBuffer::new(80, 24);
        let mut hits = HitMap::new(80, 24);

        // draw far last; near must still own the shared center cell
        draw_labels(&mut buf, &mut hits, &[near, far], &cam, 80, 0..24);
        assert_eq!(hits.at(40, 12), Some(1));
    }

    #[test]
    fn non_finite_and_hidden_labels_are_skipped() {
        let cam = OrbitCamera::default();
        let labels = vec![
            label_at(0, "Nebulous", Vec3::new(f32::NAN, 0.0, 0.0)),
            label_at(1, "Ethereal", cam.position() * 2.0),
        ];
        let mut buf = CellBuffer::new(40, 12);
        let mut hits = HitMap::new(40, 12);
        draw_labels(&mut buf, &mut hits, &labels, &cam, 40, 0..12);
        assert!(buf.cells.iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn panel_area_is_left_alone() {
        let cam = OrbitCamera::default();
        let mut l = label_at(0, "Quintessential", Vec3::ZERO);
        l.orient(cam.rotation(), cam.position(), false);
        let mut buf = CellBuffer::new(30, 24);
        let mut hits = HitMap::new(30, 24);
        draw_labels(&mut buf, &mut hits, std::slice::from_ref(&l), &cam, 10, 0..24);
        for x in 10..30 {
            assert_eq!(hits.at(x, 12), None);
        }
    }

    #[test]
    fn words_under_the_status_line_are_not_pickable() {
        let cam = OrbitCamera::default();
        let top = (0..400)
            .map(|i| Vec3::new(0.0, 20.0 + i as f32 * 0.1, 0.0))
            .find(|&p| cam.project(p, 80, 24).map_or(false, |c| (0.0..1.0).contains(&c.y)))
            .unwrap();
        let l = label_at(0, "Serene", top);
        let mut buf = CellBuffer::new(80, 24);
        let mut hits = HitMap::new(80, 24);

        draw_labels(&mut buf, &mut hits, std::slice::from_ref(&l), &cam, 80, 0..24);
        assert_eq!(hits.at(40, 0), Some(0));

        buf.clear(fog_bg());
        draw_labels(&mut buf, &mut hits, std::slice::from_ref(&l), &cam, 80, label_rows(24));
        draw_status(
            &mut buf,
            &Status {
                paused: false,
                labels: 1,
                generation: 1,
                hovered: None,
                face: "plain",
                time: 0.0,
            },
        );
        assert_eq!(hits.at(40, 0), None);
        assert!((0..80).all(|x| hits.at(x, 0).is_none() && hits.at(x, 23).is_none()));
        assert!(!text_on_row(&buf, 0).contains("Serene"));
    }

    #[test]
    fn distant_words_fade_into_fog() {
        let fog = FOG.to_linear();
        let hover = HOVER.to_linear();
        assert_eq!(shade(hover, fog, 0.0).to_srgb(), HOVER);
        assert_eq!(shade(hover, fog, 1000.0).to_srgb(), FOG);
        let mid = shade(hover, fog, 70.0).to_srgb();
        assert!(mid.r < HOVER.r && mid.r > FOG.r);
    }

    #[test]
    fn look_at_tilts_off_center_words() {
        let cam = OrbitCamera::default();
        let pos = Vec3::new(25.0, -10.0, 0.0);
        let mut l = label_at(0, "Scintillating", pos);
        l.orient(cam.rotation(), cam.position(), true);
        assert_ne!(l.orientation, cam.rotation());
        l.orient(cam.rotation(), cam.position(), false);
        assert_eq!(l.orientation, cam.rotation());
    }
}
