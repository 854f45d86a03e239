use crate::color::{random_color, LinearRgb, HOVER};
use crate::math::{Basis, Spherical, Vec3};
use crate::typeface::Typeface;
use rand::Rng;
use std::rc::Rc;

/// Fraction of the remaining distance to the target color covered each frame.
pub(crate) const COLOR_EASE: f32 = 0.1;

/// The shared "this is clickable" pointer shape.
pub(crate) trait PointerAffordanceSink {
    fn set_hover(&mut self, hovered: bool);
    fn clear(&mut self);
}

/// One word of the cloud.
pub(crate) struct Label {
    index: usize,
    text: &'static str,
    glyphs: Vec<char>,
    font: Rc<Typeface>,
    pub(crate) position: Vec3,
    pub(crate) orientation: Basis,
    pub(crate) color: LinearRgb,
    hovered: bool,
}

impl Label {
    pub(crate) fn new(index: usize, text: &'static str, base: Spherical, font: Rc<Typeface>) -> Self {
        Self {
            index,
            text,
            glyphs: font.shape(text),
            font,
            position: base.to_cartesian(),
            orientation: Basis::IDENTITY,
            color: LinearRgb::WHITE,
            hovered: false,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }
    pub(crate) fn text(&self) -> &'static str {
        self.text
    }
    pub(crate) fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
    pub(crate) fn font(&self) -> &Typeface {
        &self.font
    }
    #[cfg(test)]
    pub(crate) fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Billboard: copy the camera rotation, then optionally turn to face the
    /// camera position exactly.
    pub(crate) fn orient(&mut self, camera_rotation: Basis, camera_position: Vec3, look_at_camera: bool) {
        self.orientation = camera_rotation;
        if look_at_camera {
            self.orientation = Basis::facing(self.position, camera_position);
        }
    }

    /// Ease towards the hover color, or towards a new random color every frame
    /// when not hovered.
    pub(crate) fn step_color<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let target = if self.hovered {
            HOVER.to_linear()
        } else {
            random_color(rng).to_linear()
        };
        self.color = self.color.lerp(target, COLOR_EASE);
    }

    pub(crate) fn pointer_over(&mut self, sink: &mut dyn PointerAffordanceSink) {
        self.hovered = true;
        sink.set_hover(true);
    }

    pub(crate) fn pointer_out(&mut self, sink: &mut dyn PointerAffordanceSink) {
        self.hovered = false;
        sink.set_hover(false);
    }

    pub(crate) fn click(&self) {
        log::info!("{}", self.text);
    }

    /// Tear-down; the pointer shape always goes back to default.
    pub(crate) fn unmount(self, sink: &mut dyn PointerAffordanceSink) {
        sink.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::cell::RefCell;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) enum Call {
        Hover(bool),
        Clear,
    }

    /// Records every call; clones share one log.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink(pub(crate) Rc<RefCell<Vec<Call>>>);

    impl RecordingSink {
        pub(crate) fn calls(&self) -> Vec<Call> {
            self.0.borrow().clone()
        }
    }

    impl PointerAffordanceSink for RecordingSink {
        fn set_hover(&mut self, hovered: bool) {
            self.0.borrow_mut().push(Call::Hover(hovered));
        }
        fn clear(&mut self) {
            self.0.borrow_mut().push(Call::Clear);
        }
    }

    fn label() -> Label {
        let font = Rc::new(Typeface::load("plain").unwrap());
        Label::new(5, "Penumbra", Spherical::new(20.0, 1.0, 0.5), font)
    }

    #[test]
    fn hover_eases_ten_percent_towards_hover_color() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sink = RecordingSink::default();
        let mut l = label();
        l.color = LinearRgb { r: 0.2, g: 0.9, b: 0.4 };
        let before = l.color;
        let target = HOVER.to_linear();

        l.pointer_over(&mut sink);
        l.step_color(&mut rng);

        assert!((l.color.r - (before.r + (target.r - before.r) * 0.1)).abs() < 1e-6);
        assert!((l.color.g - (before.g + (target.g - before.g) * 0.1)).abs() < 1e-6);
        assert!((l.color.b - (before.b + (target.b - before.b) * 0.1)).abs() < 1e-6);
    }

    #[test]
    fn unhovered_target_is_fresh_random_color() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut replay = StdRng::seed_from_u64(99);
        let mut l = label();
        for _ in 0..5 {
            let before = l.color;
            let target = random_color(&mut replay).to_linear();
            l.step_color(&mut rng);
            assert_eq!(l.color, before.lerp(target, COLOR_EASE));
        }
    }

    #[test]
    fn hover_converges_on_hover_color() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sink = RecordingSink::default();
        let mut l = label();
        l.pointer_over(&mut sink);
        for _ in 0..200 {
            l.step_color(&mut rng);
        }
        assert_eq!(l.color.to_srgb(), HOVER);
    }

    #[test]
    fn cursor_set_on_over_reset_on_out_and_unmount() {
        let mut sink = RecordingSink::default();
        let mut l = label();
        l.pointer_over(&mut sink);
        assert!(l.is_hovered());
        l.pointer_out(&mut sink);
        assert!(!l.is_hovered());
        l.pointer_over(&mut sink);
        l.unmount(&mut sink);
        assert_eq!(
            sink.calls(),
            vec![Call::Hover(true), Call::Hover(false), Call::Hover(true), Call::Clear]
        );
    }

    #[test]
    fn look_at_overrides_billboard() {
        let mut l = label();
        let cam_pos = Vec3::new(0.0, 40.0, 40.0);
        let cam_rot = Basis::facing(Vec3::ZERO, cam_pos);

        l.orient(cam_rot, cam_pos, false);
        assert_eq!(l.orientation, cam_rot);

        l.orient(cam_rot, cam_pos, true);
        let to_cam = (cam_pos - l.position).norm();
        assert!((l.orientation.back - to_cam).len() < 1e-5);
        assert_ne!(l.orientation, cam_rot);
    }

    #[test]
    fn shaped_with_shared_font() {
        let l = label();
        assert_eq!(l.glyphs().len(), "Penumbra".len());
        assert_eq!(l.font().name(), "plain");
        assert_eq!(l.position, Spherical::new(20.0, 1.0, 0.5).to_cartesian());
        assert_eq!(l.index(), 5);
        assert_eq!(l.text(), "Penumbra");
    }
}
