use crate::camera::OrbitCamera;
use crate::config::{CloudConfig, ConfigError};
use crate::label::{Label, PointerAffordanceSink};
use crate::layout::{self, LayoutParams};
use crate::typeface::Typeface;
use crate::words::random_word;
use rand::Rng;
use std::rc::Rc;

/// The full set of labels for one `(count, radius)` generation.
pub(crate) struct Cloud<R: Rng> {
    count: usize,
    radius: f32,
    labels: Vec<Label>,
    hovered: Option<usize>,
    generation: u64,
    font: Rc<Typeface>,
    rng: R,
    sink: Box<dyn PointerAffordanceSink>,
}

impl<R: Rng> Cloud<R> {
    pub(crate) fn new(
        config: &CloudConfig,
        font: Rc<Typeface>,
        rng: R,
        sink: Box<dyn PointerAffordanceSink>,
    ) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        let mut cloud = Self {
            count: config.count,
            radius: config.radius,
            labels: Vec::new(),
            hovered: None,
            generation: 0,
            font,
            rng,
            sink,
        };
        cloud.rebuild();
        Ok(cloud)
    }

    pub(crate) fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn hovered(&self) -> Option<&Label> {
        self.hovered.map(|i| &self.labels[i])
    }

    /// Rebuild when `config` changes the count or radius. Returns whether it did.
    pub(crate) fn reshape(&mut self, config: &CloudConfig) -> bool {
        if config.count == self.count && config.radius == self.radius {
            return false;
        }
        self.count = config.count.max(1);
        self.radius = config.radius;
        self.rebuild();
        true
    }

    /// Discard every label and draw a fresh generation: new words, positions
    /// back on the initial layout.
    pub(crate) fn rebuild(&mut self) {
        self.release();

        let total = self.count * self.count;
        let mut labels = Vec::with_capacity(total);
        for index in 0..total {
            let text = random_word(&mut self.rng);
            let base = layout::initial(index, self.count, self.radius);
            labels.push(Label::new(index, text, base, Rc::clone(&self.font)));
        }
        self.labels = labels;
        self.generation += 1;
        log::debug!(
            "cloud generation {}: {} labels, radius {}",
            self.generation,
            total,
            self.radius
        );
    }

    fn release(&mut self) {
        self.hovered = None;
        for label in self.labels.drain(..) {
            label.unmount(self.sink.as_mut());
        }
    }

    /// One animation frame: layout at `time`, then per-label orientation and color.
    pub(crate) fn tick(&mut self, config: &CloudConfig, time: f32, camera: &OrbitCamera) {
        let params = LayoutParams {
            count: self.count,
            radius: self.radius,
            frequency: config.frequency,
            pattern: config.pattern,
        };
        let cam_rot = camera.rotation();
        let cam_pos = camera.position();

        for label in self.labels.iter_mut() {
            label.position = layout::position(label.index(), &params, time);
            label.orient(cam_rot, cam_pos, config.look_at_camera);
            label.step_color(&mut self.rng);
        }
    }

    /// The pointer now rests on label `hit` (or on nothing).
    pub(crate) fn pointer(&mut self, hit: Option<usize>) {
        let hit = hit.filter(|&i| i < self.labels.len());
        if hit == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.take() {
            self.labels[old].pointer_out(self.sink.as_mut());
        }
        if let Some(new) = hit {
            self.labels[new].pointer_over(self.sink.as_mut());
        }
        self.hovered = hit;
    }

    pub(crate) fn click(&self, hit: Option<usize>) {
        if let Some(label) = hit.and_then(|i| self.labels.get(i)) {
            label.click();
        }
    }
}

impl<R: Rng> Drop for Cloud<R> {
    fn drop(&mut self) {
        self.release();
    }
}
