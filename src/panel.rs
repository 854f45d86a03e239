use crate::config::{CloudConfig, COUNT_RANGE, FREQUENCY_RANGE, RADIUS_RANGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Param {
    Count,
    Radius,
    LookAtCamera,
    RadiusPattern,
    PhiPattern,
    ThetaPattern,
    Frequency,
}

impl Param {
    pub(crate) const ALL: [Param; 7] = [
        Param::Count,
        Param::Radius,
        Param::LookAtCamera,
        Param::RadiusPattern,
        Param::PhiPattern,
        Param::ThetaPattern,
        Param::Frequency,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Param::Count => "count",
            Param::Radius => "radius",
            Param::LookAtCamera => "lookAtCamera",
            Param::RadiusPattern => "radiusPattern",
            Param::PhiPattern => "phiPattern",
            Param::ThetaPattern => "thetaPattern",
            Param::Frequency => "frequency",
        }
    }
}

/// Live-tunable parameters. Every edit is clamped into range, so the
/// snapshot handed to the cloud is always valid.
#[derive(Clone, Debug)]
pub(crate) struct ControlPanel {
    config: CloudConfig,
    selected: usize,
    pub(crate) visible: bool,
}

impl ControlPanel {
    pub(crate) fn new(config: CloudConfig) -> Self {
        Self {
            config,
            selected: 0,
            visible: true,
        }
    }

    pub(crate) fn snapshot(&self) -> CloudConfig {
        self.config
    }

    pub(crate) fn selected(&self) -> Param {
        Param::ALL[self.selected]
    }

    pub(crate) fn select(&mut self, delta: i32) {
        let n = Param::ALL.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(n) as usize;
    }

    /// Nudge the selected parameter by `steps`; `fine` uses the small step
    /// where one exists. Booleans flip on any non-zero step.
    pub(crate) fn adjust(&mut self, steps: i32, fine: bool) {
        if steps == 0 {
            return;
        }
        let param = self.selected();
        let c = &mut self.config;
        match param {
            Param::Count => {
                let v = c.count as i64 + steps as i64;
                c.count = v.clamp(*COUNT_RANGE.start() as i64, *COUNT_RANGE.end() as i64) as usize;
            }
            Param::Radius => {
                c.radius = (c.radius + steps as f32).clamp(*RADIUS_RANGE.start(), *RADIUS_RANGE.end());
            }
            Param::Frequency => {
                let step = if fine { 0.01 } else { 0.1 };
                let v = c.frequency + step * steps as f32;
                // keep the value on the step grid
                let v = (v * 100.0).round() / 100.0;
                c.frequency = v.clamp(*FREQUENCY_RANGE.start(), *FREQUENCY_RANGE.end());
            }
            _ => self.toggle(),
        }
    }

    pub(crate) fn toggle(&mut self) {
        let param = self.selected();
        let c = &mut self.config;
        match param {
            Param::LookAtCamera => c.look_at_camera = !c.look_at_camera,
            Param::RadiusPattern => c.pattern.radius = !c.pattern.radius,
            Param::PhiPattern => c.pattern.phi = !c.pattern.phi,
            Param::ThetaPattern => c.pattern.theta = !c.pattern.theta,
            Param::Count | Param::Radius | Param::Frequency => {}
        }
    }

    pub(crate) fn value_text(&self, p: Param) -> String {
        let c = &self.config;
        let on = |b: bool| (if b { "[x]" } else { "[ ]" }).to_string();
        match p {
            Param::Count => format!("{}", c.count),
            Param::Radius => format!("{:.0}", c.radius),
            Param::LookAtCamera => on(c.look_at_camera),
            Param::RadiusPattern => on(c.pattern.radius),
            Param::PhiPattern => on(c.pattern.phi),
            Param::ThetaPattern => on(c.pattern.theta),
            Param::Frequency => format!("{:.2}", c.frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps() {
        let mut p = ControlPanel::new(CloudConfig::default());
        assert_eq!(p.selected(), Param::Count);
        p.select(-1);
        assert_eq!(p.selected(), Param::Frequency);
        p.select(2);
        assert_eq!(p.selected(), Param::Radius);
    }

    #[test]
    fn numeric_edits_are_clamped() {
        let mut p = ControlPanel::new(CloudConfig::default());
        p.adjust(-100, false);
        assert_eq!(p.snapshot().count, 2);
        p.adjust(100, false);
        assert_eq!(p.snapshot().count, 30);

        p.select(1);
        p.adjust(-1000, false);
        assert_eq!(p.snapshot().radius, 10.0);

        p.select(-2);
        assert_eq!(p.selected(), Param::Frequency);
        p.adjust(1, false);
        assert!((p.snapshot().frequency - 1.3).abs() < 1e-6);
        p.adjust(-1, true);
        assert!((p.snapshot().frequency - 1.29).abs() < 1e-6);
        p.adjust(-1000, false);
        assert!((p.snapshot().frequency - 0.1).abs() < 1e-6);
        assert!(p.snapshot().validate().is_ok());
    }

    #[test]
    fn booleans_toggle() {
        let mut p = ControlPanel::new(CloudConfig::default());
        p.select(2);
        p.toggle();
        assert!(!p.snapshot().look_at_camera);
        p.select(1);
        p.adjust(1, false);
        assert!(p.snapshot().pattern.radius);
        assert_eq!(p.value_text(Param::RadiusPattern), "[x]");
        p.select(1);
        p.toggle();
        p.select(1);
        p.toggle();
        assert!(p.snapshot().pattern.phi && p.snapshot().pattern.theta);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut p = ControlPanel::new(CloudConfig::default());
        let before = p.snapshot();
        p.adjust(3, false);
        assert_eq!(before.count, 12);
        assert_eq!(p.snapshot().count, 15);
        assert_eq!(p.value_text(Param::Frequency), "1.20");
    }
}
