use crate::math::{Basis, Spherical, Vec3};
use std::f32::consts::PI;

/// Terminal cells are roughly twice as tall as they are wide.
pub(crate) const CELL_ASPECT: f32 = 2.0;

const MIN_DISTANCE: f32 = 8.0;
const MAX_DISTANCE: f32 = 400.0;
const PHI_EPS: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Projected {
    pub(crate) x: f32,
    pub(crate) y: f32,
    /// Distance along the view axis.
    pub(crate) depth: f32,
}

/// Perspective camera orbiting a target, with damped rotation.
#[derive(Clone, Debug)]
pub(crate) struct OrbitCamera {
    target: Vec3,
    orbit: Spherical,
    pub(crate) fov_y: f32,
    pub(crate) near: f32,
    damping: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitCamera {
    pub(crate) fn looking_at_origin(position: Vec3, fov_deg: f32, damping: f32) -> Self {
        let radius = position.len();
        let phi = (position.y / radius.max(1e-6)).clamp(-1.0, 1.0).acos();
        let theta = position.x.atan2(position.z);
        Self {
            target: Vec3::ZERO,
            orbit: Spherical::new(radius, phi, theta),
            fov_y: fov_deg.to_radians(),
            near: 0.1,
            damping,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    pub(crate) fn position(&self) -> Vec3 {
        self.target + self.orbit.to_cartesian()
    }

    pub(crate) fn rotation(&self) -> Basis {
        Basis::facing(self.target, self.position())
    }

    pub(crate) fn distance(&self) -> f32 {
        self.orbit.radius
    }

    /// Queue an orbit; positive `left` swings the camera to its left.
    pub(crate) fn rotate(&mut self, left: f32, up: f32) {
        self.delta_theta -= left;
        self.delta_phi -= up;
    }

    /// Rotation for a pointer drag of `dx, dy` cells in a view `rows` tall.
    pub(crate) fn drag(&mut self, dx: i32, dy: i32, rows: u16) {
        let rows = rows.max(1) as f32;
        let left = 2.0 * PI * dx as f32 / (rows * CELL_ASPECT);
        let up = 2.0 * PI * dy as f32 / rows;
        self.rotate(left, up);
    }

    pub(crate) fn dolly(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Advance one frame of damped motion.
    pub(crate) fn update(&mut self) {
        self.orbit.theta += self.delta_theta * self.damping;
        self.orbit.phi = (self.orbit.phi + self.delta_phi * self.damping).clamp(PHI_EPS, PI - PHI_EPS);
        self.orbit.radius = (self.orbit.radius * self.scale).clamp(MIN_DISTANCE, MAX_DISTANCE);

        self.delta_theta *= 1.0 - self.damping;
        self.delta_phi *= 1.0 - self.damping;
        self.scale = 1.0;
    }

    /// Project a world point into a viewport `cols` x `rows` cells, origin top-left.
    pub(crate) fn project(&self, p: Vec3, cols: u16, rows: u16) -> Option<Projected> {
        let basis = self.rotation();
        let d = p - self.position();
        let depth = -d.dot(basis.back);
        if !(depth > self.near) {
            return None;
        }
        let f = 0.5 * rows as f32 / (self.fov_y * 0.5).tan();
        let x = cols as f32 * 0.5 + d.dot(basis.right) * f / depth * CELL_ASPECT;
        let y = rows as f32 * 0.5 - d.dot(basis.up) * f / depth;
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        Some(Projected { x, y, depth })
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at_origin(Vec3::new(0.0, 40.0, 40.0), 75.0, 0.05)
    }
}
