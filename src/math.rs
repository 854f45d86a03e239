use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Vec3 {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) z: f32,
}

impl Vec3 {
    pub(crate) const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub(crate) const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub(crate) const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub(crate) const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub(crate) const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
    pub(crate) fn dot(self, o: Vec3) -> f32 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }
    pub(crate) fn cross(self, o: Vec3) -> Vec3 {
        Vec3::new(
            self.y * o.z - self.z * o.y,
            self.z * o.x - self.x * o.z,
            self.x * o.y - self.y * o.x,
        )
    }
    pub(crate) fn len(self) -> f32 {
        self.dot(self).sqrt()
    }
    pub(crate) fn norm(self) -> Vec3 {
        let l = self.len().max(1e-6);
        self * (1.0 / l)
    }
    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Polar angle `phi` is measured from +Y, azimuth `theta` around +Y starting at +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Spherical {
    pub(crate) radius: f32,
    pub(crate) phi: f32,
    pub(crate) theta: f32,
}

impl Spherical {
    pub(crate) fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    pub(crate) fn to_cartesian(self) -> Vec3 {
        let (sp, cp) = self.phi.sin_cos();
        let (st, ct) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sp * st,
            self.radius * cp,
            self.radius * sp * ct,
        )
    }
}

/// Orthonormal rotation stored as its three local axes in world space.
/// Local +Z is the facing direction (towards the viewer for a camera).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Basis {
    pub(crate) right: Vec3,
    pub(crate) up: Vec3,
    pub(crate) back: Vec3,
}

impl Basis {
    pub(crate) const IDENTITY: Basis = Basis {
        right: Vec3::X,
        up: Vec3::Y,
        back: Vec3::Z,
    };

    /// Rotation whose +Z axis points from `eye` towards `target`, rolled so +X stays horizontal.
    pub(crate) fn facing(eye: Vec3, target: Vec3) -> Basis {
        let back = (target - eye).norm();
        let mut right = Vec3::Y.cross(back);
        if right.len() < 1e-5 {
            // looking straight up or down
            right = Vec3::X;
        }
        let right = right.norm();
        let up = back.cross(right);
        Basis { right, up, back }
    }
}

pub(crate) fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
