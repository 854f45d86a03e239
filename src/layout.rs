//! Placement of labels on the sphere.
//!
//! Labels are addressed by a flat index. The cloud is `count` rings of
//! `count` labels each; ring `row` sits at polar angle `row * PI / (count + 1)`
//! and its labels are spread evenly around the azimuth.

use crate::math::{Spherical, Vec3};
use std::f32::consts::PI;

/// Time-driven deformations, one per spherical coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pattern {
    pub(crate) radius: bool,
    pub(crate) phi: bool,
    pub(crate) theta: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LayoutParams {
    pub(crate) count: usize,
    pub(crate) radius: f32,
    pub(crate) frequency: f32,
    pub(crate) pattern: Pattern,
}

/// One-based `(row, col)`, both in `1..=count`. `count` must be non-zero.
pub(crate) fn grid_cell(index: usize, count: usize) -> (usize, usize) {
    (index / count + 1, index % count + 1)
}

fn spans(count: usize) -> (f32, f32) {
    let n = count as f32;
    (PI / (n + 1.0), 2.0 * PI / n)
}

/// Where a label starts when the cloud is built. Uses the zero-based ring
/// column, unlike [`animated`], so the first animated frame jumps by one
/// azimuth step.
pub(crate) fn initial(index: usize, count: usize, radius: f32) -> Spherical {
    let (phi_span, theta_span) = spans(count);
    let (row, col) = grid_cell(index, count);
    Spherical::new(radius, phi_span * row as f32, theta_span * (col - 1) as f32)
}

/// Spherical coordinates of a label at clock time `time` (seconds).
///
/// Under `pattern.phi` the polar angle divides by `sin(time * frequency / 2)`,
/// which passes through zero; the result is then unbounded or NaN and callers
/// must be ready to skip it.
pub(crate) fn animated(index: usize, p: &LayoutParams, time: f32) -> Spherical {
    let (phi_span, theta_span) = spans(p.count);
    let (row, col) = grid_cell(index, p.count);
    let (row, col) = (row as f32, col as f32);
    let tf = time * p.frequency;

    let radius = if p.pattern.radius {
        p.radius * (time.sin().abs() + 0.7)
    } else {
        p.radius
    };
    let phi = if p.pattern.phi {
        phi_span * (row / (tf / 2.0).sin() / 1.2)
    } else {
        phi_span * row
    };
    let theta = if p.pattern.theta {
        theta_span * (col * (tf.sin() * 4.0 / col + 1.0))
    } else {
        theta_span * (col * (tf / col + 1.0))
    };

    Spherical::new(radius, phi, theta)
}

pub(crate) fn position(index: usize, p: &LayoutParams, time: f32) -> Vec3 {
    animated(index, p, time).to_cartesian()
}
