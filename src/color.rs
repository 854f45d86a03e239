use crate::math::{clamp01, lerp};
use crossterm::style::Color;
use rand::Rng;

/// Label highlight while the pointer is over it (#fa2720).
pub(crate) const HOVER: Rgb = Rgb::new(0xfa, 0x27, 0x20);
/// Fog and background tone (#202025).
pub(crate) const FOG: Rgb = Rgb::new(0x20, 0x20, 0x25);

/// 8-bit sRGB, the way colors are written down and sent to the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    pub(crate) fn to_color(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
    pub(crate) fn to_linear(self) -> LinearRgb {
        LinearRgb {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
        }
    }
}

/// Each channel in `55..=254`, so words never sink into the dark background.
pub(crate) fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.gen_range(55..=254),
        rng.gen_range(55..=254),
        rng.gen_range(55..=254),
    )
}

/// Linear-light color, the space label colors are interpolated in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LinearRgb {
    pub(crate) r: f32,
    pub(crate) g: f32,
    pub(crate) b: f32,
}

impl LinearRgb {
    pub(crate) const WHITE: LinearRgb = LinearRgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub(crate) fn lerp(self, other: LinearRgb, t: f32) -> LinearRgb {
        LinearRgb {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
        }
    }

    pub(crate) fn to_srgb(self) -> Rgb {
        Rgb::new(
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        )
    }
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> u8 {
    let c = clamp01(c);
    let s = if c < 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(0.416_666_66) - 0.055
    };
    (s * 255.0).round() as u8
}
