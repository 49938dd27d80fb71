//! The four ways the wheel turns a hue, a target luma and a chroma into an
//! RGB color.

use crate::{
    color::{LumaWeights, Rgb},
    math::mix,
    Component,
};

/// Color spaces drawn by the wheel, one per column of disks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorSpace {
    /// HSL with the classic double cone: chroma peaks at mid luma and falls
    /// off linearly towards black and white.
    BiconicHsl = 0,
    /// HSL with a rounded envelope: chroma follows `sin(luma * PI)`.
    SphericalHsl = 1,
    /// The zero-luma chromatic part of the hue, scaled by chroma and added to
    /// the target luma. Nothing limits chroma near black or white.
    SimpleLch = 2,
    /// Like [`ColorSpace::SimpleLch`] with the chromatic part scaled by
    /// `sin(luma * PI)`.
    LumaLch = 3,
}

impl ColorSpace {
    /// All color spaces, in column order.
    pub const ALL: [ColorSpace; 4] = [
        Self::BiconicHsl,
        Self::SphericalHsl,
        Self::SimpleLch,
        Self::LumaLch,
    ];

    /// Decode the render mode parameter carried by a vertex. Anything that
    /// is not below 2.5 (NaN included) selects [`ColorSpace::LumaLch`].
    pub fn from_render_mode(value: Component) -> Self {
        if value < 0.5 {
            Self::BiconicHsl
        } else if value < 1.5 {
            Self::SphericalHsl
        } else if value < 2.5 {
            Self::SimpleLch
        } else {
            Self::LumaLch
        }
    }

    /// The value stored in the render mode parameter of a vertex.
    pub const fn render_mode(&self) -> f32 {
        *self as u8 as f32
    }

    /// A label for captions.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BiconicHsl => "Biconic HSL",
            Self::SphericalHsl => "Spherical HSL",
            Self::SimpleLch => "Simple LCh",
            Self::LumaLch => "Luma LCh",
        }
    }

    /// Combine the saturated `color` of a hue with the target `luma` and
    /// `chroma`. The result is not clamped.
    pub fn to_rgb(
        &self,
        color: Rgb,
        luma: Component,
        chroma: Component,
        weights: &LumaWeights,
    ) -> Rgb {
        use std::f64::consts::PI;
        let envelope = (luma * PI as Component).sin();

        match self {
            Self::BiconicHsl => {
                let t = chroma * (1.0 - (2.0 * luma - 1.0).abs());
                mix_rgb(Rgb::splat(luma), color, t)
            }
            Self::SphericalHsl => mix_rgb(Rgb::splat(luma), color, chroma * envelope),
            Self::SimpleLch => (color - weights.luma(&color)) * chroma + luma,
            Self::LumaLch => (color - weights.luma(&color)) * chroma * envelope + luma,
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn mix_rgb(a: Rgb, b: Rgb, t: Component) -> Rgb {
    Rgb(mix(a.0, b.0, t), mix(a.1, b.1, t), mix(a.2, b.2, t))
}
