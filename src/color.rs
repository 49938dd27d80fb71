//! RGB triples, luma weights and the saturated hue ramp every color space
//! starts from.

use std::ops::{Add, Mul, Sub};

use crate::math::{clamp, modulo};

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all shading math is done in.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all shading math is done in.
pub type Component = f64;

/// Red, green and blue components of a color. Values are not limited to the
/// `[0, 1]` range until [`Rgb::clamp`] is called.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub Component, pub Component, pub Component);

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self(0.0, 0.0, 0.0);

    /// Return a gray with all three components set to `value`.
    pub const fn splat(value: Component) -> Self {
        Self(value, value, value)
    }

    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }

    /// The dot product of the two triples.
    pub fn dot(&self, other: &Self) -> Component {
        self.0 * other.0 + self.1 * other.1 + self.2 * other.2
    }

    /// Clip each component into `[lo, hi]`.
    pub fn clamp(&self, lo: Component, hi: Component) -> Self {
        self.map(|c| clamp(c, lo, hi))
    }

    /// The largest of the three components.
    pub fn max_component(&self) -> Component {
        self.0.max(self.1).max(self.2)
    }

    /// The smallest of the three components.
    pub fn min_component(&self) -> Component {
        self.0.min(self.1).min(self.2)
    }

    /// The components with an opaque alpha appended.
    pub fn to_rgba(&self) -> [Component; 4] {
        [self.0, self.1, self.2, 1.0]
    }
}

impl Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl Sub for Rgb {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, self.1 - rhs.1, self.2 - rhs.2)
    }
}

impl Add<Component> for Rgb {
    type Output = Self;

    fn add(self, rhs: Component) -> Self::Output {
        self.map(|c| c + rhs)
    }
}

impl Sub<Component> for Rgb {
    type Output = Self;

    fn sub(self, rhs: Component) -> Self::Output {
        self.map(|c| c - rhs)
    }
}

impl Mul<Component> for Rgb {
    type Output = Self;

    fn mul(self, rhs: Component) -> Self::Output {
        self.map(|c| c * rhs)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Weights used to derive the luma of an RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LumaWeights {
    /// Weight of the red component.
    pub red: Component,
    /// Weight of the green component.
    pub green: Component,
    /// Weight of the blue component.
    pub blue: Component,
}

impl LumaWeights {
    /// The weights the color wheel has always rendered with. The green weight
    /// differs from BT.709 in the third decimal.
    pub const SHIPPED: Self = Self {
        red: 0.2126,
        green: 0.7162,
        blue: 0.0722,
    };

    /// ITU-R BT.709 luma coefficients.
    /// <https://www.itu.int/rec/R-REC-BT.709>
    pub const BT709: Self = Self {
        red: 0.2126,
        green: 0.7152,
        blue: 0.0722,
    };

    /// The weights as an [`Rgb`] triple.
    pub const fn as_rgb(&self) -> Rgb {
        Rgb(self.red, self.green, self.blue)
    }

    /// The weighted luma of `rgb`.
    pub fn luma(&self, rgb: &Rgb) -> Component {
        rgb.dot(&self.as_rgb())
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::SHIPPED
    }
}

/// Fully saturated color for `hue`, measured in turns. Each channel is a
/// piecewise linear ramp over sixths of a turn, with phases 0, 2 and 4 for
/// red, green and blue.
pub fn rgb_from_hue(hue: Component) -> Rgb {
    let channel = |phase: Component| {
        let wrapped = modulo(6.0 * hue - phase, 6.0);
        clamp((wrapped - 3.0).abs() - 1.0, 0.0, 1.0)
    };

    Rgb(channel(0.0), channel(2.0), channel(4.0))
}
