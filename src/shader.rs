//! The per-vertex and per-pixel programs of the color wheel.
//!
//! Both stages are pure functions of their inputs, so any number of pixels
//! can be shaded at the same time.

use crate::{
    color::{rgb_from_hue, LumaWeights, Rgb},
    geometry::Vertex,
    math::{hue_at, DISK_MARGIN},
    space::ColorSpace,
    Component,
};

/// Values shared by every pixel of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uniforms {
    /// Seconds since the surface was initialized.
    pub seconds: Component,
    /// Chroma of the wheel. Nominally in `[0, 1]`, but any value is accepted.
    pub chroma: Component,
}

/// Outputs of the vertex stage that are interpolated across a triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Varyings {
    /// Position on the disk.
    pub coord: [Component; 2],
    /// Render mode, luma overlay flag and two unused values.
    pub param: [Component; 4],
}

impl Varyings {
    /// Weighted sum of three sets of varyings, used to interpolate across a
    /// triangle with barycentric `weights`.
    pub fn blend(v: &[Varyings; 3], weights: [Component; 3]) -> Self {
        let mut out = Self::default();
        for (varyings, w) in v.iter().zip(weights) {
            for (o, c) in out.coord.iter_mut().zip(varyings.coord) {
                *o += c * w;
            }
            for (o, p) in out.param.iter_mut().zip(varyings.param) {
                *o += p * w;
            }
        }
        out
    }
}

/// Output of the fragment stage: an opaque RGBA color, or `None` when the
/// pixel is discarded.
pub type Fragment = Option<[Component; 4]>;

/// Pass the vertex position through to clip space and forward the disk
/// coordinate and parameters.
pub fn vertex_stage(vertex: &Vertex) -> ([f32; 4], Varyings) {
    let [x, y] = vertex.position;
    let varyings = Varyings {
        coord: vertex.coord.map(|c| c as Component),
        param: vertex.param.map(|p| p as Component),
    };
    ([x, y, 0.0, 1.0], varyings)
}

/// The color wheel program.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Program {
    /// Weights used to measure the luma of a color.
    pub weights: LumaWeights,
}

impl Program {
    /// Create a program that measures luma with the given weights.
    pub fn new(weights: LumaWeights) -> Self {
        Self { weights }
    }

    /// Shade one pixel. Returns `None` when the pixel is outside the disk and
    /// must not be written.
    pub fn fragment_stage(
        &self,
        varyings: &Varyings,
        uniforms: &Uniforms,
    ) -> Fragment {
        let [u, v] = varyings.coord;
        let [mode, overlay, ..] = varyings.param;

        self.shade(
            u,
            v,
            ColorSpace::from_render_mode(mode),
            overlay > 0.5,
            uniforms,
        )
        .map(|rgb| rgb.to_rgba())
    }

    /// Color of the point `(u, v)` on a disk rendered in `space`.
    pub fn shade(
        &self,
        u: Component,
        v: Component,
        space: ColorSpace,
        luma_overlay: bool,
        uniforms: &Uniforms,
    ) -> Option<Rgb> {
        let value = (u * u + v * v).sqrt() * DISK_MARGIN;
        if value > 1.0 {
            return None;
        }

        let luma = 1.0 - value;
        let hue = hue_at(u, v, uniforms.seconds);
        let color = rgb_from_hue(hue);

        let rgb = space
            .to_rgb(color, luma, uniforms.chroma, &self.weights)
            .clamp(0.0, 1.0);

        if luma_overlay {
            Some(luma_error(&rgb, luma, &self.weights))
        } else {
            Some(rgb)
        }
    }
}

/// Gray that shows how far the luma of `rgb` is from the `luma` it was meant
/// to have. No error is mid gray and an error of ±0.25 reaches white or
/// black. The result is not clamped.
pub fn luma_error(rgb: &Rgb, luma: Component, weights: &LumaWeights) -> Rgb {
    let error = weights.luma(rgb) - luma;
    Rgb::splat(2.0 * error + 0.5)
}

/// Shade a single pixel with the shipped luma weights. `render_mode` and
/// `luma_overlay` are decoded the same way as the vertex parameters.
pub fn shade(
    coord: [Component; 2],
    render_mode: Component,
    luma_overlay: Component,
    seconds: Component,
    chroma: Component,
) -> Option<Rgb> {
    let [u, v] = coord;
    Program::default().shade(
        u,
        v,
        ColorSpace::from_render_mode(render_mode),
        luma_overlay > 0.5,
        &Uniforms { seconds, chroma },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_component_eq, assert_rgb_eq, geometry};

    #[test]
    fn center_of_biconic_disk_is_white() {
        for chroma in [0.0, 0.5, 1.0] {
            for seconds in [0.0, 1.3, 7.0] {
                assert_eq!(
                    shade([0.0, 0.0], 0.0, 0.0, seconds, chroma),
                    Some(Rgb(1.0, 1.0, 1.0))
                );
            }
        }
    }

    #[test]
    fn simple_lch_clamps_overshoot() {
        // luma 0.5 lies at a distance of 0.5 / 1.1 along the red axis.
        let rgb = shade([0.5 / DISK_MARGIN, 0.0], 2.0, 0.0, 0.0, 1.0).unwrap();
        assert_rgb_eq!(rgb, Rgb(1.0, 0.2874, 0.2874));
    }

    #[test]
    fn outside_the_disk_is_discarded() {
        for mode in [0.0, 1.0, 2.0, 3.0] {
            for overlay in [0.0, 1.0] {
                assert!(shade([1.0, 0.0], mode, overlay, 0.0, 1.0).is_none());
                assert!(shade([0.0, -0.95], mode, overlay, 0.0, 1.0).is_none());
                assert!(shade([0.7, 0.7], mode, overlay, 0.0, 1.0).is_none());
                assert!(shade([0.9, 0.0], mode, overlay, 0.0, 1.0).is_some());
            }
        }
    }

    #[test]
    fn zero_error_is_mid_gray() {
        let weights = LumaWeights::BT709;
        let gray = Rgb::splat(0.3);
        assert_rgb_eq!(luma_error(&gray, weights.luma(&gray), &weights), Rgb::splat(0.5));
        assert_eq!(luma_error(&Rgb::BLACK, 0.0, &weights), Rgb::splat(0.5));
    }

    #[test]
    fn overlay_of_gray_disk_is_flat() {
        // Without chroma every color space produces the target luma.
        let program = Program::new(LumaWeights::BT709);
        let uniforms = Uniforms {
            seconds: 0.0,
            chroma: 0.0,
        };
        for space in ColorSpace::ALL {
            for (u, v) in [(0.0, 0.0), (0.3, -0.2), (-0.5, 0.5)] {
                let rgb = program.shade(u, v, space, true, &uniforms).unwrap();
                assert_rgb_eq!(rgb, Rgb::splat(0.5));
            }
        }
    }

    #[test]
    fn overlay_is_not_clamped() {
        // Pure blue measured against the luma of white.
        let error = luma_error(&Rgb(0.0, 0.0, 1.0), 1.0, &LumaWeights::SHIPPED);
        assert_component_eq!(error.0, 2.0 * (0.0722 - 1.0) + 0.5);
        assert!(error.0 < 0.0);
    }

    #[test]
    fn hue_rotates_with_time() {
        let u = 0.5;
        let at = |seconds| shade([u, 0.0], 0.0, 0.0, seconds, 1.0).unwrap();
        assert_rgb_eq!(at(0.0), at(5.0));
        assert_ne!(at(0.0), at(2.5));
    }

    #[test]
    fn stages_agree_with_shade() {
        let uniforms = Uniforms {
            seconds: 1.25,
            chroma: 0.8,
        };
        let program = Program::default();

        for vertex in geometry::vertices() {
            let (position, varyings) = vertex_stage(vertex);
            assert_eq!(position, [vertex.position[0], vertex.position[1], 0.0, 1.0]);

            // Corners are outside the disk.
            assert!(program.fragment_stage(&varyings, &uniforms).is_none());

            let mut inside = varyings;
            inside.coord = inside.coord.map(|c| c * 0.25);
            let expected = shade(
                inside.coord,
                inside.param[0],
                inside.param[1],
                uniforms.seconds,
                uniforms.chroma,
            )
            .map(|rgb| rgb.to_rgba());
            assert_eq!(program.fragment_stage(&inside, &uniforms), expected);
            assert_eq!(expected.map(|c| c[3]), Some(1.0));
        }
    }

    #[test]
    fn blend_interpolates() {
        let a = Varyings {
            coord: [0.0, 0.0],
            param: [2.0, 1.0, 0.0, 0.0],
        };
        let b = Varyings {
            coord: [1.0, 0.0],
            param: [2.0, 1.0, 0.0, 0.0],
        };
        let c = Varyings {
            coord: [0.0, 1.0],
            param: [2.0, 1.0, 0.0, 0.0],
        };
        let mid = Varyings::blend(&[a, b, c], [0.5, 0.25, 0.25]);
        assert_eq!(mid.coord, [0.25, 0.25]);
        assert_eq!(mid.param, [2.0, 1.0, 0.0, 0.0]);
    }
}
