//! The color wheel scene: all eight disks, with the hue turning over time.

use crate::{
    color::LumaWeights,
    geometry,
    shader::{Program, Uniforms},
    surface::{Context, Scene, SurfaceResult},
    Component,
};

/// Height of the wheel's surface divided by its width.
pub const ASPECT: f32 = 0.5;

/// Draws the eight disks of [`geometry::PLACEMENTS`]. `F` supplies the chroma
/// and is read once at the start of every frame.
pub struct ColorWheel<F> {
    chroma: F,
    program: Program,
}

/// Vertex range of the disk geometry in the uploaded buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelState {
    first: usize,
    count: usize,
}

impl<F: Fn() -> Component> ColorWheel<F> {
    /// Create a wheel that reads its chroma from `chroma`.
    pub fn new(chroma: F) -> Self {
        Self {
            chroma,
            program: Program::default(),
        }
    }

    /// Measure luma with `weights` instead of [`LumaWeights::SHIPPED`].
    pub fn with_weights(mut self, weights: LumaWeights) -> Self {
        self.program = Program::new(weights);
        self
    }
}

impl ColorWheel<fn() -> Component> {
    /// Create a wheel with a chroma that never changes.
    pub fn with_chroma(chroma: Component) -> ColorWheel<impl Fn() -> Component> {
        ColorWheel::new(move || chroma)
    }
}

impl<F: Fn() -> Component> Scene for ColorWheel<F> {
    type State = WheelState;

    fn setup(&self, ctx: &mut Context) -> SurfaceResult<WheelState> {
        let vertices = geometry::vertices();
        ctx.use_program(self.program);
        ctx.upload(vertices);
        Ok(WheelState {
            first: 0,
            count: vertices.len(),
        })
    }

    fn paint(
        &self,
        ctx: &mut Context,
        state: &mut WheelState,
        elapsed_seconds: Component,
    ) -> SurfaceResult<()> {
        let chroma = (self.chroma)();
        ctx.set_uniforms(Uniforms {
            seconds: elapsed_seconds,
            chroma,
        });
        ctx.clear();
        ctx.draw_triangles(state.first, state.count)
    }
}
