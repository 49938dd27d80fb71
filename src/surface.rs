//! A rendering surface that drives a [`Scene`]: it creates the drawing
//! context, calls [`Scene::setup`] once and [`Scene::paint`] for every frame.

use thiserror::Error;

use crate::{
    geometry::Vertex,
    raster::Canvas,
    shader::{Program, Uniforms},
    Component,
};

/// Errors reported by the rendering surface.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// The surface would have no pixels.
    #[error("surface size {width}x{height} has no pixels")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Height derived from the width and aspect.
        height: u32,
    },
    /// The aspect ratio is not a positive finite number.
    #[error("aspect ratio {0} is not a positive number")]
    InvalidAspect(f32),
    /// A draw was issued before any vertices were uploaded.
    #[error("no vertex buffer has been uploaded")]
    NoVertexBuffer,
    /// A draw referenced vertices past the end of the buffer.
    #[error("drawing {count} vertices from {first} overruns a buffer of {len}")]
    DrawOutOfRange {
        /// First vertex of the draw.
        first: usize,
        /// Number of vertices drawn.
        count: usize,
        /// Number of vertices in the buffer.
        len: usize,
    },
}

/// Result type alias for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// How the surface is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height divided by width.
    pub aspect: f32,
    /// Color of pixels no fragment was written to.
    pub clear: [u8; 4],
}

impl SurfaceConfig {
    /// Create a configuration with a transparent clear color.
    pub fn new(width: u32, aspect: f32) -> Self {
        Self {
            width,
            aspect,
            clear: [0, 0, 0, 0],
        }
    }

    /// Height in pixels, derived from the width and aspect.
    pub fn height(&self) -> u32 {
        (self.width as f32 * self.aspect).round() as u32
    }

    fn validate(&self) -> SurfaceResult<()> {
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(SurfaceError::InvalidAspect(self.aspect));
        }
        let height = self.height();
        if self.width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize {
                width: self.width,
                height,
            });
        }
        Ok(())
    }
}

/// Drawing state handed to a [`Scene`].
#[derive(Debug)]
pub struct Context {
    canvas: Canvas,
    clear: [u8; 4],
    vertices: Option<Vec<Vertex>>,
    uniforms: Uniforms,
    program: Program,
}

impl Context {
    fn new(config: &SurfaceConfig) -> Self {
        Self {
            canvas: Canvas::new(config.width, config.height(), config.clear),
            clear: config.clear,
            vertices: None,
            uniforms: Uniforms::default(),
            program: Program::default(),
        }
    }

    /// Replace the program used to shade pixels.
    pub fn use_program(&mut self, program: Program) {
        self.program = program;
    }

    /// The program used to shade pixels.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Copy `vertices` into the vertex buffer, replacing what was there.
    pub fn upload(&mut self, vertices: &[Vertex]) {
        tracing::debug!(vertices = vertices.len(), "uploading vertex buffer");
        self.vertices = Some(vertices.to_vec());
    }

    /// Number of vertices in the vertex buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.as_ref().map_or(0, Vec::len)
    }

    /// Set the values shared by every pixel of the following draws.
    pub fn set_uniforms(&mut self, uniforms: Uniforms) {
        self.uniforms = uniforms;
    }

    /// The values shared by every pixel.
    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    /// Reset every pixel to the clear color.
    pub fn clear(&mut self) {
        self.canvas.fill(self.clear);
    }

    /// Draw `count` vertices from the vertex buffer starting at `first` as a
    /// list of triangles.
    pub fn draw_triangles(&mut self, first: usize, count: usize) -> SurfaceResult<()> {
        let vertices = self.vertices.as_deref().ok_or(SurfaceError::NoVertexBuffer)?;
        let range = first
            .checked_add(count)
            .filter(|end| *end <= vertices.len())
            .map(|end| first..end)
            .ok_or(SurfaceError::DrawOutOfRange {
                first,
                count,
                len: vertices.len(),
            })?;

        self.canvas
            .draw_triangles(&vertices[range], &self.program, &self.uniforms);
        Ok(())
    }

    /// The pixels drawn so far.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

/// Something drawn on a [`Surface`].
pub trait Scene {
    /// Values created in [`Scene::setup`] and kept for every frame.
    type State;

    /// Called once, right after the context is created.
    fn setup(&self, ctx: &mut Context) -> SurfaceResult<Self::State>;

    /// Called once per frame with the seconds elapsed since the surface was
    /// initialized.
    fn paint(
        &self,
        ctx: &mut Context,
        state: &mut Self::State,
        elapsed_seconds: Component,
    ) -> SurfaceResult<()>;
}

/// A canvas driven by a [`Scene`].
pub struct Surface<S: Scene> {
    scene: S,
    state: S::State,
    context: Context,
    last_elapsed: Component,
}

impl<S: Scene> Surface<S> {
    /// Create the drawing context for `config` and set up `scene` on it.
    pub fn initialize(config: SurfaceConfig, scene: S) -> SurfaceResult<Self> {
        config.validate()?;

        let mut context = Context::new(&config);
        let state = scene.setup(&mut context)?;
        tracing::debug!(
            width = config.width,
            height = config.height(),
            "surface initialized"
        );

        Ok(Self {
            scene,
            state,
            context,
            last_elapsed: 0.0,
        })
    }

    /// Paint one frame. Elapsed time never runs backwards: an earlier time
    /// than the previous frame's is replaced with the previous time.
    pub fn frame(&mut self, elapsed_seconds: Component) -> SurfaceResult<&Canvas> {
        let elapsed = if elapsed_seconds < self.last_elapsed || elapsed_seconds.is_nan() {
            tracing::warn!(
                elapsed = elapsed_seconds,
                previous = self.last_elapsed,
                "elapsed time went backwards, holding the previous time"
            );
            self.last_elapsed
        } else {
            elapsed_seconds
        };
        self.last_elapsed = elapsed;

        tracing::trace!(elapsed, "painting frame");
        self.scene
            .paint(&mut self.context, &mut self.state, elapsed)?;
        Ok(self.context.canvas())
    }

    /// The drawing context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The scene drawn on this surface.
    pub fn scene(&self) -> &S {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;

    /// Records the times it was painted at.
    struct Recorder;

    impl Scene for Recorder {
        type State = Vec<Component>;

        fn setup(&self, ctx: &mut Context) -> SurfaceResult<Self::State> {
            ctx.upload(&geometry::quad(&geometry::PLACEMENTS[0]));
            Ok(vec![])
        }

        fn paint(
            &self,
            ctx: &mut Context,
            state: &mut Self::State,
            elapsed_seconds: Component,
        ) -> SurfaceResult<()> {
            state.push(elapsed_seconds);
            ctx.draw_triangles(0, ctx.vertex_count())
        }
    }

    #[test]
    fn config_validation() {
        assert_eq!(SurfaceConfig::new(100, 0.5).height(), 50);
        assert_eq!(
            SurfaceConfig::new(0, 0.5).validate(),
            Err(SurfaceError::InvalidSize {
                width: 0,
                height: 0
            })
        );
        assert_eq!(
            SurfaceConfig::new(100, -1.0).validate(),
            Err(SurfaceError::InvalidAspect(-1.0))
        );
        assert!(SurfaceConfig::new(1, 0.1).validate().is_err());
        assert!(SurfaceConfig::new(100, 0.5).validate().is_ok());
    }

    #[test]
    fn frames_never_run_backwards() {
        let mut surface = Surface::initialize(SurfaceConfig::new(20, 0.5), Recorder).unwrap();
        surface.frame(0.5).unwrap();
        surface.frame(0.25).unwrap();
        surface.frame(Component::NAN).unwrap();
        surface.frame(1.0).unwrap();
        assert_eq!(surface.state, vec![0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn draws_check_the_buffer() {
        let mut ctx = Context::new(&SurfaceConfig::new(8, 1.0));
        assert_eq!(ctx.draw_triangles(0, 3), Err(SurfaceError::NoVertexBuffer));

        ctx.upload(geometry::vertices());
        assert_eq!(ctx.vertex_count(), 48);
        assert!(ctx.draw_triangles(42, 6).is_ok());
        assert_eq!(
            ctx.draw_triangles(42, 7),
            Err(SurfaceError::DrawOutOfRange {
                first: 42,
                count: 7,
                len: 48
            })
        );
        assert!(ctx.draw_triangles(usize::MAX, 2).is_err());
    }

    #[test]
    fn clear_resets_pixels() {
        let mut config = SurfaceConfig::new(8, 1.0);
        config.clear = [9, 9, 9, 9];
        let mut ctx = Context::new(&config);
        ctx.upload(geometry::vertices());
        ctx.set_uniforms(Uniforms {
            seconds: 0.0,
            chroma: 1.0,
        });
        ctx.draw_triangles(0, 48).unwrap();
        assert!(ctx.canvas().as_raw().chunks(4).any(|p| p != [9, 9, 9, 9]));
        ctx.clear();
        assert!(ctx.canvas().as_raw().chunks(4).all(|p| p == [9, 9, 9, 9]));
    }

    #[test]
    fn errors_are_readable() {
        assert_eq!(
            SurfaceError::DrawOutOfRange {
                first: 1,
                count: 2,
                len: 2
            }
            .to_string(),
            "drawing 2 vertices from 1 overruns a buffer of 2"
        );
    }
}
