//! chromawheel draws animated color wheels that compare how four color spaces
//! trade chroma for luma: biconic HSL, spherical HSL, a simple LCh and an LCh
//! with its chroma shaped by luma. Every color space gets a second disk that
//! shows the luma error of its colors.
//!
//! ```rust
//! use chromawheel::{ColorWheel, Surface, SurfaceConfig, ASPECT};
//!
//! let mut surface =
//!     Surface::initialize(SurfaceConfig::new(256, ASPECT), ColorWheel::with_chroma(0.8))
//!         .unwrap();
//! let canvas = surface.frame(1.5).unwrap();
//! assert_eq!(canvas.height(), 128);
//! ```

#![deny(missing_docs)]

extern crate self as chromawheel;

mod color;
pub mod geometry;
pub mod layout;
pub mod math;
mod raster;
pub mod shader;
mod space;
mod surface;
mod wheel;

pub use color::{rgb_from_hue, Component, LumaWeights, Rgb};
pub use geometry::{Placement, Vertex, PLACEMENTS};
pub use raster::{Canvas, PixelSpace};
pub use shader::{shade, Program, Uniforms};
pub use space::ColorSpace;
pub use surface::{Context, Scene, Surface, SurfaceConfig, SurfaceError, SurfaceResult};
pub use wheel::{ColorWheel, WheelState, ASPECT};
