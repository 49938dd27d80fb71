//! Software rasterization of triangle lists into an RGBA canvas.

use euclid::{Point2D, Transform2D, Vector2D};
use rayon::prelude::*;

use crate::{
    geometry::{ClipPoint, ClipSpace, Vertex},
    shader::{vertex_stage, Program, Uniforms, Varyings},
    Component,
};

/// Pixel coordinates, origin at the top left with y down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSpace;

type PixelPoint = Point2D<f32, PixelSpace>;

const CHANNELS: usize = 4;

/// An 8-bit RGBA image that triangles are drawn into.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a canvas with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: fill.repeat(len),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel at column `x` and row `y`, counted from the top left.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[start..start + CHANNELS]);
        Some(out)
    }

    /// Row major RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the canvas and return its row major RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Set every pixel to `fill`.
    pub fn fill(&mut self, fill: [u8; 4]) {
        self.pixels
            .chunks_exact_mut(CHANNELS)
            .for_each(|pixel| pixel.copy_from_slice(&fill));
    }

    fn to_pixels(&self) -> Transform2D<f32, ClipSpace, PixelSpace> {
        let w = self.width as f32;
        let h = self.height as f32;
        Transform2D::scale(w / 2.0, -h / 2.0).then_translate(Vector2D::new(w / 2.0, h / 2.0))
    }

    /// Draw `vertices` as a list of independent triangles. A trailing partial
    /// triangle is ignored.
    pub fn draw_triangles(
        &mut self,
        vertices: &[Vertex],
        program: &Program,
        uniforms: &Uniforms,
    ) {
        let to_pixels = self.to_pixels();
        for triangle in vertices.chunks_exact(3) {
            let mut corners = [PixelPoint::origin(); 3];
            let mut varyings = [Varyings::default(); 3];
            for (i, vertex) in triangle.iter().enumerate() {
                let ([x, y, _, _], v) = vertex_stage(vertex);
                corners[i] = to_pixels.transform_point(ClipPoint::new(x, y));
                varyings[i] = v;
            }
            self.fill_triangle(&corners, &varyings, program, uniforms);
        }
    }

    fn fill_triangle(
        &mut self,
        corners: &[PixelPoint; 3],
        varyings: &[Varyings; 3],
        program: &Program,
        uniforms: &Uniforms,
    ) {
        let [a, b, c] = *corners;
        let area = edge(a, b, c);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as usize).min(self.width as usize);
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
        let max_y = (a.y.max(b.y).max(c.y).ceil() as usize).min(self.height as usize);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        let row_len = self.width as usize * CHANNELS;
        self.pixels
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .skip(min_y)
            .take(max_y - min_y)
            .for_each(|(y, row)| {
                for x in min_x..max_x {
                    let p = PixelPoint::new(x as f32 + 0.5, y as f32 + 0.5);
                    let weights = [edge(b, c, p), edge(c, a, p), edge(a, b, p)].map(|w| w / area);
                    if weights.iter().any(|w| *w < 0.0) {
                        continue;
                    }

                    let interpolated = Varyings::blend(varyings, weights.map(|w| w as Component));
                    if let Some(rgba) = program.fragment_stage(&interpolated, uniforms) {
                        let start = x * CHANNELS;
                        row[start..start + CHANNELS].copy_from_slice(&quantize(rgba));
                    }
                }
            });
    }
}

/// Twice the signed area of the triangle `a`, `b`, `p`.
fn edge(a: PixelPoint, b: PixelPoint, p: PixelPoint) -> f32 {
    (b - a).cross(p - a)
}

fn quantize(rgba: [Component; 4]) -> [u8; 4] {
    rgba.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
