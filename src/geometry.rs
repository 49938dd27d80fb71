//! The static vertex table: eight disks, each drawn as a textured quad.

use std::sync::LazyLock;

use euclid::{Point2D, Rect, Size2D};

use crate::{layout::VertexLayout, space::ColorSpace};

/// Normalized device coordinates, `[-1, 1]` on both axes with y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipSpace;

/// Coordinates local to one disk, `[-1, 1]` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiskSpace;

/// A point in clip space.
pub type ClipPoint = Point2D<f32, ClipSpace>;

/// A rectangle in clip space.
pub type ClipRect = Rect<f32, ClipSpace>;

/// A point in disk space.
pub type DiskPoint = Point2D<f32, DiskSpace>;

/// A vertex as uploaded to the rendering surface.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable, VertexLayout,
)]
pub struct Vertex {
    /// Position in clip space.
    pub position: [f32; 2],
    /// Position on the disk, the corners of the quad are at `(±1, ±1)`.
    pub coord: [f32; 2],
    /// Render mode, luma overlay flag and two unused zeroes.
    pub param: [f32; 4],
}

impl Vertex {
    /// Create a vertex carrying the parameters of a disk.
    pub fn new(
        position: ClipPoint,
        coord: DiskPoint,
        space: ColorSpace,
        luma_overlay: bool,
    ) -> Self {
        Self {
            position: position.to_array(),
            coord: coord.to_array(),
            param: [
                space.render_mode(),
                if luma_overlay { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }

    /// The position as a typed point.
    pub fn position(&self) -> ClipPoint {
        ClipPoint::from(self.position)
    }

    /// The disk coordinate as a typed point.
    pub fn coord(&self) -> DiskPoint {
        DiskPoint::from(self.coord)
    }
}

/// Where a disk is drawn and what it shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// The quad the disk is inscribed in.
    pub rect: ClipRect,
    /// The color space rendered on the disk.
    pub space: ColorSpace,
    /// Show the luma error of the color space instead of its colors.
    pub luma_overlay: bool,
}

impl Placement {
    const fn new(x: f32, y: f32, space: ColorSpace, luma_overlay: bool) -> Self {
        Self {
            rect: Rect::new(Point2D::new(x, y), Size2D::new(0.5, 1.0)),
            space,
            luma_overlay,
        }
    }
}

/// Number of vertices used to draw one disk.
pub const VERTICES_PER_DISK: usize = 6;

/// The disks in upload order: one column per color space from left to right,
/// each with its luma error disk at the bottom and its color disk on top.
pub const PLACEMENTS: [Placement; 8] = [
    Placement::new(-1.0, -1.0, ColorSpace::BiconicHsl, true),
    Placement::new(-1.0, 0.0, ColorSpace::BiconicHsl, false),
    Placement::new(-0.5, -1.0, ColorSpace::SphericalHsl, true),
    Placement::new(-0.5, 0.0, ColorSpace::SphericalHsl, false),
    Placement::new(0.0, -1.0, ColorSpace::SimpleLch, true),
    Placement::new(0.0, 0.0, ColorSpace::SimpleLch, false),
    Placement::new(0.5, -1.0, ColorSpace::LumaLch, true),
    Placement::new(0.5, 0.0, ColorSpace::LumaLch, false),
];

/// Two counter-clockwise triangles covering the placement's rectangle, with
/// disk coordinates at the corners of `[-1, 1]²`.
pub fn quad(placement: &Placement) -> [Vertex; VERTICES_PER_DISK] {
    let Point2D { x, y, .. } = placement.rect.origin;
    let Size2D {
        width: w,
        height: h,
        ..
    } = placement.rect.size;

    let corner = |px: f32, py: f32, u: f32, v: f32| {
        Vertex::new(
            ClipPoint::new(px, py),
            DiskPoint::new(u, v),
            placement.space,
            placement.luma_overlay,
        )
    };

    [
        corner(x, y, -1.0, -1.0),
        corner(x + w, y, 1.0, -1.0),
        corner(x + w, y + h, 1.0, 1.0),
        corner(x, y, -1.0, -1.0),
        corner(x + w, y + h, 1.0, 1.0),
        corner(x, y + h, -1.0, 1.0),
    ]
}

/// Expand each placement into its quad, keeping the placement order.
pub fn build(placements: &[Placement]) -> Vec<Vertex> {
    placements.iter().flat_map(quad).collect()
}

static VERTICES: LazyLock<Vec<Vertex>> = LazyLock::new(|| {
    let vertices = build(&PLACEMENTS);
    tracing::debug!(
        vertices = vertices.len(),
        stride = Vertex::STRIDE,
        "built disk geometry"
    );
    vertices
});

/// The vertex table for [`PLACEMENTS`], built on first use.
pub fn vertices() -> &'static [Vertex] {
    &VERTICES
}

/// The vertex table as one contiguous buffer of bytes.
pub fn as_bytes() -> &'static [u8] {
    bytemuck::cast_slice(vertices())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_upload_format() {
        assert_eq!(Vertex::STRIDE, 32);
        assert_eq!(std::mem::size_of::<Vertex>(), 32);

        let offsets: Vec<_> = Vertex::ATTRIBUTES
            .iter()
            .map(|a| (a.name, a.components, a.byte_offset()))
            .collect();
        assert_eq!(
            offsets,
            vec![("position", 2, 0), ("coord", 2, 8), ("param", 4, 16)]
        );
    }

    #[test]
    fn eight_disks_of_six_vertices() {
        assert_eq!(vertices().len(), 48);
        assert_eq!(as_bytes().len(), 48 * 32);
        assert!(std::ptr::eq(vertices(), vertices()));
    }

    #[test]
    fn parameters_are_constant_per_disk() {
        let disks = vertices().chunks(VERTICES_PER_DISK);
        for (placement, disk) in PLACEMENTS.iter().zip(disks) {
            for vertex in disk {
                assert_eq!(
                    ColorSpace::from_render_mode(vertex.param[0] as crate::Component),
                    placement.space
                );
                assert_eq!(vertex.param[1] > 0.5, placement.luma_overlay);
                assert_eq!(&vertex.param[2..], &[0.0, 0.0]);
            }
        }
    }

    #[test]
    fn triangles_share_the_diagonal() {
        for disk in vertices().chunks(VERTICES_PER_DISK) {
            assert_eq!(disk[0], disk[3]);
            assert_eq!(disk[2], disk[4]);
        }
    }

    #[test]
    fn coords_cover_the_unit_square() {
        let disk = quad(&PLACEMENTS[5]);
        let coords: Vec<_> = disk.iter().map(|v| v.coord).collect();
        assert_eq!(
            coords,
            vec![
                [-1.0, -1.0],
                [1.0, -1.0],
                [1.0, 1.0],
                [-1.0, -1.0],
                [1.0, 1.0],
                [-1.0, 1.0]
            ]
        );

        let positions: Vec<_> = disk.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [0.0, 0.0],
                [0.5, 0.0],
                [0.5, 1.0],
                [0.0, 0.0],
                [0.5, 1.0],
                [0.0, 1.0]
            ]
        );
    }

    #[test]
    fn triangles_wind_counter_clockwise() {
        for triangle in vertices().chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| triangle[i].position());
            let area = (b - a).cross(c - a);
            assert!(area > 0.0);
        }
    }

    #[test]
    fn grid_layout() {
        for (i, placement) in PLACEMENTS.iter().enumerate() {
            let column = i / 2;
            assert_eq!(placement.space, ColorSpace::ALL[column]);
            assert_eq!(placement.rect.origin.x, -1.0 + 0.5 * column as f32);
            assert_eq!(placement.luma_overlay, i % 2 == 0);
        }
    }
}
