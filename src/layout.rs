//! Description of how a vertex is laid out in an interleaved buffer.

pub use chromawheel_macros::VertexLayout;

/// One attribute of an interleaved vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Name of the field the attribute is read from.
    pub name: &'static str,
    /// Number of `f32` components in the attribute.
    pub components: usize,
    /// Offset from the start of the vertex, in `f32`s.
    pub offset: usize,
}

impl VertexAttribute {
    /// Offset from the start of the vertex, in bytes.
    pub const fn byte_offset(&self) -> usize {
        self.offset * std::mem::size_of::<f32>()
    }
}

/// Implemented by vertex types that can be uploaded as an interleaved
/// buffer. Use `#[derive(VertexLayout)]` rather than implementing it by hand.
pub trait VertexLayout: bytemuck::Pod {
    /// Distance between consecutive vertices, in bytes.
    const STRIDE: usize;

    /// Attributes in the order they appear in the vertex.
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Find an attribute by field name.
    fn attribute(name: &str) -> Option<&'static VertexAttribute> {
        Self::ATTRIBUTES.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, VertexLayout)]
    struct Sample {
        a: [f32; 3],
        b: [f32; 1],
    }

    #[test]
    fn derived_layout() {
        assert_eq!(Sample::STRIDE, 16);
        assert_eq!(
            Sample::ATTRIBUTES,
            &[
                VertexAttribute {
                    name: "a",
                    components: 3,
                    offset: 0,
                },
                VertexAttribute {
                    name: "b",
                    components: 1,
                    offset: 3,
                },
            ]
        );
        assert_eq!(Sample::attribute("b").map(|a| a.byte_offset()), Some(12));
        assert!(Sample::attribute("c").is_none());
    }
}
