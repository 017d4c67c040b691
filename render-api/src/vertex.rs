//! Vertex format shared by the penumbra builder and every output target.

use bytemuck::{Pod, Zeroable};

/// 2D position plus texture coordinate. Stride 16; position at offset 0, tex_coord at 8.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PenumbraVertex {
    pub position: [f32; 2],
    /// x: 0 on the umbra-adjacent edge, 1 on the lit edge. y: 1 at the hull point, 0 far out.
    pub tex_coord: [f32; 2],
}

impl PenumbraVertex {
    pub const fn new(position: [f32; 2], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }
}
