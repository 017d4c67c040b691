//! Output target for penumbra geometry. The builder hands one light's fins to it per frame;
//! GPU-backed targets upload, [`MeshBuffers`] keeps a CPU copy.

use crate::PenumbraVertex;

#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("penumbra target: {0} buffer is empty")]
    EmptyGeometry(&'static str),
    #[error("penumbra target: {count} elements of {stride} bytes overflow the buffer size")]
    SizeOverflow { count: usize, stride: usize },
}

/// Receives the combined vertex/index buffers of one light.
pub trait PenumbraTarget {
    /// Replace the stored geometry. `indices` is a triangle list into `vertices`.
    fn set_geometry(&mut self, vertices: &[PenumbraVertex], indices: &[u32]) -> Result<(), TargetError>;

    /// Whether the light produced any penumbra this frame.
    fn set_has_penumbra(&mut self, has_penumbra: bool);
}

/// CPU-side target: keeps the last geometry it was given.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
    pub vertices: Vec<PenumbraVertex>,
    pub indices: Vec<u32>,
    pub has_penumbra: bool,
}

impl MeshBuffers {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl PenumbraTarget for MeshBuffers {
    fn set_geometry(&mut self, vertices: &[PenumbraVertex], indices: &[u32]) -> Result<(), TargetError> {
        if vertices.is_empty() {
            return Err(TargetError::EmptyGeometry("vertex"));
        }
        if indices.is_empty() {
            return Err(TargetError::EmptyGeometry("index"));
        }
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.indices.clear();
        self.indices.extend_from_slice(indices);
        Ok(())
    }

    fn set_has_penumbra(&mut self, has_penumbra: bool) {
        self.has_penumbra = has_penumbra;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_buffers_replace_geometry() {
        let mut target = MeshBuffers::default();
        let v = [PenumbraVertex::new([0.0, 0.0], [0.0, 1.0]); 3];
        target.set_geometry(&v, &[0, 1, 2]).unwrap();
        target.set_geometry(&v, &[2, 1, 0]).unwrap();
        assert_eq!(target.vertices.len(), 3);
        assert_eq!(target.indices, vec![2, 1, 0]);
        assert_eq!(target.triangle_count(), 1);
    }

    #[test]
    fn mesh_buffers_reject_empty() {
        let mut target = MeshBuffers::default();
        assert!(matches!(target.set_geometry(&[], &[0]), Err(TargetError::EmptyGeometry("vertex"))));
    }
}
