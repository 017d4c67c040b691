//! GPU side of a light's penumbra: vertex/index buffers grown on demand and rewritten each
//! frame with `queue.write_buffer`. Drawing is up to the host pipeline.

use std::sync::Arc;

use render_api::{PenumbraTarget, PenumbraVertex, TargetError};

const MIN_BUFFER_SIZE: u64 = 256;

static PENUMBRA_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x2 },
    wgpu::VertexAttribute { offset: 8, shader_location: 1, format: wgpu::VertexFormat::Float32x2 },
];

/// Vertex buffer layout for [`PenumbraVertex`]: position @0, tex_coord @1, stride 16.
pub fn penumbra_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PenumbraVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &PENUMBRA_ATTRIBUTES,
    }
}

/// Buffer size for `needed` bytes: reuse `current` when it fits, else the next power of two.
fn grown_capacity(current: u64, needed: u64) -> u64 {
    if needed <= current {
        current
    } else {
        needed.max(MIN_BUFFER_SIZE).checked_next_power_of_two().unwrap_or(needed)
    }
}

fn byte_len<T>(items: &[T]) -> Result<u64, TargetError> {
    let stride = std::mem::size_of::<T>();
    items
        .len()
        .checked_mul(stride)
        .and_then(|n| u64::try_from(n).ok())
        .ok_or(TargetError::SizeOverflow { count: items.len(), stride })
}

#[derive(Default)]
pub struct PenumbraVao {
    vertex_buf: Option<Arc<wgpu::Buffer>>,
    index_buf: Option<Arc<wgpu::Buffer>>,
    vertex_count: u32,
    index_count: u32,
}

impl PenumbraVao {
    pub fn vertex_buffer(&self) -> Option<&Arc<wgpu::Buffer>> { self.vertex_buf.as_ref() }
    pub fn index_buffer(&self) -> Option<&Arc<wgpu::Buffer>> { self.index_buf.as_ref() }
    pub fn vertex_count(&self) -> u32 { self.vertex_count }
    pub fn index_count(&self) -> u32 { self.index_count }

    pub fn set_vertices(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[PenumbraVertex]) -> Result<(), TargetError> {
        if vertices.is_empty() {
            return Err(TargetError::EmptyGeometry("vertex"));
        }
        let count = u32::try_from(vertices.len())
            .map_err(|_| TargetError::SizeOverflow { count: vertices.len(), stride: std::mem::size_of::<PenumbraVertex>() })?;
        let size = byte_len(vertices)?;
        let buf = Self::ensure_buffer(&mut self.vertex_buf, device, size, "penumbra_vertex", wgpu::BufferUsages::VERTEX);
        queue.write_buffer(&buf, 0, bytemuck::cast_slice(vertices));
        self.vertex_count = count;
        Ok(())
    }

    pub fn set_indices(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, indices: &[u32]) -> Result<(), TargetError> {
        if indices.is_empty() {
            return Err(TargetError::EmptyGeometry("index"));
        }
        let count = u32::try_from(indices.len())
            .map_err(|_| TargetError::SizeOverflow { count: indices.len(), stride: std::mem::size_of::<u32>() })?;
        let size = byte_len(indices)?;
        let buf = Self::ensure_buffer(&mut self.index_buf, device, size, "penumbra_index", wgpu::BufferUsages::INDEX);
        queue.write_buffer(&buf, 0, bytemuck::cast_slice(indices));
        self.index_count = count;
        Ok(())
    }

    fn ensure_buffer(
        slot: &mut Option<Arc<wgpu::Buffer>>,
        device: &wgpu::Device,
        needed: u64,
        label: &'static str,
        usage: wgpu::BufferUsages,
    ) -> Arc<wgpu::Buffer> {
        let current = slot.as_ref().map_or(0, |b| b.size());
        let size = grown_capacity(current, needed);
        match slot {
            Some(buf) if size == current => Arc::clone(buf),
            _ => {
                log::debug!("penumbra: allocating {label} buffer of {size} bytes");
                let buf = Arc::new(device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(label),
                    size,
                    usage: usage | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                }));
                *slot = Some(Arc::clone(&buf));
                buf
            }
        }
    }
}

/// Per-light GPU resources; the penumbra builder's output target.
pub struct LightVaos {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    pub has_penumbra: bool,
    pub penumbra_vao: PenumbraVao,
}

impl LightVaos {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        Self { device, queue, has_penumbra: false, penumbra_vao: PenumbraVao::default() }
    }
}

impl PenumbraTarget for LightVaos {
    fn set_geometry(&mut self, vertices: &[PenumbraVertex], indices: &[u32]) -> Result<(), TargetError> {
        self.penumbra_vao.set_vertices(&self.device, &self.queue, vertices)?;
        self.penumbra_vao.set_indices(&self.device, &self.queue, indices)
    }

    fn set_has_penumbra(&mut self, has_penumbra: bool) {
        self.has_penumbra = has_penumbra;
    }
}
