use crate::mesh::Vertex;

/// Vertex layout uploaded to the GPU.
///
/// Colors are packed as `Unorm8x4`, 12 bytes per vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub pos: [f32; 2],
    pub color: [u8; 4],
}

impl From<&Vertex> for GpuVertex {
    fn from(vertex: &Vertex) -> Self {
        let channel = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        Self {
            pos: vertex.pos,
            color: [
                channel(vertex.color[0]),
                channel(vertex.color[1]),
                channel(vertex.color[2]),
                channel(vertex.color[3]),
            ],
        }
    }
}

impl GpuVertex {
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Unorm8x4,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_vertex_packing() {
        let v = Vertex::new([1.5, -2.0], Color::new(1.0, 0.5, 0.0, 0.25));
        let gpu = GpuVertex::from(&v);
        assert_eq!(gpu.pos, [1.5, -2.0]);
        assert_eq!(gpu.color, [255, 128, 0, 64]);
        assert_eq!(std::mem::size_of::<GpuVertex>(), 12);
    }
}
