//! Bar vertex layout

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::Colour;
use super::shapes::pixel_to_ndc;

/// Position plus linear RGBA colour. Built in pixel space, converted to NDC
/// right before upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn new(position: Vec2, colour: Colour) -> Self {
        Self {
            position: position.to_array(),
            color: colour.to_f32_array(),
        }
    }

    /// Same vertex with its pixel position mapped into `viewport` NDC
    pub fn to_ndc(self, viewport: (u32, u32)) -> Self {
        Self {
            position: pixel_to_ndc(Vec2::from(self.position), viewport).to_array(),
            ..self
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
