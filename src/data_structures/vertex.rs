//! Packed per-vertex data and its GPU layout.
//!
//! A [`Vertex`] is 16 bytes: three `f32` position components followed by two
//! normalized `u16` texture coordinates. Storing texcoords as `Unorm16x2`
//! halves their size compared to `Float32x2`; the GPU maps `0..=65535` to
//! `0.0..=1.0` on read.

use std::mem::{offset_of, size_of};

use crate::pipelines::contract::Attribute;

/// The largest normalized texcoord value, sampled as exactly `1.0`.
pub const TEX_MAX: u16 = u16::MAX;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [u16; 2],
}

// The attribute table below addresses the record by byte offset. A change in
// field order or type has to fail the build rather than corrupt the mesh.
const _: () = assert!(size_of::<Vertex>() == 16);
const _: () = assert!(offset_of!(Vertex, position) == 0);
const _: () = assert!(offset_of!(Vertex, tex_coords) == 12);

const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        offset: offset_of!(Vertex, position) as wgpu::BufferAddress,
        shader_location: Attribute::Position.location(),
        format: Attribute::Position.format(),
    },
    wgpu::VertexAttribute {
        offset: offset_of!(Vertex, tex_coords) as wgpu::BufferAddress,
        shader_location: Attribute::TexCoords.location(),
        format: Attribute::TexCoords.format(),
    },
];

impl Vertex {
    pub const fn new(position: [f32; 3], u: u16, v: u16) -> Self {
        Self {
            position,
            tex_coords: [u, v],
        }
    }

    /// Describes how the bytes of a vertex buffer bound at
    /// [`crate::pipelines::contract::VERTEX_BUFFER_BINDING`] map onto the
    /// vertex stage inputs.
    ///
    /// One attribute per [`Attribute`], in table order, each at the
    /// location and with the format the contract assigns to it.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }

    /// Host-side decode of the normalized texcoords, identical to what the
    /// GPU does for `Unorm16x2`.
    pub fn tex_coords_f32(&self) -> [f32; 2] {
        [unorm16(self.tex_coords[0]), unorm16(self.tex_coords[1])]
    }
}

pub fn unorm16(value: u16) -> f32 {
    value as f32 / TEX_MAX as f32
}
