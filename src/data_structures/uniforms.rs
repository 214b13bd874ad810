//! The per-frame uniform block.
//!
//! [`FrameUniforms`] mirrors the WGSL struct
//!
//! ```wgsl
//! struct FrameUniforms {
//!     view_proj: mat4x4<f32>,
//!     seconds: f32,
//! };
//! ```
//!
//! whose size WGSL rounds up to a multiple of 16 bytes. The stages address
//! the block by its binding slot only, so the field order and the size of
//! this struct are part of the contract; the shader loader checks the size
//! against the reflected WGSL struct.

use std::mem::{offset_of, size_of};

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::pipelines::contract::FRAME_BINDING;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub seconds: f32,
    // Uniform structs are sized in multiples of 16 bytes
    _padding: [f32; 3],
}

pub const FRAME_UNIFORMS_SIZE: usize = size_of::<FrameUniforms>();

const _: () = assert!(FRAME_UNIFORMS_SIZE == 80);
const _: () = assert!(offset_of!(FrameUniforms, seconds) == 64);

impl FrameUniforms {
    pub fn new(view_proj: Matrix4<f32>, seconds: f32) -> Self {
        Self {
            view_proj: view_proj.into(),
            seconds,
            _padding: [0.0; 3],
        }
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.view_proj.into()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Reads a block back from raw uniform memory.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() != FRAME_UNIFORMS_SIZE {
            anyhow::bail!(
                "uniform block is {} bytes, expected {}",
                bytes.len(),
                FRAME_UNIFORMS_SIZE
            );
        }
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(Matrix4::identity(), 0.0)
    }
}

/// GPU-resident copy of [`FrameUniforms`] together with the bind group that
/// exposes it to the vertex stage.
#[derive(Debug)]
pub struct UniformBlock {
    pub uniforms: FrameUniforms,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBlock {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let uniforms = FrameUniforms::default();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: uniforms.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM
                | wgpu::BufferUsages::COPY_DST
                | wgpu::BufferUsages::COPY_SRC,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: FRAME_BINDING,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });
        Self {
            uniforms,
            buffer,
            bind_group,
        }
    }

    /// Overwrites the whole block. There are no partial updates: every
    /// write replaces all 80 bytes starting at offset zero.
    pub fn write(&mut self, queue: &wgpu::Queue, uniforms: FrameUniforms) {
        self.uniforms = uniforms;
        queue.write_buffer(&self.buffer, 0, self.uniforms.as_bytes());
    }
}
