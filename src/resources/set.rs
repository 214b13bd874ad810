use anyhow::Context;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{mesh::CUBE_VERTICES, texture::Texture},
    pipelines::contract::{Sampler, VERTEX_BUFFER_BINDING},
    resources::texture::DecodedImage,
};

/// Everything needed to draw the cube besides the program and the uniform
/// block: the uploaded vertices, the slot they are bound at and the texture
/// bound to the color sampler unit.
#[derive(Debug)]
pub struct ResourceSet {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_binding: u32,
    pub texture: Texture,
    pub texture_bind_group: wgpu::BindGroup,
}

impl ResourceSet {
    /// Upload the mesh and the texture once.
    ///
    /// The vertex buffer is created with its contents, so it holds the mesh
    /// before anything refers to it; the bind group is created from the
    /// program's texture layout. Fails if the image does not fit the
    /// device's 2D texture limit.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture_layout: &wgpu::BindGroupLayout,
        image: &DecodedImage,
    ) -> anyhow::Result<Self> {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let max = device.limits().max_texture_dimension_2d;
        if image.width > max || image.height > max {
            anyhow::bail!(
                "color texture is {}x{}, larger than the device limit of {max} per side",
                image.width,
                image.height
            );
        }
        let texture = Texture::from_image(device, queue, image, Some("Cube Color Texture"));
        let sampler = texture
            .sampler
            .as_ref()
            .context("color texture was created without a sampler")?;
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: Sampler::Color.texture_binding(),
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: Sampler::Color.sampler_binding(),
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
            label: Some("cube_texture_bind_group"),
        });

        Ok(Self {
            vertex_buffer,
            vertex_binding: VERTEX_BUFFER_BINDING,
            texture,
            texture_bind_group,
        })
    }
}
