//! Per-frame rendering of the cube.
//!
//! A frame is planned on the host first ([`FramePlan::prepare`]): the
//! view-projection for the current surface size plus the elapsed time. A
//! zero-area surface yields no plan and the frame is skipped without touching
//! the GPU. Otherwise [`FrameRenderer`] records one render pass:
//!
//! 1. clear color and depth
//! 2. bind the pipeline, which carries depth test, culling and winding
//! 3. overwrite the uniform block
//! 4. bind the uniform block, the texture and the vertex buffer at the
//!    contract's slots
//! 5. draw the 36 vertices as one non-indexed triangle list
//!
//! and submits it. [`FrameRenderer::render`] then presents the surface.

use std::iter;

use crate::{
    camera::OrbitCamera,
    context::Context,
    data_structures::{
        mesh::CUBE_VERTEX_COUNT,
        uniforms::{FrameUniforms, UniformBlock},
    },
    pipelines::{
        contract::{FRAME_GROUP, TEXTURE_GROUP},
        cube::ShaderProgram,
    },
    resources::{set::ResourceSet, texture::DecodedImage},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// The surface had no area; nothing was submitted.
    Skipped,
}

/// A single non-indexed draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    pub first_vertex: u32,
    pub vertex_count: u32,
}

impl DrawCommand {
    pub const CUBE: Self = Self {
        first_vertex: 0,
        vertex_count: CUBE_VERTEX_COUNT as u32,
    };
}

/// What the GPU is asked to do for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub uniforms: FrameUniforms,
    pub draw: DrawCommand,
}

impl FramePlan {
    /// Plan a frame for a `width` x `height` surface, `seconds` after start.
    ///
    /// Returns `None` when either dimension is zero.
    pub fn prepare(width: u32, height: u32, camera: &OrbitCamera, seconds: f32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let view_proj = camera.get_perspective(width, height) * camera.get_view();
        Some(Self {
            uniforms: FrameUniforms::new(view_proj, seconds),
            draw: DrawCommand::CUBE,
        })
    }
}

/// The program, the uploaded resources and the uniform block, created once
/// and reused every frame.
#[derive(Debug)]
pub struct FrameRenderer {
    pub program: ShaderProgram,
    pub resources: ResourceSet,
    pub uniforms: UniformBlock,
}

impl FrameRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        image: &DecodedImage,
    ) -> anyhow::Result<Self> {
        let program = ShaderProgram::new(device, color_format)?;
        let resources = ResourceSet::new(device, queue, &program.texture_layout, image)?;
        let uniforms = UniformBlock::new(device, &program.frame_layout);
        Ok(Self {
            program,
            resources,
            uniforms,
        })
    }

    /// Draw one frame into the window surface and present it.
    pub fn render(
        &mut self,
        ctx: &Context,
        seconds: f32,
    ) -> Result<FrameOutcome, wgpu::SurfaceError> {
        let (width, height) = (ctx.config.width, ctx.config.height);
        if width == 0 || height == 0 {
            return Ok(FrameOutcome::Skipped);
        }

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let outcome = self.render_to(
            &ctx.device,
            &ctx.queue,
            &view,
            &ctx.depth_texture.view,
            (width, height),
            &ctx.camera,
            ctx.clear_colour,
            seconds,
        );

        output.present();
        Ok(outcome)
    }

    /// Record and submit one frame into arbitrary color and depth targets of
    /// the given size.
    #[allow(clippy::too_many_arguments)]
    pub fn render_to(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        (width, height): (u32, u32),
        camera: &OrbitCamera,
        clear_colour: wgpu::Color,
        seconds: f32,
    ) -> FrameOutcome {
        let Some(plan) = FramePlan::prepare(width, height, camera, seconds) else {
            log::debug!("skipping frame for {width}x{height} surface");
            return FrameOutcome::Skipped;
        };

        // Written before submission, so the pass below reads this frame's data.
        self.uniforms.write(queue, plan.uniforms);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.program.pipeline);
            render_pass.set_bind_group(FRAME_GROUP, &self.uniforms.bind_group, &[]);
            render_pass.set_bind_group(TEXTURE_GROUP, &self.resources.texture_bind_group, &[]);
            render_pass.set_vertex_buffer(
                self.resources.vertex_binding,
                self.resources.vertex_buffer.slice(..),
            );
            let DrawCommand {
                first_vertex,
                vertex_count,
            } = plan.draw;
            render_pass.draw(first_vertex..first_vertex + vertex_count, 0..1);
        }
        queue.submit(iter::once(encoder.finish()));

        FrameOutcome::Drawn
    }
}
