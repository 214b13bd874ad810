use crate::{
    data_structures::{texture::Texture, vertex::Vertex},
    pipelines::{
        contract::{self, FRAME_GROUP, TEXTURE_GROUP},
        shader::{self, CompiledStage, Stage},
    },
};

// The pipeline layout lists bind group layouts by group index.
const _: () = assert!(FRAME_GROUP == 0 && TEXTURE_GROUP == 1);

/// Depth and culling configuration of the cube pipeline.
///
/// wgpu bakes this state into the pipeline, so binding the pipeline is what
/// (re)applies it. The cube's triangles are wound clockwise seen from
/// outside; flipping `front_face` would cull the visible faces instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedFunctionState {
    pub depth_compare: wgpu::CompareFunction,
    pub depth_write: bool,
    pub front_face: wgpu::FrontFace,
    pub cull_mode: Option<wgpu::Face>,
}

impl FixedFunctionState {
    pub const CUBE: Self = Self {
        depth_compare: wgpu::CompareFunction::Less,
        depth_write: true,
        front_face: wgpu::FrontFace::Cw,
        cull_mode: Some(wgpu::Face::Back),
    };
}

/// The linked vertex + fragment program and the bind group layouts its
/// resources have to be created against.
#[derive(Debug)]
pub struct ShaderProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_layout: wgpu::BindGroupLayout,
    pub texture_layout: wgpu::BindGroupLayout,
    pub state: FixedFunctionState,
}

impl ShaderProgram {
    /// Compile both stages, check them against the contract and each other,
    /// and link them into one pipeline rendering into `color_format`.
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        let vertex = CompiledStage::load(Stage::Vertex)?;
        let fragment = CompiledStage::load(Stage::Fragment)?;
        shader::link(&vertex, &fragment)?;
        log::info!("vertex and fragment stages match the interface contract");

        let frame_layout = contract::frame_layout(device);
        let texture_layout = contract::texture_layout(device);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &texture_layout],
            immediate_size: 0,
        });

        let state = FixedFunctionState::CUBE;
        let pipeline = mk_render_pipeline(
            device,
            &layout,
            color_format,
            Some(Texture::DEPTH_FORMAT),
            &[Vertex::desc()],
            &vertex,
            &fragment,
            state,
        );

        Ok(Self {
            pipeline,
            frame_layout,
            texture_layout,
            state,
        })
    }
}

#[allow(clippy::too_many_arguments)]
pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    vertex: &CompiledStage,
    fragment: &CompiledStage,
    state: FixedFunctionState,
) -> wgpu::RenderPipeline {
    let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Cube Vertex Stage"),
        source: wgpu::ShaderSource::Wgsl(vertex.source.as_str().into()),
    });
    let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Cube Fragment Stage"),
        source: wgpu::ShaderSource::Wgsl(fragment.source.as_str().into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Cube Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vs,
            entry_point: Some(Stage::Vertex.entry_point()),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fs,
            entry_point: Some(Stage::Fragment.entry_point()),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: state.front_face,
            cull_mode: state.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: state.depth_write,
            depth_compare: state.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
