//! The shader interface contract.
//!
//! Every slot that the host and the shader stages have to agree on is
//! declared exactly once in this module: vertex attribute locations, the
//! stage-to-stage interface slot, the uniform block binding and the sampler
//! units. The three places that bind something (the vertex layout in
//! [`crate::data_structures::vertex`], the WGSL templates expanded in
//! [`crate::pipelines::shader`] and the bind groups created in
//! [`crate::resources::set`] and [`crate::data_structures::uniforms`]) all read
//! their numbers from here, so a slot can only ever be changed in one place.

/// Vertex buffer binding index the cube's vertex buffer is bound at.
pub const VERTEX_BUFFER_BINDING: u32 = 0;

/// Bind group holding the per-frame uniform block.
pub const FRAME_GROUP: u32 = 0;
/// Binding of the uniform block inside [`FRAME_GROUP`].
pub const FRAME_BINDING: u32 = 0;

/// Bind group holding the sampled textures.
pub const TEXTURE_GROUP: u32 = 1;

/// Location of the fragment stage's color output.
pub const COLOR_TARGET: u32 = 0;

/// Scalar kind of a shader-visible value, as the stages see it after any
/// vertex fetch conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    Float,
    Sint,
    Uint,
}

/// Shape of a shader-visible value: a scalar or a 2-4 component vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    pub components: u32,
    pub scalar: Scalar,
}

impl Shape {
    pub const fn float(components: u32) -> Self {
        Self {
            components,
            scalar: Scalar::Float,
        }
    }

    /// WGSL spelling of the shape, e.g. `vec3<f32>`.
    pub fn wgsl(&self) -> String {
        let scalar = match self.scalar {
            Scalar::Float => "f32",
            Scalar::Sint => "i32",
            Scalar::Uint => "u32",
        };
        match self.components {
            1 => scalar.to_string(),
            n => format!("vec{n}<{scalar}>"),
        }
    }
}

/// Per-vertex inputs of the vertex stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    TexCoords,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Position, Attribute::TexCoords];

    pub const fn name(self) -> &'static str {
        match self {
            Attribute::Position => "position",
            Attribute::TexCoords => "tex_coords",
        }
    }

    /// `@location` of the attribute in the vertex stage.
    pub const fn location(self) -> u32 {
        match self {
            Attribute::Position => 0,
            Attribute::TexCoords => 1,
        }
    }

    /// Format the attribute is stored with in the vertex buffer.
    pub const fn format(self) -> wgpu::VertexFormat {
        match self {
            Attribute::Position => wgpu::VertexFormat::Float32x3,
            // normalized: 0..=65535 reads as 0.0..=1.0
            Attribute::TexCoords => wgpu::VertexFormat::Unorm16x2,
        }
    }

    /// Type the vertex stage declares for the attribute.
    pub const fn shape(self) -> Shape {
        match self {
            Attribute::Position => Shape::float(3),
            Attribute::TexCoords => Shape::float(2),
        }
    }
}

/// Values passed from the vertex stage to the fragment stage.
///
/// The slots are matched by location, not by name, so each varying reuses
/// the location of the attribute it is forwarded from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Varying {
    TexCoords,
}

impl Varying {
    pub const ALL: [Varying; 1] = [Varying::TexCoords];

    pub const fn name(self) -> &'static str {
        match self {
            Varying::TexCoords => Attribute::TexCoords.name(),
        }
    }

    pub const fn location(self) -> u32 {
        match self {
            Varying::TexCoords => Attribute::TexCoords.location(),
        }
    }

    pub const fn shape(self) -> Shape {
        match self {
            Varying::TexCoords => Attribute::TexCoords.shape(),
        }
    }
}

/// Textures read by the fragment stage.
///
/// A sampler unit `n` occupies two bindings of [`TEXTURE_GROUP`]: the
/// texture view at `2n` and its sampler at `2n + 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sampler {
    Color,
}

impl Sampler {
    pub const ALL: [Sampler; 1] = [Sampler::Color];

    pub const fn name(self) -> &'static str {
        match self {
            Sampler::Color => "color",
        }
    }

    pub const fn unit(self) -> u32 {
        match self {
            Sampler::Color => 0,
        }
    }

    pub const fn texture_binding(self) -> u32 {
        self.unit() * 2
    }

    pub const fn sampler_binding(self) -> u32 {
        self.unit() * 2 + 1
    }

    pub const fn view_dimension(self) -> wgpu::TextureViewDimension {
        match self {
            Sampler::Color => wgpu::TextureViewDimension::D2,
        }
    }
}

pub fn frame_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: FRAME_BINDING,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("frame_bind_group_layout"),
    })
}

pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let entries: Vec<wgpu::BindGroupLayoutEntry> = Sampler::ALL
        .iter()
        .flat_map(|sampler| {
            [
                wgpu::BindGroupLayoutEntry {
                    binding: sampler.texture_binding(),
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: sampler.view_dimension(),
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: sampler.sampler_binding(),
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]
        })
        .collect();
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture_bind_group_layout"),
    })
}
