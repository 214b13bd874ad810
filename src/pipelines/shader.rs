//! Shader stages and their load-time contract checks.
//!
//! The two stages are WGSL templates. Every slot number in them is a
//! `{{ token }}` that [`expand`] fills in from [`crate::pipelines::contract`]
//! with minijinja, so the WGSL never carries a literal location or binding
//! of its own.
//!
//! Loading a stage goes through naga before anything reaches the device:
//!
//! 1. expand the template (an unknown token is an error)
//! 2. parse and validate the WGSL
//! 3. reflect the entry point's inputs, outputs and resource bindings
//! 4. compare the reflection against the contract
//!
//! [`link`] then checks that the vertex stage writes every location the
//! fragment stage reads. Every failure names the stage it happened in.

use std::{fmt, sync::OnceLock};

use anyhow::{Context, anyhow, bail};
use cgmath::{Matrix4, Rad, Vector4};
use minijinja::{Environment, UndefinedBehavior, Value, context};

use crate::{
    data_structures::{
        uniforms::{FRAME_UNIFORMS_SIZE, FrameUniforms},
        vertex::Vertex,
    },
    pipelines::contract::{
        self, Attribute, COLOR_TARGET, FRAME_BINDING, FRAME_GROUP, Sampler, Shape, TEXTURE_GROUP,
        Varying,
    },
};

const INTERFACE: &str = include_str!("interface.wgsl");
const VERTEX: &str = include_str!("cube_vertex.wgsl");
const FRAGMENT: &str = include_str!("cube_fragment.wgsl");

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub const fn entry_point(self) -> &'static str {
        match self {
            Stage::Vertex => "vs_main",
            Stage::Fragment => "fs_main",
        }
    }

    fn naga(self) -> naga::ShaderStage {
        match self {
            Stage::Vertex => naga::ShaderStage::Vertex,
            Stage::Fragment => naga::ShaderStage::Fragment,
        }
    }

    fn template(self) -> &'static str {
        match self {
            Stage::Vertex => VERTEX,
            Stage::Fragment => FRAGMENT,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn template_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();
        // A token the contract does not define must not expand to nothing.
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    })
}

fn slot(location: u32, shape: Shape) -> Value {
    Value::from_iter([
        ("location", Value::from(location)),
        ("type", Value::from(shape.wgsl())),
    ])
}

/// Template variables, read straight from the contract.
fn contract_context() -> Value {
    context! {
        frame => context! { group => FRAME_GROUP, binding => FRAME_BINDING },
        texture => context! { group => TEXTURE_GROUP },
        color_target => COLOR_TARGET,
        attribute => Value::from_iter(
            Attribute::ALL.map(|a| (a.name(), slot(a.location(), a.shape()))),
        ),
        varying => Value::from_iter(
            Varying::ALL.map(|v| (v.name(), slot(v.location(), v.shape()))),
        ),
        sampler => Value::from_iter(Sampler::ALL.map(|s| {
            (
                s.name(),
                context! { texture => s.texture_binding(), sampler => s.sampler_binding() },
            )
        })),
    }
}

/// Fill in every `{{ token }}` of a template from the contract.
pub fn expand(template: &str) -> anyhow::Result<String> {
    template_env()
        .render_str(template, contract_context())
        .map_err(|e| anyhow!("failed to expand shader template: {e:#}"))
}

/// Full WGSL source of a stage: the shared interface declarations followed
/// by the stage body.
pub fn stage_source(stage: Stage) -> anyhow::Result<String> {
    let template = format!("{INTERFACE}\n{}", stage.template());
    expand(&template).with_context(|| format!("{stage} stage template"))
}

/// One location-bound value crossing a stage boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub location: u32,
    /// `None` for types the contract has no shape for (matrices, bools, ...).
    pub shape: Option<Shape>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    UniformBlock { size: u32 },
    Texture2d,
    Sampler,
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub group: u32,
    pub binding: u32,
    pub kind: ResourceKind,
}

/// What a stage's entry point actually declares, as reflected by naga.
#[derive(Clone, Debug, Default)]
pub struct StageInterface {
    pub inputs: Vec<Slot>,
    pub outputs: Vec<Slot>,
    pub resources: Vec<Resource>,
}

impl StageInterface {
    pub fn input(&self, location: u32) -> Option<&Slot> {
        self.inputs.iter().find(|slot| slot.location == location)
    }

    pub fn output(&self, location: u32) -> Option<&Slot> {
        self.outputs.iter().find(|slot| slot.location == location)
    }

    pub fn resource(&self, group: u32, binding: u32) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|res| res.group == group && res.binding == binding)
    }
}

/// A stage that parsed, validated and matches the contract.
#[derive(Debug)]
pub struct CompiledStage {
    pub stage: Stage,
    pub source: String,
    pub interface: StageInterface,
}

impl CompiledStage {
    /// Expand, compile and check one of the built-in stages.
    pub fn load(stage: Stage) -> anyhow::Result<Self> {
        let source = stage_source(stage)?;
        let compiled = Self::compile(stage, source)?;
        compiled.check_contract()?;
        Ok(compiled)
    }

    /// Parse, validate and reflect WGSL for `stage`.
    pub fn compile(stage: Stage, source: String) -> anyhow::Result<Self> {
        let module = naga::front::wgsl::parse_str(&source).map_err(|e| {
            anyhow!(
                "{stage} stage failed to compile:\n{}",
                e.emit_to_string(&source)
            )
        })?;
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .map_err(|e| {
            anyhow!(
                "{stage} stage failed validation:\n{}",
                e.emit_to_string(&source)
            )
        })?;
        let interface = reflect(&module, stage)?;
        Ok(Self {
            stage,
            source,
            interface,
        })
    }

    /// Compare the reflected interface against the binding table.
    pub fn check_contract(&self) -> anyhow::Result<()> {
        let stage = self.stage;
        let iface = &self.interface;
        match stage {
            Stage::Vertex => {
                for attribute in Attribute::ALL {
                    expect_slot(
                        stage,
                        "input",
                        attribute.name(),
                        iface.input(attribute.location()),
                        attribute.location(),
                        attribute.shape(),
                    )?;
                }
                if let Some(extra) = iface.inputs.iter().find(|slot| {
                    !Attribute::ALL
                        .iter()
                        .any(|attribute| attribute.location() == slot.location)
                }) {
                    bail!(
                        "{stage} stage reads location {} which no vertex attribute provides",
                        extra.location
                    );
                }
                for varying in Varying::ALL {
                    expect_slot(
                        stage,
                        "output",
                        varying.name(),
                        iface.output(varying.location()),
                        varying.location(),
                        varying.shape(),
                    )?;
                }
                match iface.resource(FRAME_GROUP, FRAME_BINDING).map(|res| res.kind) {
                    Some(ResourceKind::UniformBlock { size })
                        if size as usize == FRAME_UNIFORMS_SIZE => {}
                    Some(ResourceKind::UniformBlock { size }) => bail!(
                        "{stage} stage declares a {size} byte uniform block, the host writes {FRAME_UNIFORMS_SIZE}"
                    ),
                    other => bail!(
                        "{stage} stage has no uniform block at @group({FRAME_GROUP}) @binding({FRAME_BINDING}) (found {other:?})"
                    ),
                }
            }
            Stage::Fragment => {
                for sampler in Sampler::ALL {
                    let texture = iface
                        .resource(TEXTURE_GROUP, sampler.texture_binding())
                        .map(|res| res.kind);
                    if texture != Some(ResourceKind::Texture2d) {
                        bail!(
                            "{stage} stage: sampler unit {} ({}) expects a texture_2d at @group({TEXTURE_GROUP}) @binding({}), found {texture:?}",
                            sampler.unit(),
                            sampler.name(),
                            sampler.texture_binding()
                        );
                    }
                    let filter = iface
                        .resource(TEXTURE_GROUP, sampler.sampler_binding())
                        .map(|res| res.kind);
                    if filter != Some(ResourceKind::Sampler) {
                        bail!(
                            "{stage} stage: sampler unit {} ({}) expects a sampler at @group({TEXTURE_GROUP}) @binding({}), found {filter:?}",
                            sampler.unit(),
                            sampler.name(),
                            sampler.sampler_binding()
                        );
                    }
                }
                expect_slot(
                    stage,
                    "output",
                    "color",
                    iface.output(COLOR_TARGET),
                    COLOR_TARGET,
                    Shape::float(4),
                )?;
            }
        }
        Ok(())
    }
}

fn expect_slot(
    stage: Stage,
    direction: &str,
    name: &str,
    slot: Option<&Slot>,
    location: u32,
    shape: Shape,
) -> anyhow::Result<()> {
    match slot {
        Some(slot) if slot.shape == Some(shape) => Ok(()),
        Some(slot) => bail!(
            "{stage} stage {direction} `{name}` at location {location} is {:?}, expected {}",
            slot.shape,
            shape.wgsl()
        ),
        None => bail!("{stage} stage has no {direction} `{name}` at location {location}"),
    }
}

/// Check that the fragment stage only reads what the vertex stage writes,
/// slot by slot.
pub fn link(vertex: &CompiledStage, fragment: &CompiledStage) -> anyhow::Result<()> {
    for input in &fragment.interface.inputs {
        match vertex.interface.output(input.location) {
            Some(output) if output.shape == input.shape => {}
            Some(output) => bail!(
                "link failed: {} stage writes {:?} at location {}, {} stage reads {:?}",
                vertex.stage,
                output.shape,
                input.location,
                fragment.stage,
                input.shape
            ),
            None => bail!(
                "link failed: {} stage reads location {} which the {} stage does not write",
                fragment.stage,
                input.location,
                vertex.stage
            ),
        }
    }
    Ok(())
}

fn reflect(module: &naga::Module, stage: Stage) -> anyhow::Result<StageInterface> {
    let entry = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga() && ep.name == stage.entry_point())
        .ok_or_else(|| {
            anyhow!(
                "{stage} stage has no @{stage} entry point named `{}`",
                stage.entry_point()
            )
        })?;

    let mut iface = StageInterface::default();
    for argument in &entry.function.arguments {
        collect_slots(module, argument.ty, argument.binding.as_ref(), &mut iface.inputs);
    }
    if let Some(result) = &entry.function.result {
        collect_slots(module, result.ty, result.binding.as_ref(), &mut iface.outputs);
    }

    for (_, var) in module.global_variables.iter() {
        let Some(binding) = &var.binding else {
            continue;
        };
        let kind = match &module.types[var.ty].inner {
            naga::TypeInner::Struct { span, .. } if var.space == naga::AddressSpace::Uniform => {
                ResourceKind::UniformBlock { size: *span }
            }
            naga::TypeInner::Image {
                dim: naga::ImageDimension::D2,
                arrayed: false,
                class: naga::ImageClass::Sampled { multi: false, .. },
            } => ResourceKind::Texture2d,
            naga::TypeInner::Sampler { comparison: false } => ResourceKind::Sampler,
            _ => ResourceKind::Other,
        };
        iface.resources.push(Resource {
            group: binding.group,
            binding: binding.binding,
            kind,
        });
    }
    Ok(iface)
}

fn collect_slots(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<Slot>,
) {
    let inner = &module.types[ty].inner;
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(Slot {
            location: *location,
            shape: shape_of(inner),
        }),
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = inner {
                for member in members {
                    collect_slots(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn shape_of(inner: &naga::TypeInner) -> Option<Shape> {
    let (components, scalar) = match *inner {
        naga::TypeInner::Scalar(scalar) => (1, scalar),
        naga::TypeInner::Vector { size, scalar } => (size as u32, scalar),
        _ => return None,
    };
    let scalar = match scalar.kind {
        naga::ScalarKind::Float => contract::Scalar::Float,
        naga::ScalarKind::Sint => contract::Scalar::Sint,
        naga::ScalarKind::Uint => contract::Scalar::Uint,
        _ => return None,
    };
    Some(Shape { components, scalar })
}

/// Host-side mirror of `rotate_y` in the vertex stage.
pub fn rotate_y(seconds: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Rad(seconds))
}

/// What the vertex stage hands to the rasterizer for one vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vector4<f32>,
    pub tex_coords: [f32; 2],
}

/// Evaluate the vertex stage on the host.
///
/// Depends on nothing but its arguments, so the same uniforms and vertex
/// always produce the same bits.
pub fn shade_vertex(uniforms: &FrameUniforms, vertex: &Vertex) -> VertexOutput {
    let [x, y, z] = vertex.position;
    let rotated = rotate_y(uniforms.seconds) * Vector4::new(x, y, z, 1.0);
    VertexOutput {
        clip_position: uniforms.view_proj() * rotated,
        tex_coords: vertex.tex_coords_f32(),
    }
}
