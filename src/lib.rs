//! cube-ngin
//!
//! Draws one textured cube spinning about its vertical axis, seen through an
//! orbit camera. The vertex stage, the fragment stage and the host code agree
//! on a single interface contract (attribute locations, varyings, uniform
//! block layout, sampler units); both stages are validated against it before
//! a pipeline is built.
//!
//! High-level modules
//! - `camera`: orbit camera and the mouse controller driving it
//! - `config`: startup options (window, texture, clear colour, camera)
//! - `context`: window surface, device and queue
//! - `data_structures`: vertex format, cube mesh, uniform block, textures
//! - `flow`: the winit event loop
//! - `pipelines`: interface contract, shader stages and the cube pipeline
//! - `resources`: asset loading and the uploaded resource set
//! - `render`: per-frame planning and drawing
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
#[cfg(feature = "integration-tests")]
pub mod readback;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use config::Config;
pub use flow::run;
pub use render::{FrameOutcome, FramePlan, FrameRenderer};
