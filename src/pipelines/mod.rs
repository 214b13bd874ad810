//! Render pipeline definitions.
//!
//! - `contract` is the binding table shared by host code and shaders
//! - `shader` expands, validates and reflects the WGSL stages
//! - `cube` links the stages into the cube's render pipeline

pub mod contract;
pub mod cube;
pub mod shader;
