//! Engine data structures: the vertex record, the cube mesh, the per-frame
//! uniform block and GPU textures.
//!
//! - `vertex` is the packed per-vertex record and its buffer layout
//! - `mesh` holds the 36 cube vertices
//! - `uniforms` is the per-frame uniform block (host mirror + GPU buffer)
//! - `texture` wraps wgpu textures (color and depth)

pub mod mesh;
pub mod texture;
pub mod uniforms;
pub mod vertex;
