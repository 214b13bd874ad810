//! The cube mesh.
//!
//! Each face brings its own four corners (two of them repeated), so
//! texcoords wrap `0..1` per face and no index buffer is needed. Triangles
//! are wound clockwise as seen from outside the cube, which is what the
//! pipeline's `FrontFace::Cw` relies on for back-face culling.

use super::vertex::{TEX_MAX, Vertex};

pub const FACES: usize = 6;
pub const VERTICES_PER_FACE: usize = 6;
pub const CUBE_VERTEX_COUNT: usize = FACES * VERTICES_PER_FACE;

const LO: u16 = 0x0000;
const HI: u16 = TEX_MAX;

#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; CUBE_VERTEX_COUNT] = [
    // +x
    Vertex::new([ 1.0,  1.0,  1.0], LO, HI),
    Vertex::new([ 1.0,  1.0, -1.0], LO, LO),
    Vertex::new([ 1.0, -1.0, -1.0], HI, LO),
    Vertex::new([ 1.0,  1.0,  1.0], LO, HI),
    Vertex::new([ 1.0, -1.0, -1.0], HI, LO),
    Vertex::new([ 1.0, -1.0,  1.0], HI, HI),
    // +z
    Vertex::new([ 1.0,  1.0,  1.0], LO, HI),
    Vertex::new([ 1.0, -1.0,  1.0], LO, LO),
    Vertex::new([-1.0, -1.0,  1.0], HI, LO),
    Vertex::new([ 1.0,  1.0,  1.0], LO, HI),
    Vertex::new([-1.0, -1.0,  1.0], HI, LO),
    Vertex::new([-1.0,  1.0,  1.0], HI, HI),
    // +y
    Vertex::new([ 1.0,  1.0,  1.0], LO, HI),
    Vertex::new([-1.0,  1.0,  1.0], LO, LO),
    Vertex::new([-1.0,  1.0, -1.0], HI, LO),
    Vertex::new([ 1.0,  1.0,  1.0], LO, HI),
    Vertex::new([-1.0,  1.0, -1.0], HI, LO),
    Vertex::new([ 1.0,  1.0, -1.0], HI, HI),
    // -z
    Vertex::new([-1.0, -1.0, -1.0], LO, HI),
    Vertex::new([ 1.0, -1.0, -1.0], LO, LO),
    Vertex::new([ 1.0,  1.0, -1.0], HI, LO),
    Vertex::new([-1.0, -1.0, -1.0], LO, HI),
    Vertex::new([ 1.0,  1.0, -1.0], HI, LO),
    Vertex::new([-1.0,  1.0, -1.0], HI, HI),
    // -x
    Vertex::new([-1.0, -1.0, -1.0], LO, HI),
    Vertex::new([-1.0,  1.0, -1.0], LO, LO),
    Vertex::new([-1.0,  1.0,  1.0], HI, LO),
    Vertex::new([-1.0, -1.0, -1.0], LO, HI),
    Vertex::new([-1.0,  1.0,  1.0], HI, LO),
    Vertex::new([-1.0, -1.0,  1.0], HI, HI),
    // -y
    Vertex::new([-1.0, -1.0, -1.0], LO, HI),
    Vertex::new([-1.0, -1.0,  1.0], LO, LO),
    Vertex::new([ 1.0, -1.0,  1.0], HI, LO),
    Vertex::new([-1.0, -1.0, -1.0], LO, HI),
    Vertex::new([ 1.0, -1.0,  1.0], HI, LO),
    Vertex::new([ 1.0, -1.0, -1.0], HI, HI),
];

/// The vertices of one face, two triangles in draw order.
pub fn face(index: usize) -> &'static [Vertex] {
    let start = index * VERTICES_PER_FACE;
    &CUBE_VERTICES[start..start + VERTICES_PER_FACE]
}

/// The axis a face lies in and the side of the cube it is on, if the face
/// is planar and axis-aligned at `+1` or `-1`.
pub fn face_plane(vertices: &[Vertex]) -> Option<(usize, f32)> {
    let first = vertices.first()?;
    let mut planes = (0..3).filter(|&axis| {
        let value = first.position[axis];
        value.abs() == 1.0 && vertices.iter().all(|v| v.position[axis] == value)
    });
    let axis = planes.next()?;
    if planes.next().is_some() {
        return None;
    }
    Some((axis, first.position[axis]))
}
