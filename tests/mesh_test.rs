use cgmath::{InnerSpace, Vector3};
use cube_ngin::{
    data_structures::{
        mesh::{self, CUBE_VERTEX_COUNT, CUBE_VERTICES, FACES},
        vertex::{TEX_MAX, Vertex, unorm16},
    },
    pipelines::cube::FixedFunctionState,
};

#[test]
fn should_decode_normalized_tex_coords() {
    assert_eq!(unorm16(0), 0.0);
    assert_eq!(unorm16(TEX_MAX), 1.0);
    assert!((unorm16(TEX_MAX / 2) - 0.5).abs() < 1.0 / 65535.0);

    let vertex = Vertex::new([0.0, 0.0, 0.0], TEX_MAX, 0);
    assert_eq!(vertex.tex_coords_f32(), [1.0, 0.0]);
    assert_eq!(bytemuck::bytes_of(&vertex).len(), 16);
}

#[test]
fn should_have_thirty_six_vertices_on_the_unit_cube() {
    assert_eq!(CUBE_VERTICES.len(), 36);
    assert_eq!(CUBE_VERTEX_COUNT, 36);
    for vertex in &CUBE_VERTICES {
        assert!(vertex.position.iter().all(|c| c.abs() == 1.0), "{vertex:?}");
    }
}

#[test]
fn should_cover_every_side_once() {
    let mut sides: Vec<(usize, f32)> = (0..FACES)
        .map(|i| mesh::face_plane(mesh::face(i)).unwrap_or_else(|| panic!("face {i} is not planar")))
        .collect();
    sides.sort_by(|a, b| a.partial_cmp(b).unwrap());
    sides.dedup();
    assert_eq!(sides.len(), 6);
}

#[test]
fn should_wrap_texture_once_per_face() {
    for i in 0..FACES {
        let face = mesh::face(i);
        for axis in 0..2 {
            let coords: Vec<u16> = face.iter().map(|v| v.tex_coords[axis]).collect();
            assert!(coords.contains(&0), "face {i} axis {axis}");
            assert!(coords.contains(&TEX_MAX), "face {i} axis {axis}");
            assert!(coords.iter().all(|&c| c == 0 || c == TEX_MAX));
        }
    }
}

#[test]
fn should_keep_the_closer_fragment() {
    assert_eq!(
        FixedFunctionState::CUBE.depth_compare,
        wgpu::CompareFunction::Less
    );
    assert!(FixedFunctionState::CUBE.depth_write);
}

#[test]
fn should_wind_front_faces_clockwise_from_outside() {
    assert_eq!(FixedFunctionState::CUBE.front_face, wgpu::FrontFace::Cw);
    assert_eq!(FixedFunctionState::CUBE.cull_mode, Some(wgpu::Face::Back));

    for i in 0..FACES {
        let face = mesh::face(i);
        let (axis, side) = mesh::face_plane(face).unwrap();
        let mut outward = Vector3::new(0.0, 0.0, 0.0);
        outward[axis] = side;

        for triangle in face.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vector3::from(triangle[k].position));
            // Counter-clockwise seen from outside would point along `outward`.
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(outward) < 0.0, "face {i} triangle {triangle:?}");
        }
    }
}

#[test]
fn should_not_treat_mixed_vertices_as_a_face() {
    let corners = [
        Vertex::new([1.0, 1.0, 1.0], 0, 0),
        Vertex::new([-1.0, -1.0, 1.0], 0, 0),
        Vertex::new([1.0, -1.0, -1.0], 0, 0),
    ];
    assert_eq!(mesh::face_plane(&corners), None);
    assert_eq!(mesh::face_plane(&[]), None);
}
