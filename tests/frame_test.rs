use cgmath::{Deg, Matrix4, Rad, SquareMatrix, Vector4};
use cube_ngin::{
    camera::{OrbitCamera, OrbitController},
    config::Config,
    data_structures::{
        mesh::CUBE_VERTICES,
        uniforms::{FRAME_UNIFORMS_SIZE, FrameUniforms},
    },
    pipelines::shader::{rotate_y, shade_vertex},
    render::{DrawCommand, FramePlan},
};

fn inside_clip_volume(clip: Vector4<f32>) -> bool {
    let w = clip.w;
    w > 0.0 && clip.x.abs() <= w && clip.y.abs() <= w && (0.0..=w).contains(&clip.z)
}

fn corners() -> impl Iterator<Item = Vector4<f32>> {
    [-1.0, 1.0].into_iter().flat_map(|x| {
        [-1.0, 1.0]
            .into_iter()
            .flat_map(move |y| [-1.0, 1.0].into_iter().map(move |z| Vector4::new(x, y, z, 1.0)))
    })
}

#[test]
fn should_skip_zero_area_surfaces() {
    let camera = OrbitCamera::default();
    assert_eq!(FramePlan::prepare(0, 600, &camera, 1.0), None);
    assert_eq!(FramePlan::prepare(800, 0, &camera, 1.0), None);
    assert_eq!(FramePlan::prepare(0, 0, &camera, 1.0), None);
}

#[test]
fn should_plan_one_draw_of_the_whole_mesh() {
    let plan = FramePlan::prepare(800, 600, &OrbitCamera::default(), 2.5).unwrap();
    assert_eq!(plan.draw, DrawCommand::CUBE);
    assert_eq!(plan.draw.first_vertex, 0);
    assert_eq!(plan.draw.vertex_count as usize, CUBE_VERTICES.len());
    assert_eq!(plan.uniforms.seconds, 2.5);
}

#[test]
fn should_keep_cube_in_view_for_the_demo_camera() {
    let camera = OrbitCamera::new(4.0, Rad(30.0_f32.to_radians()), Deg(0.0));
    let plan = FramePlan::prepare(800, 600, &camera, 0.0).unwrap();
    let view_proj = plan.uniforms.view_proj();

    let view: [[f32; 4]; 4] = camera.get_view().into();
    let proj: [[f32; 4]; 4] = camera.get_perspective(800, 600).into();
    for value in view.iter().chain(&proj).flatten() {
        assert!(value.is_finite());
    }

    for corner in corners() {
        let clip = view_proj * corner;
        assert!(inside_clip_volume(clip), "{corner:?} -> {clip:?}");
    }
}

#[test]
fn should_roundtrip_uniform_bytes() {
    let uniforms = FrameUniforms::new(
        OrbitCamera::default().get_perspective(640, 480),
        123.25,
    );
    let bytes = uniforms.as_bytes();
    assert_eq!(bytes.len(), FRAME_UNIFORMS_SIZE);
    assert_eq!(FrameUniforms::from_bytes(bytes).unwrap(), uniforms);

    // seconds sits right after the 64 byte matrix
    assert_eq!(&bytes[64..68], &123.25_f32.to_ne_bytes());

    assert!(FrameUniforms::from_bytes(&bytes[..64]).is_err());
}

#[test]
fn should_shade_vertices_deterministically() {
    let plan = FramePlan::prepare(800, 600, &OrbitCamera::default(), 7.3).unwrap();
    for vertex in &CUBE_VERTICES {
        let first = shade_vertex(&plan.uniforms, vertex);
        let second = shade_vertex(&plan.uniforms, vertex);
        let bits = |v: Vector4<f32>| [v.x, v.y, v.z, v.w].map(f32::to_bits);
        assert_eq!(bits(first.clip_position), bits(second.clip_position));
        assert_eq!(first.tex_coords, vertex.tex_coords_f32());
    }
}

#[test]
fn should_not_rotate_at_time_zero() {
    let uniforms = FrameUniforms::new(Matrix4::identity(), 0.0);
    for vertex in &CUBE_VERTICES {
        let [x, y, z] = vertex.position;
        let out = shade_vertex(&uniforms, vertex);
        assert_eq!(out.clip_position, Vector4::new(x, y, z, 1.0));
    }
}

#[test]
fn should_rotate_about_the_vertical_axis() {
    let quarter = rotate_y(std::f32::consts::FRAC_PI_2);
    let rotated = quarter * Vector4::new(1.0, 0.5, 0.0, 1.0);
    assert!(rotated.x.abs() < 1e-6);
    assert_eq!(rotated.y, 0.5);
    assert!((rotated.z + 1.0).abs() < 1e-6);
}

#[test]
fn should_clamp_orbit_pitch_and_zoom() {
    let mut camera = OrbitCamera::default();
    let controller = OrbitController::default();

    controller.orbit(&mut camera, 0.0, 1.0e6);
    assert!(camera.pitch < Rad::from(Deg(90.0)));
    controller.orbit(&mut camera, 0.0, -2.0e6);
    assert!(camera.pitch > Rad::from(Deg(-90.0)));

    controller.zoom(&mut camera, 100.0);
    assert_eq!(camera.distance, 1.5);
    controller.zoom(&mut camera, -1.0e4);
    assert_eq!(camera.distance, 50.0);

    let eye = camera.eye();
    assert!(eye.x.is_finite() && eye.y.is_finite() && eye.z.is_finite());
}

#[test]
fn should_default_to_the_stock_demo() {
    let config = Config::default();
    assert_eq!((config.width, config.height), (800, 600));
    assert_eq!(config.texture, "checker.png");
    assert_eq!(config.camera.distance, 4.0);
    assert_eq!(config.clear_colour.r, 0.2);
    assert_eq!(config.clone().with_texture("crate.png").texture, "crate.png");
}
