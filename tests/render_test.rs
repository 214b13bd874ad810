#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_draw_cube_over_clear_colour() {
    use crate::common::test_utils::{TARGET_FORMAT, f_to_u8, headless, offscreen, solid};
    use cube_ngin::{
        FrameOutcome, FrameRenderer, config::Config, pipelines::cube::FixedFunctionState,
        readback::read_texture,
    };

    const SIZE: u32 = 256;
    let (device, queue) = headless();
    let config = Config::default();
    let image = solid(4, 4, [200, 120, 40, 255]);
    let mut renderer = FrameRenderer::new(&device, &queue, TARGET_FORMAT, &image).unwrap();
    assert_eq!(renderer.program.state, FixedFunctionState::CUBE);
    let (color, depth) = offscreen(&device, SIZE, SIZE);
    let view = color.create_view(&wgpu::TextureViewDescriptor::default());

    let outcome = renderer.render_to(
        &device,
        &queue,
        &view,
        &depth.view,
        (SIZE, SIZE),
        &config.camera,
        config.clear_colour,
        0.0,
    );
    assert_eq!(outcome, FrameOutcome::Drawn);

    let pixels = read_texture(&device, &queue, &color).unwrap();
    let clear = config.clear_colour;
    let expected_clear = image::Rgba([
        f_to_u8(clear.r),
        f_to_u8(clear.g),
        f_to_u8(clear.b),
        f_to_u8(clear.a),
    ]);
    for (x, y) in [(0, 0), (SIZE - 1, 0), (0, SIZE - 1), (SIZE - 1, SIZE - 1)] {
        assert_eq!(*pixels.get_pixel(x, y), expected_clear, "corner ({x}, {y})");
    }

    let center = pixels.get_pixel(SIZE / 2, SIZE / 2);
    assert_eq!(center[3], 255, "cube should cover the center: {center:?}");
    assert_ne!(*center, expected_clear);
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_upload_the_planned_uniforms() {
    use crate::common::test_utils::{TARGET_FORMAT, headless, offscreen, solid};
    use cube_ngin::{
        FramePlan, FrameRenderer,
        camera::OrbitCamera,
        data_structures::uniforms::{FRAME_UNIFORMS_SIZE, FrameUniforms},
        readback::read_buffer,
    };

    let (device, queue) = headless();
    let mut renderer =
        FrameRenderer::new(&device, &queue, TARGET_FORMAT, &solid(1, 1, [255; 4])).unwrap();
    let (color, depth) = offscreen(&device, 64, 32);
    let view = color.create_view(&wgpu::TextureViewDescriptor::default());
    let camera = OrbitCamera::default();

    for seconds in [0.5, 3.75] {
        renderer.render_to(
            &device,
            &queue,
            &view,
            &depth.view,
            (64, 32),
            &camera,
            wgpu::Color::BLACK,
            seconds,
        );
        let bytes = read_buffer(
            &device,
            &queue,
            &renderer.uniforms.buffer,
            FRAME_UNIFORMS_SIZE as wgpu::BufferAddress,
        )
        .unwrap();
        let expected = FramePlan::prepare(64, 32, &camera, seconds).unwrap().uniforms;
        assert_eq!(FrameUniforms::from_bytes(&bytes).unwrap(), expected);
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_skip_zero_area_target_without_drawing() {
    use crate::common::test_utils::{TARGET_FORMAT, headless, offscreen, solid};
    use cube_ngin::{FrameOutcome, FrameRenderer, camera::OrbitCamera, readback::read_buffer};

    let (device, queue) = headless();
    let mut renderer =
        FrameRenderer::new(&device, &queue, TARGET_FORMAT, &solid(1, 1, [255; 4])).unwrap();
    let (color, depth) = offscreen(&device, 8, 8);
    let view = color.create_view(&wgpu::TextureViewDescriptor::default());

    let before = renderer.uniforms.uniforms;
    let outcome = renderer.render_to(
        &device,
        &queue,
        &view,
        &depth.view,
        (0, 8),
        &OrbitCamera::default(),
        wgpu::Color::BLACK,
        1.0,
    );
    assert_eq!(outcome, FrameOutcome::Skipped);
    assert_eq!(renderer.uniforms.uniforms, before);

    let bytes = read_buffer(&device, &queue, &renderer.uniforms.buffer, 80).unwrap();
    assert_eq!(bytes, before.as_bytes());
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_reject_texture_larger_than_device_limit() {
    use crate::common::test_utils::{TARGET_FORMAT, headless, solid};
    use cube_ngin::FrameRenderer;

    let (device, queue) = headless();
    let max = device.limits().max_texture_dimension_2d;

    let err = FrameRenderer::new(&device, &queue, TARGET_FORMAT, &solid(max + 1, 1, [255; 4]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("color texture"), "{err}");
    assert!(err.contains(&max.to_string()), "{err}");

    assert!(FrameRenderer::new(&device, &queue, TARGET_FORMAT, &solid(1, max + 1, [255; 4])).is_err());
}
