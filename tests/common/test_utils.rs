use cube_ngin::{data_structures::texture::Texture, resources::texture::DecodedImage};

/// Format the offscreen tests render into. Linear, so the clear colour
/// reads back unchanged.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// A device without a surface. Panics if the machine has no usable adapter.
pub fn headless() -> (wgpu::Device, wgpu::Queue) {
    let runtime = tokio::runtime::Runtime::new().expect("failed to start the async runtime");
    runtime.block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .expect("no graphics adapter available");
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Test Device"),
                ..Default::default()
            })
            .await
            .expect("failed to open the graphics device")
    })
}

/// Color and depth targets of `width` x `height` pixels.
pub fn offscreen(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, Texture) {
    let color = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Test Output Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth = Texture::create_depth_texture(device, [width, height], "Test Depth Texture");
    (color, depth)
}

/// A single-colour opaque image.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DecodedImage {
    DecodedImage {
        pixels: rgba.repeat((width * height) as usize),
        width,
        height,
        channels: 4,
    }
}

pub fn f_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
