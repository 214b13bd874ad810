use crate::camera::OrbitCamera;

/// Startup options. `Config::default()` is the stock demo.
#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Texture asset, a path or a file name under `assets/`.
    pub texture: String,
    pub clear_colour: wgpu::Color,
    pub camera: OrbitCamera,
}

impl Config {
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "cube-ngin".to_string(),
            width: 800,
            height: 600,
            texture: "checker.png".to_string(),
            clear_colour: wgpu::Color {
                r: 0.2,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            },
            camera: OrbitCamera::default(),
        }
    }
}
