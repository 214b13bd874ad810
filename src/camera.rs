//! Orbit camera and its mouse controller.
//!
//! The camera circles the origin: `distance` away, raised by `pitch` and
//! turned by `yaw`. [`OrbitCamera::get_view`] and
//! [`OrbitCamera::get_perspective`] are all the renderer asks of it.

use cgmath::{Deg, Matrix4, Point3, Rad, Vector3};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

/// cgmath builds OpenGL clip space (z in `-w..w`); wgpu expects z in `0..w`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const SAFE_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: Rad<f32>,
    pub yaw: Rad<f32>,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn new<P: Into<Rad<f32>>, Y: Into<Rad<f32>>>(distance: f32, pitch: P, yaw: Y) -> Self {
        Self {
            distance,
            pitch: pitch.into(),
            yaw: yaw.into(),
            fovy: Deg(45.0).into(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        Point3::new(
            self.distance * sin_yaw * cos_pitch,
            self.distance * sin_pitch,
            self.distance * cos_yaw * cos_pitch,
        )
    }

    pub fn get_view(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y())
    }

    /// Perspective projection for a `width` x `height` surface.
    ///
    /// The aspect ratio is undefined for a zero-area surface; callers skip
    /// such frames before asking for a projection.
    pub fn get_perspective(&self, width: u32, height: u32) -> Matrix4<f32> {
        let aspect = width as f32 / height as f32;
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, aspect, self.znear, self.zfar)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // 4 units out, 30 degrees above the cube
        Self::new(4.0, Deg(30.0), Deg(0.0))
    }
}

/// Turns mouse input into camera motion: left-drag orbits, the wheel zooms.
#[derive(Debug)]
pub struct OrbitController {
    sensitivity: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

impl OrbitController {
    pub fn new(sensitivity: f32, zoom_speed: f32) -> Self {
        Self {
            sensitivity,
            zoom_speed,
            min_distance: 1.5,
            max_distance: 50.0,
            dragging: false,
            cursor: None,
        }
    }

    /// Apply one window event to `camera`. Returns whether the camera moved.
    pub fn handle_window_event(&mut self, camera: &mut OrbitCamera, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.cursor.replace(*position);
                match previous {
                    Some(previous) if self.dragging => {
                        let dx = (position.x - previous.x) as f32;
                        let dy = (position.y - previous.y) as f32;
                        self.orbit(camera, dx, dy);
                        true
                    }
                    _ => false,
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 50.0,
                };
                self.zoom(camera, scroll);
                true
            }
            _ => false,
        }
    }

    pub fn orbit(&self, camera: &mut OrbitCamera, dx: f32, dy: f32) {
        camera.yaw = camera.yaw - Rad(dx * self.sensitivity);
        camera.pitch = Rad((camera.pitch.0 + dy * self.sensitivity).clamp(-SAFE_PITCH, SAFE_PITCH));
    }

    pub fn zoom(&self, camera: &mut OrbitCamera, scroll: f32) {
        camera.distance = (camera.distance * (1.0 - scroll * self.zoom_speed))
            .clamp(self.min_distance, self.max_distance);
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(0.005, 0.1)
    }
}
