//! Application event loop.
//!
//! [`run`] opens a window, initializes the GPU context and the
//! [`FrameRenderer`] once the platform resumes the app, and then renders a
//! frame on every redraw:
//!
//! 1. Feed window events to the orbit controller
//! 2. Reconfigure the surface on resize
//! 3. On `RedrawRequested`, render one frame and request the next
//!
//! Any initialization failure is logged and ends the loop; `run` returns it.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::Config,
    context::Context,
    render::{FrameOutcome, FrameRenderer},
    resources::texture::load_image,
};

/// GPU context plus the renderer that draws into it.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    renderer: FrameRenderer,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let image = load_image(&config.texture)?;
        let ctx = Context::new(window, config).await?;
        let renderer = FrameRenderer::new(&ctx.device, &ctx.queue, ctx.config.format, &image)?;
        Ok(Self { ctx, renderer })
    }

    fn render(&mut self) -> Result<FrameOutcome, wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();
        let seconds = self.ctx.seconds();
        self.renderer.render(&self.ctx, seconds)
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let init_future = AppState::new(window, &self.config);
        match self.async_runtime.block_on(init_future) {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e.context("App initialization failed")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let ctx = &mut state.ctx;
        if ctx.controller.handle_window_event(&mut ctx.camera, &event) {
            log::trace!("camera moved to {:?}", ctx.camera.eye());
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(FrameOutcome::Drawn) => (),
                Ok(FrameOutcome::Skipped) => log::trace!("frame skipped"),
                // Reconfigure the surface if it's lost or outdated
                Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    log::warn!("{e}, reconfiguring the surface");
                    let size = state.ctx.window.inner_size();
                    state.ctx.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => (),
        }
    }
}

/// Open a window and spin the cube until it is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
