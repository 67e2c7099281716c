//! Window and frame loop.
//!
//! [`run`] opens a window, builds the [`Scene`] once the event loop resumes,
//! and then renders one frame per redraw:
//!
//! 1. apply the input gathered since the last frame
//! 2. clear color and depth
//! 3. draw the background, then every particle
//! 4. advance the simulation by the fixed step
//! 5. present

use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::config::{CameraOrbit, SceneConfig};
use crate::error::AppError;
use crate::gpu::{Background, GpuContext, ParticleRenderer};
use crate::input::{Actions, Input};
use crate::shader::{self, BACKGROUND_SHADER, PARTICLE_SHADER};
use crate::system::ParticleSystem;
use crate::textures::TextureConfig;
use crate::time::FrameClock;

/// Frames between window title refreshes.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Open the viewer and block until its window closes.
pub fn run(config: SceneConfig) -> Result<(), AppError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Everything that exists while the window is open.
struct Scene {
    window: Arc<Window>,
    gpu: GpuContext,
    camera: Camera,
    orbit: CameraOrbit,
    background: Background,
    system: ParticleSystem,
    renderer: ParticleRenderer,
    clock: FrameClock,
}

impl Scene {
    fn new(window: Arc<Window>, config: &SceneConfig) -> Result<Self, AppError> {
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let mut system = match config.seed {
            Some(seed) => ParticleSystem::seeded(config.particle_count, seed)?,
            None => ParticleSystem::new(config.particle_count)?,
        };

        let particle_shader = shader::resolve(config.particle_shader.as_deref(), PARTICLE_SHADER);
        let background_shader =
            shader::resolve(config.background_shader.as_deref(), BACKGROUND_SHADER);

        let sprite = TextureConfig::load_or_placeholder(&config.particle_texture);
        let renderer =
            ParticleRenderer::new(&gpu, &sprite, &particle_shader, config.particle_count)?;

        let backdrop = TextureConfig::load_or_placeholder(&config.background_texture);
        let background = Background::new(&gpu, backdrop, &background_shader);

        if renderer.uses_placeholder_texture() {
            log::warn!("particles drawn with the placeholder texture");
        }
        if background.uses_placeholder_texture() {
            log::warn!("background drawn with the placeholder texture");
        }

        let orbit = config.camera;
        let camera = Camera::spherical(orbit.radius, orbit.theta, orbit.phi, Vec3::ZERO, Vec3::Y);

        if config.emit_on_start {
            system.emit();
        }

        log::info!(
            "scene ready: {} particles, {}x{} surface",
            system.capacity(),
            gpu.config.width,
            gpu.config.height
        );

        Ok(Self {
            window,
            gpu,
            camera,
            orbit,
            background,
            system,
            renderer,
            clock: FrameClock::new(config.time_step),
        })
    }

    fn apply(&mut self, actions: &Actions) {
        if actions.emit {
            self.system.emit();
        }

        if actions.orbit != glam::Vec2::ZERO || actions.zoom != 0.0 {
            self.orbit.adjust(actions.orbit.x, actions.orbit.y, actions.zoom);
            let CameraOrbit { radius, theta, phi } = self.orbit;
            if let Err(e) = self.camera.update_spherical(radius, theta, phi) {
                log::warn!("{e}");
            }
        }
    }

    /// Draw one frame and advance the simulation.
    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let mvp = self.camera.view_projection(self.gpu.aspect());
        self.background.set_view_projection(&self.gpu.queue, mvp);
        self.renderer.set_view_projection(&self.gpu.queue, mvp);
        self.renderer.prepare(&self.gpu.queue, &self.system);

        let background = &self.background;
        let renderer = &self.renderer;
        self.gpu.render(|pass| {
            background.draw(pass);
            renderer.draw(pass);
        })?;

        self.system.update(self.clock.tick());
        Ok(())
    }
}

struct App {
    config: SceneConfig,
    input: Input,
    scene: Option<Scene>,
    error: Option<AppError>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            input: Input::new(),
            scene: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_scene(&self, event_loop: &ActiveEventLoop) -> Result<Scene, AppError> {
        let (width, height) = self.config.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        Scene::new(window, &self.config)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let actions = self.input.actions();
        self.input.begin_frame();

        if actions.quit {
            event_loop.exit();
            return;
        }

        let Some(scene) = &mut self.scene else {
            return;
        };

        scene.apply(&actions);

        let result = scene.frame();
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => scene.gpu.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => log::warn!("surface timed out, skipping frame"),
            Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, e.into());
                return;
            }
            Err(e) => log::error!("render error: {e}"),
        }

        if scene.clock.frame() % TITLE_REFRESH_FRAMES == 0 {
            scene.window.set_title(&format!(
                "{} - {} particles - {:.0} fps",
                self.config.title,
                scene.renderer.drawn(),
                scene.clock.fps()
            ));
        }
        scene.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }
        match self.create_scene(event_loop) {
            Ok(scene) => {
                scene.window.request_redraw();
                self.scene = Some(scene);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(scene) = &mut self.scene {
                    scene.gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
