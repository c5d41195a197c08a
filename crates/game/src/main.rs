//! Panda Run - a three-lane endless runner with HDR bloom

mod character;
mod config;
mod events;
mod lane;
mod persistence;
mod render;
mod session;
mod settings_panel;
mod update;

use anyhow::Result;
use engine_core::Time;
use input::InputState;
use renderer::{Camera, CubeTexture, MaterialId, Mesh, Renderer, Texture};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use config::GameConfig;
use lane::LaneStream;
use session::ProgramState;
use settings_panel::SettingsPanel;

/// Geometry shared by every draw.
pub(crate) struct SceneMeshes {
    /// Unit cube: obstacles, collectibles and the character parts.
    cube: Mesh,
    /// One 2x2 ground tile.
    ground: Mesh,
    vegetation: Mesh,
}

/// Texture handles registered with the renderer.
pub(crate) struct Materials {
    ground: MaterialId,
    brick: MaterialId,
    grass: MaterialId,
    white: MaterialId,
}

/// Main game state
pub struct GameState {
    // Core systems
    time: Time,
    input: InputState,
    config: GameConfig,

    // Renderer
    renderer: Renderer,
    camera: Camera,
    meshes: SceneMeshes,
    materials: Materials,

    // Game
    program: ProgramState,
    stream: LaneStream,
    panel: SettingsPanel,
    /// Last title pushed to the window, to avoid resetting it every frame.
    title: String,

    running: bool,
}

impl GameState {
    async fn new(window: Arc<Window>, config: GameConfig) -> Result<Self> {
        let mut renderer = Renderer::new(window, config.vsync, config.blur_iterations).await?;

        let mut camera = Camera::default();
        let (width, height) = renderer.dimensions();
        camera.set_aspect(width, height);

        let meshes = SceneMeshes {
            cube: Mesh::cube(renderer.device()),
            ground: Mesh::plane(renderer.device(), 2.0),
            vegetation: Mesh::vegetation_quad(renderer.device()),
        };

        // Ground is authored in sRGB; the rest are sampled as linear data.
        let ground = Texture::load_or_white(
            &renderer.device,
            &renderer.queue,
            &config.texture_path("grass2.jpg"),
            true,
            wgpu::AddressMode::Repeat,
        );
        let brick = Texture::load_or_white(
            &renderer.device,
            &renderer.queue,
            &config.texture_path("brick.jpg"),
            false,
            wgpu::AddressMode::Repeat,
        );
        let grass = Texture::load_or_white(
            &renderer.device,
            &renderer.queue,
            &config.texture_path("grass.png"),
            false,
            wgpu::AddressMode::ClampToEdge,
        );
        let materials = Materials {
            ground: renderer.create_material(&ground),
            brick: renderer.create_material(&brick),
            grass: renderer.create_material(&grass),
            white: renderer.white_material(),
        };

        match CubeTexture::load(&renderer.device, &renderer.queue, &config.skybox_dir()) {
            Ok(cube) => renderer.set_skybox(&cube),
            Err(e) => log::error!("Skybox disabled: {e}"),
        }

        let mut program = ProgramState::default();
        persistence::load(&config.state_path, &mut program);

        let stream = LaneStream::new(config.rng_seed);

        let mut state = Self {
            time: Time::new(),
            input: InputState::new(),
            config,
            renderer,
            camera,
            meshes,
            materials,
            program,
            stream,
            panel: SettingsPanel::new(),
            title: String::new(),
            running: true,
        };
        let overlay = state.program.ui_enabled;
        state.set_cursor_captured(!overlay);
        state.refresh_title();
        Ok(state)
    }

    /// Persist the record and stop the event loop.
    fn quit(&mut self) {
        if let Err(e) = persistence::save(&self.config.state_path, &self.program) {
            log::error!("Failed to save state to {:?}: {}", self.config.state_path, e);
        } else {
            log::info!("Saved state to {:?}", self.config.state_path);
        }
        self.running = false;
    }

    fn update(&mut self) {
        update::frame(self);
    }

    fn render(&mut self) -> Result<()> {
        let Err(e) = render::run(self) else {
            return Ok(());
        };
        match e.downcast_ref::<wgpu::SurfaceError>().cloned() {
            Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
                Ok(())
            }
            Some(wgpu::SurfaceError::OutOfMemory) => {
                self.quit();
                Err(e)
            }
            Some(other) => {
                log::warn!("Skipping frame: {other}");
                Ok(())
            }
            None => Err(e),
        }
    }

    fn refresh_title(&mut self) {
        let title = self.panel.title(&self.program);
        if title != self.title {
            self.renderer.window.set_title(&title);
            self.title = title;
        }
    }
}

struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let window_attrs = Window::default_attributes()
                .with_title("Panda Run")
                .with_inner_size(config.window_size());

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let state = pollster::block_on(GameState::new(window.clone(), config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize game: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║                    Panda Run                     ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                       ║");
    println!("║    Left/Right - Change lane  │  R   - Restart    ║");
    println!("║    B          - Bloom on/off │  F5  - Settings   ║");
    println!("║    Escape     - Save and quit                    ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  SETTINGS (F5):                                  ║");
    println!("║    Up/Down - Select field  │  +/- - Adjust       ║");
    println!("╚══════════════════════════════════════════════════╝");

    log::info!("Starting Panda Run");

    let event_loop = EventLoop::new()?;
    // Redraw continuously; the lane stream advances every frame.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
