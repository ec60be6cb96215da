mod gpu;
mod keys;
mod scenes;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gpu::GpuContext;
use grove_kernel::GameConfig;
use scenes::{CubeScene, HippoScene, ModelScene, Scene};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

/// Upper bound on the wall-clock step fed to a scene.
const MAX_FRAME_SECONDS: f32 = 0.1;

#[derive(Parser)]
#[command(name = "grove-desktop", about = "Hippo Grove desktop game")]
struct Cli {
    /// Which scene to open
    #[arg(long, value_enum, default_value_t = SceneKind::Hippo)]
    scene: SceneKind,

    /// glTF/GLB file for the model scene
    #[arg(long)]
    model: Option<PathBuf>,

    /// YAML game config; built-in defaults otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Round seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    Hippo,
    Cube,
    Model,
}

impl Cli {
    fn build_scene(&self) -> Result<Box<dyn Scene>> {
        Ok(match self.scene {
            SceneKind::Hippo => {
                let config = match &self.config {
                    Some(path) => GameConfig::load(path)
                        .with_context(|| format!("loading config {}", path.display()))?,
                    None => GameConfig::default(),
                };
                let seed = self.seed.unwrap_or_else(clock_seed);
                tracing::info!(seed, "starting round");
                Box::new(HippoScene::new(config, seed))
            }
            SceneKind::Cube => Box::new(CubeScene::new()),
            SceneKind::Model => Box::new(ModelScene::load(self.model.as_deref())),
        })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

struct GroveApp {
    scene: Box<dyn Scene>,
    gpu: Option<GpuContext>,
    egui_ctx: egui::Context,
    last_frame: Instant,
    /// Transient rendering problem shown above the scene.
    banner: Option<String>,
}

impl GroveApp {
    fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            gpu: None,
            egui_ctx: egui::Context::default(),
            last_frame: Instant::now(),
            banner: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_SECONDS);
        self.last_frame = now;
        self.scene.update(dt);

        let Some(gpu) = &mut self.gpu else {
            return;
        };
        match gpu.draw(&self.egui_ctx, self.scene.as_mut(), self.banner.as_deref()) {
            Ok(()) => self.banner = None,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                tracing::warn!("surface error: {e}");
                self.banner = Some(format!("Rendering problem: {e}"));
            }
        }
        gpu.window().request_redraw();
    }
}

impl ApplicationHandler for GroveApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match GpuContext::new(event_loop, &self.egui_ctx, self.scene.title()) {
            Ok(gpu) => {
                let (width, height) = gpu.size();
                self.scene.resize(width, height);
                self.gpu = Some(gpu);
                self.last_frame = Instant::now();
            }
            Err(e) => {
                tracing::error!("GPU initialisation failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            if gpu.egui_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                    let (width, height) = gpu.size();
                    self.scene.resize(width, height);
                }
            }
            WindowEvent::Focused(false) => self.scene.blur(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(key) = keys::map_key(code) {
                    self.scene.key(key, state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => self.scene.click(),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(gpu) = &self.gpu {
                    let (width, height) = gpu.size();
                    self.scene
                        .pointer_moved(position.x, position.y, width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window().request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(scene = ?cli.scene, "grove-desktop starting");
    let scene = cli.build_scene()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GroveApp::new(scene);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_hippo() {
        let cli = Cli::try_parse_from(["grove-desktop"]).unwrap();
        assert_eq!(cli.scene, SceneKind::Hippo);
        assert!(cli.seed.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_parses_model_scene() {
        let cli =
            Cli::try_parse_from(["grove-desktop", "--scene", "model", "--model", "duck.glb", "-v"])
                .unwrap();
        assert_eq!(cli.scene, SceneKind::Model);
        assert_eq!(cli.model, Some(PathBuf::from("duck.glb")));
        assert!(cli.verbose);
    }

    #[test]
    fn seeded_hippo_scene_builds() {
        let cli = Cli::try_parse_from(["grove-desktop", "--seed", "9"]).unwrap();
        let scene = cli.build_scene().unwrap();
        assert_eq!(scene.title(), "Hippo Grove");
    }

    #[test]
    fn missing_config_is_an_error() {
        let cli = Cli::try_parse_from(["grove-desktop", "--config", "/no/such/grove.yaml"]).unwrap();
        assert!(cli.build_scene().is_err());
    }
}
