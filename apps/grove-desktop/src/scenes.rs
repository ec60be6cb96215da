use crate::ui;
use glam::{EulerRot, Mat4, Vec2, Vec3};
use grove_assets::{AssetId, AssetStore, MeshData, Primitive, fit_transform, import_gltf};
use grove_common::Color;
use grove_input::{Action, InputState, Key};
use grove_kernel::{GameConfig, World};
use grove_render::{DrawItem, Hud, Lighting, SceneFrame, frame_from_world};
use grove_render_wgpu::{AssetDraw, Camera, FrameStats};
use grove_tools::EventTally;
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;

const RECENT_EVENTS: usize = 64;
const CUBE_SPIN_PER_FRAME: f32 = 0.01;
const MODEL_SIZE: f32 = 2.0;
const ORBIT_SPEED: f32 = 0.3;

/// What the desktop window is showing.
pub trait Scene {
    fn title(&self) -> &str;
    /// Advance by `dt` seconds of wall-clock time.
    fn update(&mut self, dt: f32);
    fn key(&mut self, _key: Key, _pressed: bool) {}
    fn click(&mut self) {}
    fn pointer_moved(&mut self, _x: f64, _y: f64, _width: u32, _height: u32) {}
    /// Window lost focus.
    fn blur(&mut self) {}
    fn resize(&mut self, width: u32, height: u32);
    fn camera(&self) -> &Camera;
    fn frame(&self) -> SceneFrame;
    fn asset_draws(&self) -> Vec<AssetDraw> {
        Vec::new()
    }
    /// Meshes that still need to go to the GPU. Each is handed out once.
    fn take_uploads(&mut self) -> Vec<(AssetId, MeshData)> {
        Vec::new()
    }
    /// Problem to show in the error banner.
    fn error(&self) -> Option<&str> {
        None
    }
    fn ui(&mut self, ctx: &egui::Context, stats: FrameStats);
}

/// The hippo game.
pub struct HippoScene {
    world: World,
    input: InputState,
    camera: Camera,
    tick_accumulator: f32,
    show_inspector: bool,
    tally: EventTally,
    recent: VecDeque<String>,
}

impl HippoScene {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let world = World::new(config, seed);
        let mut camera = Camera::default();
        camera.snap_to(world.hippo().position);
        let mut scene = Self {
            world,
            input: InputState::default(),
            camera,
            tick_accumulator: 0.0,
            show_inspector: false,
            tally: EventTally::default(),
            recent: VecDeque::new(),
        };
        scene.collect_events();
        scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn act(&mut self, action: Action) {
        if self.world.is_game_over() && !action.allowed_after_game_over() {
            return;
        }
        match action {
            Action::Shoot => {
                self.world.fire();
            }
            Action::Restart => self.restart(),
            Action::ToggleInspector => self.show_inspector = !self.show_inspector,
            Action::Noop => {}
        }
    }

    fn restart(&mut self) {
        self.world.restart();
        self.tick_accumulator = 0.0;
        self.camera.snap_to(self.world.hippo().position);
        self.collect_events();
    }

    fn collect_events(&mut self) {
        let tick = self.world.tick();
        for event in self.world.drain_events() {
            self.tally.add(&event);
            if self.recent.len() == RECENT_EVENTS {
                self.recent.pop_front();
            }
            self.recent.push_back(format!("t{tick} {event:?}"));
        }
    }
}

impl Scene for HippoScene {
    fn title(&self) -> &str {
        "Hippo Grove"
    }

    fn update(&mut self, dt: f32) {
        let tick = self.world.config().tick_seconds();
        self.tick_accumulator += dt;
        while self.tick_accumulator >= tick {
            self.tick_accumulator -= tick;
            self.world.step(self.input.movement());
            self.camera.follow(self.world.hippo().position);
        }
        self.collect_events();
    }

    fn key(&mut self, key: Key, pressed: bool) {
        if let Some(action) = self.input.set_key(key, pressed) {
            self.act(action);
        }
    }

    fn click(&mut self) {
        let action = self.input.click();
        self.act(action);
    }

    fn pointer_moved(&mut self, x: f64, y: f64, width: u32, height: u32) {
        self.input.pointer.set_pixel(x, y, width, height);
    }

    fn blur(&mut self) {
        self.input.release_all();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frame(&self) -> SceneFrame {
        frame_from_world(&self.world)
    }

    fn ui(&mut self, ctx: &egui::Context, stats: FrameStats) {
        let hud = Hud::from_world(&self.world);
        ui::hud(ctx, &hud);
        if ui::game_over(ctx, &hud) {
            self.restart();
        }
        if self.show_inspector {
            let recent: Vec<String> = self.recent.iter().cloned().collect();
            ui::inspector(ctx, &self.world, &self.tally, &recent, stats);
        }
        ui::controls_hint(ctx, "WASD / arrows: move   Space / click: shoot   R: restart   F1: inspector");
    }
}

/// Unlit green cube spinning in front of the camera.
pub struct CubeScene {
    camera: Camera,
    rotation: Vec2,
}

impl CubeScene {
    pub fn new() -> Self {
        Self {
            camera: Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO),
            rotation: Vec2::ZERO,
        }
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }
}

impl Scene for CubeScene {
    fn title(&self) -> &str {
        "Grove: cube"
    }

    /// Spins a fixed amount per rendered frame.
    fn update(&mut self, _dt: f32) {
        self.rotation += Vec2::splat(CUBE_SPIN_PER_FRAME);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frame(&self) -> SceneFrame {
        let mut frame = SceneFrame::new(plain_lighting());
        let model = Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        let green = Color::rgb(0.0, 1.0, 0.0);
        frame
            .items
            .push(DrawItem::solid(Primitive::Cube, model, Color::BLACK).glowing(green, 1.0));
        frame
    }

    fn ui(&mut self, _ctx: &egui::Context, _stats: FrameStats) {}
}

/// glTF viewer with an orbiting camera.
pub struct ModelScene {
    camera: Camera,
    store: AssetStore,
    ids: Vec<AssetId>,
    fit: Mat4,
    pending: Vec<AssetId>,
    angle: f32,
    error: Option<String>,
}

impl ModelScene {
    /// Import `path`. Failures are kept and shown instead of the model.
    pub fn load(path: Option<&Path>) -> Self {
        let mut scene = Self {
            camera: Camera::default(),
            store: AssetStore::new(),
            ids: Vec::new(),
            fit: Mat4::IDENTITY,
            pending: Vec::new(),
            angle: 0.0,
            error: None,
        };
        match path {
            None => scene.error = Some("No model given; pass --model PATH".into()),
            Some(path) => match import_gltf(path) {
                Ok(meshes) => {
                    scene.fit = fit_transform(&meshes, MODEL_SIZE);
                    let mut seen = BTreeSet::new();
                    scene.ids = meshes
                        .into_iter()
                        .map(|m| m.register(&mut scene.store))
                        .filter(|id| seen.insert(*id))
                        .collect();
                    scene.pending = scene.ids.clone();
                    tracing::info!(
                        path = %path.display(),
                        meshes = scene.store.len(),
                        triangles = scene.store.triangle_count(),
                        "model loaded"
                    );
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), "model load failed: {e}");
                    scene.error = Some(format!("Could not load {}: {e}", path.display()));
                }
            },
        }
        scene.orbit();
        scene
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    fn orbit(&mut self) {
        let target = Vec3::Y * MODEL_SIZE * 0.5;
        self.camera
            .orbit(target, MODEL_SIZE * 2.0, MODEL_SIZE * 0.75, self.angle);
    }
}

impl Scene for ModelScene {
    fn title(&self) -> &str {
        "Grove: model viewer"
    }

    fn update(&mut self, dt: f32) {
        self.angle += dt * ORBIT_SPEED;
        self.orbit();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn frame(&self) -> SceneFrame {
        let mut frame = SceneFrame::new(plain_lighting());
        let ground = Mat4::from_scale(Vec3::new(MODEL_SIZE * 4.0, 1.0, MODEL_SIZE * 4.0));
        frame
            .items
            .push(DrawItem::solid(Primitive::Plane, ground, Color::from_hex(0x3a3a3a)));
        frame
    }

    fn asset_draws(&self) -> Vec<AssetDraw> {
        self.ids
            .iter()
            .filter_map(|id| self.store.get(*id).map(|asset| (id, asset)))
            .map(|(id, asset)| AssetDraw {
                asset: *id,
                model: self.fit,
                color: asset.base_color,
            })
            .collect()
    }

    fn take_uploads(&mut self) -> Vec<(AssetId, MeshData)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .filter_map(|id| self.store.get(id).map(|asset| (id, asset.mesh.clone())))
            .collect()
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn ui(&mut self, ctx: &egui::Context, stats: FrameStats) {
        ui::controls_hint(
            ctx,
            &format!(
                "{} meshes, {} triangles, {} draw calls",
                self.store.len(),
                self.store.triangle_count(),
                stats.draw_calls
            ),
        );
    }
}

/// Neutral light with fog pushed out of view.
fn plain_lighting() -> Lighting {
    Lighting {
        ambient: 0.5,
        sun_color: Color::WHITE,
        point_intensity: 0.0,
        fog_color: Color::BLACK,
        fog_near: 900.0,
        fog_far: 1000.0,
        ..Lighting::default()
    }
}
