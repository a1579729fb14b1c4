use glam::DVec2;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use wrapworld_common::CellLocation;
use wrapworld_input::{Action, InputState, Key};
use wrapworld_kernel::{Player, World};
use wrapworld_render::{Camera, Frame, GridHighlight, Renderer, VisibleRegion, pick_cell};
use wrapworld_stream::ChunkStreamer;

use crate::clock::{FrameTimer, MAX_FRAME_DT};
use crate::config::{EngineConfig, EngineError};

/// Frames of history kept for FPS reporting.
const TIMER_HISTORY: usize = 120;
/// Frame statistics are logged this often while debug is on.
const STATS_INTERVAL: u64 = 60;

/// Owns the world, player, camera and input for one session and advances
/// them in a fixed per-frame order.
pub struct GameEngine {
    config: EngineConfig,
    world: World,
    player: Player,
    camera: Camera,
    input: InputState,
    highlight: GridHighlight,
    streamer: Option<ChunkStreamer>,
    timer: FrameTimer,
    grid_visible: bool,
    debug: bool,
    frames: u64,
}

#[derive(Serialize)]
struct EngineState<'a> {
    frame: u64,
    player: &'a Player,
    camera: &'a Camera,
    cached_chunks: usize,
    generated_chunks: u64,
    grid_visible: bool,
    debug: bool,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        let world = World::new(config.world);
        let player = Player::with_settings(DVec2::ZERO, config.player);
        let camera = Camera::new(config.viewport.width, config.viewport.height)
            .with_follow_factor(config.camera.follow_factor);
        let streamer = config.retention.map(ChunkStreamer::new);
        tracing::info!(
            retention = streamer.is_some(),
            debug = config.debug,
            "engine started"
        );
        Self {
            debug: config.debug,
            config,
            world,
            player,
            camera,
            input: InputState::new(),
            highlight: GridHighlight::default(),
            streamer,
            timer: FrameTimer::new(TIMER_HISTORY),
            grid_visible: true,
            frames: 0,
        }
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Ok(Self::new(EngineConfig::load(path)?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn scroll(&mut self, delta: f64) {
        self.input.scroll(delta);
    }

    /// Cursor moved within the window; `None` when it left.
    pub fn mouse_moved(&mut self, screen: Option<DVec2>) {
        self.input.set_cursor(screen);
        self.highlight.set_cursor(screen);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.resize(width, height);
    }

    /// Advance one frame: actions, camera rotation and zoom, player, then
    /// camera follow.
    pub fn update(&mut self, dt: f64) {
        let _span = tracing::info_span!("engine_update", frame = self.frames).entered();

        for action in self.input.actions() {
            self.apply(action);
        }

        let movement = self.input.movement(self.camera.mode());
        if movement.camera_left {
            self.camera.rotate_camera(-Camera::rotation_step());
        }
        if movement.camera_right {
            self.camera.rotate_camera(Camera::rotation_step());
        }

        let wheel = self.input.wheel_delta();
        if wheel != 0.0 {
            let step = self.config.camera.zoom_step.copysign(wheel);
            self.camera.set_zoom(self.camera.target_zoom() + step);
        }

        self.player.update(
            dt,
            &movement,
            self.input.interacting(),
            self.camera.mode(),
            self.camera.rotation(),
        );
        self.camera.update(dt);
        self.camera.follow(self.player.position);

        self.input.end_frame();
        self.frames += 1;
        // Recorded frame time shares the clock's clamp; NaN records as zero.
        self.timer
            .record(Duration::from_secs_f64(dt.max(0.0).min(MAX_FRAME_DT)));
        if self.debug && self.frames % STATS_INTERVAL == 0 {
            tracing::debug!(
                fps = self.timer.fps(),
                max_ms = self.timer.max().as_secs_f64() * 1000.0,
                cached = self.world.cached_count(),
                "frame stats"
            );
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleCameraMode => {
                self.camera.set_mode(self.camera.mode().toggled());
            }
            Action::ResetCameraRotation => {
                self.camera.set_rotation(0.0);
                tracing::info!("camera rotation reset");
            }
            Action::ToggleGrid => {
                self.grid_visible = !self.grid_visible;
                tracing::info!(visible = self.grid_visible, "grid toggled");
            }
            Action::ToggleDebug => {
                self.debug = !self.debug;
                tracing::info!(debug = self.debug, "debug toggled");
            }
        }
    }

    /// Cull, load visible chunks, apply retention, then hand the frame to `renderer`.
    pub fn render<R: Renderer>(&mut self, renderer: &R) -> R::Output {
        let _span = tracing::info_span!("render_frame", frame = self.frames).entered();
        let config = *self.world.config();
        let view = self.camera.wrapped(&config);
        let region = VisibleRegion::compute(&view, &config);

        let chunks = match &region {
            Some(r) => self.world.load_range(r.chunks),
            None => Vec::new(),
        };
        if let (Some(streamer), Some(r)) = (self.streamer.as_mut(), region.as_ref()) {
            streamer.update(&mut self.world, r.chunks);
        }
        tracing::trace!(
            visible = chunks.len(),
            cached = self.world.cached_count(),
            "frame culled"
        );

        let frame = Frame {
            camera: &view,
            player: &self.player,
            region: region.as_ref(),
            chunks: &chunks,
            config: &config,
            highlight: self.highlight.cell(&view, self.player.angle, &config),
            grid_visible: self.grid_visible,
            debug: self.debug,
        };
        renderer.render(&frame)
    }

    /// Resolve a screen position to the wrapped tile under it.
    pub fn pick(&self, screen: DVec2) -> CellLocation {
        pick_cell(&self.camera, screen, self.player.angle, self.world.config()).location
    }

    /// [`GameEngine::pick`] plus a log line describing the click.
    pub fn click(&self, screen: DVec2) -> CellLocation {
        let cell = self.pick(screen);
        tracing::info!(
            screen_x = screen.x,
            screen_y = screen.y,
            world_x = cell.world.x,
            world_y = cell.world.y,
            tile_x = cell.tile.x,
            tile_y = cell.tile.y,
            chunk = %cell.chunk,
            local_x = cell.local.x,
            local_y = cell.local.y,
            "cell clicked"
        );
        cell
    }

    /// Snapshot of player, camera and cache state as JSON.
    pub fn state_json(&self) -> Result<String, EngineError> {
        let state = EngineState {
            frame: self.frames,
            player: &self.player,
            camera: &self.camera,
            cached_chunks: self.world.cached_count(),
            generated_chunks: self.world.generated_count(),
            grid_visible: self.grid_visible,
            debug: self.debug,
        };
        Ok(serde_json::to_string(&state)?)
    }
}
