use glam::DVec2;
use serde::{Deserialize, Serialize};
use wrapworld_common::{MovementInput, ProjectionMode};

/// Tunables for player movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Pixels per second.
    pub speed: f64,
    /// Turn rate in player-perspective mode, degrees per second.
    pub rotation_speed_degrees: f64,
    /// Marker diameter in world pixels.
    pub size: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: 200.0,
            rotation_speed_degrees: 360.0,
            size: 20.0,
        }
    }
}

/// The controllable avatar.
///
/// Position is never clamped or wrapped here; consumers wrap it when they
/// turn it into chunk lookups or draw positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: DVec2,
    /// Facing in radians; `0` faces `-y`, growing clockwise.
    pub angle: f64,
    interacting: bool,
    settings: PlayerSettings,
}

impl Player {
    pub fn new(position: DVec2) -> Self {
        Self::with_settings(position, PlayerSettings::default())
    }

    pub fn with_settings(position: DVec2, settings: PlayerSettings) -> Self {
        Self {
            position,
            angle: 0.0,
            interacting: false,
            settings,
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn size(&self) -> f64 {
        self.settings.size
    }

    /// True for every frame the interact key is held.
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Advance one frame.
    ///
    /// `camera_rotation` is only read in fixed-angle mode.
    pub fn update(
        &mut self,
        dt: f64,
        input: &MovementInput,
        interact: bool,
        mode: ProjectionMode,
        camera_rotation: f64,
    ) {
        match mode {
            ProjectionMode::FixedAngle => self.update_fixed_angle(dt, input, camera_rotation),
            ProjectionMode::PlayerPerspective => self.update_player_perspective(dt, input),
        }
        self.interacting = interact;
    }

    fn update_fixed_angle(&mut self, dt: f64, input: &MovementInput, camera_rotation: f64) {
        let basis = ProjectionMode::FixedAngle.movement_basis(camera_rotation, self.angle);
        // Left/right translate here; each held key contributes its own vector.
        let dir: DVec2 = [
            (input.forward, basis.forward),
            (input.backward, -basis.forward),
            (input.left, -basis.right),
            (input.right, basis.right),
            (input.strafe_left, -basis.right),
            (input.strafe_right, basis.right),
        ]
        .into_iter()
        .filter(|(held, _)| *held)
        .map(|(_, v)| v)
        .sum();

        let dir = dir.normalize_or_zero();
        if dir == DVec2::ZERO {
            return;
        }
        self.position += dir * self.settings.speed * dt;
        self.angle = dir.x.atan2(-dir.y);
        tracing::trace!(x = self.position.x, y = self.position.y, angle = self.angle, "player moved");
    }

    fn update_player_perspective(&mut self, dt: f64, input: &MovementInput) {
        let turn = self.settings.rotation_speed_degrees.to_radians() * dt;
        if input.left {
            self.angle -= turn;
        }
        if input.right {
            self.angle += turn;
        }

        let basis = ProjectionMode::PlayerPerspective.movement_basis(0.0, self.angle);
        let dir: DVec2 = [
            (input.forward, basis.forward),
            (input.backward, -basis.forward),
            (input.strafe_left, -basis.right),
            (input.strafe_right, basis.right),
        ]
        .into_iter()
        .filter(|(held, _)| *held)
        .map(|(_, v)| v)
        .sum();

        let dir = dir.normalize_or_zero();
        if dir != DVec2::ZERO {
            self.position += dir * self.settings.speed * dt;
        }
    }
}
