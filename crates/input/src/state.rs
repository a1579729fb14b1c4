use glam::DVec2;
use std::collections::BTreeSet;
use wrapworld_common::{MovementInput, ProjectionMode};

use crate::action::{Action, Key};

/// Keyboard and mouse state accumulated between frames.
///
/// Held keys drive continuous movement; presses since the last
/// [`InputState::end_frame`] drive [`Action`]s exactly once.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<Key>,
    pressed: Vec<Key>,
    cursor: Option<DVec2>,
    wheel_delta: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Auto-repeat of a held key is not a new press.
    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            if let Some(action) = key.action() {
                tracing::debug!(%key, ?action, "action queued");
            }
            self.pressed.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn set_cursor(&mut self, cursor: Option<DVec2>) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> Option<DVec2> {
        self.cursor
    }

    /// Accumulate scroll. Positive zooms in.
    pub fn scroll(&mut self, delta: f64) {
        self.wheel_delta += delta;
    }

    pub fn wheel_delta(&self) -> f64 {
        self.wheel_delta
    }

    /// Held movement flags. Camera-rotate keys only register in fixed-angle mode.
    pub fn movement(&self, mode: ProjectionMode) -> MovementInput {
        let camera = mode.allows_camera_rotation();
        MovementInput {
            forward: self.is_held(Key::W),
            backward: self.is_held(Key::S),
            left: self.is_held(Key::A),
            right: self.is_held(Key::D),
            strafe_left: self.is_held(Key::Q),
            strafe_right: self.is_held(Key::E),
            camera_left: camera && self.is_held(Key::Left),
            camera_right: camera && self.is_held(Key::Right),
        }
    }

    /// Level-triggered: true for every frame the key is held.
    pub fn interacting(&self) -> bool {
        self.is_held(Key::F)
    }

    /// Actions from keys pressed since the last frame, in press order.
    pub fn actions(&self) -> Vec<Action> {
        self.pressed.iter().filter_map(|k| k.action()).collect()
    }

    /// Clear per-frame edges and the wheel accumulator.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.wheel_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_maps_keys() {
        let mut input = InputState::new();
        for key in [Key::W, Key::D, Key::Q] {
            input.key_down(key);
        }
        let m = input.movement(ProjectionMode::FixedAngle);
        assert!(m.forward && m.right && m.strafe_left);
        assert!(!m.backward && !m.left && !m.strafe_right);

        input.key_up(Key::W);
        assert!(!input.movement(ProjectionMode::FixedAngle).forward);
    }

    #[test]
    fn camera_keys_only_in_fixed_angle() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Right);
        let fixed = input.movement(ProjectionMode::FixedAngle);
        assert!(fixed.camera_left && fixed.camera_right);
        let pp = input.movement(ProjectionMode::PlayerPerspective);
        assert!(!pp.camera_left && !pp.camera_right);
    }

    #[test]
    fn actions_fire_once_per_press() {
        let mut input = InputState::new();
        input.key_down(Key::P);
        input.key_down(Key::G);
        assert_eq!(input.actions(), vec![Action::ToggleCameraMode, Action::ToggleGrid]);

        input.end_frame();
        // Still held, repeat events do not re-fire.
        input.key_down(Key::P);
        assert!(input.actions().is_empty());

        input.key_up(Key::P);
        input.key_down(Key::P);
        assert_eq!(input.actions(), vec![Action::ToggleCameraMode]);
    }

    #[test]
    fn movement_presses_queue_no_actions() {
        let mut input = InputState::new();
        for key in [Key::W, Key::A, Key::F, Key::Left] {
            input.key_down(key);
        }
        input.key_down(Key::F3);
        assert_eq!(input.actions(), vec![Action::ToggleDebug]);
    }

    #[test]
    fn interact_is_level_triggered() {
        let mut input = InputState::new();
        input.key_down(Key::F);
        assert!(input.interacting());
        input.end_frame();
        assert!(input.interacting());
        input.key_up(Key::F);
        assert!(!input.interacting());
    }

    #[test]
    fn wheel_accumulates_until_end_of_frame() {
        let mut input = InputState::new();
        input.scroll(-1.0);
        input.scroll(-2.0);
        assert_eq!(input.wheel_delta(), -3.0);
        input.end_frame();
        assert_eq!(input.wheel_delta(), 0.0);
    }

    #[test]
    fn release_all_clears_held() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_down(Key::F);
        input.release_all();
        assert!(!input.movement(ProjectionMode::FixedAngle).any_movement());
        assert!(!input.interacting());
    }
}
