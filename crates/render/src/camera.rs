use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use wrapworld_common::{ProjectionMode, WorldConfig, normalize_angle, wrap_point};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom approach rate per second.
pub const ZOOM_RATE: f64 = 5.0;
/// Below this distance the zoom snaps onto its target.
pub const ZOOM_SNAP_EPSILON: f64 = 1e-4;
/// Camera rotate input, radians per second.
pub const ROTATION_SPEED: f64 = 0.8 * PI;
/// Rotate input integrates over this step regardless of real frame time.
pub const ROTATION_REFERENCE_DT: f64 = 1.0 / 60.0;
/// Fraction of the remaining distance covered per `follow` call.
pub const DEFAULT_FOLLOW_FACTOR: f64 = 0.1;

/// 2D viewport: focus point, zoom, rotation and projection mode.
///
/// The world → screen transform is, in order: translate to the viewport
/// centre, scale by zoom, rotate by minus the effective rotation, translate
/// by minus the focus point. [`Camera::screen_to_world`] is its exact inverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    position: DVec2,
    zoom: f64,
    target_zoom: f64,
    rotation: f64,
    viewport: DVec2,
    mode: ProjectionMode,
    follow_factor: f64,
}

impl Camera {
    pub fn new(width: f64, height: f64) -> Self {
        tracing::info!(width, height, "camera initialized");
        Self {
            position: DVec2::ZERO,
            zoom: 1.0,
            target_zoom: 1.0,
            rotation: 0.0,
            viewport: DVec2::new(width, height),
            mode: ProjectionMode::FixedAngle,
            follow_factor: DEFAULT_FOLLOW_FACTOR,
        }
    }

    /// Override the follow smoothing factor (clamped to `[0, 1]`; `1` snaps).
    pub fn with_follow_factor(mut self, factor: f64) -> Self {
        self.follow_factor = factor.clamp(0.0, 1.0);
        self
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn target_zoom(&self) -> f64 {
        self.target_zoom
    }

    /// Own rotation in `[0, 2π)`. Ignored for rendering in player perspective.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn width(&self) -> f64 {
        self.viewport.x
    }

    pub fn height(&self) -> f64 {
        self.viewport.y
    }

    pub fn follow_factor(&self) -> f64 {
        self.follow_factor
    }

    /// Ease zoom toward its target. The blend factor is capped at 1 so a
    /// long frame lands on the target instead of overshooting it.
    pub fn update(&mut self, dt: f64) {
        let diff = self.target_zoom - self.zoom;
        if diff.abs() <= ZOOM_SNAP_EPSILON {
            self.zoom = self.target_zoom;
        } else {
            self.zoom += diff * (dt * ZOOM_RATE).min(1.0);
        }
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.target_zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Add `delta` radians of rotation. No-op outside fixed-angle mode.
    pub fn rotate_camera(&mut self, delta: f64) {
        if self.mode.allows_camera_rotation() {
            self.rotation = normalize_angle(self.rotation + delta);
        }
    }

    /// One frame's worth of rotate input at the fixed reference step.
    pub fn rotation_step() -> f64 {
        ROTATION_SPEED * ROTATION_REFERENCE_DT
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = normalize_angle(rotation);
    }

    pub fn set_mode(&mut self, mode: ProjectionMode) {
        if self.mode != mode {
            tracing::info!(%mode, "camera mode changed");
        }
        self.mode = mode;
    }

    /// Move a fraction of the way toward `target`.
    pub fn follow(&mut self, target: DVec2) {
        self.position += (target - self.position) * self.follow_factor;
    }

    /// Jump straight to `target`.
    pub fn snap_to(&mut self, target: DVec2) {
        self.position = target;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width, height);
    }

    /// Rotation the view undoes, given the player's facing.
    pub fn effective_rotation(&self, player_angle: f64) -> f64 {
        self.mode.effective_rotation(self.rotation, player_angle)
    }

    /// Full world → screen transform for this frame.
    pub fn view_transform(&self, player_angle: f64) -> DAffine2 {
        DAffine2::from_translation(self.viewport / 2.0)
            * DAffine2::from_scale(DVec2::splat(self.zoom))
            * DAffine2::from_angle(-self.effective_rotation(player_angle))
            * DAffine2::from_translation(-self.position)
    }

    pub fn world_to_screen(&self, world: DVec2, player_angle: f64) -> DVec2 {
        self.view_transform(player_angle).transform_point2(world)
    }

    pub fn screen_to_world(&self, screen: DVec2, player_angle: f64) -> DVec2 {
        let x = (screen.x - self.viewport.x / 2.0) / self.zoom;
        let y = (screen.y - self.viewport.y / 2.0) / self.zoom;
        let (sin, cos) = self.effective_rotation(player_angle).sin_cos();
        DVec2::new(
            x * cos - y * sin + self.position.x,
            x * sin + y * cos + self.position.y,
        )
    }

    /// Copy of this camera with its focus wrapped into the world.
    pub fn wrapped(&self, config: &WorldConfig) -> Self {
        Self {
            position: wrap_point(self.position, config),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn camera_at(x: f64, y: f64, zoom: f64, rotation: f64, mode: ProjectionMode) -> Camera {
        let mut c = Camera::new(1200.0, 800.0);
        c.snap_to(DVec2::new(x, y));
        c.set_zoom(zoom);
        c.update(1.0);
        c.set_rotation(rotation);
        c.set_mode(mode);
        c
    }

    #[test]
    fn centre_of_screen_is_focus() {
        let c = camera_at(500.0, -40.0, 2.5, 1.1, ProjectionMode::FixedAngle);
        let w = c.screen_to_world(DVec2::new(600.0, 400.0), 0.0);
        assert!((w - DVec2::new(500.0, -40.0)).length() < 1e-9);
    }

    #[test]
    fn screen_world_round_trip_both_modes() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(123.5, -77.25),
            DVec2::new(131_000.0, 5.0),
            DVec2::new(-4096.0, 2048.0),
        ];
        for mode in [ProjectionMode::FixedAngle, ProjectionMode::PlayerPerspective] {
            for zoom in [0.1, 0.75, 1.0, 3.3, 5.0] {
                for rotation in [0.0, 0.4, 2.0, 5.9] {
                    for player_angle in [-2.5, 0.0, 1.3] {
                        let c = camera_at(250.0, 1999.0, zoom, rotation, mode);
                        for p in points {
                            let s = c.world_to_screen(p, player_angle);
                            let back = c.screen_to_world(s, player_angle);
                            let tol = 1e-9 * (1.0 + p.length());
                            assert!(
                                (back - p).length() < tol,
                                "{mode} zoom={zoom} rot={rotation} pa={player_angle}: {p} -> {back}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn fixed_angle_forward_transform_rotates_by_minus_rotation() {
        let c = camera_at(0.0, 0.0, 1.0, std::f64::consts::FRAC_PI_2, ProjectionMode::FixedAngle);
        // A point east of the focus ends up above centre after undoing a quarter turn.
        let s = c.world_to_screen(DVec2::new(100.0, 0.0), 0.0);
        assert!((s - DVec2::new(600.0, 300.0)).length() < 1e-9);
    }

    #[test]
    fn player_perspective_uses_player_angle_not_rotation() {
        let c = camera_at(10.0, 20.0, 1.0, 1.0, ProjectionMode::PlayerPerspective);
        let reference = camera_at(10.0, 20.0, 1.0, 0.7, ProjectionMode::FixedAngle);
        let p = DVec2::new(300.0, -50.0);
        let a = c.world_to_screen(p, 0.7);
        let b = reference.world_to_screen(p, 99.0);
        assert!((a - b).length() < 1e-9);
    }

    #[test]
    fn zoom_converges_without_leaving_bounds() {
        for requested in [-3.0, 0.05, 0.5, 1.0, 2.2, 4.9, 12.0] {
            let mut c = Camera::new(800.0, 800.0);
            c.set_zoom(requested);
            for _ in 0..20 {
                c.update(1.0);
                assert!((MIN_ZOOM..=MAX_ZOOM).contains(&c.zoom()));
            }
            assert!((c.zoom() - requested.clamp(MIN_ZOOM, MAX_ZOOM)).abs() < 1e-12);
        }
    }

    #[test]
    fn zoom_eases_over_small_steps() {
        let mut c = Camera::new(800.0, 800.0);
        c.set_zoom(2.0);
        c.update(1.0 / 60.0);
        assert!(c.zoom() > 1.0 && c.zoom() < 2.0);
        let mut last = c.zoom();
        for _ in 0..300 {
            c.update(1.0 / 60.0);
            assert!(c.zoom() >= last);
            last = c.zoom();
        }
        assert_eq!(c.zoom(), 2.0);
    }

    #[test]
    fn rotation_normalizes_into_full_turn() {
        let mut c = Camera::new(800.0, 800.0);
        let delta = 0.9;
        let mut total = 0.0;
        while total <= 2.0 * TAU {
            c.rotate_camera(delta);
            total += delta;
            assert!((0.0..TAU).contains(&c.rotation()));
        }
        assert!((c.rotation() - total % TAU).abs() < 1e-9);

        c.rotate_camera(-10.0);
        assert!((0.0..TAU).contains(&c.rotation()));
    }

    #[test]
    fn rotate_is_ignored_in_player_perspective() {
        let mut c = Camera::new(800.0, 800.0);
        c.set_mode(ProjectionMode::PlayerPerspective);
        c.rotate_camera(1.0);
        assert_eq!(c.rotation(), 0.0);
    }

    #[test]
    fn rotation_step_uses_reference_dt() {
        assert!((Camera::rotation_step() - 0.8 * PI / 60.0).abs() < 1e-15);
    }

    #[test]
    fn follow_is_exponential() {
        let mut c = Camera::new(800.0, 800.0);
        c.follow(DVec2::new(100.0, -50.0));
        assert!((c.position() - DVec2::new(10.0, -5.0)).length() < 1e-12);
        c.follow(DVec2::new(100.0, -50.0));
        assert!((c.position() - DVec2::new(19.0, -9.5)).length() < 1e-12);

        let mut snappy = Camera::new(800.0, 800.0).with_follow_factor(1.0);
        snappy.follow(DVec2::new(7.0, 8.0));
        assert_eq!(snappy.position(), DVec2::new(7.0, 8.0));
    }

    #[test]
    fn wrapped_copy_moves_focus_into_world() {
        let config = WorldConfig::default();
        let mut c = Camera::new(800.0, 800.0);
        c.snap_to(DVec2::new(-10.0, config.world_size() + 4.0));
        let w = c.wrapped(&config);
        assert_eq!(w.position(), DVec2::new(config.world_size() - 10.0, 4.0));
        assert_eq!(w.zoom(), c.zoom());
    }

    #[test]
    fn resize_changes_centre() {
        let mut c = Camera::new(800.0, 800.0);
        c.resize(200.0, 100.0);
        let w = c.screen_to_world(DVec2::new(100.0, 50.0), 0.0);
        assert!(w.length() < 1e-12);
    }
}
