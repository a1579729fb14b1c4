use glam::DVec2;
use serde::{Deserialize, Serialize};

/// How the view is oriented relative to the world.
///
/// Camera, player movement and the renderer all ask this type for the
/// effective rotation and movement basis instead of branching on the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// The camera owns an independent rotation; movement follows it.
    #[default]
    FixedAngle,
    /// The world rotates around the player so the player always faces up.
    PlayerPerspective,
}

/// Unit vectors for "forward" and "right" in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBasis {
    pub forward: DVec2,
    pub right: DVec2,
}

impl MovementBasis {
    /// Basis for a heading where `0` faces screen-up (`-y`) and angles grow clockwise.
    pub fn from_heading(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            forward: DVec2::new(sin, -cos),
            right: DVec2::new(cos, sin),
        }
    }
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::FixedAngle => Self::PlayerPerspective,
            Self::PlayerPerspective => Self::FixedAngle,
        }
    }

    /// Rotation the view transform undoes, in radians.
    pub fn effective_rotation(self, camera_rotation: f64, player_angle: f64) -> f64 {
        match self {
            Self::FixedAngle => camera_rotation,
            Self::PlayerPerspective => player_angle,
        }
    }

    /// Basis that movement input is expressed in.
    pub fn movement_basis(self, camera_rotation: f64, player_angle: f64) -> MovementBasis {
        MovementBasis::from_heading(self.effective_rotation(camera_rotation, player_angle))
    }

    /// Only the fixed-angle camera accepts explicit rotate input.
    pub fn allows_camera_rotation(self) -> bool {
        matches!(self, Self::FixedAngle)
    }

    /// Heading of the player marker on screen: always up in player
    /// perspective, otherwise relative to the camera rotation.
    pub fn screen_heading(self, camera_rotation: f64, player_angle: f64) -> f64 {
        match self {
            Self::FixedAngle => player_angle - camera_rotation,
            Self::PlayerPerspective => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FixedAngle => "FIXED_ANGLE",
            Self::PlayerPerspective => "PLAYER_PERSPECTIVE",
        }
    }
}

impl std::fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
