use serde::{Deserialize, Serialize};

/// Held movement flags for one frame.
///
/// Produced by the input layer, consumed by player movement and camera
/// rotation. Meaning of `left`/`right` depends on the projection mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub camera_left: bool,
    pub camera_right: bool,
}

impl MovementInput {
    /// Whether any translation or turn key is held (camera keys excluded).
    pub fn any_movement(&self) -> bool {
        self.forward
            || self.backward
            || self.left
            || self.right
            || self.strafe_left
            || self.strafe_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let input = MovementInput::default();
        assert!(!input.any_movement());
    }

    #[test]
    fn camera_keys_are_not_movement() {
        let input = MovementInput {
            camera_left: true,
            camera_right: true,
            ..MovementInput::default()
        };
        assert!(!input.any_movement());
        let input = MovementInput {
            strafe_right: true,
            ..MovementInput::default()
        };
        assert!(input.any_movement());
    }
}
