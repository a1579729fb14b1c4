use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical keys the game binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    A,
    D,
    Q,
    E,
    /// Interact.
    F,
    G,
    P,
    R,
    Left,
    Right,
    F3,
}

impl Key {
    pub const ALL: [Key; 13] = [
        Key::W,
        Key::S,
        Key::A,
        Key::D,
        Key::Q,
        Key::E,
        Key::F,
        Key::G,
        Key::P,
        Key::R,
        Key::Left,
        Key::Right,
        Key::F3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::W => "w",
            Key::S => "s",
            Key::A => "a",
            Key::D => "d",
            Key::Q => "q",
            Key::E => "e",
            Key::F => "f",
            Key::G => "g",
            Key::P => "p",
            Key::R => "r",
            Key::Left => "left",
            Key::Right => "right",
            Key::F3 => "f3",
        }
    }

    /// Edge-triggered action bound to this key, if any.
    pub fn action(self) -> Option<Action> {
        match self {
            Key::P => Some(Action::ToggleCameraMode),
            Key::R => Some(Action::ResetCameraRotation),
            Key::G => Some(Action::ToggleGrid),
            Key::F3 => Some(Action::ToggleDebug),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key: {0:?}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Key::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// A discrete command produced once per key press.
///
/// The engine consumes actions, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    ToggleCameraMode,
    ResetCameraRotation,
    ToggleGrid,
    ToggleDebug,
}
