use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of generated world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Grass,
    Tree,
    Rock,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Grass, EntityKind::Tree, EntityKind::Rock];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Tree => "tree",
            Self::Rock => "rock",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable object placed during chunk generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// World pixel position.
    pub position: DVec2,
    pub angle: f64,
    pub size: f64,
    pub collision: bool,
}

impl Entity {
    pub const DEFAULT_SIZE: f64 = 32.0;

    /// Upright, default-sized, colliding entity at `position`.
    pub fn new(kind: EntityKind, position: DVec2) -> Self {
        Self {
            kind,
            position,
            angle: 0.0,
            size: Self::DEFAULT_SIZE,
            collision: true,
        }
    }
}
