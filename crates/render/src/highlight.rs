use glam::DVec2;
use serde::{Deserialize, Serialize};
use wrapworld_common::{CellLocation, WorldConfig};

use crate::camera::Camera;
use crate::culling::WorldRect;

/// The tile under the mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightCell {
    /// Tile rectangle in the same (unwrapped) frame as the camera that
    /// picked it, ready to draw.
    pub rect: WorldRect,
    /// Wrapped tile, chunk and local-tile indices.
    pub location: CellLocation,
}

/// Tracks the cursor and whether the hovered tile should be outlined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHighlight {
    pub enabled: bool,
    cursor: Option<DVec2>,
}

impl Default for GridHighlight {
    fn default() -> Self {
        Self {
            enabled: true,
            cursor: None,
        }
    }
}

impl GridHighlight {
    /// Screen-space cursor position; `None` when the cursor left the window.
    pub fn set_cursor(&mut self, cursor: Option<DVec2>) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> Option<DVec2> {
        self.cursor
    }

    pub fn cell(&self, camera: &Camera, player_angle: f64, config: &WorldConfig) -> Option<HighlightCell> {
        if !self.enabled {
            return None;
        }
        let screen = self.cursor?;
        Some(pick_cell(camera, screen, player_angle, config))
    }
}

/// Resolve a screen position to the tile beneath it.
pub fn pick_cell(camera: &Camera, screen: DVec2, player_angle: f64, config: &WorldConfig) -> HighlightCell {
    let world = camera.screen_to_world(screen, player_angle);
    let tile = f64::from(config.tile_size());
    let origin = (world / tile).floor() * tile;
    HighlightCell {
        rect: WorldRect::from_origin_size(origin, DVec2::splat(tile)),
        location: CellLocation::locate(world, config),
    }
}
