//! Rendering adapter: camera projection, viewport culling and a
//! renderer-agnostic draw interface.
//!
//! # Invariants
//! - Renderers read a [`Frame`] and never mutate world truth.
//! - `screen_to_world` is the exact inverse of the camera's world → screen transform.
//! - Only chunks overlapping the viewport (at any rotation) are drawn.
//!
//! Presentation backends consume [`DrawCommand`] lists; the
//! [`DebugTextRenderer`] serves the CLI and tests.

pub mod camera;
pub mod culling;
mod highlight;
mod renderer;
mod sprites;

pub use camera::Camera;
pub use culling::{VisibleRegion, WorldRect};
pub use highlight::{GridHighlight, HighlightCell, pick_cell};
pub use renderer::{Color, DebugTextRenderer, DrawCommand, DrawListRenderer, Frame, Renderer, fallback_shape};
pub use sprites::{NoSprites, SpriteHandle, SpriteSource, SpriteTable};

pub fn crate_info() -> &'static str {
    "wrapworld-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
