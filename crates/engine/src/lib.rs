//! Game loop orchestration for the wrapping world.
//!
//! Each frame runs in a fixed order: input actions, camera rotate and zoom
//! input, player movement, camera easing and follow, then rendering (cull,
//! load visible chunks, optional retention, draw).
//!
//! # Invariants
//! - World truth is only mutated by chunk loading and retention, never by renderers.
//! - The debug flag is engine state passed into each frame, not a global.

mod clock;
mod config;
mod engine;

pub use clock::{FrameClock, FrameTimer, MAX_FRAME_DT};
pub use config::{CameraSettings, EngineConfig, EngineError, ViewportConfig};
pub use engine::GameEngine;

pub fn crate_info() -> &'static str {
    "wrapworld-engine v0.1.0"
}
