//! Streaming: windowed chunk retention around the visible region.
//!
//! # Invariants
//! - Eviction never corrupts world truth; chunks regenerate identically.
//! - Distances are measured on the torus, so chunks across the seam count as near.
//!
//! The world cache is unbounded unless a [`ChunkStreamer`] is driven each frame.

mod budget;
mod window;

pub use budget::{ChunkStreamer, RetentionConfig, StreamStats};
pub use window::distance_to_range;

pub fn crate_info() -> &'static str {
    "wrapworld-stream v0.1.0"
}
