use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use wrapworld_common::{ChunkCoord, ChunkRange};
use wrapworld_kernel::World;

use crate::window::distance_to_range;

/// Retention configuration: how far outside the visible range chunks are
/// kept, and how many may be evicted per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Chunks within this many chunks of the visible range stay cached.
    pub margin: i32,
    /// Maximum number of chunks to evict per frame.
    pub unload_budget: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            margin: 1,
            unload_budget: 16,
        }
    }
}

/// Evicts cached chunks that have drifted away from the visible range.
///
/// Eviction never affects correctness: an evicted chunk regenerates
/// identically the next time it is loaded.
#[derive(Debug)]
pub struct ChunkStreamer {
    pub config: RetentionConfig,
    stats: StreamStats,
}

/// Per-frame retention statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub chunks_evicted_this_frame: usize,
    pub total_cached_chunks: usize,
    pub frame_time: Duration,
}

impl ChunkStreamer {
    pub fn new(config: RetentionConfig) -> Self {
        Self {
            config,
            stats: StreamStats::default(),
        }
    }

    /// Evict chunks farther than `margin` from `visible`, within budget.
    /// Returns the evicted coordinates in canonical order.
    pub fn update(&mut self, world: &mut World, visible: ChunkRange) -> Vec<ChunkCoord> {
        let _span = tracing::info_span!("chunk_retention").entered();
        let frame_start = Instant::now();
        let chunk_count = world.config().chunk_count();

        let to_evict: Vec<ChunkCoord> = world
            .cached_coords()
            .filter(|c| distance_to_range(*c, visible, chunk_count) > self.config.margin)
            .take(self.config.unload_budget)
            .collect();

        for c in &to_evict {
            world.evict(*c);
        }

        self.stats = StreamStats {
            chunks_evicted_this_frame: to_evict.len(),
            total_cached_chunks: world.cached_count(),
            frame_time: frame_start.elapsed(),
        };

        tracing::trace!(
            evicted = to_evict.len(),
            total = world.cached_count(),
            "retention update complete"
        );

        to_evict
    }

    /// Get statistics from the last update.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}
