use std::collections::BTreeMap;
use std::sync::Arc;
use wrapworld_common::{ChunkCoord, ChunkRange, WorldConfig};

use crate::chunk::{Biome, Chunk};

/// The generated world: configuration plus a memoized chunk cache.
///
/// Chunks are created on first access and handed out as shared, immutable
/// `Arc`s, so repeated loads of a cached chunk return the same allocation.
/// Uses BTreeMap for deterministic iteration order (eviction, inspection).
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    chunks: BTreeMap<ChunkCoord, Arc<Chunk>>,
    /// Total generations performed, including regenerations after eviction.
    generated: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        tracing::info!(
            seed = config.seed(),
            chunk_count = config.chunk_count(),
            world_size = config.world_size(),
            "world initialized"
        );
        Self {
            config,
            chunks: BTreeMap::new(),
            generated: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Fetch chunk `(chunk_x, chunk_y)`, generating it on first access.
    ///
    /// Coordinates are wrapped modulo `chunk_count` first, so every integer is
    /// accepted and aliases of the same chunk share one cache entry.
    pub fn load_chunk(&mut self, chunk_x: i32, chunk_y: i32) -> Arc<Chunk> {
        self.load(ChunkCoord::new(chunk_x, chunk_y))
    }

    pub fn load(&mut self, coord: ChunkCoord) -> Arc<Chunk> {
        let coord = coord.wrapped(self.config.chunk_count());
        if let Some(chunk) = self.chunks.get(&coord) {
            return Arc::clone(chunk);
        }
        let chunk = Arc::new(self.generate_chunk(coord));
        tracing::debug!(chunk = %coord, entities = chunk.len(), "generated chunk");
        self.generated += 1;
        self.chunks.insert(coord, Arc::clone(&chunk));
        chunk
    }

    /// Load every chunk in an inclusive range, row-major.
    pub fn load_range(&mut self, range: ChunkRange) -> Vec<Arc<Chunk>> {
        range.iter().map(|c| self.load(c)).collect()
    }

    /// Generate a chunk without touching the cache.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        Chunk::generate(coord, &self.config)
    }

    /// Cached chunk, if present. Never generates.
    pub fn get(&self, coord: ChunkCoord) -> Option<&Arc<Chunk>> {
        self.chunks.get(&coord.wrapped(self.config.chunk_count()))
    }

    pub fn is_cached(&self, coord: ChunkCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Drop a chunk from the cache. It regenerates identically on next load.
    pub fn evict(&mut self, coord: ChunkCoord) -> Option<Arc<Chunk>> {
        let coord = coord.wrapped(self.config.chunk_count());
        let removed = self.chunks.remove(&coord);
        if removed.is_some() {
            tracing::debug!(chunk = %coord, "evicted chunk");
        }
        removed
    }

    pub fn clear_cache(&mut self) {
        self.chunks.clear();
    }

    /// Coordinates of all cached chunks, in canonical order.
    pub fn cached_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    pub fn cached_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    pub fn biome_at(&self, coord: ChunkCoord) -> Biome {
        Biome::for_chunk(coord, &self.config)
    }
}
