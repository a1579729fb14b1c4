//! World Kernel: deterministic chunk generation, the chunk cache, and player state.
//!
//! # Invariants
//! - Chunk content is a pure function of `(world tile x, world tile y, seed)`.
//! - A cached chunk is never regenerated or mutated while it stays cached.
//! - Chunk coordinates are wrapped modulo `chunk_count` before lookup.

pub mod chunk;
pub mod entity;
pub mod placement;
pub mod player;
pub mod world;

pub use chunk::{Biome, Chunk};
pub use entity::{Entity, EntityKind};
pub use player::{Player, PlayerSettings};
pub use world::World;
