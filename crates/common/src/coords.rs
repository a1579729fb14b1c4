//! Toroidal coordinate primitives.
//!
//! World pixels, tiles and chunks all live on the same square torus. Anything
//! that may have escaped `[0, world_size)` is routed through
//! [`wrap_coordinate`] before it is used for a tile or chunk lookup.

use glam::{DVec2, IVec2, UVec2};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::WorldConfig;

/// Map any finite `v` into `[0, size)`.
///
/// Equivalent to `((v % size) + size) % size`, but values already in range
/// come back unchanged (`%` is exact), which keeps the function idempotent.
pub fn wrap_coordinate(v: f64, size: f64) -> f64 {
    let r = v % size;
    let wrapped = if r < 0.0 { r + size } else { r };
    // A tiny negative remainder can round up to exactly `size`.
    if wrapped >= size { 0.0 } else { wrapped + 0.0 }
}

/// Wrap both axes of a world point.
pub fn wrap_point(p: DVec2, config: &WorldConfig) -> DVec2 {
    let size = config.world_size();
    DVec2::new(wrap_coordinate(p.x, size), wrap_coordinate(p.y, size))
}

/// Whether a point is inside `[0, world_size)` on both axes.
pub fn is_within_world_bounds(p: DVec2, config: &WorldConfig) -> bool {
    let size = config.world_size();
    (0.0..size).contains(&p.x) && (0.0..size).contains(&p.y)
}

/// Normalize an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    wrap_coordinate(angle, std::f64::consts::TAU)
}

/// Integer chunk address. Any integer is a valid input; the torus makes
/// `(x, y)` and `(x + chunk_count, y)` the same chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Reduce both axes modulo `chunk_count`.
    pub fn wrapped(self, chunk_count: u32) -> Self {
        let n = chunk_count as i64;
        Self {
            x: (self.x as i64).rem_euclid(n) as i32,
            y: (self.y as i64).rem_euclid(n) as i32,
        }
    }

    /// Chebyshev distance on the torus, in chunks.
    pub fn toroidal_distance(self, other: Self, chunk_count: u32) -> i32 {
        let n = chunk_count as i64;
        let axis = |a: i32, b: i32| {
            let d = (a as i64 - b as i64).rem_euclid(n);
            d.min(n - d) as i32
        };
        axis(self.x, other.x).max(axis(self.y, other.y))
    }

    /// Pixel position of the chunk's top-left corner.
    pub fn origin(self, config: &WorldConfig) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64) * config.chunk_pixel_size()
    }
}

/// Cache key form, `"{x}_{y}"`.
impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.x, self.y)
    }
}

/// Inclusive rectangle of chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRange {
    pub min: ChunkCoord,
    pub max: ChunkCoord,
}

impl ChunkRange {
    pub fn new(min: ChunkCoord, max: ChunkCoord) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, c: ChunkCoord) -> bool {
        (self.min.x..=self.max.x).contains(&c.x) && (self.min.y..=self.max.y).contains(&c.y)
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let w = (self.max.x - self.min.x + 1) as usize;
        let h = (self.max.y - self.min.y + 1) as usize;
        w * h
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Row-major iteration over every coordinate in the range.
    pub fn iter(&self) -> impl Iterator<Item = ChunkCoord> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| ChunkCoord::new(x, y)))
    }
}

/// A world point resolved down to its tile and chunk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellLocation {
    /// World pixel position, wrapped into the world.
    pub world: DVec2,
    /// Global tile index.
    pub tile: IVec2,
    pub chunk: ChunkCoord,
    /// Tile index within `chunk`.
    pub local: UVec2,
}

impl CellLocation {
    /// Resolve a world point (wrapping it first) to tile, chunk and local tile.
    pub fn locate(p: DVec2, config: &WorldConfig) -> Self {
        let world = wrap_point(p, config);
        let tile_size = f64::from(config.tile_size());
        let tile = IVec2::new(
            (world.x / tile_size).floor() as i32,
            (world.y / tile_size).floor() as i32,
        );
        let chunk_size = config.chunk_size() as i32;
        Self {
            world,
            tile,
            chunk: ChunkCoord::new(tile.x.div_euclid(chunk_size), tile.y.div_euclid(chunk_size)),
            local: UVec2::new(
                tile.x.rem_euclid(chunk_size) as u32,
                tile.y.rem_euclid(chunk_size) as u32,
            ),
        }
    }

    /// Pixel position of the tile's top-left corner.
    pub fn tile_origin(&self, config: &WorldConfig) -> DVec2 {
        self.tile.as_dvec2() * f64::from(config.tile_size())
    }
}
