//! Viewport culling: which chunks, background tiles and grid lines a frame needs.
//!
//! The candidate area is a square of half-size `diagonal / 2 / zoom` around the
//! camera focus, so it covers the viewport at any rotation. It is intersected
//! with the world bounds `[0, world_size)`; nothing past the seam is drawn and
//! the area outside the world stays black.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use wrapworld_common::{ChunkCoord, ChunkRange, WorldConfig};

use crate::camera::Camera;

/// Axis-aligned rectangle in world pixels, `min` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub min: DVec2,
    pub max: DVec2,
}

impl WorldRect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn intersect(&self, other: &WorldRect) -> WorldRect {
        WorldRect {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    pub fn intersects(&self, other: &WorldRect) -> bool {
        !self.intersect(other).is_empty()
    }
}

/// Culling result for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleRegion {
    /// Square covering the rotated viewport, before clipping.
    pub candidate: WorldRect,
    /// `candidate` clipped to the world.
    pub bounds: WorldRect,
    /// Inclusive chunk range covering `bounds`.
    pub chunks: ChunkRange,
    chunk_pixel_size: f64,
    tile_size: f64,
}

impl VisibleRegion {
    /// Half-size of the square that covers the viewport at any rotation.
    pub fn extended_half_size(camera: &Camera) -> f64 {
        camera.viewport().length() / 2.0 / camera.zoom()
    }

    pub fn candidate_rect(camera: &Camera) -> WorldRect {
        let half = DVec2::splat(Self::extended_half_size(camera));
        WorldRect::new(camera.position() - half, camera.position() + half)
    }

    /// `None` when the candidate area misses the world entirely.
    pub fn compute(camera: &Camera, config: &WorldConfig) -> Option<Self> {
        let candidate = Self::candidate_rect(camera);
        let world = WorldRect::new(DVec2::ZERO, DVec2::splat(config.world_size()));
        let bounds = candidate.intersect(&world);
        if bounds.is_empty() {
            return None;
        }

        let chunk_px = config.chunk_pixel_size();
        let last = i32::try_from(config.chunk_count()).map_or(i32::MAX, |n| n - 1);
        let to_chunk = |v: f64| ((v / chunk_px).floor() as i32).clamp(0, last);
        let chunks = ChunkRange::new(
            ChunkCoord::new(to_chunk(bounds.min.x), to_chunk(bounds.min.y)),
            ChunkCoord::new(to_chunk(bounds.max.x), to_chunk(bounds.max.y)),
        );

        Some(Self {
            candidate,
            bounds,
            chunks,
            chunk_pixel_size: chunk_px,
            tile_size: f64::from(config.tile_size()),
        })
    }

    /// Origins of the chunk-sized background tiles overlapping `bounds`,
    /// aligned to multiples of the chunk pixel size. Row-major.
    pub fn background_tiles(&self) -> impl Iterator<Item = DVec2> + use<> {
        let size = self.chunk_pixel_size;
        let xs: Vec<f64> = aligned_steps(self.bounds.min.x, self.bounds.max.x, size, false).collect();
        aligned_steps(self.bounds.min.y, self.bounds.max.y, size, false)
            .flat_map(move |y| xs.clone().into_iter().map(move |x| DVec2::new(x, y)))
    }

    /// Tile grid lines within `bounds`, as `(from, to)` segments. Lines on
    /// the far edge are included.
    pub fn grid_lines(&self) -> Vec<(DVec2, DVec2)> {
        let b = self.bounds;
        let vertical = aligned_steps(b.min.x, b.max.x, self.tile_size, true)
            .map(|x| (DVec2::new(x, b.min.y), DVec2::new(x, b.max.y)));
        let horizontal = aligned_steps(b.min.y, b.max.y, self.tile_size, true)
            .map(|y| (DVec2::new(b.min.x, y), DVec2::new(b.max.x, y)));
        vertical.chain(horizontal).collect()
    }
}

/// Multiples of `step` from the one at or below `start` up to `end`.
///
/// Positions are computed from integer indices so they never drift.
fn aligned_steps(start: f64, end: f64, step: f64, inclusive: bool) -> impl Iterator<Item = f64> {
    let first = (start / step).floor() as i64;
    let last = if inclusive {
        (end / step).floor() as i64
    } else {
        (end / step).ceil() as i64 - 1
    };
    (first..=last).map(move |i| i as f64 * step)
}
