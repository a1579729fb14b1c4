//! Seeded per-tile placement roll.
//!
//! The roll for a tile is a 32-bit polynomial hash (`h = h * 31 + byte`,
//! wrapping) of the decimal key `"{world_x}_{world_y}_{seed}"`, reduced to
//! `[0, 1)` in steps of 1/1000. The key is streamed straight into the hasher,
//! so no string is built per tile.

use std::fmt::{self, Write};

use crate::entity::EntityKind;

/// Upper bound of each placement band, checked in order.
pub const PLACEMENT_BANDS: [(f64, EntityKind); 3] = [
    (0.01, EntityKind::Grass),
    (0.025, EntityKind::Tree),
    (0.04, EntityKind::Rock),
];

/// `fmt::Write` sink that folds bytes into a 32-bit polynomial rolling hash.
#[derive(Debug, Default, Clone, Copy)]
struct PolyHash(i32);

impl Write for PolyHash {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.0 = self.0.wrapping_mul(31).wrapping_add(i32::from(b));
        }
        Ok(())
    }
}

/// Absolute value of the polynomial hash of `"{world_x}_{world_y}_{seed}"`.
pub fn tile_hash(world_x: i64, world_y: i64, seed: i64) -> u32 {
    let mut h = PolyHash::default();
    // Writing integers into a sink that never fails cannot fail.
    let _ = write!(h, "{world_x}_{world_y}_{seed}");
    h.0.unsigned_abs()
}

/// Normalized roll in `[0, 1)` for a world tile.
pub fn tile_roll(world_x: i64, world_y: i64, seed: i64) -> f64 {
    f64::from(tile_hash(world_x, world_y, seed) % 1000) / 1000.0
}

/// Entity kind for a roll, if any.
pub fn classify(roll: f64) -> Option<EntityKind> {
    PLACEMENT_BANDS
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straightforward string-building reference for the streamed hash.
    fn reference_hash(key: &str) -> u32 {
        let mut h: i32 = 0;
        for c in key.chars() {
            h = (h << 5).wrapping_sub(h).wrapping_add(c as i32);
        }
        h.unsigned_abs()
    }

    #[test]
    fn streamed_hash_matches_string_hash() {
        for (x, y, seed) in [(0, 0, 12345), (-7, 130, 1), (4095, 4095, -99), (12, 34, 0)] {
            let key = format!("{x}_{y}_{seed}");
            assert_eq!(tile_hash(x, y, seed), reference_hash(&key), "key {key}");
        }
    }

    #[test]
    fn known_small_key() {
        // "0_0_1" = 48,95,48,95,49
        let expected = ((((48i64 * 31 + 95) * 31 + 48) * 31 + 95) * 31 + 49) as u32;
        assert_eq!(tile_hash(0, 0, 1), expected);
    }

    #[test]
    fn roll_is_in_unit_interval() {
        for x in -50..50 {
            let r = tile_roll(x, x * 3, 12345);
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn bands_are_ordered() {
        assert_eq!(classify(0.0), Some(EntityKind::Grass));
        assert_eq!(classify(0.009), Some(EntityKind::Grass));
        assert_eq!(classify(0.01), Some(EntityKind::Tree));
        assert_eq!(classify(0.024), Some(EntityKind::Tree));
        assert_eq!(classify(0.025), Some(EntityKind::Rock));
        assert_eq!(classify(0.039), Some(EntityKind::Rock));
        assert_eq!(classify(0.04), None);
        assert_eq!(classify(0.999), None);
    }

    #[test]
    fn seed_changes_rolls() {
        let a: Vec<_> = (0..64).map(|x| tile_hash(x, 0, 1)).collect();
        let b: Vec<_> = (0..64).map(|x| tile_hash(x, 0, 2)).collect();
        assert_ne!(a, b);
    }
}
