use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use wrapworld_common::{ChunkCoord, WorldConfig};

use crate::entity::{Entity, EntityKind};
use crate::placement;

/// Ground type of a whole chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    Plains,
    Desert,
}

impl Biome {
    /// Columns left of `floor(chunk_count * plains_fraction)` are plains.
    pub fn for_chunk(coord: ChunkCoord, config: &WorldConfig) -> Self {
        let coord = coord.wrapped(config.chunk_count());
        let plains_limit =
            (f64::from(config.chunk_count()) * config.biome_plains_fraction()).floor() as i32;
        if coord.x < plains_limit {
            Self::Plains
        } else {
            Self::Desert
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plains => "plains",
            Self::Desert => "desert",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A square block of `chunk_size × chunk_size` tiles and the entities placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    coord: ChunkCoord,
    biome: Biome,
    /// Generation order: row-major over local tiles.
    entities: Vec<Entity>,
}

impl Chunk {
    /// Generate the chunk at `coord` from the seed alone.
    ///
    /// Pure in `(coord, config)`: no neighbouring chunk or call order is consulted.
    /// Out-of-range coordinates produce the chunk they wrap to.
    pub fn generate(coord: ChunkCoord, config: &WorldConfig) -> Self {
        let coord = coord.wrapped(config.chunk_count());
        let size = i64::from(config.chunk_size());
        let tile_px = f64::from(config.tile_size());
        let base_x = i64::from(coord.x) * size;
        let base_y = i64::from(coord.y) * size;

        let mut entities = Vec::new();
        for tile_y in 0..size {
            for tile_x in 0..size {
                let world_x = base_x + tile_x;
                let world_y = base_y + tile_y;
                let roll = placement::tile_roll(world_x, world_y, config.seed());
                if let Some(kind) = placement::classify(roll) {
                    let position = DVec2::new(world_x as f64, world_y as f64) * tile_px;
                    entities.push(Entity::new(kind, position));
                }
            }
        }

        Self {
            coord,
            biome: Biome::for_chunk(coord, config),
            entities,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity count per kind, in kind order.
    pub fn counts_by_kind(&self) -> BTreeMap<EntityKind, usize> {
        let mut counts = BTreeMap::new();
        for e in &self.entities {
            *counts.entry(e.kind).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{classify, tile_roll};

    fn small_config() -> WorldConfig {
        WorldConfig::new(12345, 16, 32, 8, 0.5).unwrap()
    }

    #[test]
    fn generation_is_deterministic() {
        let c = small_config();
        let a = Chunk::generate(ChunkCoord::new(3, 5), &c);
        let b = Chunk::generate(ChunkCoord::new(3, 5), &c);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_coords_generate_their_wrapped_chunk() {
        let c = small_config();
        let n = c.chunk_count() as i32;
        let home = Chunk::generate(ChunkCoord::new(n - 1, 2), &c);
        for coord in [ChunkCoord::new(-1, 2), ChunkCoord::new(2 * n - 1, 2 - n)] {
            let chunk = Chunk::generate(coord, &c);
            assert_eq!(chunk.coord(), ChunkCoord::new(n - 1, 2));
            assert_eq!(chunk, home);
        }
    }

    #[test]
    fn entities_sit_on_their_tiles_inside_the_chunk() {
        let c = small_config();
        let coord = ChunkCoord::new(2, 1);
        let chunk = Chunk::generate(coord, &c);
        let origin = coord.origin(&c);
        let edge = c.chunk_pixel_size();
        for e in chunk.entities() {
            let local = e.position - origin;
            assert!(local.x >= 0.0 && local.x < edge);
            assert!(local.y >= 0.0 && local.y < edge);
            assert_eq!(local.x % 32.0, 0.0);
            assert_eq!(local.y % 32.0, 0.0);
        }
    }

    #[test]
    fn entity_kinds_follow_tile_rolls() {
        let c = WorldConfig::default();
        let chunk = Chunk::generate(ChunkCoord::new(0, 0), &c);
        for e in chunk.entities() {
            let wx = (e.position.x / 32.0) as i64;
            let wy = (e.position.y / 32.0) as i64;
            assert_eq!(classify(tile_roll(wx, wy, c.seed())), Some(e.kind));
        }
        let expected = (0..64i64)
            .flat_map(|y| (0..64i64).map(move |x| (x, y)))
            .filter(|&(x, y)| classify(tile_roll(x, y, c.seed())).is_some())
            .count();
        assert_eq!(chunk.len(), expected);
    }

    #[test]
    fn entities_are_in_row_major_order() {
        let c = WorldConfig::default();
        let chunk = Chunk::generate(ChunkCoord::new(1, 1), &c);
        let keys: Vec<(f64, f64)> = chunk
            .entities()
            .iter()
            .map(|e| (e.position.y, e.position.x))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(keys, sorted);
    }

    #[test]
    fn counts_by_kind_sums_to_len() {
        let chunk = Chunk::generate(ChunkCoord::new(0, 0), &WorldConfig::default());
        let total: usize = chunk.counts_by_kind().values().sum();
        assert_eq!(total, chunk.len());
    }

    #[test]
    fn biome_split_by_column() {
        let c = small_config(); // 8 chunks, plains for x < 4
        assert_eq!(Biome::for_chunk(ChunkCoord::new(3, 0), &c), Biome::Plains);
        assert_eq!(Biome::for_chunk(ChunkCoord::new(4, 7), &c), Biome::Desert);
        assert_eq!(Biome::for_chunk(ChunkCoord::new(-1, 0), &c), Biome::Desert);
        let all_desert = WorldConfig::new(1, 16, 32, 8, 0.0).unwrap();
        assert_eq!(Biome::for_chunk(ChunkCoord::new(0, 0), &all_desert), Biome::Desert);
    }
}
