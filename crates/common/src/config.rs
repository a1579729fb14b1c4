use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while building or loading a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    #[error("{field} must not exceed {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },
    #[error("biome plains fraction must be within [0, 1], got {0}")]
    PlainsFraction(f64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Immutable world-shape parameters.
///
/// The world is a square torus `chunk_count` chunks on a side; each chunk is
/// `chunk_size` tiles on a side and each tile `tile_size` pixels. All wrapping
/// uses [`WorldConfig::world_size`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWorldConfig", into = "RawWorldConfig")]
pub struct WorldConfig {
    seed: i64,
    chunk_size: u32,
    tile_size: u32,
    chunk_count: u32,
    biome_plains_fraction: f64,
}

/// Unvalidated on-disk form of [`WorldConfig`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawWorldConfig {
    seed: i64,
    chunk_size: u32,
    tile_size: u32,
    chunk_count: u32,
    biome_plains_fraction: f64,
}

impl Default for RawWorldConfig {
    fn default() -> Self {
        Self {
            seed: WorldConfig::DEFAULT_SEED,
            chunk_size: 64,
            tile_size: 32,
            chunk_count: 64,
            biome_plains_fraction: 0.5,
        }
    }
}

impl TryFrom<RawWorldConfig> for WorldConfig {
    type Error = ConfigError;

    fn try_from(raw: RawWorldConfig) -> Result<Self, Self::Error> {
        WorldConfig::new(
            raw.seed,
            raw.chunk_size,
            raw.tile_size,
            raw.chunk_count,
            raw.biome_plains_fraction,
        )
    }
}

impl From<WorldConfig> for RawWorldConfig {
    fn from(c: WorldConfig) -> Self {
        Self {
            seed: c.seed,
            chunk_size: c.chunk_size,
            tile_size: c.tile_size,
            chunk_count: c.chunk_count,
            biome_plains_fraction: c.biome_plains_fraction,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        let raw = RawWorldConfig::default();
        Self {
            seed: raw.seed,
            chunk_size: raw.chunk_size,
            tile_size: raw.tile_size,
            chunk_count: raw.chunk_count,
            biome_plains_fraction: raw.biome_plains_fraction,
        }
    }
}

impl WorldConfig {
    pub const DEFAULT_SEED: i64 = 12345;

    /// Build a validated configuration.
    pub fn new(
        seed: i64,
        chunk_size: u32,
        tile_size: u32,
        chunk_count: u32,
        biome_plains_fraction: f64,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("chunk_size", chunk_size),
            ("tile_size", tile_size),
            ("chunk_count", chunk_count),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        // Chunk and tile indices are i32.
        let max = i64::from(i32::MAX);
        for (field, value) in [
            ("chunk_count", i64::from(chunk_count)),
            ("world_tiles", i64::from(chunk_count) * i64::from(chunk_size)),
        ] {
            if value > max {
                return Err(ConfigError::TooLarge { field, value, max });
            }
        }
        if !(0.0..=1.0).contains(&biome_plains_fraction) {
            return Err(ConfigError::PlainsFraction(biome_plains_fraction));
        }
        Ok(Self {
            seed,
            chunk_size,
            tile_size,
            chunk_count,
            biome_plains_fraction,
        })
    }

    /// Parse a configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Same shape, different seed.
    pub fn with_seed(&self, seed: i64) -> Self {
        Self { seed, ..*self }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Tiles per chunk edge.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Pixels per tile edge.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Chunks per world edge.
    pub fn chunk_count(&self) -> u32 {
        self.chunk_count
    }

    pub fn biome_plains_fraction(&self) -> f64 {
        self.biome_plains_fraction
    }

    /// Pixels per chunk edge.
    pub fn chunk_pixel_size(&self) -> f64 {
        f64::from(self.chunk_size) * f64::from(self.tile_size)
    }

    /// Tiles per world edge.
    pub fn world_tiles(&self) -> i64 {
        i64::from(self.chunk_count) * i64::from(self.chunk_size)
    }

    /// World edge length in pixels: `chunk_count * chunk_size * tile_size`.
    pub fn world_size(&self) -> f64 {
        f64::from(self.chunk_count) * self.chunk_pixel_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_world() {
        let c = WorldConfig::default();
        assert_eq!(c.seed(), 12345);
        assert_eq!(c.chunk_size(), 64);
        assert_eq!(c.tile_size(), 32);
        assert_eq!(c.chunk_count(), 64);
        assert_eq!(c.chunk_pixel_size(), 2048.0);
        assert_eq!(c.world_size(), 131_072.0);
    }

    #[test]
    fn with_seed_keeps_shape() {
        let c = WorldConfig::default();
        let d = c.with_seed(7);
        assert_eq!(d.seed(), 7);
        assert_eq!(d.chunk_size(), c.chunk_size());
        assert_eq!(d.world_size(), c.world_size());
        assert_eq!(c.seed(), 12345);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(
            WorldConfig::new(1, 0, 32, 64, 0.5),
            Err(ConfigError::NonPositive {
                field: "chunk_size"
            })
        ));
        assert!(WorldConfig::new(1, 64, 0, 64, 0.5).is_err());
        assert!(WorldConfig::new(1, 64, 32, 0, 0.5).is_err());
    }

    #[test]
    fn oversized_worlds_are_rejected() {
        assert!(matches!(
            WorldConfig::new(1, 1, 1, 3_000_000_000, 0.5),
            Err(ConfigError::TooLarge {
                field: "chunk_count",
                ..
            })
        ));
        assert!(matches!(
            WorldConfig::new(1, 65_536, 1, 65_536, 0.5),
            Err(ConfigError::TooLarge {
                field: "world_tiles",
                ..
            })
        ));
        let edge = WorldConfig::new(1, 1, 1, i32::MAX as u32, 0.5).unwrap();
        assert_eq!(edge.world_tiles(), i64::from(i32::MAX));
        assert!(WorldConfig::from_yaml_str("chunkCount: 3000000000\n").is_err());
    }

    #[test]
    fn plains_fraction_is_bounded() {
        assert!(WorldConfig::new(1, 64, 32, 64, 1.5).is_err());
        assert!(WorldConfig::new(1, 64, 32, 64, f64::NAN).is_err());
        assert!(WorldConfig::new(1, 64, 32, 64, 1.0).is_ok());
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let c = WorldConfig::from_yaml_str("seed: 99\nchunkCount: 8\n").unwrap();
        assert_eq!(c.seed(), 99);
        assert_eq!(c.chunk_count(), 8);
        assert_eq!(c.chunk_size(), 64);
    }

    #[test]
    fn yaml_validation_errors_surface() {
        assert!(WorldConfig::from_yaml_str("tileSize: 0\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: -4\nchunkSize: 16\ntileSize: 8").unwrap();
        let c = WorldConfig::load(file.path()).unwrap();
        assert_eq!(c.seed(), -4);
        assert_eq!(c.world_size(), 64.0 * 16.0 * 8.0);
    }

    #[test]
    fn yaml_round_trip_preserves_values() {
        let c = WorldConfig::new(3, 16, 8, 4, 0.25).unwrap();
        let text = serde_yaml::to_string(&c).unwrap();
        assert!(text.contains("chunkSize"));
        assert_eq!(WorldConfig::from_yaml_str(&text).unwrap(), c);
    }
}
