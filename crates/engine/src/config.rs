use serde::{Deserialize, Serialize};
use std::path::Path;
use wrapworld_common::{ConfigError, WorldConfig};
use wrapworld_kernel::PlayerSettings;
use wrapworld_render::camera::DEFAULT_FOLLOW_FACTOR;
use wrapworld_stream::RetentionConfig;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("world config: {0}")]
    World(#[from] ConfigError),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Fraction of the remaining distance to the player covered per frame.
    pub follow_factor: f64,
    /// Target-zoom change per mouse-wheel notch.
    pub zoom_step: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow_factor: DEFAULT_FOLLOW_FACTOR,
            zoom_step: 0.2,
        }
    }
}

/// Everything needed to start a [`crate::GameEngine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub viewport: ViewportConfig,
    pub player: PlayerSettings,
    pub camera: CameraSettings,
    /// Windowed chunk eviction; `None` keeps every generated chunk.
    pub retention: Option<RetentionConfig>,
    pub debug: bool,
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, EngineError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, EngineError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Rebuild the world shape with optional overrides, revalidating it.
    pub fn override_world(&mut self, seed: Option<i64>, chunk_count: Option<u32>) -> Result<(), EngineError> {
        let w = self.world;
        self.world = WorldConfig::new(
            seed.unwrap_or(w.seed()),
            w.chunk_size(),
            w.tile_size(),
            chunk_count.unwrap_or(w.chunk_count()),
            w.biome_plains_fraction(),
        )?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.viewport.width) || !positive(self.viewport.height) {
            return Err(EngineError::Invalid {
                field: "viewport",
                reason: "width and height must be positive",
            });
        }
        if !(self.camera.follow_factor > 0.0 && self.camera.follow_factor <= 1.0) {
            return Err(EngineError::Invalid {
                field: "camera.follow_factor",
                reason: "must be within (0, 1]",
            });
        }
        if !positive(self.camera.zoom_step) {
            return Err(EngineError::Invalid {
                field: "camera.zoom_step",
                reason: "must be positive",
            });
        }
        if !(self.player.speed.is_finite() && self.player.speed >= 0.0) {
            return Err(EngineError::Invalid {
                field: "player.speed",
                reason: "must be non-negative",
            });
        }
        if !positive(self.player.size) {
            return Err(EngineError::Invalid {
                field: "player.size",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}
