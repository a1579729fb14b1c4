//! Shared types for the wrapworld client: world shape, toroidal coordinates,
//! projection modes and the plain-data movement input record.
//!
//! # Invariants
//! - `WorldConfig` is immutable once built; every derived size comes from it.
//! - Wrapping is the only way a coordinate is brought into `[0, world_size)`.

pub mod config;
pub mod coords;
pub mod projection;
pub mod types;

pub use config::{ConfigError, WorldConfig};
pub use coords::{
    CellLocation, ChunkCoord, ChunkRange, is_within_world_bounds, normalize_angle, wrap_coordinate,
    wrap_point,
};
pub use projection::{MovementBasis, ProjectionMode};
pub use types::MovementInput;

pub fn crate_info() -> &'static str {
    "wrapworld-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
