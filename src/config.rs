//! # Configuration Module
//!
//! Settings for a `ChunkIndex`, loadable from JSON. Every field has a default,
//! so an empty object (or no file at all) gives a working index.
//!
//! ```json
//! {
//!     "max_chunk_limit": 100,
//!     "world_map": { "min_x": 0, "max_x": 3200, "min_z": 0, "max_z": 3200, "scale": 32 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VoxelError;
use crate::voxels::coords::{CHUNK_SIZE_I32, MAX_CHUNK_COORD};
use crate::voxels::scaled_grid::GridBounds;

/// Default bound on chunk coordinates, mirrored by the South/East/West views.
pub const DEFAULT_MAX_CHUNK_LIMIT: i32 = 100;
/// Default world-map extent along x and z, in blocks.
pub const DEFAULT_WORLD_MAP_EXTENT: i32 = 3200;

/// Configuration of a `ChunkIndex`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// The largest chunk coordinate expected on either axis. Keys of the
    /// reversed views are `max_chunk_limit - coordinate`.
    pub max_chunk_limit: i32,
    /// Bounds and stride of the coarse height and terrain overlays.
    pub world_map: GridBounds,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_chunk_limit: DEFAULT_MAX_CHUNK_LIMIT,
            world_map: GridBounds::new(
                0,
                DEFAULT_WORLD_MAP_EXTENT,
                0,
                DEFAULT_WORLD_MAP_EXTENT,
                CHUNK_SIZE_I32,
            ),
        }
    }
}

impl IndexConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, VoxelError> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, VoxelError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the limit is in `1..=MAX_CHUNK_COORD` and the world map is a
    /// non-empty, positively strided rectangle.
    pub fn validate(&self) -> Result<(), VoxelError> {
        if !(1..=MAX_CHUNK_COORD).contains(&self.max_chunk_limit) {
            return Err(VoxelError::InvalidConfig(format!(
                "max_chunk_limit must be in 1..={}, got {}",
                MAX_CHUNK_COORD, self.max_chunk_limit
            )));
        }

        let map = &self.world_map;
        if map.scale < 1 {
            return Err(VoxelError::InvalidConfig(format!(
                "world_map.scale must be at least 1, got {}",
                map.scale
            )));
        }
        if map.min_x >= map.max_x || map.min_z >= map.max_z {
            return Err(VoxelError::InvalidConfig(format!(
                "world_map bounds [{}, {}) x [{}, {}) are empty",
                map.min_x, map.max_x, map.min_z, map.max_z
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = IndexConfig::from_json_str("{}").unwrap();
        assert_eq!(config, IndexConfig::default());
        assert_eq!(config.world_map.width(), 100);
    }

    #[test]
    fn partial_world_map_is_rejected_by_serde() {
        let result = IndexConfig::from_json_str(r#"{ "world_map": { "scale": 4 } }"#);
        assert!(matches!(result, Err(VoxelError::Json(_))));
    }

    #[test]
    fn explicit_values_are_read() {
        let config = IndexConfig::from_json_str(
            r#"{
                "max_chunk_limit": 16,
                "world_map": { "min_x": -64, "max_x": 64, "min_z": 0, "max_z": 32, "scale": 8 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_chunk_limit, 16);
        assert_eq!(config.world_map, GridBounds::new(-64, 64, 0, 32, 8));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for json in [
            r#"{ "max_chunk_limit": 0 }"#,
            r#"{ "world_map": { "min_x": 0, "max_x": 10, "min_z": 0, "max_z": 10, "scale": 0 } }"#,
            r#"{ "world_map": { "min_x": 10, "max_x": 10, "min_z": 0, "max_z": 10, "scale": 1 } }"#,
        ] {
            assert!(
                matches!(IndexConfig::from_json_str(json), Err(VoxelError::InvalidConfig(_))),
                "{json} should be invalid"
            );
        }
    }

    #[test]
    fn limit_past_the_addressable_world_is_rejected() {
        let json = format!(r#"{{ "max_chunk_limit": {} }}"#, MAX_CHUNK_COORD + 1);
        assert!(matches!(
            IndexConfig::from_json_str(&json),
            Err(VoxelError::InvalidConfig(_))
        ));

        let json = format!(r#"{{ "max_chunk_limit": {} }}"#, MAX_CHUNK_COORD);
        assert_eq!(IndexConfig::from_json_str(&json).unwrap().max_chunk_limit, MAX_CHUNK_COORD);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = IndexConfig::from_json_file("/nonexistent/voxel-world.json");
        assert!(matches!(result, Err(VoxelError::Io(_))));
    }
}
