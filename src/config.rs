//! Game configuration
//!
//! World-generation counts and spacing constraints plus initial wildlife
//! population sizes. Loadable from RON files; defaults carry the game's
//! built-in tuning.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldGenConfig,
    pub spawn: SpawnConfig,
}

impl GameConfig {
    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = ron::from_str(&text)?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldGenConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

/// Procedural world-generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// RNG seed for deterministic placement
    pub seed: u64,
    /// Requested tree count (best-effort, see rejection sampling)
    pub tree_count: usize,
    /// Requested cabin count (best-effort)
    pub cabin_count: usize,
    /// Requested campsite count (best-effort)
    pub campsite_count: usize,
    /// Half extent of the whole world square (trees, wildlife wandering)
    pub world_half_extent: f32,
    /// Half extent of the area cabins and campsites are placed in
    pub settlement_half_extent: f32,
    /// Minimum distance between any two cabins
    pub min_cabin_spacing: f32,
    /// Maximum distance a cabin may sit from every other cabin
    pub max_cabin_spacing: f32,
    /// Keep-out radius around the player spawn point
    pub spawn_clearance: f32,
    /// Cabins closer than this are connected by a path
    pub path_link_distance: f32,
    /// Minimum distance from a tree to the nearest path segment
    pub min_tree_path_clearance: f32,
    /// Minimum distance from a tree to the nearest cabin
    pub min_tree_cabin_clearance: f32,
    /// Minimum distance between two trees
    pub min_tree_tree_clearance: f32,
    /// Minimum distance from a campsite to the nearest cabin
    pub campsite_cabin_clearance: f32,
    /// Minimum distance between two campsites
    pub campsite_spacing: f32,
    /// Cabins within this radius of each other form one cluster
    pub cluster_radius: f32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tree_count: 800,
            cabin_count: 15,
            campsite_count: 6,
            world_half_extent: 400.0,
            settlement_half_extent: 350.0,
            min_cabin_spacing: 30.0,
            max_cabin_spacing: 100.0,
            spawn_clearance: 100.0,
            path_link_distance: 60.0,
            min_tree_path_clearance: 3.0,
            min_tree_cabin_clearance: 10.0,
            min_tree_tree_clearance: 1.5,
            campsite_cabin_clearance: 50.0,
            campsite_spacing: 30.0,
            cluster_radius: 50.0,
        }
    }
}

/// Initial wildlife and pickup population sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub bear_count: usize,
    pub wolf_count: usize,
    pub fox_count: usize,
    pub bird_count: usize,
    pub health_pack_count: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            bear_count: 5,
            wolf_count: 20,
            fox_count: 10,
            bird_count: 15,
            health_pack_count: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_carries_builtin_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.world.cabin_count, 15);
        assert_eq!(config.world.tree_count, 800);
        assert_eq!(config.spawn.wolf_count, 20);
        assert_eq!(config.world.min_cabin_spacing, 30.0);
        assert_eq!(config.world.max_cabin_spacing, 100.0);
    }

    #[test]
    fn test_parse_partial_ron() {
        // Missing fields fall back to defaults
        let config: GameConfig =
            ron::from_str("(world: (seed: 7, cabin_count: 3))").expect("should parse");
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.cabin_count, 3);
        assert_eq!(config.world.campsite_count, 6);
        assert_eq!(config.spawn.bear_count, 5);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result: Result<GameConfig, _> = ron::from_str("(world: (seed: \"not a number\"))");
        assert!(result.is_err());
    }
}
