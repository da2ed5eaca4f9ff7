//! Engine configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    ///
    /// Fields omitted from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_parses() {
        let config = ConfigLoader::parse(include_str!("../../data/config.toml"))
            .expect("bundled config must parse");
        assert_eq!(config.grid_width, 13);
        assert_eq!(config.grid_height, 5);
        assert_eq!(config.attacker_start, battle_core::Position::new(4, 2));
        assert_eq!(config.defender_start, battle_core::Position::new(8, 2));
    }

    #[test]
    fn omitted_fields_keep_defaults() {
        let config = ConfigLoader::parse("grid_width = 20\n").expect("partial config must parse");
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.action_points, BattleConfig::default().action_points);
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ai_action_cap = 3\n").expect("write config");
        let config = ConfigLoader::load(&path).expect("config must load");
        assert_eq!(config.ai_action_cap, 3);
    }
}
