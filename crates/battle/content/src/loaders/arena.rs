//! Arena opponent loader.

use std::path::Path;

use battle_core::CombatantTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Arena roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaRoster {
    pub opponents: Vec<CombatantTemplate>,
}

/// Loader for arena opponent templates from RON files.
pub struct ArenaLoader;

impl ArenaLoader {
    /// Load the arena roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<CombatantTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an arena roster from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<CombatantTemplate>> {
        let roster: ArenaRoster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse arena roster RON: {}", e))?;
        Ok(roster.opponents)
    }
}
