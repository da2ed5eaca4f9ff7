//! Bloodline catalog loader.

use std::path::Path;

use battle_core::Bloodline;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Bloodline catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodlineCatalog {
    pub bloodlines: Vec<Bloodline>,
}

/// Loader for the bloodline catalog from RON files.
pub struct BloodlineLoader;

impl BloodlineLoader {
    /// Load the bloodline catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Bloodline>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a bloodline catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<Bloodline>> {
        let catalog: BloodlineCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bloodline catalog RON: {}", e))?;
        Ok(catalog.bloodlines)
    }
}
