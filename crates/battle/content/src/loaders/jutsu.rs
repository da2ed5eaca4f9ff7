//! Jutsu catalog loader.

use std::path::Path;

use battle_core::Jutsu;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Jutsu catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JutsuCatalog {
    pub jutsus: Vec<Jutsu>,
}

/// Loader for the jutsu catalog from RON files.
pub struct JutsuLoader;

impl JutsuLoader {
    /// Load the jutsu catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Jutsu>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a jutsu catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<Jutsu>> {
        let catalog: JutsuCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse jutsu catalog RON: {}", e))?;
        Ok(catalog.jutsus)
    }
}
