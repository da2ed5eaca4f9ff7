//! Aggregated content catalog.
//!
//! The runtime holds one [`ContentCatalog`] and resolves every content id
//! against it: equipping loadouts at initiation, matching arena opponents,
//! realizing bloodline passives. The built-in catalog ships with the crate;
//! deployments can load replacement data files instead.

use std::collections::HashMap;
use std::path::Path;

use battle_core::{Bloodline, CombatantTemplate, Item, Jutsu};

use crate::loaders::{
    ArenaLoader, BloodlineLoader, ItemLoader, JutsuLoader, LoadResult,
};

const BUILTIN_JUTSUS: &str = include_str!("../data/jutsus.ron");
const BUILTIN_ITEMS: &str = include_str!("../data/items.ron");
const BUILTIN_BLOODLINES: &str = include_str!("../data/bloodlines.ron");
const BUILTIN_ARENA: &str = include_str!("../data/arena.ron");

/// All static ability content, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    jutsus: HashMap<String, Jutsu>,
    items: HashMap<String, Item>,
    bloodlines: HashMap<String, Bloodline>,
    arena: Vec<CombatantTemplate>,
}

impl ContentCatalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> LoadResult<Self> {
        Self::from_parts(
            JutsuLoader::parse(BUILTIN_JUTSUS)?,
            ItemLoader::parse(BUILTIN_ITEMS)?,
            BloodlineLoader::parse(BUILTIN_BLOODLINES)?,
            ArenaLoader::parse(BUILTIN_ARENA)?,
        )
    }

    /// Loads a catalog from a directory holding the four RON files.
    pub fn load_dir(dir: &Path) -> LoadResult<Self> {
        Self::from_parts(
            JutsuLoader::load(&dir.join("jutsus.ron"))?,
            ItemLoader::load(&dir.join("items.ron"))?,
            BloodlineLoader::load(&dir.join("bloodlines.ron"))?,
            ArenaLoader::load(&dir.join("arena.ron"))?,
        )
    }

    fn from_parts(
        jutsus: Vec<Jutsu>,
        items: Vec<Item>,
        bloodlines: Vec<Bloodline>,
        arena: Vec<CombatantTemplate>,
    ) -> LoadResult<Self> {
        let mut catalog = Self {
            jutsus: HashMap::new(),
            items: HashMap::new(),
            bloodlines: HashMap::new(),
            arena,
        };
        for jutsu in jutsus {
            if catalog.jutsus.insert(jutsu.id.clone(), jutsu).is_some() {
                return Err(anyhow::anyhow!("duplicate jutsu id in catalog"));
            }
        }
        for item in items {
            if catalog.items.insert(item.id.clone(), item).is_some() {
                return Err(anyhow::anyhow!("duplicate item id in catalog"));
            }
        }
        for bloodline in bloodlines {
            if catalog
                .bloodlines
                .insert(bloodline.id.clone(), bloodline)
                .is_some()
            {
                return Err(anyhow::anyhow!("duplicate bloodline id in catalog"));
            }
        }
        Ok(catalog)
    }

    pub fn jutsu(&self, id: &str) -> Option<&Jutsu> {
        self.jutsus.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn bloodline(&self, id: &str) -> Option<&Bloodline> {
        self.bloodlines.get(id)
    }

    pub fn arena_opponents(&self) -> &[CombatantTemplate] {
        &self.arena
    }

    /// The arena opponent whose level is closest to `level`, ties broken by
    /// roster order.
    pub fn nearest_level_opponent(&self, level: u32) -> Option<&CombatantTemplate> {
        self.arena
            .iter()
            .min_by_key(|template| template.level.abs_diff(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = ContentCatalog::builtin().expect("builtin content must parse");
        assert!(catalog.jutsu("fireball").is_some());
        assert!(catalog.item("healing_salve").is_some());
        assert!(catalog.bloodline("crimson_mist").is_some());
        assert!(!catalog.arena_opponents().is_empty());
    }

    #[test]
    fn nearest_level_matching() {
        let catalog = ContentCatalog::builtin().expect("builtin content must parse");
        let opponent = catalog.nearest_level_opponent(1).expect("roster not empty");
        let closest = catalog
            .arena_opponents()
            .iter()
            .map(|t| t.level.abs_diff(1))
            .min()
            .unwrap();
        assert_eq!(opponent.level.abs_diff(1), closest);
    }

    #[test]
    fn builtin_jutsus_have_positive_scaling() {
        let catalog = ContentCatalog::builtin().expect("builtin content must parse");
        for id in ["fireball", "gale_palm", "mud_wall", "shadow_bind"] {
            let jutsu = catalog.jutsu(id).expect("jutsu present");
            for effect in &jutsu.effects {
                assert!(effect.power_per_level >= 0, "scaling must stay monotonic");
            }
        }
    }
}
