//! Data-driven battle content and loaders.
//!
//! This crate houses the static ability catalogs and provides loaders for
//! RON/TOML data files:
//! - Jutsu catalog (RON)
//! - Item catalog (RON)
//! - Bloodline catalog (RON)
//! - Arena opponent templates (RON)
//! - Engine configuration (TOML)
//!
//! Content is consumed by the runtime when battles are assembled and never
//! appears in battle state beyond the copies embedded in combatant
//! snapshots. All loaders deserialize directly into `battle-core` types.

pub mod catalog;
pub mod loaders;

pub use catalog::ContentCatalog;
pub use loaders::{
    ArenaLoader, BloodlineLoader, ConfigLoader, ItemLoader, JutsuLoader, LoadResult,
};
