//! Content loaders for reading battle data from files.
//!
//! Each loader converts one RON/TOML file into `battle-core` types. Parsing
//! failures carry the file path so authoring mistakes are easy to track down.

pub mod arena;
pub mod bloodline;
pub mod config;
pub mod item;
pub mod jutsu;

pub use arena::ArenaLoader;
pub use bloodline::BloodlineLoader;
pub use config::ConfigLoader;
pub use item::ItemLoader;
pub use jutsu::JutsuLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
