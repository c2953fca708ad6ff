pub mod custom_types;
mod plist_types;

use std::path::Path;

use anyhow::{Context, Result};

/// Reads an exported `Library.xml` (XML or binary property list).
pub fn read_library(path: &Path) -> Result<custom_types::Library> {
    let root: plist_types::Root = plist::from_file(path)
        .with_context(|| format!("failed to read library file {}", path.display()))?;
    Ok(root.into())
}

/// Splits a comma-delimited list of playlist names.
pub fn parse_playlist_filter(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
