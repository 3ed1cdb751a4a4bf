//! Metagame store loading

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use teamcore_battle::Metagame;
use teamcore_protocol::parse_metagame;

/// Load a metagame snapshot from a JSON document keyed by display name
pub fn load_metagame(path: impl AsRef<Path>) -> Result<Metagame> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metagame file {}", path.display()))?;

    let entries = parse_metagame(&json)
        .with_context(|| format!("Failed to parse metagame file {}", path.display()))?;

    let metagame = Metagame::from_entries(entries);
    tracing::info!(path = %path.display(), entities = metagame.len(), "metagame loaded");
    Ok(metagame)
}
