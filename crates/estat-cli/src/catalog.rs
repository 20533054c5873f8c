//! Profile catalog resolution for commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use estat_model::ProfileCatalog;

/// Built-in profiles, overridden and extended by an optional TOML catalog.
pub fn resolve_catalog(path: Option<&Path>) -> Result<ProfileCatalog> {
    let builtin = ProfileCatalog::builtin();
    let Some(path) = path else {
        return Ok(builtin);
    };
    let custom = ProfileCatalog::load(path)
        .with_context(|| format!("load profile catalog {}", path.display()))?;
    debug!(
        path = %path.display(),
        profiles = custom.len(),
        "loaded profile catalog"
    );
    Ok(builtin.merged_with(custom))
}
