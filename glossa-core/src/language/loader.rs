//! Language catalog loader
//!
//! Manages the embedded catalog and catalogs read from disk.

use super::catalog::LanguageCatalog;
use crate::error::{CoreError, Result};
use std::path::Path;
use std::sync::OnceLock;

/// Embedded catalog, parsed on first access
static BUILTIN: OnceLock<LanguageCatalog> = OnceLock::new();

/// The catalog shipped with the crate
pub fn builtin_catalog() -> &'static LanguageCatalog {
    BUILTIN.get_or_init(|| {
        LanguageCatalog::from_toml_str(include_str!("../../configs/languages.toml"))
            .expect("Failed to load embedded language catalog")
    })
}

/// Load a catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<LanguageCatalog> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CoreError::Catalog(format!("failed to read {}: {e}", path.display()))
    })?;
    LanguageCatalog::from_toml_str(&content)
}
