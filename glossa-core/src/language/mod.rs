//! Language codes and the supported-language catalog

pub mod catalog;
pub mod code;
pub mod loader;

pub use catalog::{LanguageCatalog, LanguageInfo};
pub use code::{base_code, has_variant, normalize_bias_code, UNKNOWN};
pub use loader::{builtin_catalog, load_catalog};
