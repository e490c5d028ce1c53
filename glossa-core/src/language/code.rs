//! Language code helpers
//!
//! Only base codes (`de`, `pt`, `zh`) travel through the engine. Region and
//! script subtags are either rejected (caller bias lists) or collapsed
//! (classifier labels and profile names).

/// Sentinel for "unknown or unsupported language"
pub const UNKNOWN: &str = "zz";

/// Base part of a code: `zh-CN` → `zh`, `pt_BR` → `pt`
pub fn base_code(code: &str) -> String {
    let base = code.split(['-', '_']).next().unwrap_or(code);
    base.trim().to_ascii_lowercase()
}

/// True when the code carries a region or script subtag
pub fn has_variant(code: &str) -> bool {
    code.contains('-') || code.contains('_')
}

/// Canonical form of a caller-supplied bias code.
///
/// Browsers report Norwegian Bokmål as `nb`; the engine knows it as `no`.
pub fn normalize_bias_code(code: &str) -> String {
    let code = code.trim().to_ascii_lowercase();
    if code == "nb" {
        "no".to_string()
    } else {
        code
    }
}
