//! Fallback dictionaries used when the locale resources cannot be loaded.
//!
//! The default content ships inside the binary (`assets/locales/fallback.json`)
//! and is parsed once. Deployments can point `LOCALES_FALLBACK_FILE` at their
//! own file instead; it is read once when the manager is built.

use crate::i18n::Translations;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::OnceLock;

const EMBEDDED_FALLBACK_JSON: &str = include_str!("../../assets/locales/fallback.json");

static EMBEDDED_FALLBACK: OnceLock<Translations> = OnceLock::new();

/// The fallback dictionaries compiled into the crate.
pub fn embedded() -> &'static Translations {
    EMBEDDED_FALLBACK.get_or_init(|| {
        Translations::from_json(EMBEDDED_FALLBACK_JSON)
            .expect("Embedded fallback dictionary should be valid JSON")
    })
}

/// Read replacement fallback dictionaries from a file.
pub fn from_file(path: impl AsRef<Path>) -> Result<Translations> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fallback dictionary {}", path.display()))?;

    Translations::from_json(&json)
        .with_context(|| format!("Invalid fallback dictionary JSON in {}", path.display()))
}

/// Resolve the fallback: the configured file if any, otherwise the embedded one.
pub fn load(path: Option<&str>) -> Result<Translations> {
    match path {
        Some(path) => from_file(path),
        None => Ok(embedded().clone()),
    }
}
