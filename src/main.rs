//! Preview binary - loads the dictionaries and prints how the page would read
//!
//! Usage:
//!   cargo run                 # Use the stored language (or English)
//!   cargo run -- pl           # Switch to Polish first (and remember it)
//!
//! Optional environment variables:
//! - LOCALES_BASE_URL (defaults to http://localhost:8000)
//! - LOCALES_PATH (defaults to /static/locales)
//! - LOCALES_TIMEOUT_SECS (defaults to 10)
//! - LOCALES_FALLBACK_FILE (defaults to the embedded fallback)
//! - PREFERENCES_FILE (defaults to data/preferences.json)

use anyhow::Result;
use chaysh_locales::config::Config;
use chaysh_locales::i18n::{
    Document, Element, ElementId, Entry, Language, LoadOutcome, LocalizationManager, CATEGORIES_KEY,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chaysh_locales=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let mut manager = LocalizationManager::from_config(&config)?;

    let mut doc = Document::new();
    let outcome = manager.load_translations(&mut doc).await;
    if outcome == LoadOutcome::Fallback {
        info!("Using built-in fallback translations");
    }

    if let Some(lang) = std::env::args().nth(1) {
        if Language::from_code(&lang).is_err() {
            warn!("'{}' is not a supported language, English text will be shown", lang);
        }
        manager.change_language(&lang, &mut doc);
    }

    // Mirror every key of the active dictionary as a tagged element
    let active = doc
        .lang()
        .unwrap_or(Language::canonical().code())
        .to_string();
    let Some(dictionary) = manager.translations().select(&active) else {
        warn!("No dictionary loaded");
        return Ok(());
    };

    let mut rows: Vec<(String, ElementId)> = dictionary
        .text_keys()
        .into_iter()
        .map(|key| (key.to_string(), doc.push(Element::tagged(key, format!("[{}]", key)))))
        .collect();

    if let Some(Entry::Table(table)) = dictionary.get(CATEGORIES_KEY) {
        for id in table.keys() {
            let label = format!("{}.{}", CATEGORIES_KEY, id);
            rows.push((label, doc.push(Element::category_badge(id.as_str(), id.as_str()))));
        }
    }

    let report = manager.update_translations(&mut doc);

    let shown = Language::from_code(&report.language).unwrap_or_else(|_| Language::canonical());
    println!(
        "Language: {} [{}] ({:?})",
        shown.native_name(),
        report.language,
        outcome
    );
    for (key, id) in rows {
        println!("  {:<24} {}", key, doc.text_of(id));
    }

    Ok(())
}
