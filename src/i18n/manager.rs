//! The localization manager: loads dictionaries, applies them to a
//! [`Document`], and switches the active language.
//!
//! All state is owned by [`LocalizationManager`]; the host builds one at
//! startup, calls [`LocalizationManager::load_translations`] once the page is
//! ready, and wires its language switcher to
//! [`LocalizationManager::change_language`].

use crate::config::Config;
use crate::i18n::storage::{FileStore, PreferenceStore, LANGUAGE_KEY};
use crate::i18n::{
    fallback, DictionaryValidator, Document, Language, LocaleLoader, Translations,
};
use anyhow::Result;
use tracing::{debug, error, info, warn};

/// Where the current dictionaries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Every language was fetched and parsed
    Fetched,
    /// Loading failed and the fallback dictionaries were installed
    Fallback,
}

/// What a substitution pass did to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Language code read from the document (before any fallback)
    pub language: String,

    /// Tagged elements whose text was replaced
    pub replaced: usize,

    /// Tagged elements left as they were (key absent)
    pub untouched: usize,

    /// Category badges whose text was replaced
    pub badges_replaced: usize,

    /// Category badges left as they were
    pub badges_untouched: usize,
}

pub struct LocalizationManager {
    loader: LocaleLoader,
    store: Box<dyn PreferenceStore>,
    translations: Translations,
    fallback: Translations,
}

impl LocalizationManager {
    /// Build a manager with empty dictionaries for every enabled language.
    pub fn new(
        loader: LocaleLoader,
        store: Box<dyn PreferenceStore>,
        fallback: Translations,
    ) -> Self {
        Self {
            loader,
            store,
            translations: Translations::empty_for_enabled(),
            fallback,
        }
    }

    /// Build a manager from configuration: HTTP loader, file-backed
    /// preference store, and the configured (or embedded) fallback.
    pub fn from_config(config: &Config) -> Result<Self> {
        let loader = LocaleLoader::new(config)?;
        let store = FileStore::new(&config.preferences_file);
        let fallback = fallback::load(config.fallback_file.as_deref())?;

        Ok(Self::new(loader, Box::new(store), fallback))
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn fallback(&self) -> &Translations {
        &self.fallback
    }

    /// Language stored in durable storage, or the canonical language when
    /// nothing (or nothing readable) is stored.
    pub fn stored_language(&self) -> String {
        match self.store.get(LANGUAGE_KEY) {
            Ok(Some(code)) if !code.is_empty() => code,
            Ok(_) => Language::canonical().code().to_string(),
            Err(e) => {
                warn!("Could not read language preference, using default: {}", e);
                Language::canonical().code().to_string()
            }
        }
    }

    /// Fetch every enabled language's dictionary and apply the stored language.
    ///
    /// Any failure installs the fallback dictionaries for all languages; the
    /// error is logged and never returned. The stored language is applied
    /// either way.
    pub async fn load_translations(&mut self, doc: &mut Document) -> LoadOutcome {
        let languages = Language::enabled();

        let outcome = match self.loader.fetch_all(&languages).await {
            Ok(translations) => {
                info!("Loaded translations for {} languages", translations.len());
                self.translations = translations;
                self.log_validation();
                LoadOutcome::Fetched
            }
            Err(e) => {
                error!("Error loading translations: {}", e);
                self.translations = self.fallback.clone();
                LoadOutcome::Fallback
            }
        };

        let lang = self.stored_language();
        doc.set_lang(&lang);
        self.update_translations(doc);

        outcome
    }

    /// Run the substitution pass for the document's current language.
    pub fn update_translations(&self, doc: &mut Document) -> SubstitutionReport {
        apply_translations(&self.translations, doc)
    }

    /// Persist `lang`, mirror it onto the document, and re-run substitution.
    ///
    /// Codes without a dictionary are accepted; substitution then uses the
    /// canonical language. A failed storage write is logged and does not
    /// stop the document update.
    pub fn change_language(&mut self, lang: &str, doc: &mut Document) -> SubstitutionReport {
        if let Err(e) = self.store.set(LANGUAGE_KEY, lang) {
            warn!("Could not persist language preference '{}': {}", lang, e);
        }
        if Language::from_code(lang).is_err() {
            debug!("Language '{}' has no dictionary, English will be shown", lang);
        }

        doc.set_lang(lang);
        self.update_translations(doc)
    }

    fn log_validation(&self) {
        let report = DictionaryValidator::validate(&self.translations);
        for problem in &report.errors {
            warn!("Dictionary error: {}", problem);
        }
        for problem in &report.warnings {
            debug!("Dictionary warning: {}", problem);
        }
    }
}

/// Replace the text of every tagged element and category badge in `doc`
/// using the dictionary for the document's language.
///
/// Elements whose key (or category) has no entry keep their current text.
pub fn apply_translations(translations: &Translations, doc: &mut Document) -> SubstitutionReport {
    let language = doc
        .lang()
        .filter(|code| !code.is_empty())
        .unwrap_or(Language::canonical().code())
        .to_string();

    let mut report = SubstitutionReport {
        language,
        ..SubstitutionReport::default()
    };

    let Some(dictionary) = translations.select(&report.language) else {
        // Nothing loaded yet
        for element in doc.elements() {
            if element.i18n_key().is_some() {
                report.untouched += 1;
            }
            if element.badge_category().is_some() {
                report.badges_untouched += 1;
            }
        }
        return report;
    };

    for element in doc.elements_mut() {
        if let Some(key) = element.i18n_key() {
            match dictionary.text(key) {
                Some(text) => {
                    element.set_text(text);
                    report.replaced += 1;
                }
                None => report.untouched += 1,
            }
        }

        if let Some(category) = element.badge_category() {
            match dictionary.category(category) {
                Some(label) => {
                    element.set_text(label);
                    report.badges_replaced += 1;
                }
                None => report.badges_untouched += 1,
            }
        }
    }

    debug!(
        "Applied '{}' translations: {} replaced, {} untouched, {} badges",
        report.language, report.replaced, report.untouched, report.badges_replaced
    );

    report
}
