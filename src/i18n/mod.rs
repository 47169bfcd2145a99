//! Internationalization (i18n) for the assistant UI.
//!
//! Dictionaries of key -> display string are fetched per language, applied to
//! the elements of a [`Document`] tagged with a translation key, and the
//! user's language choice is kept in a [`PreferenceStore`].
//!
//! # Architecture
//!
//! - `registry`: the supported languages and their metadata
//! - `language`: `Language`, a code validated against the registry
//! - `dictionary`: `TranslationDictionary` and `Translations` (serde models)
//! - `fallback`: dictionaries used when loading fails
//! - `loader`: concurrent HTTP fetch of the per-language JSON resources
//! - `storage`: durable language preference
//! - `document`: the host page as seen by the manager
//! - `manager`: `LocalizationManager`, the load / apply / switch operations
//! - `validator`: consistency checks across languages
//!
//! # Example
//!
//! ```rust,ignore
//! use chaysh_locales::{config::Config, i18n::{Document, Element, LocalizationManager}};
//!
//! let mut manager = LocalizationManager::from_config(&Config::from_env()?)?;
//! let mut doc = Document::new();
//! let title = doc.push(Element::tagged("title", ""));
//!
//! manager.load_translations(&mut doc).await;
//! manager.change_language("pl", &mut doc);
//! assert_eq!(doc.text_of(title), "Asystent Chaysh");
//! ```

mod dictionary;
mod document;
pub mod fallback;
mod language;
mod loader;
mod manager;
mod registry;
pub mod storage;
mod validator;

pub use dictionary::{Entry, TranslationDictionary, Translations, CATEGORIES_KEY};
pub use document::{
    Document, Element, ElementId, CATEGORY_ATTR, CATEGORY_BADGE_CLASS, I18N_ATTR, LANG_ATTR,
};
pub use language::Language;
pub use loader::{LoadError, LocaleLoader};
pub use manager::{apply_translations, LoadOutcome, LocalizationManager, SubstitutionReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use storage::{FileStore, MemoryStore, PreferenceStore, StorageError, LANGUAGE_KEY};
pub use validator::{DictionaryValidator, ValidationReport};
