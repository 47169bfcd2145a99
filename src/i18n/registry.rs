//! Language registry: the fixed table of languages the UI ships dictionaries for.
//!
//! The table is immutable configuration, initialized once with `OnceLock` and
//! shared read-only. Mutable localization state lives in
//! [`LocalizationManager`](crate::i18n::LocalizationManager), never here.

use std::sync::OnceLock;

/// Metadata for one supported UI language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code, also the dictionary file stem (e.g. "en" -> `en.json`)
    pub code: &'static str,

    /// English name of the language (e.g., "Polish")
    pub name: &'static str,

    /// Native name of the language, as shown in a language switcher (e.g., "Polski")
    pub native_name: &'static str,

    /// Whether this is the default language used when nothing else matches
    pub is_canonical: bool,

    /// Whether a dictionary is fetched for this language on load
    pub enabled: bool,
}

impl LanguageConfig {
    /// File name of this language's dictionary under the locales path.
    pub fn resource_file(&self) -> String {
        format!("{}.json", self.code)
    }
}

/// Registry of supported languages.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the shared registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by code. Matching is exact ("EN" is not "en").
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages a dictionary is loaded for, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// The default language.
    ///
    /// # Panics
    /// Panics unless exactly one language is marked canonical; the table is
    /// static, so this is a programming error caught by the tests below.
    pub fn canonical(&self) -> &LanguageConfig {
        let mut canonical = self.languages.iter().filter(|lang| lang.is_canonical);

        match (canonical.next(), canonical.next()) {
            (Some(lang), None) => lang,
            (None, _) => panic!("No canonical language found in registry"),
            (Some(_), Some(_)) => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// English (canonical) and Polish.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "pl",
            name: "Polish",
            native_name: "Polski",
            is_canonical: false,
            enabled: true,
        },
    ]
}
