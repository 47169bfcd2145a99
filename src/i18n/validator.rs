//! Dictionary consistency checks.
//!
//! Every language is compared against the canonical one. Problems are only
//! reported; a dictionary with gaps still works because missing keys leave
//! the page text untouched.

use crate::i18n::{Entry, Language, TranslationDictionary, Translations};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a set of dictionaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys the canonical language has but a translation lacks
    pub errors: Vec<String>,

    /// Non-critical issues (extra keys, empty values, markup)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DictionaryValidator;

static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Validate all loaded languages against the canonical language.
    pub fn validate(translations: &Translations) -> ValidationReport {
        let mut report = ValidationReport::new();
        let canonical = Language::canonical().code();

        let Some(reference) = translations.get(canonical) else {
            report
                .errors
                .push(format!("Canonical language '{}' has no dictionary", canonical));
            return report;
        };

        for code in translations.codes() {
            let Some(dictionary) = translations.get(code) else {
                continue;
            };

            Self::check_values(code, dictionary, &mut report);
            if code != canonical {
                Self::compare_keys(canonical, reference, code, dictionary, &mut report);
            }
        }

        report
    }

    /// Report keys missing from (errors) or extra in (warnings) a translation.
    fn compare_keys(
        canonical: &str,
        reference: &TranslationDictionary,
        code: &str,
        dictionary: &TranslationDictionary,
        report: &mut ValidationReport,
    ) {
        let expected: BTreeSet<&str> = reference.keys().collect();
        let actual: BTreeSet<&str> = dictionary.keys().collect();

        for key in expected.difference(&actual) {
            report
                .errors
                .push(format!("'{}' is missing key '{}' (present in '{}')", code, key, canonical));
        }
        for key in actual.difference(&expected) {
            report
                .warnings
                .push(format!("'{}' has key '{}' not present in '{}'", code, key, canonical));
        }

        if reference.has_category_table() != dictionary.has_category_table() {
            report.warnings.push(format!(
                "'{}' and '{}' disagree on whether 'categories' is a label table",
                code, canonical
            ));
        }
    }

    /// Report empty values and values containing markup.
    fn check_values(code: &str, dictionary: &TranslationDictionary, report: &mut ValidationReport) {
        let mut entries: Vec<(&str, &Entry)> = dictionary.iter().collect();
        entries.sort_unstable_by_key(|(key, _)| *key);

        for (key, entry) in entries {
            match entry {
                Entry::Text(text) => Self::check_text(code, key, text, report),
                Entry::Table(table) => {
                    for (id, label) in table {
                        Self::check_text(code, &format!("{}.{}", key, id), label, report);
                    }
                }
            }
        }
    }

    fn check_text(code: &str, key: &str, text: &str, report: &mut ValidationReport) {
        if text.trim().is_empty() {
            report
                .warnings
                .push(format!("'{}' key '{}' has an empty value", code, key));
        } else if Self::contains_markup(text) {
            report.warnings.push(format!(
                "'{}' key '{}' contains markup that will be shown as plain text",
                code, key
            ));
        }
    }

    fn contains_markup(text: &str) -> bool {
        let regex = MARKUP_REGEX
            .get_or_init(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9-]*(\s[^<>]*)?/?>").unwrap());
        regex.is_match(text)
    }
}
