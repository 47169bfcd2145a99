//! Translation dictionaries: the key -> display string tables per language.
//!
//! A dictionary file is a flat JSON object of strings. One nested object is
//! understood: `categories`, mapping a category identifier to its badge label.
//! Any other nested object is kept but never substituted into text.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Key of the nested category-label table.
pub const CATEGORIES_KEY: &str = "categories";

/// A single dictionary value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Table(BTreeMap<String, String>),
}

/// Key -> display string mapping for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationDictionary {
    entries: HashMap<String, Entry>,
}

impl TranslationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Display string for `key`.
    ///
    /// Returns `None` when the key is missing, holds a nested table, or holds
    /// an empty string; callers leave the element untouched in all three cases.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Entry::Text(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Badge label for a category identifier from the `categories` table.
    ///
    /// A plain string stored under `categories` is an ordinary entry, not a
    /// table, and yields `None`.
    pub fn category(&self, id: &str) -> Option<&str> {
        match self.entries.get(CATEGORIES_KEY) {
            Some(Entry::Table(table)) => table
                .get(id)
                .map(String::as_str)
                .filter(|label| !label.is_empty()),
            _ => None,
        }
    }

    pub fn has_category_table(&self) -> bool {
        matches!(self.entries.get(CATEGORIES_KEY), Some(Entry::Table(_)))
    }

    pub fn insert_text(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), Entry::Text(text.into()));
    }

    pub fn insert_category(&mut self, id: impl Into<String>, label: impl Into<String>) {
        let (id, label) = (id.into(), label.into());

        match self.entries.get_mut(CATEGORIES_KEY) {
            Some(Entry::Table(table)) => {
                table.insert(id, label);
            }
            _ => {
                // A plain heading string under `categories` is replaced
                let table = BTreeMap::from([(id, label)]);
                self.entries
                    .insert(CATEGORIES_KEY.to_string(), Entry::Table(table));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys holding plain strings, sorted.
    pub fn text_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Text(_)))
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dictionaries for every loaded language, keyed by language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    languages: HashMap<String, TranslationDictionary>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty dictionary for each enabled language.
    pub fn empty_for_enabled() -> Self {
        Language::enabled()
            .into_iter()
            .map(|language| (language.code().to_string(), TranslationDictionary::new()))
            .collect()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn get(&self, code: &str) -> Option<&TranslationDictionary> {
        self.languages.get(code)
    }

    pub fn insert(&mut self, code: impl Into<String>, dictionary: TranslationDictionary) {
        self.languages.insert(code.into(), dictionary);
    }

    /// Dictionary used for `code`: the language's own, or the canonical
    /// language's when `code` has none.
    pub fn select(&self, code: &str) -> Option<&TranslationDictionary> {
        self.get(code)
            .or_else(|| self.get(Language::canonical().code()))
    }

    /// Loaded language codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl FromIterator<(String, TranslationDictionary)> for Translations {
    fn from_iter<I: IntoIterator<Item = (String, TranslationDictionary)>>(iter: I) -> Self {
        Self {
            languages: iter.into_iter().collect(),
        }
    }
}
