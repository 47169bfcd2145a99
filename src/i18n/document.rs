//! In-memory view of the host page the localization manager writes into.
//!
//! The host renders elements and mirrors them here; the manager only reads
//! attributes and replaces text. Attribute names follow the page markup:
//!
//! - `data-i18n="title"` marks a translated element
//! - `class="category-badge" data-category="weather"` marks a category badge
//! - `data-lang` on the root holds the active language

use std::collections::BTreeMap;

/// Attribute holding an element's translation key.
pub const I18N_ATTR: &str = "data-i18n";

/// Attribute holding a badge's category identifier.
pub const CATEGORY_ATTR: &str = "data-category";

/// Class marking category badges.
pub const CATEGORY_BADGE_CLASS: &str = "category-badge";

/// Root attribute mirroring the active language.
pub const LANG_ATTR: &str = "data-lang";

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
}

impl Element {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Element tagged with a translation key.
    pub fn tagged(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(text).with_attr(I18N_ATTR, key)
    }

    /// Category badge for a category identifier.
    pub fn category_badge(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(text)
            .with_class(CATEGORY_BADGE_CLASS)
            .with_attr(CATEGORY_ATTR, category)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Translation key, if the element is tagged.
    pub fn i18n_key(&self) -> Option<&str> {
        self.attr(I18N_ATTR)
    }

    /// Category identifier, if the element is a category badge.
    ///
    /// Both the badge class and a non-empty identifier are required.
    pub fn badge_category(&self) -> Option<&str> {
        if !self.has_class(CATEGORY_BADGE_CLASS) {
            return None;
        }
        self.attr(CATEGORY_ATTR).filter(|id| !id.is_empty())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// The page: root attributes plus a flat list of elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root_attributes: BTreeMap<String, String>,
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Text of an element, or `""` for an unknown handle.
    pub fn text_of(&self, id: ElementId) -> &str {
        self.element(id).map(Element::text).unwrap_or_default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    pub fn root_attr(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    pub fn set_root_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.root_attributes.insert(name.into(), value.into());
    }

    /// Active language as mirrored on the root element.
    pub fn lang(&self) -> Option<&str> {
        self.root_attr(LANG_ATTR)
    }

    pub fn set_lang(&mut self, code: &str) {
        self.set_root_attr(LANG_ATTR, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_element() {
        let element = Element::tagged("title", "Loading");
        assert_eq!(element.i18n_key(), Some("title"));
        assert_eq!(element.badge_category(), None);
        assert_eq!(element.text(), "Loading");
    }

    #[test]
    fn test_category_badge() {
        let badge = Element::category_badge("weather", "weather");
        assert!(badge.has_class(CATEGORY_BADGE_CLASS));
        assert_eq!(badge.badge_category(), Some("weather"));
        assert_eq!(badge.i18n_key(), None);
    }

    #[test]
    fn test_category_attr_without_badge_class_is_not_a_badge() {
        let element = Element::new("x").with_attr(CATEGORY_ATTR, "weather");
        assert_eq!(element.badge_category(), None);
    }

    #[test]
    fn test_badge_with_empty_category_is_ignored() {
        let badge = Element::category_badge("", "label");
        assert_eq!(badge.badge_category(), None);
    }

    #[test]
    fn test_with_class_does_not_duplicate() {
        let element = Element::new("").with_class("a").with_class("a");
        assert_eq!(element.classes, vec!["a".to_string()]);
    }

    #[test]
    fn test_document_push_and_lookup() {
        let mut doc = Document::new();
        let first = doc.push(Element::tagged("title", "one"));
        let second = doc.push(Element::new("two"));

        assert_ne!(first, second);
        assert_eq!(doc.text_of(first), "one");
        assert_eq!(doc.text_of(second), "two");
        assert_eq!(doc.elements().len(), 2);
    }

    #[test]
    fn test_document_set_text_through_handle() {
        let mut doc = Document::new();
        let id = doc.push(Element::tagged("title", "old"));
        doc.element_mut(id).unwrap().set_text("new");
        assert_eq!(doc.text_of(id), "new");
    }

    #[test]
    fn test_document_lang_attribute() {
        let mut doc = Document::new();
        assert_eq!(doc.lang(), None);

        doc.set_lang("pl");
        assert_eq!(doc.lang(), Some("pl"));
        assert_eq!(doc.root_attr(LANG_ATTR), Some("pl"));
    }
}
