//! In-memory message catalog keyed by locale and message identifier

use crate::error::{BargainError, Result};
use crate::types::{Language, Locale};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::format::{render, Arg};
use super::Localizer;

const BUILTIN_TABLES: [(Language, &str); 5] = [
    (Language::English, include_str!("../../locales/en.json")),
    (Language::Telugu, include_str!("../../locales/te.json")),
    (Language::Hindi, include_str!("../../locales/hi.json")),
    (Language::Punjabi, include_str!("../../locales/pa.json")),
    (Language::Bengali, include_str!("../../locales/bn.json")),
];

/// A catalog value: one template, or several interchangeable phrasings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Single(String),
    Choices(Vec<String>),
}

/// Messages for one locale
pub type LocaleTable = BTreeMap<String, Entry>;

/// Locale-keyed message tables with a default-locale fallback
#[derive(Clone, Debug)]
pub struct MessageCatalog {
    default_locale: Locale,
    tables: HashMap<Locale, LocaleTable>,
}

impl MessageCatalog {
    /// Create an empty catalog
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            tables: HashMap::new(),
        }
    }

    /// Catalog with every built-in language, English as default
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new(Language::English.locale());
        for (language, raw) in BUILTIN_TABLES {
            let table: LocaleTable = serde_json::from_str(raw).map_err(|e| {
                BargainError::Catalog(format!("built-in '{}' table: {}", language.code(), e))
            })?;
            catalog.insert_table(language.locale(), table);
        }
        Ok(catalog)
    }

    /// Parse a catalog document of the form `{"<locale>": {"<key>": ...}}`
    pub fn from_json(default_locale: Locale, json: &str) -> Result<Self> {
        let tables: HashMap<Locale, LocaleTable> = serde_json::from_str(json)?;
        Ok(Self {
            default_locale,
            tables,
        })
    }

    /// Load a catalog document from disk
    pub fn from_file(default_locale: Locale, path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(default_locale, &raw)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Locales with a table, sorted by code
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<&Locale> = self.tables.keys().collect();
        locales.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        locales
    }

    pub fn has_locale(&self, locale: &Locale) -> bool {
        self.tables.contains_key(locale)
    }

    /// Add or replace the entries of one locale
    pub fn insert_table(&mut self, locale: Locale, table: LocaleTable) {
        self.tables.entry(locale).or_default().extend(table);
    }

    /// Overlay another catalog; its entries win on conflicts
    pub fn merge(&mut self, other: MessageCatalog) {
        for (locale, table) in other.tables {
            self.insert_table(locale, table);
        }
    }

    fn entry(&self, key: &str, locale: &Locale) -> Option<&Entry> {
        let table = match self.tables.get(locale) {
            Some(table) => table,
            None => {
                tracing::debug!(
                    "No message table for locale '{}', using '{}'",
                    locale,
                    self.default_locale
                );
                self.tables.get(&self.default_locale)?
            }
        };
        table.get(key)
    }
}

impl Localizer for MessageCatalog {
    fn lookup(&self, key: &str, locale: &Locale, args: &[Arg]) -> String {
        match self.entry(key, locale) {
            Some(Entry::Single(template)) => render(template, args),
            Some(Entry::Choices(choices)) => match choices.first() {
                Some(template) => render(template, args),
                None => key.to_string(),
            },
            None => key.to_string(),
        }
    }

    fn lookup_choices(&self, key: &str, locale: &Locale) -> Vec<String> {
        match self.entry(key, locale) {
            Some(Entry::Choices(choices)) if !choices.is_empty() => choices.clone(),
            Some(Entry::Single(template)) => vec![template.clone()],
            _ => vec![key.to_string()],
        }
    }

    fn supports_locale(&self, locale: &Locale) -> bool {
        self.has_locale(locale)
    }
}
