//! Translation table loaded from `languages.json`

use std::collections::HashMap;

use serde_json::Value;

use super::Language;

/// Language → (key → display string). Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    /// Key → string map per language.
    entries: HashMap<Language, HashMap<String, String>>,
}

impl TranslationTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from the top-level `{ "<language>": { ... } }` object.
    ///
    /// Nested objects are flattened into dot-separated keys. Language ids other
    /// than `marathi`/`english` are skipped.
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        let mut entries = HashMap::new();

        if let Value::Object(languages) = json {
            for (id, value) in languages {
                match id.parse::<Language>() {
                    Ok(language) => {
                        entries.insert(language, flatten_json(value, ".", None));
                    }
                    Err(e) => tracing::warn!(language = %id, "Skipping translations: {e}"),
                }
            }
        } else {
            tracing::warn!("Translation file is not a JSON object");
        }

        Self { entries }
    }

    /// Adds `entries` for `language`, replacing existing keys.
    #[must_use]
    pub fn with_entries<I, K, V>(mut self, language: Language, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .entry(language)
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Looks up `key`; empty strings count as unmapped.
    #[must_use]
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.entries
            .get(&language)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Number of keys mapped for `language`.
    #[must_use]
    pub fn len(&self, language: Language) -> usize {
        self.entries.get(&language).map_or(0, HashMap::len)
    }

    /// Whether no language has any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }
}

/// Flatten nested JSON object into dot-separated key map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use krushi_site::i18n::flatten_json;
///
/// let json = json!({
///     "nav": {
///         "home": "मुख्यपृष्ठ",
///         "crops": "पिके"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("nav.home"), Some(&"मुख्यपृष्ठ".to_string()));
/// assert_eq!(flattened.get("nav.crops"), Some(&"पिके".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

/// Recursive step of [`flatten_json`].
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        // Arrays have no key form in the site's markup.
        Value::Array(_) | Value::Null => {}
        Value::Bool(_) | Value::Number(_) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}
