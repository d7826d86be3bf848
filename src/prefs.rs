//! Persisted user preferences
//!
//! The only value written back by the site is the language flag, stored under
//! [`LANGUAGE_KEY`]. The file format is a flat JSON object of strings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::i18n::Language;

/// Key holding the selected display language.
pub const LANGUAGE_KEY: &str = "language";

/// Failure to read or write the preference file.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// File system failure.
    #[error("Failed to access preference file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON object of strings.
    #[error("Failed to parse preference file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key/value store that survives between page views.
pub trait PreferenceStore {
    /// Saved value of `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// The value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept only for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    /// Saved values by key.
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding only `language` as the saved display language.
    #[must_use]
    pub fn with_language(language: Language) -> Self {
        Self { values: BTreeMap::from([(LANGUAGE_KEY.to_string(), language.as_str().to_string())]) }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a JSON object in a file.
///
/// The file is read once on [`FilePreferences::open`] and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    /// Location of the JSON file.
    path: PathBuf,
    /// Values read on open, updated on every `set`.
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Opens the preference file, treating a missing file as empty.
    ///
    /// # Errors
    /// - The file exists but cannot be read
    /// - The file is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "Preference file not found, starting empty");
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Rewrites the whole file from `values`.
    fn persist(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn file_preferences_round_trip_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state/preferences.json");

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.set(LANGUAGE_KEY, "english").unwrap();

        let reopened = FilePreferences::open(&path).unwrap();
        assert_that!(reopened.get(LANGUAGE_KEY), some(eq("english")));
    }

    #[rstest]
    #[case::marathi(Language::Marathi, "marathi")]
    #[case::english(Language::English, "english")]
    fn memory_preferences_with_language(#[case] language: Language, #[case] expected: &str) {
        let prefs = MemoryPreferences::with_language(language);

        assert_that!(prefs.get(LANGUAGE_KEY), some(eq(expected)));
    }

    #[rstest]
    fn file_preferences_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let prefs = FilePreferences::open(temp_dir.path().join("none.json")).unwrap();

        assert_that!(prefs.get(LANGUAGE_KEY), none());
    }

    #[rstest]
    fn file_preferences_invalid_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FilePreferences::open(&path);

        assert!(matches!(result, Err(PreferenceError::Parse(_))));
    }
}
