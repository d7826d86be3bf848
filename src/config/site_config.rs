//! Settings bound to a site directory

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SiteSettings,
};
use crate::i18n::Language;
use crate::prefs::{
    FilePreferences,
    LANGUAGE_KEY,
    PreferenceError,
    PreferenceStore,
};

/// Name of the optional settings file in the site root.
pub const CONFIG_FILE_NAME: &str = ".krushi-site.json";

/// Validated [`SiteSettings`] of one site directory.
///
/// Every path in the settings is relative to [`SiteConfig::root`].
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site directory holding the assets and the settings file.
    root: PathBuf,
    /// Settings after file loading and command line overrides.
    settings: SiteSettings,
}

impl SiteConfig {
    /// Reads `.krushi-site.json` from `root`; a missing file means defaults.
    ///
    /// # Errors
    /// - The file exists but cannot be read or parsed
    /// - The settings fail validation
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        let path = root.join(CONFIG_FILE_NAME);

        let settings = match std::fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "Loaded site settings");
                serde_json::from_str(&content)?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                SiteSettings::default()
            }
            Err(e) => return Err(e.into()),
        };

        Self::new(root, settings)
    }

    /// Binds already parsed settings to `root`.
    ///
    /// # Errors
    /// The settings fail validation.
    pub fn new(root: impl Into<PathBuf>, settings: SiteSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        Ok(Self { root: root.into(), settings })
    }

    /// Replaces `outputDir`, keeping the previous value if the new one is invalid.
    ///
    /// # Errors
    /// `output_dir` is empty.
    pub fn set_output_dir(&mut self, output_dir: impl Into<String>) -> Result<(), ConfigError> {
        let settings = SiteSettings { output_dir: output_dir.into(), ..self.settings.clone() };
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.settings = settings;
        Ok(())
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Site directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `relative` joined onto the site root.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Directory the build writes into.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.settings.output_dir)
    }

    /// The persisted preferences of this site.
    ///
    /// # Errors
    /// The preference file exists but is unreadable.
    pub fn open_preferences(&self) -> Result<FilePreferences, PreferenceError> {
        FilePreferences::open(self.resolve(&self.settings.preferences_file))
    }

    /// Language to render in: `requested`, else the saved preference, else
    /// `defaultLanguage`. Unknown saved values are ignored.
    #[must_use]
    pub fn language(&self, requested: Option<Language>, prefs: &impl PreferenceStore) -> Language {
        requested
            .or_else(|| prefs.get(LANGUAGE_KEY).and_then(|saved| saved.parse().ok()))
            .unwrap_or(self.settings.default_language)
    }
}
