//! Settings file schema and its errors

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::i18n::Language;

/// A rejected settings field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "cropsFile")
    pub field_path: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failure to load the site settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Every rejected field.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file exists but cannot be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`SiteSettings`].
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Site configuration read from `.krushi-site.json`.
///
/// Asset paths are relative to the site root, the way the pages reference them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// `KEY=value` shop metadata.
    pub shop_info_file: String,
    /// Crop catalog.
    pub crops_file: String,
    /// UI strings per language.
    pub translations_file: String,

    /// Where the language preference is persisted.
    pub preferences_file: String,
    /// Where the build writes the pages.
    pub output_dir: String,

    /// Used when no valid preference is saved.
    pub default_language: Language,

    /// Root of the per-crop disease gallery images.
    pub disease_image_dir: String,
    /// Stylesheet linked from every page.
    pub stylesheet: Option<String>,

    /// File name of a built crop page; `{id}` is replaced by the crop id.
    pub detail_page_template: String,
    /// Directories copied verbatim into the output.
    pub static_dirs: Vec<String>,
}

impl SiteSettings {
    /// # Errors
    /// - Required path is empty
    /// - Data file is not JSON
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let required = [
            ("shopInfoFile", &self.shop_info_file),
            ("cropsFile", &self.crops_file),
            ("translationsFile", &self.translations_file),
            ("preferencesFile", &self.preferences_file),
            ("outputDir", &self.output_dir),
            ("diseaseImageDir", &self.disease_image_dir),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(
                    field,
                    "The path cannot be empty. Remove the field to use the default",
                ));
            }
        }

        for (field, value) in [("cropsFile", &self.crops_file), ("translationsFile", &self.translations_file)] {
            if !value.trim().is_empty() && !value.ends_with(".json") {
                errors.push(ValidationError::new(
                    field,
                    format!("Expected a .json file, got '{value}'"),
                ));
            }
        }

        if !self.detail_page_template.contains("{id}") {
            errors.push(ValidationError::new(
                "detailPageTemplate",
                format!("The template must contain \"{{id}}\", got '{}'", self.detail_page_template),
            ));
        }

        for (index, dir) in self.static_dirs.iter().enumerate() {
            if dir.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("staticDirs[{index}]"),
                    "The directory cannot be empty",
                ));
            }
        }

        if let Some(stylesheet) = &self.stylesheet
            && stylesheet.is_empty()
        {
            errors.push(ValidationError::new(
                "stylesheet",
                "The stylesheet cannot be empty. Please specify a path, or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            shop_info_file: "assets/info.txt".to_string(),
            crops_file: "assets/data/crops.json".to_string(),
            translations_file: "assets/data/languages.json".to_string(),
            preferences_file: ".krushi-site/preferences.json".to_string(),
            output_dir: "dist".to_string(),
            default_language: Language::Marathi,
            disease_image_dir: "./assets/images/diseases".to_string(),
            stylesheet: Some("./css/style.css".to_string()),
            detail_page_template: "crop-details-{id}.html".to_string(),
            static_dirs: vec!["assets".to_string(), "css".to_string()],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = SiteSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"outputDir": "public", "defaultLanguage": "english"}"#;

        let settings: SiteSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.output_dir, eq("public"));
        assert_that!(settings.default_language, eq(Language::English));
        assert_that!(settings.crops_file, eq("assets/data/crops.json"));
    }

    #[rstest]
    fn deserialize_rejects_unknown_language() {
        let json = r#"{"defaultLanguage": "hindi"}"#;

        let result = serde_json::from_str::<SiteSettings>(json);

        assert!(result.is_err());
    }

    #[rstest]
    fn validate_invalid_output_dir_empty() {
        let settings = SiteSettings { output_dir: String::new(), ..SiteSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("outputDir")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_crops_file_not_json() {
        let settings =
            SiteSettings { crops_file: "assets/data/crops.yaml".to_string(), ..SiteSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("cropsFile")),
                field!(ValidationError.message, contains_substring("crops.yaml"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_stylesheet_empty() {
        let settings = SiteSettings { stylesheet: Some(String::new()), ..SiteSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("stylesheet"))])
        );
    }

    #[rstest]
    fn validate_invalid_detail_page_template_without_id() {
        let settings = SiteSettings {
            detail_page_template: "crop.html".to_string(),
            static_dirs: vec!["assets".to_string(), " ".to_string()],
            ..SiteSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![
                field!(ValidationError.field_path, eq("detailPageTemplate")),
                field!(ValidationError.field_path, eq("staticDirs[1]"))
            ])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = SiteSettings {
            shop_info_file: String::new(),
            translations_file: "languages.txt".to_string(),
            ..SiteSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. shopInfoFile"));
        assert_that!(error_message, contains_substring("cannot be empty"));
        assert_that!(error_message, contains_substring("2. translationsFile"));
        assert_that!(error_message, contains_substring("Expected a .json file"));
    }
}
