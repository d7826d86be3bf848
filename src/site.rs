//! Static build of the whole site

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::assets::FsAssets;
use crate::config::{
    ConfigError,
    SiteConfig,
};
use crate::i18n::Language;
use crate::page::{
    Page,
    PageKind,
};
use crate::prefs::{
    FilePreferences,
    MemoryPreferences,
    PreferenceError,
};

/// Failure of a command line action.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Invalid or unreadable settings.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unreadable or unwritable preference file.
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    /// An output file or directory could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Output {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Files written by [`SiteBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Language the pages were rendered in.
    pub language: Language,
    /// Written pages, in build order.
    pub pages: Vec<PathBuf>,
    /// Number of static files copied.
    pub copied_files: usize,
}

/// Renders every page of a site directory into its output directory.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    /// Settings of the site being built.
    config: SiteConfig,
}

impl SiteBuilder {
    /// Builder for the site described by `config`.
    #[must_use]
    pub const fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Settings of the site.
    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The site's persisted preferences.
    ///
    /// # Errors
    /// The preference file exists but is unreadable.
    pub fn open_preferences(&self) -> Result<FilePreferences, SiteError> {
        Ok(self.config.open_preferences()?)
    }

    /// Asset files under the site root.
    fn assets(&self) -> FsAssets {
        FsAssets::new(self.config.root())
    }

    /// Opens one page the way a visitor would, with the persisted preferences.
    ///
    /// # Errors
    /// The preference file exists but is unreadable.
    pub async fn open_page(
        &self,
        kind: PageKind,
        query: &str,
    ) -> Result<Page<FsAssets, FilePreferences>, SiteError> {
        let prefs = self.open_preferences()?;
        Ok(Page::open(kind, query, self.assets(), prefs, self.config.settings()).await)
    }

    /// Writes the home page, the crop list and one page per crop.
    ///
    /// `language` overrides the persisted preference for this build only; the
    /// preference file is never written.
    ///
    /// # Errors
    /// - The preference file is unreadable
    /// - An output file or directory cannot be written
    pub async fn build(&self, language: Option<Language>) -> Result<BuildReport, SiteError> {
        let settings = self.config.settings();
        let out_dir = self.config.output_dir();
        let language = match language {
            Some(language) => language,
            None => self.config.language(None, &self.open_preferences()?),
        };
        tracing::info!(language = %language, out_dir = %out_dir.display(), "Building site");

        create_dir(&out_dir)?;
        let mut pages = Vec::new();

        let home = self.render(PageKind::Home, "", language).await;
        pages.push(write_page(&out_dir, "index.html", &home.to_html())?);

        let crops = self.render(PageKind::Crops, "", language).await;
        pages.push(write_page(&out_dir, "crops.html", &crops.to_html())?);

        for crop in crops.catalog().crops() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("crop", &crop.id)
                .finish();
            let details = self.render(PageKind::CropDetails, &query, language).await;
            let file_name = settings.detail_page_template.replace("{id}", &crop.id);
            pages.push(write_page(&out_dir, &file_name, &details.to_html())?);
        }

        let mut copied_files = 0;
        for dir in &settings.static_dirs {
            let source = self.config.resolve(dir);
            if source.is_dir() {
                copied_files += copy_dir(&source, &out_dir.join(dir))?;
            } else {
                tracing::debug!(dir = %source.display(), "Static directory not found");
            }
        }

        tracing::info!(pages = pages.len(), copied_files, "Site built");
        Ok(BuildReport { language, pages, copied_files })
    }

    /// Renders one page in `language` without touching the saved preference.
    async fn render(
        &self,
        kind: PageKind,
        query: &str,
        language: Language,
    ) -> Page<FsAssets, MemoryPreferences> {
        let prefs = MemoryPreferences::with_language(language);
        Page::open(kind, query, self.assets(), prefs, self.config.settings()).await
    }
}

/// `create_dir_all` reporting the directory on failure.
fn create_dir(path: &Path) -> Result<(), SiteError> {
    std::fs::create_dir_all(path)
        .map_err(|source| SiteError::Output { path: path.to_path_buf(), source })
}

/// Writes `html` to `out_dir/file_name`, creating parent directories.
fn write_page(out_dir: &Path, file_name: &str, html: &str) -> Result<PathBuf, SiteError> {
    let path = out_dir.join(file_name);
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    std::fs::write(&path, html).map_err(|source| SiteError::Output { path: path.clone(), source })?;
    tracing::debug!(path = %path.display(), "Wrote page");
    Ok(path)
}

/// Copies `source` into `target` recursively; returns the number of files copied.
fn copy_dir(source: &Path, target: &Path) -> Result<usize, SiteError> {
    let read_err = |source_err| SiteError::Output { path: source.to_path_buf(), source: source_err };

    create_dir(target)?;
    let mut copied = 0;
    for entry in std::fs::read_dir(source).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if from.is_dir() {
            copied += copy_dir(&from, &to)?;
        } else {
            std::fs::copy(&from, &to)
                .map_err(|source| SiteError::Output { path: to.clone(), source })?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn copy_dir_copies_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("assets");
        fs::create_dir_all(source.join("images/diseases/wheat")).unwrap();
        fs::write(source.join("info.txt"), "SHOP_NAME=x").unwrap();
        fs::write(source.join("images/diseases/wheat/leaf_rust.jpg"), [0_u8; 4]).unwrap();

        let copied = copy_dir(&source, &temp_dir.path().join("dist/assets")).unwrap();

        assert_that!(copied, eq(2));
        assert!(temp_dir.path().join("dist/assets/images/diseases/wheat/leaf_rust.jpg").exists());
    }

    #[rstest]
    fn write_page_reports_unwritable_target() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("dist");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_page(&blocker, "index.html", "<html></html>");

        assert!(matches!(result, Err(SiteError::Output { .. })));
    }
}
