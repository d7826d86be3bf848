//! Command line interface

use std::io::Write;
use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};

use crate::config::SiteConfig;
use crate::i18n::Language;
use crate::page::PageKind;
use crate::site::{
    SiteBuilder,
    SiteError,
};

/// Command line of `krushi-site`.
#[derive(Debug, Parser)]
#[command(name = "krushi-site", version, about = "Bilingual agricultural shop site renderer")]
pub struct Cli {
    /// Site directory holding `.krushi-site.json` and the assets
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Actions of the command line.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every page into the output directory
    Build {
        /// Output directory (overrides `outputDir`)
        #[arg(long)]
        out: Option<String>,
        /// Build in this language instead of the saved preference
        #[arg(long, value_enum)]
        language: Option<Language>,
    },
    /// Render one page to stdout
    Render {
        /// Page to render
        #[arg(value_enum)]
        page: PageKind,
        /// Query string of the page, e.g. `crop=wheat`
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Toggle the saved display language
    SwitchLanguage,
    /// Print the saved display language
    ShowLanguage,
}

impl Cli {
    /// Runs the selected action against the site in `--root`.
    ///
    /// # Errors
    /// Configuration, preference or output failures.
    pub async fn run(self) -> Result<(), SiteError> {
        let mut config = SiteConfig::load(self.root)?;

        match self.command {
            Command::Build { out, language } => {
                if let Some(out) = out {
                    config.set_output_dir(out)?;
                }
                let report = SiteBuilder::new(config).build(language).await?;
                let mut stdout = std::io::stdout().lock();
                for page in &report.pages {
                    write_line(&mut stdout, &page.display().to_string())?;
                }
            }
            Command::Render { page, query } => {
                let page = SiteBuilder::new(config).open_page(page, &query).await?;
                write_line(&mut std::io::stdout().lock(), &page.to_html())?;
            }
            Command::SwitchLanguage => {
                let mut page = SiteBuilder::new(config).open_page(PageKind::Home, "").await?;
                let language = page.switch_language()?;
                write_line(&mut std::io::stdout().lock(), language.as_str())?;
            }
            Command::ShowLanguage => {
                let language = config.language(None, &config.open_preferences()?);
                write_line(&mut std::io::stdout().lock(), language.as_str())?;
            }
        }

        Ok(())
    }
}

/// Writes `line` and a newline to stdout.
fn write_line(out: &mut impl Write, line: &str) -> Result<(), SiteError> {
    writeln!(out, "{line}")
        .map_err(|source| SiteError::Output { path: PathBuf::from("<stdout>"), source })
}
