//! Display languages of the site

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Display language of the site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// मराठी, the default.
    #[default]
    Marathi,
    /// English.
    English,
}

/// A language identifier other than `marathi` or `english`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language '{0}'. Expected \"marathi\" or \"english\"")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Identifier used in the translation table and the preference store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Marathi => "marathi",
            Self::English => "english",
        }
    }

    /// The other language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Marathi => Self::English,
            Self::English => Self::Marathi,
        }
    }

    /// Value for `<html lang>`.
    #[must_use]
    pub const fn html_lang(self) -> &'static str {
        match self {
            Self::Marathi => "mr",
            Self::English => "en",
        }
    }

    /// Name of the language written in itself; used on the toggle button.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Marathi => "मराठी",
            Self::English => "English",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marathi" => Ok(Self::Marathi),
            "english" => Ok(Self::English),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::marathi("marathi", Language::Marathi)]
    #[case::english("english", Language::English)]
    fn parse_known_languages(#[case] input: &str, #[case] expected: Language) {
        assert_that!(input.parse::<Language>(), ok(eq(&expected)));
    }

    #[rstest]
    #[case::capitalized("English")]
    #[case::code("mr")]
    #[case::empty("")]
    fn parse_rejects_other_values(#[case] input: &str) {
        assert!(input.parse::<Language>().is_err());
    }

    #[rstest]
    fn toggled_twice_is_identity() {
        for language in [Language::Marathi, Language::English] {
            assert_that!(language.toggled().toggled(), eq(language));
            assert_that!(language.toggled(), not(eq(language)));
        }
    }

    #[rstest]
    fn default_is_marathi() {
        assert_that!(Language::default(), eq(Language::Marathi));
    }
}
