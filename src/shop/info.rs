//! Parsing of `info.txt`

use std::collections::HashMap;

use crate::i18n::Language;

/// Suffix of the English variant of a key (`SHOP_NAME_EN`).
const ENGLISH_SUFFIX: &str = "_EN";

/// Shop metadata parsed from `info.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopInfo {
    /// Values by key, trimmed.
    values: HashMap<String, String>,
}

impl ShopInfo {
    /// Parses line-oriented `KEY=value` text.
    ///
    /// Only the first `=` separates key from value. Keys and values are trimmed,
    /// lines without `=` or with an empty key are ignored, and a repeated key keeps
    /// its last value.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once('=')?;
                let key = key.trim();
                (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
            })
            .collect();

        Self { values }
    }

    /// Value of `key`; empty values count as missing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    /// Value of `key` for `language`: English prefers `KEY_EN`, then `KEY`.
    #[must_use]
    pub fn localized(&self, key: &str, language: Language) -> Option<&str> {
        match language {
            Language::English => {
                self.get(&format!("{key}{ENGLISH_SUFFIX}")).or_else(|| self.get(key))
            }
            Language::Marathi => self.get(key),
        }
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no key was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn parse_splits_on_first_equals_only() {
        let info = ShopInfo::parse("KEY=value\nOTHER=x=y");

        assert_that!(info.len(), eq(2));
        assert_that!(info.get("KEY"), some(eq("value")));
        assert_that!(info.get("OTHER"), some(eq("x=y")));
    }

    #[rstest]
    #[case::no_separator("just text")]
    #[case::empty_key("=value")]
    #[case::blank_line("   ")]
    fn parse_ignores_malformed_lines(#[case] line: &str) {
        let info = ShopInfo::parse(line);

        assert!(info.is_empty());
    }

    #[rstest]
    fn parse_trims_and_keeps_last_value() {
        let info = ShopInfo::parse("  PHONE = 98220 \r\nPHONE=12345\r\n");

        assert_that!(info.get("PHONE"), some(eq("12345")));
    }

    #[rstest]
    #[case::english_variant(Language::English, "TAGLINE", Some("Fresh advice"))]
    #[case::marathi_base(Language::Marathi, "TAGLINE", Some("ताजा सल्ला"))]
    #[case::english_falls_back(Language::English, "PHONE", Some("9822012345"))]
    #[case::missing(Language::English, "SERVICES", None)]
    fn localized_prefers_english_suffix(
        #[case] language: Language,
        #[case] key: &str,
        #[case] expected: Option<&str>,
    ) {
        let info = ShopInfo::parse("TAGLINE=ताजा सल्ला\nTAGLINE_EN=Fresh advice\nPHONE=9822012345");

        assert_eq!(info.localized(key, language), expected);
    }

    #[rstest]
    fn localized_treats_empty_english_as_missing() {
        let info = ShopInfo::parse("OWNER_NAME=राम\nOWNER_NAME_EN=");

        assert_that!(info.localized("OWNER_NAME", Language::English), some(eq("राम")));
    }
}
