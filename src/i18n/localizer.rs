//! Active language, lookup and document relabeling

use tokio::sync::broadcast;

use super::{
    Language,
    TranslationTable,
};
use crate::assets::AssetSource;
use crate::dom::{
    Document,
    Element,
    Node,
    TEXT_ONLY_ATTR,
    TRANSLATION_KEY_ATTR,
};
use crate::prefs::{
    LANGUAGE_KEY,
    PreferenceError,
    PreferenceStore,
};

/// Class of the button that toggles the language.
const LANG_TOGGLE_CLASS: &str = "lang-toggle";

/// Sent once per explicit language toggle, after the document is relabeled and
/// the preference persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChanged {
    /// Language now active.
    pub language: Language,
}

/// Translation lookup bound to the active language.
///
/// Renderers receive a `&Localizer` and resolve keys while building their
/// views; [`Localizer::apply_language`] relabels a whole document afterwards.
#[derive(Debug)]
pub struct Localizer {
    /// Strings for both languages.
    table: TranslationTable,
    /// Active language.
    current: Language,
    /// Notifies subscribers of explicit switches.
    events: broadcast::Sender<LanguageChanged>,
}

impl Localizer {
    /// Localizer over `table` with `current` active.
    #[must_use]
    pub fn new(table: TranslationTable, current: Language) -> Self {
        let (events, _) = broadcast::channel(16);
        Self { table, current, events }
    }

    /// Loads the translation table and restores the saved language.
    ///
    /// A load failure is logged and leaves an empty table with `default_language`
    /// active, so every lookup falls back to its key. A saved value other than
    /// `marathi`/`english` is ignored.
    pub async fn initialize<A, P>(
        assets: &A,
        translations_path: &str,
        prefs: &P,
        default_language: Language,
    ) -> Self
    where
        A: AssetSource,
        P: PreferenceStore,
    {
        let json = match assets.fetch_json::<serde_json::Value>(translations_path).await {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Error loading languages: {e}");
                return Self::new(TranslationTable::new(), default_language);
            }
        };

        let table = TranslationTable::from_json(&json);
        let current = prefs
            .get(LANGUAGE_KEY)
            .and_then(|saved| match saved.parse::<Language>() {
                Ok(language) => Some(language),
                Err(e) => {
                    tracing::warn!("Ignoring saved preference: {e}");
                    None
                }
            })
            .unwrap_or(default_language);

        tracing::debug!(language = %current, "Language initialized");
        Self::new(table, current)
    }

    /// Active language.
    #[must_use]
    pub const fn current_language(&self) -> Language {
        self.current
    }

    /// The loaded translations.
    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Display string for `key`, or `key` itself when unmapped.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(self.current, key).unwrap_or(key)
    }

    /// Picks between a Marathi and an English value by the active language.
    #[must_use]
    pub fn pick<'a>(&self, marathi: &'a str, english: &'a str) -> &'a str {
        match self.current {
            Language::Marathi => marathi,
            Language::English => english,
        }
    }

    /// Receiver of every later [`LanguageChanged`].
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    /// Flips the language, persists it, relabels `doc` and notifies subscribers.
    ///
    /// # Errors
    /// The preference could not be persisted. The language is switched and the
    /// document relabeled regardless; only the notification is skipped.
    pub fn switch_language<P>(
        &mut self,
        prefs: &mut P,
        doc: &mut Document,
    ) -> Result<Language, PreferenceError>
    where
        P: PreferenceStore,
    {
        self.current = self.current.toggled();
        let persisted = prefs.set(LANGUAGE_KEY, self.current.as_str());
        self.apply_language(doc);
        persisted?;

        let event = LanguageChanged { language: self.current };
        if self.events.send(event).is_err() {
            tracing::debug!("No subscribers for languageChanged");
        }

        Ok(self.current)
    }

    /// Rewrites every element tagged with a translation key.
    ///
    /// Text-only elements get their first text child replaced; others lose all
    /// children to the translated text. Unmapped keys leave elements unchanged.
    /// Never emits [`LanguageChanged`].
    pub fn apply_language(&self, doc: &mut Document) {
        let mut relabeled = 0_usize;

        doc.body.visit_mut(&mut |element| {
            let Some(key) = element.get_attr(TRANSLATION_KEY_ATTR) else {
                return;
            };
            let Some(text) = self.table.get(self.current, key) else {
                return;
            };

            if element.has_attr(TEXT_ONLY_ATTR) {
                if let Some(first) = element.first_text_mut() {
                    text.clone_into(first);
                }
            } else {
                element.set_text(text);
            }
            relabeled += 1;
        });

        if let Some(button) = doc.by_class_mut(LANG_TOGGLE_CLASS) {
            button.set_children(toggle_label(self.current));
        }
        doc.lang = self.current.html_lang().to_string();

        tracing::debug!(language = %self.current, relabeled, "Applied language");
    }
}

/// The toggle offers the language that is not active.
fn toggle_label(current: Language) -> Vec<Node> {
    vec![
        Element::new("i").class("fas fa-language").into(),
        format!(" {}", current.toggled().native_name()).into(),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{
        fixture,
        rstest,
    };
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::assets::MemoryAssets;
    use crate::prefs::MemoryPreferences;

    const TRANSLATIONS: &str = r#"{
        "marathi": { "season": "हंगाम", "days": "दिवस", "loading": "लोड होत आहे..." },
        "english": { "season": "Season", "days": "Days", "loading": "Loading..." }
    }"#;

    #[fixture]
    fn table() -> TranslationTable {
        TranslationTable::from_json(&serde_json::from_str(TRANSLATIONS).unwrap())
    }

    fn page() -> Document {
        Document::new(
            "t",
            Element::new("body")
                .child(Element::new("button").class("lang-toggle").child("English"))
                .child(Element::new("h2").key("season").child("हंगाम"))
                .child(
                    Element::new("a")
                        .key("days")
                        .attr(TEXT_ONLY_ATTR, "")
                        .child("दिवस")
                        .child(Element::new("i").class("fas fa-clock")),
                )
                .child(Element::new("p").key("unmapped").child("untouched")),
        )
    }

    #[rstest]
    #[case::marathi(Language::Marathi)]
    #[case::english(Language::English)]
    fn translate_falls_back_to_key(table: TranslationTable, #[case] language: Language) {
        let localizer = Localizer::new(table, language);

        assert_that!(localizer.translate("noSuchKey"), eq("noSuchKey"));
    }

    #[rstest]
    fn translate_uses_active_language(table: TranslationTable) {
        let localizer = Localizer::new(table, Language::English);

        assert_that!(localizer.translate("season"), eq("Season"));
    }

    #[tokio::test]
    async fn initialize_restores_saved_language() {
        let assets = MemoryAssets::new().with_file("assets/data/languages.json", TRANSLATIONS);
        let mut prefs = MemoryPreferences::new();
        prefs.set(LANGUAGE_KEY, "english").unwrap();

        let localizer =
            Localizer::initialize(&assets, "assets/data/languages.json", &prefs, Language::Marathi)
                .await;

        assert_that!(localizer.current_language(), eq(Language::English));
        assert_that!(localizer.translate("days"), eq("Days"));
    }

    #[tokio::test]
    async fn initialize_ignores_invalid_saved_language() {
        let assets = MemoryAssets::new().with_file("assets/data/languages.json", TRANSLATIONS);
        let mut prefs = MemoryPreferences::new();
        prefs.set(LANGUAGE_KEY, "klingon").unwrap();

        let localizer =
            Localizer::initialize(&assets, "assets/data/languages.json", &prefs, Language::Marathi)
                .await;

        assert_that!(localizer.current_language(), eq(Language::Marathi));
    }

    #[tokio::test]
    async fn initialize_without_table_falls_back_to_keys() {
        let assets = MemoryAssets::new();
        let prefs = MemoryPreferences::new();

        let localizer =
            Localizer::initialize(&assets, "assets/data/languages.json", &prefs, Language::Marathi)
                .await;

        assert!(localizer.table().is_empty());
        assert_that!(localizer.translate("season"), eq("season"));
    }

    #[rstest]
    fn apply_language_relabels_tagged_elements(table: TranslationTable) {
        let localizer = Localizer::new(table, Language::English);
        let mut doc = page();

        localizer.apply_language(&mut doc);

        assert_that!(doc.by_class("lang-toggle").unwrap().text_content(), eq(" मराठी"));
        let texts: Vec<_> = doc.translatable().iter().map(|e| e.text_content()).collect();
        assert_eq!(texts, vec!["Season", "Days", "untouched"]);
        assert_that!(doc.lang, eq("en"));
    }

    #[rstest]
    fn apply_language_text_only_keeps_children(table: TranslationTable) {
        let localizer = Localizer::new(table, Language::English);
        let mut doc = page();

        localizer.apply_language(&mut doc);

        let days = doc.body.find(&|e| e.get_attr(TRANSLATION_KEY_ATTR) == Some("days")).unwrap();
        assert_that!(days.child_nodes().len(), eq(2));
    }

    #[rstest]
    fn apply_language_never_notifies(table: TranslationTable) {
        let localizer = Localizer::new(table, Language::English);
        let mut rx = localizer.subscribe();
        let mut doc = page();

        localizer.apply_language(&mut doc);
        localizer.apply_language(&mut doc);

        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[rstest]
    fn switch_language_notifies_exactly_once(table: TranslationTable) {
        let mut localizer = Localizer::new(table, Language::Marathi);
        let mut rx = localizer.subscribe();
        let mut prefs = MemoryPreferences::new();
        let mut doc = page();

        let language = localizer.switch_language(&mut prefs, &mut doc).unwrap();

        assert_that!(language, eq(Language::English));
        assert_eq!(rx.try_recv(), Ok(LanguageChanged { language: Language::English }));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert_that!(doc.by_class("lang-toggle").unwrap().text_content(), eq(" मराठी"));
    }

    #[rstest]
    fn switch_language_twice_restores_and_persists(table: TranslationTable) {
        let mut localizer = Localizer::new(table, Language::Marathi);
        let mut prefs = MemoryPreferences::new();
        let mut doc = page();

        localizer.switch_language(&mut prefs, &mut doc).unwrap();
        localizer.switch_language(&mut prefs, &mut doc).unwrap();

        assert_that!(localizer.current_language(), eq(Language::Marathi));
        assert_that!(prefs.get(LANGUAGE_KEY), some(eq("marathi")));
        assert_that!(doc.by_class("lang-toggle").unwrap().text_content(), eq(" English"));
    }
}
