//! View fragments shared by the renderers

use crate::dom::{
    Document,
    Element,
    Node,
};
use crate::i18n::Localizer;

/// Fallback key of [`show_error`].
pub const DEFAULT_ERROR_KEY: &str = "error";

/// Font Awesome icon.
#[must_use]
pub fn icon(name: &str) -> Element {
    Element::new("i").class(&format!("fas {name}"))
}

/// A `<span>` tagged with `key` and holding its current translation.
#[must_use]
pub fn label(localizer: &Localizer, key: &str) -> Element {
    Element::new("span").key(key).child(localizer.translate(key))
}

/// `<img>` that hides itself when the file is missing.
#[must_use]
pub fn image(src: &str, alt: &str) -> Element {
    Element::new("img")
        .attr("src", src)
        .attr("alt", alt)
        .attr("loading", "lazy")
        .attr("onerror", "this.onerror=null; this.style.display='none';")
}

/// Spinner with the translated `loading` label.
#[must_use]
pub fn loading(localizer: &Localizer) -> Element {
    Element::new("div")
        .class("loading")
        .child(icon("fa-spinner fa-spin"))
        .child(" ")
        .child(label(localizer, "loading"))
}

/// Error notice showing the translation of `key`, tagged with `key` itself.
#[must_use]
pub fn error(localizer: &Localizer, key: Option<&str>) -> Element {
    let key = key.unwrap_or(DEFAULT_ERROR_KEY);
    Element::new("div")
        .class("error")
        .child(icon("fa-exclamation-triangle"))
        .child(" ")
        .child(label(localizer, key))
}

/// Replaces the contents of `#container_id` with the loading indicator.
pub fn show_loading(doc: &mut Document, container_id: &str, localizer: &Localizer) {
    fill(doc, container_id, vec![loading(localizer).into()]);
}

/// Replaces the contents of `#container_id` with an error notice.
pub fn show_error(doc: &mut Document, container_id: &str, localizer: &Localizer, key: Option<&str>) {
    fill(doc, container_id, vec![error(localizer, key).into()]);
}

/// Replaces the contents of `#container_id`; a missing container is ignored.
pub fn fill(doc: &mut Document, container_id: &str, nodes: Vec<Node>) {
    if let Some(container) = doc.by_id_mut(container_id) {
        container.set_children(nodes);
    } else {
        tracing::debug!(container_id, "Container not found");
    }
}

/// Badge colour of a crop season.
#[must_use]
pub fn season_color(season: &str) -> &'static str {
    match season {
        "kharif" => "#4caf50",
        "rabi" => "#ff9800",
        "summer" => "#f44336",
        _ => "#757575",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::i18n::{
        Language,
        TranslationTable,
    };

    fn localizer() -> Localizer {
        let table = TranslationTable::new()
            .with_entries(Language::English, [("loading", "Loading..."), ("error", "Error")]);
        Localizer::new(table, Language::English)
    }

    fn doc() -> Document {
        Document::new("t", Element::new("body").child(Element::new("div").id("grid").child("old")))
    }

    #[rstest]
    #[case::kharif("kharif", "#4caf50")]
    #[case::rabi("rabi", "#ff9800")]
    #[case::summer("summer", "#f44336")]
    #[case::unknown("zaid", "#757575")]
    fn season_color_by_season(#[case] season: &str, #[case] expected: &str) {
        assert_that!(season_color(season), eq(expected));
    }

    #[rstest]
    fn show_loading_replaces_container() {
        let mut doc = doc();

        show_loading(&mut doc, "grid", &localizer());

        assert_that!(doc.by_id("grid").unwrap().text_content(), eq(" Loading..."));
    }

    #[rstest]
    fn show_error_defaults_to_error_key() {
        let mut doc = doc();

        show_error(&mut doc, "grid", &localizer(), None);

        assert_that!(doc.by_id("grid").unwrap().text_content(), eq(" Error"));
    }

    #[rstest]
    fn show_error_unmapped_key_shows_key() {
        let mut doc = doc();

        show_error(&mut doc, "grid", &localizer(), Some("Crop not found"));

        assert_that!(doc.by_id("grid").unwrap().text_content(), eq(" Crop not found"));
    }

    #[rstest]
    fn missing_container_is_ignored() {
        let mut doc = doc();
        let before = doc.clone();

        show_loading(&mut doc, "nowhere", &localizer());

        assert_that!(doc == before, eq(true));
    }
}
