//! Page context
//!
//! A [`Page`] owns everything one page view needs: the document, the language
//! module and the per-module caches. Renderers receive these explicitly; the
//! only cross-module link is the [`LanguageChanged`] channel, drained by
//! [`Page::dispatch_pending_events`].

mod layout;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::assets::AssetSource;
use crate::config::SiteSettings;
use crate::crops::CropCatalog;
use crate::dom::Document;
use crate::i18n::{
    Language,
    LanguageChanged,
    Localizer,
};
use crate::prefs::{
    PreferenceError,
    PreferenceStore,
};
use crate::shop::{
    ShopInfo,
    ShopInfoModule,
    tel_link,
    whatsapp_link,
};

/// The pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PageKind {
    /// `index.html`: shop introduction.
    Home,
    /// `crops.html`: crop grid.
    Crops,
    /// One crop, selected by the `crop` query parameter.
    CropDetails,
}

impl PageKind {
    /// Identifier used on the command line and in `data-page`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Crops => "crops",
            Self::CropDetails => "crop-details",
        }
    }

    /// Translation key of the initial document title.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Home => "siteTitle",
            Self::Crops => "cropsTitle",
            Self::CropDetails => "cropDetailsTitle",
        }
    }
}

/// One page view.
#[derive(Debug)]
pub struct Page<A, P> {
    /// Which page this is.
    kind: PageKind,
    /// Where the page reads its data.
    assets: A,
    /// Where the language choice is saved.
    prefs: P,
    /// Active language and translations.
    localizer: Localizer,
    /// Shop metadata and its slots.
    shop: ShopInfoModule,
    /// Crop data and views.
    catalog: CropCatalog,
    /// The rendered page.
    doc: Document,
    /// Pending language switches to dispatch.
    events: broadcast::Receiver<LanguageChanged>,
}

impl<A, P> Page<A, P>
where
    A: AssetSource,
    P: PreferenceStore,
{
    /// Loads and renders `kind`.
    ///
    /// `query` is the page's query string; only the crop detail page reads it.
    pub async fn open(kind: PageKind, query: &str, assets: A, prefs: P, settings: &SiteSettings) -> Self {
        let localizer = Localizer::initialize(
            &assets,
            &settings.translations_file,
            &prefs,
            settings.default_language,
        )
        .await;

        let mut doc = layout::skeleton(kind, &localizer, settings.stylesheet.as_deref());
        localizer.apply_language(&mut doc);

        let events = localizer.subscribe();
        let mut page = Self {
            kind,
            assets,
            prefs,
            localizer,
            shop: ShopInfoModule::new(settings.shop_info_file.as_str()),
            catalog: CropCatalog::new(settings.crops_file.as_str(), settings.disease_image_dir.as_str())
                .with_detail_link(settings.detail_page_template.as_str()),
            doc,
            events,
        };
        page.run_scripts(query).await;
        page
    }

    async fn run_scripts(&mut self, query: &str) {
        self.shop.populate_shop_info(&self.assets, &self.localizer, &mut self.doc).await;
        self.update_contact_links();

        match self.kind {
            PageKind::Home => {}
            PageKind::Crops => {
                self.catalog.render_crop_list(&self.assets, &self.localizer, &mut self.doc).await;
            }
            PageKind::CropDetails => {
                self.catalog
                    .render_crop_details(
                        &self.assets,
                        &self.localizer,
                        &mut self.doc,
                        query,
                        self.shop.info(),
                    )
                    .await;
            }
        }
    }

    /// Toggles the language and lets subscribers react.
    ///
    /// # Errors
    /// The new language could not be persisted.
    pub fn switch_language(&mut self) -> Result<Language, PreferenceError> {
        let language = self.localizer.switch_language(&mut self.prefs, &mut self.doc)?;
        self.dispatch_pending_events();
        Ok(language)
    }

    /// Delivers queued [`LanguageChanged`] notifications; returns how many were handled.
    pub fn dispatch_pending_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.shop.on_language_changed(event, &self.localizer, &mut self.doc);
                    self.update_contact_links();
                    self.update_title();
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped languageChanged notifications");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        handled
    }

    /// Retitles the document in the active language.
    fn update_title(&mut self) {
        self.doc.title = self
            .catalog
            .detail_title(&self.localizer, self.shop.info())
            .unwrap_or_else(|| self.localizer.translate(self.kind.title_key()).to_string());
    }

    /// Points the call and WhatsApp links at the shop's numbers.
    fn update_contact_links(&mut self) {
        let Some(info) = self.shop.info() else {
            return;
        };
        let language = self.localizer.current_language();

        if let (Some(link), Some(href)) = (self.doc.by_class_mut(layout::CALL_LINK_CLASS), tel_link(info)) {
            link.set_attr("href", href);
        }
        if let (Some(link), Some(url)) =
            (self.doc.by_class_mut(layout::WHATSAPP_LINK_CLASS), whatsapp_link(info, language))
        {
            link.set_attr("href", url.as_str());
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PageKind {
        self.kind
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub const fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    #[must_use]
    pub const fn prefs(&self) -> &P {
        &self.prefs
    }

    #[must_use]
    pub const fn shop_info(&self) -> Option<&ShopInfo> {
        self.shop.info()
    }

    #[must_use]
    pub const fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        self.doc.to_html()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::prefs::{
        LANGUAGE_KEY,
        MemoryPreferences,
    };
    use crate::test_utils::site_assets;

    async fn open(kind: PageKind, query: &str) -> Page<crate::assets::MemoryAssets, MemoryPreferences> {
        Page::open(kind, query, site_assets(), MemoryPreferences::new(), &SiteSettings::default())
            .await
    }

    #[tokio::test]
    async fn home_page_fills_shop_slots() {
        let page = open(PageKind::Home, "").await;

        let doc = page.document();
        assert_that!(doc.by_class("shop-name").unwrap().text_content(), eq("कृषी सेवा केंद्र"));
        assert_that!(doc.by_class("call-link").unwrap().get_attr("href"), some(eq("tel:+919822012345")));
        assert_that!(doc.title, eq("मुख्यपृष्ठ"));
    }

    #[tokio::test]
    async fn switch_language_rerenders_shop_info_once() {
        let mut page = open(PageKind::Home, "").await;

        let language = page.switch_language().unwrap();

        assert_that!(language, eq(Language::English));
        assert_that!(
            page.document().by_class("shop-name").unwrap().text_content(),
            eq("Krushi Seva Kendra")
        );
        assert_that!(page.prefs().get(LANGUAGE_KEY), some(eq("english")));
        assert_that!(page.dispatch_pending_events(), eq(0));
    }

    #[tokio::test]
    async fn switch_language_updates_whatsapp_greeting() {
        let mut page = open(PageKind::Home, "").await;
        let before = page.document().by_class("whatsapp-link").unwrap().get_attr("href").unwrap().to_string();

        page.switch_language().unwrap();

        let after = page.document().by_class("whatsapp-link").unwrap().get_attr("href").unwrap();
        assert!(after.starts_with("https://wa.me/919822012345?text="));
        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn crops_page_links_to_built_detail_pages() {
        let page = open(PageKind::Crops, "").await;

        let cards = page.document().body.find_all(&|e| e.has_class("crop-card"));
        assert_that!(cards.len(), eq(2));
        assert_that!(cards.first().unwrap().get_attr("href"), some(eq("crop-details-wheat.html")));
    }

    #[rstest]
    #[case::home(PageKind::Home, "", "Home")]
    #[case::crops(PageKind::Crops, "", "Crops")]
    #[case::crop_found(PageKind::CropDetails, "crop=wheat", "Wheat - कृषी सेवा केंद्र")]
    #[case::crop_missing(PageKind::CropDetails, "crop=mango", "Crop Details")]
    #[tokio::test]
    async fn switch_language_retitles_document(
        #[case] kind: PageKind,
        #[case] query: &str,
        #[case] expected: &str,
    ) {
        let mut page = open(kind, query).await;

        page.switch_language().unwrap();

        assert_that!(page.document().title, eq(expected));
        assert_that!(page.document().lang, eq("en"));
    }

    #[rstest]
    #[case::found("crop=wheat", "गहू - कृषी सेवा केंद्र")]
    #[case::missing("crop=mango", "पीक तपशील")]
    #[tokio::test]
    async fn crop_details_page_title(#[case] query: &str, #[case] expected: &str) {
        let page = open(PageKind::CropDetails, query).await;

        assert_that!(page.document().title, eq(expected));
    }
}
