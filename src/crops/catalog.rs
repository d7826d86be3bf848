//! Crop data loading and page rendering

use crate::assets::AssetSource;
use crate::crops::{
    Crop,
    CropsFile,
    crop_card,
    crop_details,
};
use crate::dom::{
    Document,
    Node,
};
use crate::i18n::Localizer;
use crate::shop::ShopInfo;
use crate::views::{
    fill,
    show_error,
    show_loading,
};

/// Container of the crop grid.
pub const CROP_GRID_ID: &str = "crop-grid";
/// Container of the detail view.
pub const CROP_DETAILS_ID: &str = "crop-details-container";
/// Detail link for crop `{id}`, resolved in the browser from the query string.
pub const DEFAULT_DETAIL_LINK: &str = "crop-details.html?crop={id}";

/// Translation key of the empty catalog notice.
const NO_CROPS_KEY: &str = "noCropsFound";
/// Shown when the query names no known crop.
const CROP_NOT_FOUND: &str = "Crop not found";
/// Title suffix when the shop name is unknown.
const FALLBACK_SITE_NAME: &str = "Agro Website";

/// Value of the `crop` query parameter; empty values count as absent.
#[must_use]
pub fn crop_id_from_query(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "crop")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Crop renderer with its page-lifetime cache.
#[derive(Debug, Clone)]
pub struct CropCatalog {
    /// Site-relative path of `crops.json`.
    path: String,
    /// Root of the disease gallery images.
    disease_image_dir: String,
    /// Detail link template containing `{id}`.
    detail_link: String,
    /// Cached crops, in file order.
    crops: Vec<Crop>,
    /// Whether `crops` holds a successful load.
    loaded: bool,
    /// Id of the crop on the detail page, once rendered.
    selected: Option<String>,
}

impl CropCatalog {
    /// Empty catalog reading `path`, with query-string detail links.
    #[must_use]
    pub fn new(path: impl Into<String>, disease_image_dir: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            disease_image_dir: disease_image_dir.into(),
            detail_link: DEFAULT_DETAIL_LINK.to_string(),
            crops: Vec::new(),
            loaded: false,
            selected: None,
        }
    }

    /// Overrides the detail link template; `{id}` is replaced by the crop id.
    #[must_use]
    pub fn with_detail_link(mut self, template: impl Into<String>) -> Self {
        self.detail_link = template.into();
        self
    }

    /// Link to the detail page of `crop_id`.
    #[must_use]
    pub fn detail_href(&self, crop_id: &str) -> String {
        self.detail_link.replace("{id}", crop_id)
    }

    /// Cached crops in file order; empty until loaded.
    #[must_use]
    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    /// Fetches `crops.json` on first success and reuses it afterwards.
    ///
    /// A failed load is logged, yields an empty slice and is retried on the next call.
    pub async fn load_crops_data<A: AssetSource>(&mut self, assets: &A) -> &[Crop] {
        if !self.loaded {
            match assets.fetch_json::<CropsFile>(&self.path).await {
                Ok(file) => {
                    tracing::debug!(count = file.crops.len(), "Loaded crops data");
                    self.crops = file.crops;
                    self.loaded = true;
                }
                Err(e) => tracing::error!("Error loading crops data: {e}"),
            }
        }
        &self.crops
    }

    /// Cached crop with id `id`.
    #[must_use]
    pub fn get_crop_by_id(&self, id: &str) -> Option<&Crop> {
        self.crops.iter().find(|crop| crop.id == id)
    }

    /// Renders one card per crop into `#crop-grid`.
    ///
    /// An empty catalog shows the localized `noCropsFound` notice.
    pub async fn render_crop_list<A: AssetSource>(
        &mut self,
        assets: &A,
        localizer: &Localizer,
        doc: &mut Document,
    ) {
        if doc.by_id(CROP_GRID_ID).is_none() {
            return;
        }
        show_loading(doc, CROP_GRID_ID, localizer);

        if self.load_crops_data(assets).await.is_empty() {
            show_error(doc, CROP_GRID_ID, localizer, Some(NO_CROPS_KEY));
            return;
        }

        let cards: Vec<Node> = self
            .crops
            .iter()
            .map(|crop| crop_card(crop, localizer, &self.detail_href(&crop.id)).into())
            .collect();
        fill(doc, CROP_GRID_ID, cards);
    }

    /// Renders the crop selected by `query` into `#crop-details-container`, then
    /// relabels the document once.
    pub async fn render_crop_details<A: AssetSource>(
        &mut self,
        assets: &A,
        localizer: &Localizer,
        doc: &mut Document,
        query: &str,
        shop: Option<&ShopInfo>,
    ) {
        if doc.by_id(CROP_DETAILS_ID).is_none() {
            return;
        }
        show_loading(doc, CROP_DETAILS_ID, localizer);

        let Some(crop_id) = crop_id_from_query(query) else {
            show_error(doc, CROP_DETAILS_ID, localizer, Some(CROP_NOT_FOUND));
            return;
        };

        if self.crops.is_empty() {
            self.load_crops_data(assets).await;
        }

        let Some(crop) = self.get_crop_by_id(&crop_id) else {
            tracing::warn!(crop_id = %crop_id, "Crop not found");
            show_error(doc, CROP_DETAILS_ID, localizer, Some(CROP_NOT_FOUND));
            return;
        };

        fill(doc, CROP_DETAILS_ID, crop_details(crop, localizer, &self.disease_image_dir));

        self.selected = Some(crop_id);
        if let Some(title) = self.detail_title(localizer, shop) {
            doc.title = title;
        }

        localizer.apply_language(doc);
    }

    /// `"<crop name> - <SHOP_NAME>"` for the crop shown by the last successful
    /// [`Self::render_crop_details`], in the active language.
    #[must_use]
    pub fn detail_title(&self, localizer: &Localizer, shop: Option<&ShopInfo>) -> Option<String> {
        let crop = self.selected.as_deref().and_then(|id| self.get_crop_by_id(id))?;
        let site_name = shop.and_then(|info| info.get("SHOP_NAME")).unwrap_or(FALLBACK_SITE_NAME);
        Some(format!("{} - {site_name}", localizer.pick(&crop.name_mr, &crop.name_en)))
    }
}
