//! Writing shop metadata into the page

use crate::assets::AssetSource;
use crate::dom::{
    Document,
    Element,
    Node,
    TRANSLATION_KEY_ATTR,
};
use crate::i18n::{
    LanguageChanged,
    Localizer,
};
use crate::shop::ShopInfo;

/// Slot class → metadata key, for slots holding plain text.
const TEXT_SLOTS: &[(&str, &str)] = &[
    ("shop-name", "SHOP_NAME"),
    ("shop-tagline", "TAGLINE"),
    ("shop-owner", "OWNER_NAME"),
    ("shop-qualification", "QUALIFICATION"),
    ("shop-phone", "PHONE"),
    ("shop-hours", "WORKING_HOURS"),
    ("shop-services", "SERVICES"),
];

/// Keys without an `_EN` variant.
const UNLOCALIZED_KEYS: &[&str] = &["PHONE"];

/// Slot of the multi-line address.
const ADDRESS_SLOT: &str = "shop-address";
/// Metadata key of the address.
const ADDRESS_KEY: &str = "ADDRESS";

/// Fetches and parses the shop-info asset.
///
/// Errors are logged and reported as `None`.
pub async fn load_shop_info<A: AssetSource>(assets: &A, path: &str) -> Option<ShopInfo> {
    match assets.fetch_text(path).await {
        Ok(text) => {
            let info = ShopInfo::parse(&text);
            tracing::debug!(entries = info.len(), "Loaded shop info");
            Some(info)
        }
        Err(e) => {
            tracing::error!("Error loading shop info: {e}");
            None
        }
    }
}

/// Shop-info renderer with its page-lifetime cache.
#[derive(Debug, Clone)]
pub struct ShopInfoModule {
    /// Site-relative path of `info.txt`.
    path: String,
    /// Metadata after the first successful load.
    cache: Option<ShopInfo>,
}

impl ShopInfoModule {
    /// Module reading `path`, nothing loaded yet.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), cache: None }
    }

    /// Cached metadata, once [`Self::populate_shop_info`] has loaded it.
    #[must_use]
    pub const fn info(&self) -> Option<&ShopInfo> {
        self.cache.as_ref()
    }

    /// Loads the metadata (first call only) and fills the shop slots of `doc`.
    pub async fn populate_shop_info<A: AssetSource>(
        &mut self,
        assets: &A,
        localizer: &Localizer,
        doc: &mut Document,
    ) {
        if self.cache.is_none() {
            self.cache = load_shop_info(assets, &self.path).await;
        }
        self.write_slots(localizer, doc);
    }

    /// Re-fills the slots from the cache; never fetches.
    pub fn on_language_changed(
        &self,
        event: LanguageChanged,
        localizer: &Localizer,
        doc: &mut Document,
    ) {
        tracing::debug!(language = %event.language, "Refreshing shop info");
        self.write_slots(localizer, doc);
    }

    /// Writes every cached value into its slot, skipping overridden slots.
    fn write_slots(&self, localizer: &Localizer, doc: &mut Document) {
        let Some(info) = &self.cache else {
            return;
        };
        let language = localizer.current_language();

        for &(class, key) in TEXT_SLOTS {
            let value = if UNLOCALIZED_KEYS.contains(&key) {
                info.get(key)
            } else {
                info.localized(key, language)
            };
            if let (Some(slot), Some(value)) = (writable_slot(doc, class), value) {
                slot.set_text(value);
            }
        }

        if let (Some(slot), Some(address)) =
            (writable_slot(doc, ADDRESS_SLOT), info.localized(ADDRESS_KEY, language))
        {
            slot.set_children(address_lines(address));
        }
    }
}

/// Slots tagged with a translation key are owned by the language module.
fn writable_slot<'a>(doc: &'a mut Document, class: &str) -> Option<&'a mut Element> {
    doc.by_class_mut(class).filter(|slot| !slot.has_attr(TRANSLATION_KEY_ATTR))
}

/// Splits an address on literal `\n` sequences and real newlines, joining the
/// parts with `<br>`.
fn address_lines(address: &str) -> Vec<Node> {
    let normalized = address.replace("\\n", "\n");
    let mut nodes = Vec::new();
    for (index, line) in normalized.split('\n').enumerate() {
        if index > 0 {
            nodes.push(Element::new("br").into());
        }
        if !line.is_empty() {
            nodes.push(line.into());
        }
    }
    nodes
}
