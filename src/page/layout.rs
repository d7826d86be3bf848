//! Page skeletons
//!
//! Each page shares a header (shop name, navigation, language toggle) and a
//! contact footer. Shop slots start empty and are filled by the shop-info module.

use super::PageKind;
use crate::crops::{
    CROP_DETAILS_ID,
    CROP_GRID_ID,
};
use crate::dom::{
    Document,
    Element,
};
use crate::i18n::Localizer;
use crate::views::{
    icon,
    label,
};

/// Class of the click-to-call link.
pub(crate) const CALL_LINK_CLASS: &str = "call-link";
/// Class of the WhatsApp link.
pub(crate) const WHATSAPP_LINK_CLASS: &str = "whatsapp-link";

/// Empty page of `kind`: header, main area and footer, labels translated.
pub(crate) fn skeleton(kind: PageKind, localizer: &Localizer, stylesheet: Option<&str>) -> Document {
    let main = match kind {
        PageKind::Home => home(localizer),
        PageKind::Crops => Element::new("main").child(
            section(localizer, "cropsTitle")
                .child(Element::new("div").class("crop-grid").id(CROP_GRID_ID)),
        ),
        PageKind::CropDetails => {
            Element::new("main").child(Element::new("div").id(CROP_DETAILS_ID))
        }
    };

    let body = Element::new("body")
        .attr("data-page", kind.as_str())
        .child(header(localizer))
        .child(main)
        .child(footer(localizer));

    let mut doc = Document::new(localizer.translate(kind.title_key()), body);
    doc.lang = localizer.current_language().html_lang().to_string();
    doc.stylesheet = stylesheet.map(str::to_string);
    doc
}

/// Shop name, navigation and the language toggle.
fn header(localizer: &Localizer) -> Element {
    let nav_link = |href: &str, key: &str| {
        Element::new("a").attr("href", href).child(label(localizer, key))
    };

    Element::new("header")
        .child(Element::new("div").class("shop-name"))
        .child(
            Element::new("nav")
                .child(nav_link("index.html", "home"))
                .child(nav_link("crops.html", "crops")),
        )
        .child(Element::new("button").attr("type", "button").class("lang-toggle"))
}

/// Hero, about, services and call to action.
fn home(localizer: &Localizer) -> Element {
    Element::new("main")
        .child(
            Element::new("section").class("hero").child(Element::new("p").class("shop-tagline")),
        )
        .child(
            section(localizer, "aboutUs")
                .child(Element::new("h3").class("shop-owner"))
                .child(Element::new("p").class("shop-qualification")),
        )
        .child(section(localizer, "ourServices").child(Element::new("p").class("shop-services")))
        .child(
            Element::new("a")
                .attr("href", "crops.html")
                .class("cta")
                .child(icon("fa-seedling"))
                .child(" ")
                .child(label(localizer, "viewCrops")),
        )
}

/// Section headed by the translation of `title_key`.
fn section(localizer: &Localizer, title_key: &str) -> Element {
    Element::new("section")
        .child(Element::new("h2").key(title_key).child(localizer.translate(title_key)))
}

/// Address, phone, hours and contact buttons.
fn footer(localizer: &Localizer) -> Element {
    let row = |icon_name: &str, key: &str, slot: &str| {
        Element::new("div")
            .class("contact-row")
            .child(icon(icon_name))
            .child(label(localizer, key))
            .child(": ")
            .child(Element::new("span").class(slot))
    };

    Element::new("footer")
        .child(row("fa-map-marker-alt", "address", "shop-address"))
        .child(row("fa-phone", "phone", "shop-phone"))
        .child(row("fa-clock", "workingHours", "shop-hours"))
        .child(
            Element::new("div")
                .class("contact-actions")
                .child(
                    Element::new("a")
                        .class(CALL_LINK_CLASS)
                        .child(icon("fa-phone"))
                        .child(" ")
                        .child(label(localizer, "callNow")),
                )
                .child(
                    Element::new("a")
                        .class(WHATSAPP_LINK_CLASS)
                        .attr("target", "_blank")
                        .attr("rel", "noopener")
                        .child(Element::new("i").class("fab fa-whatsapp"))
                        .child(" ")
                        .child(label(localizer, "whatsapp")),
                ),
        )
}
