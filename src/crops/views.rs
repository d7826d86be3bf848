//! Crop grid card and detail view

use std::sync::LazyLock;

use regex::Regex;

use crate::crops::{
    Crop,
    GrowthStage,
    Nutrition,
    Pest,
};
use crate::dom::{
    Element,
    Node,
    TEXT_ONLY_ATTR,
};
use crate::i18n::Localizer;
use crate::views::{
    icon,
    image,
    label,
    season_color,
};

/// Runs of whitespace in a pest name.
#[allow(clippy::unwrap_used)]
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Gallery image of a pest: `<dir>/<crop id>/<pest name, lowercased, whitespace runs as _>.jpg`.
#[must_use]
pub fn disease_image_path(dir: &str, crop_id: &str, pest_name: &str) -> String {
    let file_stem = WHITESPACE_RUN.replace_all(&pest_name.to_lowercase(), "_").into_owned();
    format!("{}/{crop_id}/{file_stem}.jpg", dir.trim_end_matches('/'))
}

/// Grid card linking to the crop's detail page. The active language's name comes first.
#[must_use]
pub fn crop_card(crop: &Crop, localizer: &Localizer, href: &str) -> Element {
    let primary = localizer.pick(&crop.name_mr, &crop.name_en);
    let secondary = localizer.pick(&crop.name_en, &crop.name_mr);

    Element::new("a")
        .attr("href", href)
        .class("crop-card")
        .child(image(&crop.image, &crop.name_mr))
        .child(
            Element::new("div")
                .class("crop-info")
                .child(Element::new("div").class("crop-name-mr").child(primary))
                .child(Element::new("div").class("crop-name-en").child(secondary)),
        )
}

/// Full detail view of `crop`.
#[must_use]
pub fn crop_details(crop: &Crop, localizer: &Localizer, disease_image_dir: &str) -> Vec<Node> {
    vec![
        header(crop, localizer).into(),
        badges(crop, localizer).into(),
        overview(crop, localizer).into(),
        stages(&crop.stages, localizer).into(),
        card("fa-flask", label(localizer, "nutritionRequirements"))
            .child(nutrition_table(&crop.nutrition, localizer))
            .into(),
        pests(&crop.pests, localizer).into(),
        gallery(crop, localizer, disease_image_dir).into(),
    ]
}

/// Crop name and card image.
fn header(crop: &Crop, localizer: &Localizer) -> Element {
    let name = localizer.pick(&crop.name_mr, &crop.name_en);
    Element::new("div")
        .class("crop-header")
        .child(image(&crop.image, name))
        .child(Element::new("h1").child(name))
        .child(Element::new("p").child(localizer.pick(&crop.name_en, &crop.name_mr)))
}

/// Season and duration badges.
fn badges(crop: &Crop, localizer: &Localizer) -> Element {
    Element::new("div")
        .class("info-badges")
        .child(
            Element::new("span")
                .class("badge")
                .attr("style", format!("background-color: {}", season_color(&crop.season)))
                .child(icon("fa-calendar"))
                .child(label(localizer, "season"))
                .child(": ")
                .child(label(localizer, &crop.season)),
        )
        .child(
            Element::new("span")
                .class("badge")
                .child(icon("fa-clock"))
                .child(label(localizer, "duration"))
                .child(format!(": {} ", crop.duration))
                .child(label(localizer, "days")),
        )
}

/// Titled section box of the detail view.
fn card(icon_name: &str, title: Element) -> Element {
    Element::new("div")
        .class("card")
        .child(Element::new("div").class("card-title").child(icon(icon_name)).child(title))
}

/// Soil type and other basics.
fn overview(crop: &Crop, localizer: &Localizer) -> Element {
    card("fa-info-circle", label(localizer, "overview")).child(
        Element::new("div")
            .class("detail-row")
            .child(Element::new("div").class("detail-icon").child(icon("fa-mountain")))
            .child(
                Element::new("div")
                    .class("detail-content")
                    .child(Element::new("h4").key("soilType").child(localizer.translate("soilType")))
                    .child(Element::new("p").child(crop.soil_type.as_str())),
            ),
    )
}

/// Growth stage timeline.
fn stages(stages: &[GrowthStage], localizer: &Localizer) -> Element {
    let items = stages.iter().map(|stage| {
        let name = localizer.translate(&stage.name);
        Element::new("div")
            .class("stage-item")
            .child(image(&stage.image, name))
            .child(Element::new("div").class("stage-title").key(&stage.name).child(name))
            .child(
                Element::new("div")
                    .class("stage-days")
                    .child(format!("{} ", stage.days))
                    .child(label(localizer, "days")),
            )
    });

    card("fa-seedling", label(localizer, "growthStages"))
        .child(Element::new("div").class("stage-list").children(items))
}

/// Four rows in fixed order: nitrogen, phosphorus, potassium, micronutrients.
#[must_use]
pub fn nutrition_table(nutrition: &Nutrition, localizer: &Localizer) -> Element {
    let row = |cell: &str, key: &str, value: &str| {
        Element::new("tr")
            .child(Element::new(cell).key(key).child(localizer.translate(key)))
            .child(Element::new(cell).child(value))
    };

    Element::new("table")
        .class("nutrition-table")
        .child(Element::new("thead").child(row("th", "nitrogen", &nutrition.n)))
        .child(
            Element::new("tbody")
                .child(row("td", "phosphorus", &nutrition.p))
                .child(row("td", "potassium", &nutrition.k))
                .child(row("td", "micronutrients", &nutrition.micro)),
        )
}

/// `<strong>` heading whose trailing colon survives relabeling.
fn field_heading(localizer: &Localizer, key: &str) -> Element {
    Element::new("strong")
        .key(key)
        .attr(TEXT_ONLY_ATTR, "")
        .child(localizer.translate(key))
        .child(":")
}

/// One card per pest or disease.
fn pests(pests: &[Pest], localizer: &Localizer) -> Element {
    let cards = pests.iter().map(|pest| {
        Element::new("div")
            .class("pest-card")
            .child(image(&pest.image, &pest.name))
            .child(
                Element::new("div")
                    .class("pest-name")
                    .child(localizer.pick(&pest.name_mr, &pest.name)),
            )
            .child(
                Element::new("div")
                    .class("pest-info")
                    .child(
                        Element::new("strong")
                            .child(label(localizer, "stage"))
                            .child(": ")
                            .child(label(localizer, &pest.stage)),
                    )
                    .child(field_heading(localizer, "symptoms"))
                    .child(Element::new("p").child(pest.symptoms.as_str()))
                    .child(field_heading(localizer, "prevention"))
                    .child(Element::new("p").child(pest.prevention.as_str()))
                    .child(field_heading(localizer, "solution"))
                    .child(Element::new("p").child(pest.solution.as_str())),
            )
    });

    card("fa-bug", label(localizer, "pestsAndDiseases"))
        .child(Element::new("div").class("pest-list").children(cards))
}

/// Photos of each pest, for identification.
fn gallery(crop: &Crop, localizer: &Localizer, disease_image_dir: &str) -> Element {
    const KEY: &str = "diseaseIdentification";
    let title = localizer
        .table()
        .get(localizer.current_language(), KEY)
        .unwrap_or_else(|| localizer.pick("रोग ओळख", "Disease Identification"));

    let cards = crop.pests.iter().map(|pest| {
        let name = localizer.pick(&pest.name_mr, &pest.name);
        Element::new("div")
            .class("disease-image-card")
            .child(
                Element::new("img")
                    .attr("src", disease_image_path(disease_image_dir, &crop.id, &pest.name))
                    .attr("alt", name)
                    .attr("loading", "lazy")
                    .attr("onerror", "this.parentElement.style.display='none';"),
            )
            .child(
                Element::new("div")
                    .class("disease-image-caption")
                    .child(Element::new("div").class("disease-name").child(name))
                    .child(
                        Element::new("div")
                            .class("disease-stage")
                            .child(label(localizer, &pest.stage)),
                    ),
            )
    });

    card("fa-image", Element::new("span").key(KEY).child(title))
        .child(Element::new("div").class("disease-gallery").children(cards))
}
