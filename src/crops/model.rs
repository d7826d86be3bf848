//! Shape of `crops.json`

use serde::{
    Deserialize,
    Serialize,
};

/// Top-level shape of `crops.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CropsFile {
    /// Crops in display order.
    pub crops: Vec<Crop>,
}

/// One crop of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    /// Identifier used in links and image paths.
    pub id: String,
    /// Marathi name.
    pub name_mr: String,
    /// English name.
    pub name_en: String,
    /// Card image path.
    #[serde(default)]
    pub image: String,
    /// Season id, also a translation key (`kharif`, `rabi`, `summer`).
    pub season: String,
    /// Days from sowing to harvest.
    pub duration: u32,
    /// Suitable soil, as display text.
    #[serde(default)]
    pub soil_type: String,
    /// In growth order.
    #[serde(default)]
    pub stages: Vec<GrowthStage>,
    /// Fertilizer requirements.
    #[serde(default)]
    pub nutrition: Nutrition,
    /// Pests and diseases to watch for.
    #[serde(default)]
    pub pests: Vec<Pest>,
}

/// One step of the growth timeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GrowthStage {
    /// Translation key of the stage name.
    pub name: String,
    /// Stage image path.
    #[serde(default)]
    pub image: String,
    /// Days after sowing.
    pub days: u32,
}

/// Fertilizer requirements, as display strings (e.g. `"120 kg/ha"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Nutrition {
    /// Nitrogen.
    pub n: String,
    /// Phosphorus.
    pub p: String,
    /// Potassium.
    pub k: String,
    /// Micronutrients.
    pub micro: String,
}

/// A pest or disease of a crop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pest {
    /// English name; also names the gallery image.
    pub name: String,
    /// Marathi name.
    pub name_mr: String,
    /// Translation key of the affected growth stage.
    pub stage: String,
    /// What the farmer sees.
    #[serde(default)]
    pub symptoms: String,
    /// How to avoid it.
    #[serde(default)]
    pub prevention: String,
    /// Treatment once present.
    #[serde(default)]
    pub solution: String,
    /// Photo path.
    #[serde(default)]
    pub image: String,
}
