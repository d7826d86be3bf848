//! Crop-catalog module: crop records, grid view and detail view.

mod catalog;
mod model;
mod views;

pub use catalog::{
    CROP_DETAILS_ID,
    CROP_GRID_ID,
    CropCatalog,
    DEFAULT_DETAIL_LINK,
    crop_id_from_query,
};
pub use model::{
    Crop,
    CropsFile,
    GrowthStage,
    Nutrition,
    Pest,
};
pub use views::{
    crop_card,
    crop_details,
    disease_image_path,
    nutrition_table,
};
