//! Entity module - data shapes exchanged with the backend.
//! Catalog entries are read-only reference data; material records carry a product's
//! bill of materials in the backend's flat form.

pub mod catalog;
pub mod material;

pub use catalog::{
    CatalogAddOn, CatalogIngredient, IngredientType, MeasurementCategory, MeasurementUnits,
};
pub use material::{
    AddOnRecord, IngredientRecord, MaterialRecord, Shape, SubmitMaterialRequest, VariantRecord,
};
