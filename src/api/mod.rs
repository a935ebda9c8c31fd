//! Backend collaborator - the REST operations the editor depends on.
//!
//! The editor only sees the [`MaterialApi`] trait. [`HttpMaterialApi`] talks to the
//! real backend; tests substitute an in-memory implementation.

pub mod http;

pub use http::HttpMaterialApi;

use crate::entities::{
    CatalogAddOn, CatalogIngredient, MaterialRecord, MeasurementUnits, SubmitMaterialRequest,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Operations the backend provides to the variant editor.
#[async_trait]
pub trait MaterialApi: Send + Sync {
    /// All catalog ingredients.
    async fn fetch_ingredients(&self) -> Result<Vec<CatalogIngredient>>;

    /// All catalog add-ons.
    async fn fetch_add_ons(&self) -> Result<Vec<CatalogAddOn>>;

    /// Valid unit names per measurement category.
    async fn fetch_units(&self) -> Result<MeasurementUnits>;

    /// The material set of one product.
    async fn fetch_material(&self, material_id: &str) -> Result<MaterialRecord>;

    /// Saves a material set and returns it with server-computed cost fields.
    async fn submit_material(&self, request: &SubmitMaterialRequest) -> Result<MaterialRecord>;
}
