//! Material record - the backend's representation of one product's bill of materials.
//!
//! The backend stores variants flat: every sizing field is optional and the product's
//! shape decides which one is meaningful. The editor normalizes these records into
//! tagged sizings on load and flattens them again on submit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shape of the product. Selects the sizing representation used by all its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Round cakes, sized by a stack of tiers
    #[default]
    Round,
    /// Heart cakes, sized by a single dimension in inches
    Heart,
    /// Rectangle cakes, sized by width and length in inches
    Rectangle,
    /// Anything else, sized by free text
    Custom,
}

/// Material set as returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    /// Backend id, absent for a product with no material set yet
    #[serde(default)]
    pub id: Option<String>,
    /// Product this material set belongs to
    pub product_id: String,
    /// Product shape
    #[serde(default)]
    pub shape: Shape,
    /// Whether the flat additional cost is used instead of the multiplier
    #[serde(default)]
    pub use_custom_cost: bool,
    /// Multiplier applied to the ingredient cost
    #[serde(default)]
    pub multiplier: Option<f64>,
    /// Flat cost added on top of the ingredient cost
    #[serde(default)]
    pub additional_cost: Option<f64>,
    /// Variants in display order
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
    /// Last modification time on the backend
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One variant in the backend's flat form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    /// Backend id, absent for variants created in the editor
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Tier descriptions for round products, smallest first
    #[serde(default)]
    pub tiers: Option<Vec<String>>,
    /// Size in inches for heart products
    #[serde(default)]
    pub size_heart: Option<f64>,
    /// Width in inches for rectangle products
    #[serde(default)]
    pub size_rectangle_x: Option<f64>,
    /// Length in inches for rectangle products
    #[serde(default)]
    pub size_rectangle_y: Option<f64>,
    /// Free-text size for custom products
    #[serde(default)]
    pub size_custom: Option<String>,
    /// Whether the variant can currently be ordered
    #[serde(default)]
    pub in_stock: Option<bool>,
    /// Server-computed ingredient cost
    #[serde(default)]
    pub cost_estimate: Option<f64>,
    /// Server-computed selling price
    #[serde(default)]
    pub price: Option<f64>,
    /// Ingredients used by this variant
    #[serde(default)]
    pub ingredients: Vec<IngredientRecord>,
    /// Add-ons included with this variant
    #[serde(default)]
    pub add_ons: Vec<AddOnRecord>,
}

/// Association between a variant and a catalog ingredient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    /// Backend id of the association itself
    #[serde(default)]
    pub relation_id: Option<String>,
    /// Catalog ingredient id
    pub ingredient_id: String,
    /// Amount used
    #[serde(default)]
    pub amount: Option<f64>,
    /// Unit the amount is expressed in
    #[serde(default)]
    pub unit: Option<String>,
}

/// Association between a variant and a catalog add-on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnRecord {
    /// Backend id of the association itself
    #[serde(default)]
    pub relation_id: Option<String>,
    /// Catalog add-on id
    pub add_on_id: String,
    /// Quantity included
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Body of a material-set save.
///
/// Carries the full current variant list together with the ids removed during the
/// editing session. The backend recomputes cost and price fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMaterialRequest {
    /// Material set id, absent on first save
    pub id: Option<String>,
    /// Owning product
    pub product_id: String,
    /// Product shape
    pub shape: Shape,
    /// Pricing mode flag
    pub use_custom_cost: bool,
    /// Multiplier (ignored by the backend in custom-cost mode)
    pub multiplier: f64,
    /// Flat cost (ignored by the backend in multiplier mode)
    pub additional_cost: f64,
    /// Current variants
    pub variants: Vec<VariantRecord>,
    /// Variant ids to delete
    pub deleted_variants: Vec<String>,
    /// Ingredient relation ids to delete
    pub deleted_ingredients: Vec<String>,
    /// Add-on relation ids to delete
    pub deleted_add_ons: Vec<String>,
}
