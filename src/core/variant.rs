//! Variants and their ingredient and add-on lists.
//!
//! A variant is one sellable size of a product. Entities carrying a server id (or
//! relation id) exist on the backend; entities without one were created in the
//! current editing session.

use crate::core::sizing::Sizing;
use crate::entities::{
    AddOnRecord, CatalogAddOn, CatalogIngredient, IngredientRecord, IngredientType, Shape,
    VariantRecord,
};
use serde::{Deserialize, Serialize};

/// One sellable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Backend id; `None` until the variant is saved
    pub id: Option<String>,
    /// Display name, derived from `sizing` except for custom shapes
    pub name: String,
    /// Active sizing
    pub sizing: Sizing,
    /// Ingredients used, in insertion order
    pub ingredients: Vec<VariantIngredient>,
    /// Add-ons included, in insertion order
    pub add_ons: Vec<VariantAddOn>,
    /// Whether the variant can currently be ordered
    pub in_stock: bool,
    /// Server-computed ingredient cost
    pub cost_estimate: Option<f64>,
    /// Server-computed selling price
    pub price: Option<f64>,
}

impl Variant {
    /// A new, unsaved variant with the empty sizing for `shape`.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        let sizing = Sizing::default_for(shape);
        Self {
            id: None,
            name: sizing.derived_name().unwrap_or_default(),
            sizing,
            ingredients: Vec::new(),
            add_ons: Vec::new(),
            in_stock: true,
            cost_estimate: None,
            price: None,
        }
    }

    /// Whether the variant exists on the backend.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the catalog ingredient is already used by this variant.
    #[must_use]
    pub fn uses_ingredient(&self, ingredient_id: &str) -> bool {
        self.ingredients
            .iter()
            .any(|i| i.ingredient_id == ingredient_id)
    }

    /// Whether the catalog add-on is already included in this variant.
    #[must_use]
    pub fn uses_add_on(&self, add_on_id: &str) -> bool {
        self.add_ons.iter().any(|a| a.add_on_id == add_on_id)
    }

    /// Merges a patch. The name is re-derived whenever the patch carries a
    /// derivable sizing.
    pub fn apply(&mut self, patch: VariantPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(sizing) = patch.sizing {
            if let Some(name) = sizing.derived_name() {
                self.name = name;
            }
            self.sizing = sizing;
        }
    }

    /// Builds a variant from a flat backend record.
    ///
    /// `kind_of` resolves a catalog ingredient's type, used to pick a unit for
    /// records that arrive without one.
    pub fn from_record<F>(shape: Shape, record: VariantRecord, kind_of: F) -> Self
    where
        F: Fn(&str) -> Option<IngredientType>,
    {
        let sizing = Sizing::from_record(shape, &record);
        let name = sizing
            .derived_name()
            .or_else(|| record.name.clone())
            .unwrap_or_default();

        let ingredients = record
            .ingredients
            .into_iter()
            .map(|i| {
                let unit = i.unit.unwrap_or_else(|| {
                    kind_of(i.ingredient_id.as_str())
                        .unwrap_or(IngredientType::Solid)
                        .default_unit()
                        .to_string()
                });
                VariantIngredient {
                    relation_id: i.relation_id,
                    ingredient_id: i.ingredient_id,
                    amount: i.amount.unwrap_or_default(),
                    unit,
                }
            })
            .collect();

        let add_ons = record
            .add_ons
            .into_iter()
            .map(|a| VariantAddOn {
                relation_id: a.relation_id,
                add_on_id: a.add_on_id,
                amount: a.amount.unwrap_or_default(),
            })
            .collect();

        Self {
            id: record.id,
            name,
            sizing,
            ingredients,
            add_ons,
            in_stock: record.in_stock.unwrap_or(true),
            cost_estimate: record.cost_estimate,
            price: record.price,
        }
    }

    /// Flattens the variant into the backend's record form.
    #[must_use]
    pub fn to_record(&self) -> VariantRecord {
        let mut record = VariantRecord {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            in_stock: Some(self.in_stock),
            cost_estimate: self.cost_estimate,
            price: self.price,
            ingredients: self
                .ingredients
                .iter()
                .map(|i| IngredientRecord {
                    relation_id: i.relation_id.clone(),
                    ingredient_id: i.ingredient_id.clone(),
                    amount: Some(i.amount),
                    unit: Some(i.unit.clone()),
                })
                .collect(),
            add_ons: self
                .add_ons
                .iter()
                .map(|a| AddOnRecord {
                    relation_id: a.relation_id.clone(),
                    add_on_id: a.add_on_id.clone(),
                    amount: Some(a.amount),
                })
                .collect(),
            ..VariantRecord::default()
        };
        self.sizing.write_to(&mut record);
        record
    }
}

/// Partial update of a variant. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantPatch {
    /// New name; overridden by a derivable `sizing` in the same patch
    pub name: Option<String>,
    /// New sizing
    pub sizing: Option<Sizing>,
    /// New stock flag
    pub in_stock: Option<bool>,
}

/// A catalog ingredient as used by one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantIngredient {
    /// Backend id of the association; `None` until saved
    pub relation_id: Option<String>,
    /// Catalog ingredient id
    pub ingredient_id: String,
    /// Amount used
    pub amount: f64,
    /// Unit of `amount`
    pub unit: String,
}

impl VariantIngredient {
    /// A new, unsaved reference with zero amount and the type's default unit.
    #[must_use]
    pub fn new(ingredient: &CatalogIngredient) -> Self {
        Self::with_unit(ingredient, ingredient.kind.default_unit())
    }

    /// A new, unsaved reference with zero amount measured in `unit`.
    #[must_use]
    pub fn with_unit(ingredient: &CatalogIngredient, unit: impl Into<String>) -> Self {
        Self {
            relation_id: None,
            ingredient_id: ingredient.id.clone(),
            amount: 0.0,
            unit: unit.into(),
        }
    }

    /// Merges a patch.
    pub fn apply(&mut self, patch: IngredientPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
    }
}

/// Partial update of a variant ingredient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientPatch {
    /// New amount
    pub amount: Option<f64>,
    /// New unit
    pub unit: Option<String>,
}

/// A catalog add-on as included in one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantAddOn {
    /// Backend id of the association; `None` until saved
    pub relation_id: Option<String>,
    /// Catalog add-on id
    pub add_on_id: String,
    /// Quantity included
    pub amount: f64,
}

impl VariantAddOn {
    /// A new, unsaved reference with zero amount.
    #[must_use]
    pub fn new(add_on: &CatalogAddOn) -> Self {
        Self {
            relation_id: None,
            add_on_id: add_on.id.clone(),
            amount: 0.0,
        }
    }

    /// Merges a patch.
    pub fn apply(&mut self, patch: AddOnPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }
}

/// Partial update of a variant add-on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddOnPatch {
    /// New quantity
    pub amount: Option<f64>,
}
