//! Catalog entities - ingredients, add-ons and measurement units.
//!
//! These are read-only lists fetched from the backend. Variants reference catalog
//! entries by id; the editor never mutates the catalog itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default unit for solid ingredients
pub const DEFAULT_MASS_UNIT: &str = "Gram";
/// Default unit for liquid ingredients
pub const DEFAULT_VOLUME_UNIT: &str = "Milliliter";
/// Default unit for counted ingredients
pub const DEFAULT_COUNT_UNIT: &str = "Piece";

/// Physical kind of a catalog ingredient. Decides which units are valid for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientType {
    /// Measured by mass (flour, sugar)
    Solid,
    /// Measured by volume (milk, syrup)
    Liquid,
    /// Counted (eggs, candles)
    Count,
}

impl IngredientType {
    /// The measurement category whose units apply to this ingredient type.
    #[must_use]
    pub const fn category(self) -> MeasurementCategory {
        match self {
            Self::Solid => MeasurementCategory::Mass,
            Self::Liquid => MeasurementCategory::Volume,
            Self::Count => MeasurementCategory::Count,
        }
    }

    /// Unit assigned to a freshly added ingredient of this type.
    #[must_use]
    pub const fn default_unit(self) -> &'static str {
        match self {
            Self::Solid => DEFAULT_MASS_UNIT,
            Self::Liquid => DEFAULT_VOLUME_UNIT,
            Self::Count => DEFAULT_COUNT_UNIT,
        }
    }
}

/// Unit category as reported by the units endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementCategory {
    /// Mass units
    Mass,
    /// Volume units
    Volume,
    /// Piece counts
    Count,
}

/// An ingredient available for use in any variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogIngredient {
    /// Backend id
    pub id: String,
    /// Display name
    pub name: String,
    /// Physical kind
    #[serde(rename = "type")]
    pub kind: IngredientType,
}

/// An add-on (topper, candle set, ...) available for use in any variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAddOn {
    /// Backend id
    pub id: String,
    /// Display name
    pub name: String,
}

/// Valid unit names grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementUnits(pub BTreeMap<MeasurementCategory, Vec<String>>);

impl MeasurementUnits {
    /// Units listed for a category, empty if the backend sent none.
    #[must_use]
    pub fn for_category(&self, category: MeasurementCategory) -> &[String] {
        self.0.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Unit a freshly added ingredient of `kind` starts with: the first unit the
    /// backend lists for its category, or the built-in default if it lists none.
    #[must_use]
    pub fn default_unit(&self, kind: IngredientType) -> &str {
        self.for_category(kind.category())
            .first()
            .map_or(kind.default_unit(), String::as_str)
    }

    /// Whether any category has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
