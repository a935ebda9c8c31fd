//! Read-only projections over the editor state.

use crate::core::pricing::PricingPolicy;
use crate::core::variant::Variant;
use crate::entities::{CatalogAddOn, CatalogIngredient, IngredientType, MeasurementUnits};

/// Catalog ingredients not yet used by `variant`, in catalog order.
#[must_use]
pub fn eligible_ingredients<'a>(
    catalog: &'a [CatalogIngredient],
    variant: &Variant,
) -> Vec<&'a CatalogIngredient> {
    catalog
        .iter()
        .filter(|i| !variant.uses_ingredient(&i.id))
        .collect()
}

/// Catalog add-ons not yet included in `variant`, in catalog order.
#[must_use]
pub fn eligible_add_ons<'a>(catalog: &'a [CatalogAddOn], variant: &Variant) -> Vec<&'a CatalogAddOn> {
    catalog
        .iter()
        .filter(|a| !variant.uses_add_on(&a.id))
        .collect()
}

/// First eligible ingredient, the one an "add ingredient" button picks.
#[must_use]
pub fn first_eligible_ingredient<'a>(
    catalog: &'a [CatalogIngredient],
    variant: &Variant,
) -> Option<&'a CatalogIngredient> {
    catalog.iter().find(|i| !variant.uses_ingredient(&i.id))
}

/// First eligible add-on.
#[must_use]
pub fn first_eligible_add_on<'a>(
    catalog: &'a [CatalogAddOn],
    variant: &Variant,
) -> Option<&'a CatalogAddOn> {
    catalog.iter().find(|a| !variant.uses_add_on(&a.id))
}

/// Estimated selling price of a variant under `policy`. `None` until the backend
/// has computed a cost for the variant, or when the estimate is out of range.
#[must_use]
pub fn display_price(variant: &Variant, policy: &PricingPolicy) -> Option<f64> {
    variant
        .cost_estimate
        .and_then(|cost| policy.display_price(cost))
}

/// Units an ingredient of the given type may be measured in.
#[must_use]
pub fn valid_units(units: &MeasurementUnits, kind: IngredientType) -> &[String] {
    units.for_category(kind.category())
}
