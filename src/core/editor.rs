//! Variant editor state and its transition function.
//!
//! The editor holds one product's material set while it is being edited. Every
//! change goes through [`reduce`], a total function over the closed [`Action`] set
//! that returns the next snapshot. Removing an entity that exists on the backend
//! records its id in the matching deletion set so the next save can delete it.

use crate::core::pricing::{PricingMode, PricingPatch, PricingPolicy};
use crate::core::variant::{
    AddOnPatch, IngredientPatch, Variant, VariantAddOn, VariantIngredient, VariantPatch,
};
use crate::entities::{
    CatalogAddOn, CatalogIngredient, IngredientType, MaterialRecord, Shape, SubmitMaterialRequest,
};
use serde::{Deserialize, Serialize};

/// Ids removed during the session, to be deleted on the next save.
///
/// Entries are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionSets {
    /// Variant ids
    pub variants: Vec<String>,
    /// Ingredient relation ids
    pub ingredients: Vec<String>,
    /// Add-on relation ids
    pub add_ons: Vec<String>,
}

impl DeletionSets {
    /// Whether nothing has been removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty() && self.ingredients.is_empty() && self.add_ons.is_empty()
    }
}

/// Full editor snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    /// Material set id; `None` for a product without one yet
    pub material_id: Option<String>,
    /// Owning product
    pub product_id: String,
    /// Product shape, fixes the sizing kind of every variant
    pub shape: Shape,
    /// Variants in display order
    pub variants: Vec<Variant>,
    /// Pricing policy
    pub pricing: PricingPolicy,
    /// Pending deletions
    pub deleted: DeletionSets,
    /// Multiplier restored when entering custom-cost mode
    pub default_multiplier: f64,
}

impl EditorState {
    /// Empty editor for a product that has no material set yet.
    #[must_use]
    pub fn new(product_id: impl Into<String>, shape: Shape, default_multiplier: f64) -> Self {
        Self {
            material_id: None,
            product_id: product_id.into(),
            shape,
            variants: Vec::new(),
            pricing: PricingPolicy::with_multiplier(default_multiplier),
            deleted: DeletionSets::default(),
            default_multiplier,
        }
    }

    /// Normalizes a backend record into an editor snapshot.
    ///
    /// `ingredients` is consulted to pick default units for ingredient records that
    /// arrive without one; unknown ingredients fall back to the solid default.
    #[must_use]
    pub fn from_record(
        record: MaterialRecord,
        ingredients: &[CatalogIngredient],
        default_multiplier: f64,
    ) -> Self {
        let kind_of = |id: &str| -> Option<IngredientType> {
            ingredients.iter().find(|i| i.id == id).map(|i| i.kind)
        };
        let shape = record.shape;
        let variants = record
            .variants
            .into_iter()
            .map(|v| Variant::from_record(shape, v, &kind_of))
            .collect();

        let pricing = if record.use_custom_cost {
            PricingPolicy {
                mode: PricingMode::CustomCost,
                multiplier: default_multiplier,
                additional_cost: record.additional_cost.unwrap_or_default(),
            }
        } else {
            PricingPolicy::with_multiplier(record.multiplier.unwrap_or(default_multiplier))
        };

        Self {
            material_id: record.id,
            product_id: record.product_id,
            shape,
            variants,
            pricing,
            deleted: DeletionSets::default(),
            default_multiplier,
        }
    }

    /// Builds the save payload: every current variant plus the pending deletions.
    #[must_use]
    pub fn to_submit_request(&self) -> SubmitMaterialRequest {
        SubmitMaterialRequest {
            id: self.material_id.clone(),
            product_id: self.product_id.clone(),
            shape: self.shape,
            use_custom_cost: self.pricing.mode == PricingMode::CustomCost,
            multiplier: self.pricing.multiplier,
            additional_cost: self.pricing.additional_cost,
            variants: self.variants.iter().map(Variant::to_record).collect(),
            deleted_variants: self.deleted.variants.clone(),
            deleted_ingredients: self.deleted.ingredients.clone(),
            deleted_add_ons: self.deleted.add_ons.clone(),
        }
    }
}

/// Every edit the editor accepts.
///
/// Variants, ingredients and add-ons are addressed by position. A position that
/// does not name an element leaves the state unchanged, as does a variant or
/// sizing patch whose sizing does not belong to the product's shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a variant
    AddVariant(Variant),
    /// Merge a patch into a variant
    UpdateVariant {
        /// Variant position
        index: usize,
        /// Fields to change
        patch: VariantPatch,
    },
    /// Remove a variant
    RemoveVariant {
        /// Variant position
        index: usize,
    },
    /// Add a catalog ingredient to a variant unless it is already used there
    AddIngredient {
        /// Variant position
        variant: usize,
        /// Ingredient to add
        ingredient: CatalogIngredient,
        /// Starting unit; `None` uses the ingredient type's default
        unit: Option<String>,
    },
    /// Merge a patch into one of a variant's ingredients
    UpdateIngredient {
        /// Variant position
        variant: usize,
        /// Ingredient position within the variant
        index: usize,
        /// Fields to change
        patch: IngredientPatch,
    },
    /// Remove one of a variant's ingredients
    RemoveIngredient {
        /// Variant position
        variant: usize,
        /// Ingredient position within the variant
        index: usize,
    },
    /// Add a catalog add-on to a variant unless it is already included there
    AddAddOn {
        /// Variant position
        variant: usize,
        /// Add-on to add
        add_on: CatalogAddOn,
    },
    /// Merge a patch into one of a variant's add-ons
    UpdateAddOn {
        /// Variant position
        variant: usize,
        /// Add-on position within the variant
        index: usize,
        /// Fields to change
        patch: AddOnPatch,
    },
    /// Remove one of a variant's add-ons
    RemoveAddOn {
        /// Variant position
        variant: usize,
        /// Add-on position within the variant
        index: usize,
    },
    /// Merge a patch into the pricing policy
    UpdatePricing(PricingPatch),
}

/// Removes the element at `index`, returning the remaining list and the removed
/// element. Out-of-range positions return the list unchanged and `None`.
#[must_use]
pub fn remove_at<T>(mut list: Vec<T>, index: usize) -> (Vec<T>, Option<T>) {
    if index < list.len() {
        let removed = list.remove(index);
        (list, Some(removed))
    } else {
        (list, None)
    }
}

/// Applies one action and returns the next snapshot.
#[must_use]
pub fn reduce(mut state: EditorState, action: Action) -> EditorState {
    match action {
        Action::AddVariant(variant) => {
            if variant.sizing.shape() == state.shape {
                state.variants.push(variant);
            }
        }
        Action::UpdateVariant { index, patch } => {
            let fits_shape = patch
                .sizing
                .as_ref()
                .is_none_or(|sizing| sizing.shape() == state.shape);
            if fits_shape && let Some(variant) = state.variants.get_mut(index) {
                variant.apply(patch);
            }
        }
        Action::RemoveVariant { index } => {
            let (variants, removed) = remove_at(state.variants, index);
            state.variants = variants;
            if let Some(id) = removed.and_then(|v| v.id) {
                state.deleted.variants.push(id);
            }
        }
        Action::AddIngredient {
            variant,
            ingredient,
            unit,
        } => {
            if let Some(v) = state.variants.get_mut(variant)
                && !v.uses_ingredient(&ingredient.id)
            {
                let added = match unit {
                    Some(unit) => VariantIngredient::with_unit(&ingredient, unit),
                    None => VariantIngredient::new(&ingredient),
                };
                v.ingredients.push(added);
            }
        }
        Action::UpdateIngredient {
            variant,
            index,
            patch,
        } => {
            if let Some(ingredient) = state
                .variants
                .get_mut(variant)
                .and_then(|v| v.ingredients.get_mut(index))
            {
                ingredient.apply(patch);
            }
        }
        Action::RemoveIngredient { variant, index } => {
            if let Some(v) = state.variants.get_mut(variant) {
                let (ingredients, removed) = remove_at(std::mem::take(&mut v.ingredients), index);
                v.ingredients = ingredients;
                if let Some(id) = removed.and_then(|i| i.relation_id) {
                    state.deleted.ingredients.push(id);
                }
            }
        }
        Action::AddAddOn { variant, add_on } => {
            if let Some(v) = state.variants.get_mut(variant)
                && !v.uses_add_on(&add_on.id)
            {
                v.add_ons.push(VariantAddOn::new(&add_on));
            }
        }
        Action::UpdateAddOn {
            variant,
            index,
            patch,
        } => {
            if let Some(add_on) = state
                .variants
                .get_mut(variant)
                .and_then(|v| v.add_ons.get_mut(index))
            {
                add_on.apply(patch);
            }
        }
        Action::RemoveAddOn { variant, index } => {
            if let Some(v) = state.variants.get_mut(variant) {
                let (add_ons, removed) = remove_at(std::mem::take(&mut v.add_ons), index);
                v.add_ons = add_ons;
                if let Some(id) = removed.and_then(|a| a.relation_id) {
                    state.deleted.add_ons.push(id);
                }
            }
        }
        Action::UpdatePricing(patch) => {
            let default_multiplier = state.default_multiplier;
            state.pricing.apply(patch, default_multiplier);
        }
    }
    state
}
