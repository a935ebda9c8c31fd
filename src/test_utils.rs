//! Shared test utilities.
//!
//! Fixtures for catalogs and material records, plus an in-memory backend.

#![allow(clippy::unwrap_used)]

use crate::api::MaterialApi;
use crate::core::editor::EditorState;
use crate::entities::{
    AddOnRecord, CatalogAddOn, CatalogIngredient, IngredientRecord, IngredientType,
    MaterialRecord, MeasurementCategory, MeasurementUnits, Shape, SubmitMaterialRequest,
    VariantRecord,
};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// A catalog ingredient.
pub fn catalog_ingredient(id: &str, name: &str, kind: IngredientType) -> CatalogIngredient {
    CatalogIngredient {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    }
}

/// A catalog add-on.
pub fn catalog_add_on(id: &str, name: &str) -> CatalogAddOn {
    CatalogAddOn {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// flour, sugar, milk, egg
pub fn sample_ingredients() -> Vec<CatalogIngredient> {
    vec![
        catalog_ingredient("flour", "Flour", IngredientType::Solid),
        catalog_ingredient("sugar", "Sugar", IngredientType::Solid),
        catalog_ingredient("milk", "Milk", IngredientType::Liquid),
        catalog_ingredient("egg", "Egg", IngredientType::Count),
    ]
}

/// topper, candles
pub fn sample_add_ons() -> Vec<CatalogAddOn> {
    vec![
        catalog_add_on("topper", "Happy Birthday Topper"),
        catalog_add_on("candles", "Candles"),
    ]
}

/// Mass, volume and count units.
pub fn sample_units() -> MeasurementUnits {
    let mut units = BTreeMap::new();
    units.insert(
        MeasurementCategory::Mass,
        vec!["Gram".to_string(), "Kilogram".to_string()],
    );
    units.insert(
        MeasurementCategory::Volume,
        vec!["Milliliter".to_string(), "Liter".to_string()],
    );
    units.insert(MeasurementCategory::Count, vec!["Piece".to_string()]);
    MeasurementUnits(units)
}

/// A saved round cake with two variants.
///
/// * `v1`: two tiers, flour (relation `R1`), topper (relation `A1`), cost 10 000
/// * `v2`: one tier, nothing attached, no cost yet
pub fn sample_record() -> MaterialRecord {
    MaterialRecord {
        id: Some("mat-1".to_string()),
        product_id: "cake-1".to_string(),
        shape: Shape::Round,
        use_custom_cost: false,
        multiplier: Some(1.5),
        additional_cost: None,
        variants: vec![
            VariantRecord {
                id: Some("v1".to_string()),
                tiers: Some(vec![
                    "6\"x4\" (round)".to_string(),
                    "8\"x4\" (round)".to_string(),
                ]),
                in_stock: Some(true),
                cost_estimate: Some(10_000.0),
                ingredients: vec![IngredientRecord {
                    relation_id: Some("R1".to_string()),
                    ingredient_id: "flour".to_string(),
                    amount: Some(500.0),
                    unit: Some("Gram".to_string()),
                }],
                add_ons: vec![AddOnRecord {
                    relation_id: Some("A1".to_string()),
                    add_on_id: "topper".to_string(),
                    amount: Some(1.0),
                }],
                ..VariantRecord::default()
            },
            VariantRecord {
                id: Some("v2".to_string()),
                tiers: Some(vec!["8\"x4\" (round)".to_string()]),
                ..VariantRecord::default()
            },
        ],
        updated_at: None,
    }
}

/// Editor snapshot of [`sample_record`] with a 1.5 default multiplier.
pub fn sample_state() -> EditorState {
    EditorState::from_record(sample_record(), &sample_ingredients(), 1.5)
}

/// In-memory backend. `None` catalogs fail their fetch.
#[derive(Default)]
pub struct MockMaterialApi {
    /// Ingredient catalog
    pub ingredients: Option<Vec<CatalogIngredient>>,
    /// Add-on catalog
    pub add_ons: Option<Vec<CatalogAddOn>>,
    /// Units
    pub units: Option<MeasurementUnits>,
    /// Material served by `fetch_material`
    pub material: Option<MaterialRecord>,
    /// Fail every submit with a validation error
    pub reject_submit: bool,
    /// Every submitted request
    pub submissions: Mutex<Vec<SubmitMaterialRequest>>,
}

impl MockMaterialApi {
    /// Backend serving the sample catalogs and [`sample_record`].
    pub fn with_catalogs() -> Self {
        Self {
            ingredients: Some(sample_ingredients()),
            add_ons: Some(sample_add_ons()),
            units: Some(sample_units()),
            material: Some(sample_record()),
            ..Self::default()
        }
    }

    /// Requests received so far.
    pub fn submitted(&self) -> Vec<SubmitMaterialRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

fn unavailable(what: &str) -> Error {
    Error::Api {
        status: 503,
        message: format!("{what} unavailable"),
    }
}

#[async_trait]
impl MaterialApi for MockMaterialApi {
    async fn fetch_ingredients(&self) -> Result<Vec<CatalogIngredient>> {
        self.ingredients.clone().ok_or_else(|| unavailable("ingredients"))
    }

    async fn fetch_add_ons(&self) -> Result<Vec<CatalogAddOn>> {
        self.add_ons.clone().ok_or_else(|| unavailable("add-ons"))
    }

    async fn fetch_units(&self) -> Result<MeasurementUnits> {
        self.units.clone().ok_or_else(|| unavailable("units"))
    }

    async fn fetch_material(&self, material_id: &str) -> Result<MaterialRecord> {
        self.material
            .clone()
            .filter(|m| m.id.as_deref() == Some(material_id))
            .ok_or_else(|| Error::NotFound(format!("material {material_id}")))
    }

    async fn submit_material(&self, request: &SubmitMaterialRequest) -> Result<MaterialRecord> {
        self.submissions.lock().unwrap().push(request.clone());
        if self.reject_submit {
            return Err(Error::Validation("variant sizes are required".to_string()));
        }

        // Assign ids the way the backend would and recompute a flat cost per ingredient
        let variants = request
            .variants
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut saved = v.clone();
                saved.id = v.id.clone().or_else(|| Some(format!("v-new-{i}")));
                for (j, ingredient) in saved.ingredients.iter_mut().enumerate() {
                    if ingredient.relation_id.is_none() {
                        ingredient.relation_id = Some(format!("r-new-{i}-{j}"));
                    }
                }
                for (j, add_on) in saved.add_ons.iter_mut().enumerate() {
                    if add_on.relation_id.is_none() {
                        add_on.relation_id = Some(format!("a-new-{i}-{j}"));
                    }
                }
                #[allow(clippy::cast_precision_loss)]
                let cost = 1_000.0 * saved.ingredients.len() as f64;
                saved.cost_estimate = Some(cost);
                saved
            })
            .collect();

        Ok(MaterialRecord {
            id: request.id.clone().or_else(|| Some("mat-new".to_string())),
            product_id: request.product_id.clone(),
            shape: request.shape,
            use_custom_cost: request.use_custom_cost,
            multiplier: Some(request.multiplier),
            additional_cost: Some(request.additional_cost),
            variants,
            updated_at: Some(chrono::Utc::now()),
        })
    }
}
