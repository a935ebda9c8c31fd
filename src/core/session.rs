//! Editing session - one open editor dialog.
//!
//! The session owns the editor snapshot and the catalogs it is edited against. UI
//! intents are applied synchronously through [`EditorSession::dispatch`]. Fetches
//! complete independently and deliver their results as [`SessionEvent`]s; the most
//! recent result wins and results arriving after close are dropped.

use crate::api::MaterialApi;
use crate::config::editor::EditorConfig;
use crate::core::catalog::{Catalog, fetch_catalog_events};
use crate::core::editor::{Action, EditorState, reduce};
use crate::core::selectors;
use crate::core::variant::Variant;
use crate::entities::{CatalogAddOn, CatalogIngredient, MaterialRecord, MeasurementUnits, Shape};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

/// Result of an asynchronous fetch, applied to the session on completion.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Catalog ingredients arrived
    IngredientsLoaded(Vec<CatalogIngredient>),
    /// Catalog add-ons arrived
    AddOnsLoaded(Vec<CatalogAddOn>),
    /// Measurement units arrived
    UnitsLoaded(MeasurementUnits),
    /// A save completed; carries the backend's copy of the material set
    Saved(MaterialRecord),
}

/// One open variant editor.
#[derive(Debug, Clone)]
pub struct EditorSession {
    state: EditorState,
    catalog: Catalog,
    open: bool,
    opened_at: DateTime<Utc>,
}

impl EditorSession {
    /// Wraps an existing snapshot in an open session with empty catalogs.
    #[must_use]
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            catalog: Catalog::default(),
            open: true,
            opened_at: Utc::now(),
        }
    }

    /// Opens an empty editor for a product with no material set yet.
    #[must_use]
    pub fn open_new(product_id: impl Into<String>, shape: Shape, config: &EditorConfig) -> Self {
        Self::new(EditorState::new(product_id, shape, config.default_multiplier))
    }

    /// Opens the editor on an existing material set fetched from the backend.
    ///
    /// The ingredient catalog is fetched alongside so that ingredients arriving
    /// without a unit get their type's default. If only that fetch fails the
    /// session still opens, with the solid default for those ingredients.
    ///
    /// # Errors
    /// Returns the material fetch error; no session is created.
    #[instrument(skip(api, config))]
    pub async fn open<A: MaterialApi + ?Sized>(
        api: &A,
        material_id: &str,
        config: &EditorConfig,
    ) -> Result<Self> {
        let (record, ingredients) =
            tokio::join!(api.fetch_material(material_id), api.fetch_ingredients());
        let record = record?;
        let ingredients = ingredients
            .inspect_err(|e| warn!("Opening without ingredient catalog: {}", e))
            .unwrap_or_default();
        info!(
            "Opened material {} for product {} with {} variants",
            material_id,
            record.product_id,
            record.variants.len()
        );

        let mut session = Self::new(EditorState::from_record(
            record,
            &ingredients,
            config.default_multiplier,
        ));
        if !ingredients.is_empty() {
            session.receive(SessionEvent::IngredientsLoaded(ingredients));
        }
        Ok(session)
    }

    /// Current snapshot.
    #[must_use]
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// Catalogs loaded so far.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the session still accepts edits and fetch results.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// When the session was opened.
    #[must_use]
    pub const fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Applies one edit.
    ///
    /// # Errors
    /// Returns `Error::SessionClosed` once the session has been closed.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        if !self.open {
            return Err(Error::SessionClosed);
        }
        debug!("Dispatching {:?}", action);
        self.state = reduce(self.state.clone(), action);
        Ok(())
    }

    /// Appends an empty variant sized for the product's shape.
    pub fn add_variant(&mut self) -> Result<()> {
        self.dispatch(Action::AddVariant(Variant::new(self.state.shape)))
    }

    /// Adds the first eligible catalog ingredient to a variant.
    ///
    /// Returns `false` without changing anything when every catalog ingredient is
    /// already used or the variant does not exist.
    pub fn add_next_ingredient(&mut self, variant: usize) -> Result<bool> {
        let next = self
            .state
            .variants
            .get(variant)
            .and_then(|v| selectors::first_eligible_ingredient(&self.catalog.ingredients, v))
            .cloned();
        match next {
            Some(ingredient) => {
                let unit = self.catalog.units.default_unit(ingredient.kind).to_string();
                self.dispatch(Action::AddIngredient {
                    variant,
                    ingredient,
                    unit: Some(unit),
                })
                .map(|()| true)
            }
            None => Ok(false),
        }
    }

    /// Adds the first eligible catalog add-on to a variant.
    pub fn add_next_add_on(&mut self, variant: usize) -> Result<bool> {
        let next = self
            .state
            .variants
            .get(variant)
            .and_then(|v| selectors::first_eligible_add_on(&self.catalog.add_ons, v))
            .cloned();
        match next {
            Some(add_on) => self
                .dispatch(Action::AddAddOn { variant, add_on })
                .map(|()| true),
            None => Ok(false),
        }
    }

    /// Display price of every variant, in order.
    #[must_use]
    pub fn display_prices(&self) -> Vec<Option<f64>> {
        self.state
            .variants
            .iter()
            .map(|v| selectors::display_price(v, &self.state.pricing))
            .collect()
    }

    /// Applies a fetch result. Ignored once the session is closed.
    pub fn receive(&mut self, event: SessionEvent) {
        if !self.open {
            debug!("Dropping {:?} for closed session", event);
            return;
        }
        match event {
            SessionEvent::IngredientsLoaded(ingredients) => {
                debug!("Ingredient catalog now has {} items", ingredients.len());
                self.catalog.ingredients = ingredients;
            }
            SessionEvent::AddOnsLoaded(add_ons) => {
                debug!("Add-on catalog now has {} items", add_ons.len());
                self.catalog.add_ons = add_ons;
            }
            SessionEvent::UnitsLoaded(units) => self.catalog.units = units,
            SessionEvent::Saved(record) => {
                self.state = EditorState::from_record(
                    record,
                    &self.catalog.ingredients,
                    self.state.default_multiplier,
                );
            }
        }
    }

    /// Reloads ingredients, add-ons and units. Failed fetches keep the previous list.
    pub async fn refresh_catalogs<A: MaterialApi + ?Sized>(&mut self, api: &A) {
        for event in fetch_catalog_events(api).await {
            self.receive(event);
        }
    }

    /// Submits the snapshot and its deletion sets.
    ///
    /// On success the snapshot is replaced by the backend's copy and the session
    /// closes. On failure the session stays open with every edit intact so the
    /// user can retry.
    ///
    /// # Errors
    /// Returns `Error::SessionClosed` for a closed session, otherwise the
    /// backend's error.
    #[instrument(skip(self, api), fields(product_id = %self.state.product_id))]
    pub async fn save<A: MaterialApi + ?Sized>(&mut self, api: &A) -> Result<MaterialRecord> {
        if !self.open {
            return Err(Error::SessionClosed);
        }
        let request = self.state.to_submit_request();
        let record = api
            .submit_material(&request)
            .await
            .inspect_err(|e| warn!("Saving material set failed, edits kept: {}", e))?;

        info!(
            "Saved {} variants, deleted {} variants, {} ingredients, {} add-ons",
            request.variants.len(),
            request.deleted_variants.len(),
            request.deleted_ingredients.len(),
            request.deleted_add_ons.len()
        );
        self.receive(SessionEvent::Saved(record.clone()));
        self.close();
        Ok(record)
    }

    /// Closes the session; later edits fail and later fetch results are dropped.
    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::sizing::Sizing;
    use crate::core::variant::VariantPatch;
    use crate::entities::{IngredientRecord, IngredientType, MeasurementCategory};
    use crate::test_utils::*;

    fn loaded_session() -> EditorSession {
        let mut session = EditorSession::new(sample_state());
        session.receive(SessionEvent::IngredientsLoaded(sample_ingredients()));
        session.receive(SessionEvent::AddOnsLoaded(sample_add_ons()));
        session.receive(SessionEvent::UnitsLoaded(sample_units()));
        session
    }

    #[test]
    fn test_add_next_ingredient_until_exhausted() -> Result<()> {
        let mut session = loaded_session();

        // flour is already used, three more are eligible
        for _ in 0..3 {
            assert!(session.add_next_ingredient(0)?);
        }
        assert!(!session.add_next_ingredient(0)?);
        assert_eq!(session.state().variants[0].ingredients.len(), 4);

        assert!(!session.add_next_ingredient(99)?);
        Ok(())
    }

    #[test]
    fn test_add_next_ingredient_uses_loaded_unit_names() -> Result<()> {
        let mut session = loaded_session();
        let mut units = sample_units();
        units
            .0
            .insert(MeasurementCategory::Mass, vec!["g".to_string(), "kg".to_string()]);
        session.receive(SessionEvent::UnitsLoaded(units));

        // sugar is the first eligible ingredient
        assert!(session.add_next_ingredient(0)?);
        let sugar = session.state().variants[0].ingredients.last().unwrap();
        assert_eq!(sugar.ingredient_id, "sugar");
        assert_eq!(sugar.unit, "g");
        assert!(
            selectors::valid_units(&session.catalog().units, IngredientType::Solid)
                .contains(&sugar.unit)
        );
        Ok(())
    }

    #[test]
    fn test_add_next_add_on_picks_first_unused() -> Result<()> {
        let mut session = loaded_session();
        assert!(session.add_next_add_on(0)?);

        let added = session.state().variants[0].add_ons.last().unwrap();
        assert_eq!(added.add_on_id, "candles");
        assert!(!session.add_next_add_on(0)?);
        Ok(())
    }

    #[test]
    fn test_add_variant_uses_product_shape() -> Result<()> {
        let mut session = EditorSession::open_new("cake-9", Shape::Heart, &EditorConfig::default());
        session.add_variant()?;
        session.dispatch(Action::UpdateVariant {
            index: 0,
            patch: VariantPatch {
                sizing: Some(Sizing::Heart(10.0)),
                ..VariantPatch::default()
            },
        })?;

        assert_eq!(session.state().variants[0].name, "10\"");
        assert_eq!(session.state().pricing.multiplier, 1.0);
        Ok(())
    }

    #[test]
    fn test_latest_catalog_wins() {
        let mut session = loaded_session();
        session.receive(SessionEvent::IngredientsLoaded(vec![catalog_ingredient(
            "cocoa",
            "Cocoa",
            IngredientType::Solid,
        )]));

        assert_eq!(session.catalog().ingredients.len(), 1);
        assert_eq!(session.catalog().ingredients[0].id, "cocoa");
    }

    #[test]
    fn test_closed_session_ignores_events_and_edits() {
        let mut session = EditorSession::new(sample_state());
        session.close();

        session.receive(SessionEvent::AddOnsLoaded(sample_add_ons()));
        assert!(session.catalog().add_ons.is_empty());

        let result = session.add_variant();
        assert!(matches!(result, Err(Error::SessionClosed)));
    }

    #[test]
    fn test_display_prices_follow_policy() {
        let session = loaded_session();
        // 10_000 × 1.5, second variant has no estimate yet
        assert_eq!(session.display_prices(), vec![Some(15_000.0), None]);
    }

    #[tokio::test]
    async fn test_open_fetches_material() -> Result<()> {
        init_test_tracing();
        let api = MockMaterialApi::with_catalogs();

        let session = EditorSession::open(&api, "mat-1", &EditorConfig::default()).await?;
        assert!(session.is_open());
        assert_eq!(session.state().material_id.as_deref(), Some("mat-1"));
        assert_eq!(session.state().variants.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_open_picks_unit_from_ingredient_type() -> Result<()> {
        init_test_tracing();
        let mut record = sample_record();
        record.variants[1].ingredients.push(IngredientRecord {
            relation_id: Some("R2".to_string()),
            ingredient_id: "milk".to_string(),
            amount: Some(200.0),
            unit: None,
        });
        let api = MockMaterialApi {
            material: Some(record),
            ..MockMaterialApi::with_catalogs()
        };

        let mut session = EditorSession::open(&api, "mat-1", &EditorConfig::default()).await?;
        assert_eq!(session.catalog().ingredients, sample_ingredients());
        session.refresh_catalogs(&api).await;
        assert_eq!(session.state().variants[1].ingredients[0].unit, "Milliliter");

        session.save(&api).await?;
        let submitted = api.submitted();
        assert_eq!(
            submitted[0].variants[1].ingredients[0].unit.as_deref(),
            Some("Milliliter")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_open_survives_missing_ingredient_catalog() -> Result<()> {
        let api = MockMaterialApi {
            ingredients: None,
            ..MockMaterialApi::with_catalogs()
        };
        let session = EditorSession::open(&api, "mat-1", &EditorConfig::default()).await?;
        assert!(session.catalog().ingredients.is_empty());
        assert_eq!(session.state().variants.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_open_unknown_material_fails() {
        let api = MockMaterialApi::default();
        let result = EditorSession::open(&api, "missing", &EditorConfig::default()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_submits_snapshot_and_closes() -> Result<()> {
        init_test_tracing();
        let api = MockMaterialApi::with_catalogs();
        let mut session = loaded_session();

        session.dispatch(Action::RemoveIngredient {
            variant: 0,
            index: 0,
        })?;
        session.add_variant()?;

        let record = session.save(&api).await?;
        assert!(!session.is_open());
        assert_eq!(record.variants.len(), 3);

        let submitted = api.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].deleted_ingredients, vec!["R1".to_string()]);

        // Snapshot now mirrors the backend: every variant has an id, deletions are settled
        assert!(session.state().variants.iter().all(Variant::is_persisted));
        assert!(session.state().deleted.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits() -> Result<()> {
        init_test_tracing();
        let api = MockMaterialApi {
            reject_submit: true,
            ..MockMaterialApi::with_catalogs()
        };
        let mut session = loaded_session();
        session.dispatch(Action::RemoveVariant { index: 0 })?;
        let before = session.state().clone();

        let result = session.save(&api).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(session.is_open());
        assert_eq!(session.state(), &before);
        assert_eq!(session.state().deleted.variants, vec!["v1".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_catalogs_keeps_stale_lists_on_failure() {
        init_test_tracing();
        let mut session = loaded_session();
        let api = MockMaterialApi {
            ingredients: None,
            ..MockMaterialApi::with_catalogs()
        };
        let fresh_add_ons = vec![catalog_add_on("sprinkles", "Sprinkles")];
        let api = MockMaterialApi {
            add_ons: Some(fresh_add_ons.clone()),
            ..api
        };

        session.refresh_catalogs(&api).await;
        assert_eq!(session.catalog().ingredients, sample_ingredients());
        assert_eq!(session.catalog().add_ons, fresh_add_ons);
    }
}
