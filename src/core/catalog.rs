//! Catalog loading for editing sessions.
//!
//! The three catalog fetches run concurrently. A failed fetch is logged and simply
//! produces no event, so the session keeps whatever list it had before.

use crate::api::MaterialApi;
use crate::core::session::{EditorSession, SessionEvent};
use crate::entities::{CatalogAddOn, CatalogIngredient, MeasurementUnits};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Reference data a session edits against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// All catalog ingredients
    pub ingredients: Vec<CatalogIngredient>,
    /// All catalog add-ons
    pub add_ons: Vec<CatalogAddOn>,
    /// Valid units per category
    pub units: MeasurementUnits,
}

/// Fetches ingredients, add-ons and units concurrently.
///
/// Returns one event per successful fetch. Failures are logged and skipped; there
/// is no retry.
pub async fn fetch_catalog_events<A: MaterialApi + ?Sized>(api: &A) -> Vec<SessionEvent> {
    info!("Refreshing ingredient, add-on and unit catalogs...");
    let (ingredients, add_ons, units) =
        tokio::join!(api.fetch_ingredients(), api.fetch_add_ons(), api.fetch_units());

    let mut events = Vec::with_capacity(3);
    match ingredients {
        Ok(list) => events.push(SessionEvent::IngredientsLoaded(list)),
        Err(e) => error!("Failed to fetch ingredient catalog: {}", e),
    }
    match add_ons {
        Ok(list) => events.push(SessionEvent::AddOnsLoaded(list)),
        Err(e) => error!("Failed to fetch add-on catalog: {}", e),
    }
    match units {
        Ok(units) => events.push(SessionEvent::UnitsLoaded(units)),
        Err(e) => error!("Failed to fetch measurement units: {}", e),
    }
    events
}

/// Refreshes the catalogs of a session shared with the UI.
///
/// The lock is only taken once the fetches have completed, so edits can continue
/// while requests are in flight. Returns the number of catalogs replaced.
pub async fn refresh_shared_session<A: MaterialApi + ?Sized>(
    api: &A,
    session: &Arc<RwLock<EditorSession>>,
) -> usize {
    let events = fetch_catalog_events(api).await;
    let applied = events.len();

    let mut writer = session.write().await;
    if !writer.is_open() {
        info!("Session closed before catalogs arrived, discarding {} results", applied);
        return 0;
    }
    for event in events {
        writer.receive(event);
    }
    info!(
        "Catalogs refreshed: {} ingredients, {} add-ons",
        writer.catalog().ingredients.len(),
        writer.catalog().add_ons.len()
    );
    applied
}
