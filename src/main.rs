use dotenvy::dotenv;
use pastry_materials::{
    api::HttpMaterialApi,
    config,
    core::{selectors, session::EditorSession},
    errors::{Error, Result},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    let material_id = std::env::args().nth(1).ok_or_else(|| Error::Config {
        message: "usage: pastry-materials <material-id>".to_string(),
    })?;

    // 4. Open the editor on the requested material set
    let api = HttpMaterialApi::new(&app_config.api)?;
    let mut session = EditorSession::open(&api, &material_id, &app_config.editor)
        .await
        .inspect_err(|e| error!("Failed to open material {}: {}", material_id, e))?;
    session.refresh_catalogs(&api).await;

    // 5. Summarize what the editor would show
    let state = session.state();
    let catalog = session.catalog();
    info!(
        "Product {} ({:?}), pricing {:?}",
        state.product_id, state.shape, state.pricing
    );
    for (variant, price) in state.variants.iter().zip(session.display_prices()) {
        let eligible = selectors::eligible_ingredients(&catalog.ingredients, variant).len();
        match price {
            Some(price) => info!(
                "{}: {} ingredients, {} add-ons, display price {}, {} more ingredients available",
                variant.name,
                variant.ingredients.len(),
                variant.add_ons.len(),
                price,
                eligible
            ),
            None => warn!(
                "{}: {} ingredients, {} add-ons, no cost estimate yet",
                variant.name,
                variant.ingredients.len(),
                variant.add_ons.len()
            ),
        }
    }

    session.close();
    Ok(())
}
