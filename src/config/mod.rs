/// Backend connection settings and their environment overrides
pub mod api;

/// Editor defaults (multiplier)
pub mod editor;

/// `config.toml` loading
pub mod settings;

pub use settings::{AppConfig, load_app_configuration, load_config};
