//! Application configuration: database location, HTTP port, and loyalty
//! report parameters.

/// Database connection and table creation
pub mod database;

/// Loyalty ("fidelización") report parameters from config.toml
pub mod fidelizacion;

use crate::errors::Result;
use tracing::debug;

/// Default `SQLite` database URL (`mode=rwc` so the file is created on
/// first run).
const DEFAULT_DATABASE_URL: &str = "sqlite://data/fideliza.sqlite?mode=rwc";

/// Default HTTP port when `PORT` is not set.
const DEFAULT_PORT: u16 = 8000;

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database URL (`DATABASE_URL` env var, SQLite file by default)
    pub database_url: String,
    /// HTTP port to bind (`PORT` env var)
    pub puerto: u16,
    /// Loyalty report parameters (config.toml, with coded defaults)
    pub fidelizacion: fidelizacion::FidelizacionConfig,
}

/// Loads the complete application configuration from the environment and
/// the optional `config.toml` file.
///
/// # Errors
/// Returns an error if `config.toml` exists but cannot be parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let puerto = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let fidelizacion = fidelizacion::load_default_config()?;
    debug!(
        ventana_dias = fidelizacion.ventana_dias,
        %fidelizacion.monto_minimo,
        "Configuración de fidelización cargada"
    );

    Ok(AppConfig {
        database_url,
        puerto,
        fidelizacion,
    })
}
