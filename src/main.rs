//! Binary entry point: configuration, database setup, and the HTTP server.

use dotenvy::dotenv;
use fideliza::{api, config, errors::Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,sea_orm=warn")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;
    info!("Configuración cargada");

    // 4. Initialize the database (the default URL lives under data/)
    if app_config.database_url.contains("sqlite://data/") {
        std::fs::create_dir_all("data")?;
    }
    let db = config::database::connect(&app_config.database_url).await?;
    config::database::create_tables(&db).await?;
    info!("Base de datos inicializada");

    // 5. Build the router and serve
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = api::AppState {
        db,
        fidelizacion: app_config.fidelizacion.clone(),
    };
    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.puerto));
    let listener = TcpListener::bind(addr).await?;
    info!("Servidor escuchando en {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
