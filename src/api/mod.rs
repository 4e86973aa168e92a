//! HTTP layer - axum routes and handlers over the core operations.
//!
//! Mirrors the REST surface the surrounding application expects:
//! tipos de documento, cliente CRUD and búsqueda, compra creation, the
//! multi-format profile export, and the fidelización report. Handlers stay
//! thin; every decision lives in `core`.

/// Cliente, tipo de documento, and compra handlers
pub mod clientes;
/// Fidelización report handler
pub mod reportes;

use crate::config::fidelizacion::FidelizacionConfig;
use crate::core::export::Export;
use crate::errors::Error;
use axum::{
    Json, Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde_json::json;

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all store operations
    pub db: DatabaseConnection,
    /// Loyalty report parameters
    pub fidelizacion: FidelizacionConfig,
}

/// Builds the application router with all API routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tipos-documento", get(clientes::listar_tipos_documento))
        .route("/api/clientes", get(clientes::listar).post(clientes::crear))
        .route("/api/clientes/buscar", get(clientes::buscar))
        .route(
            "/api/clientes/:id",
            get(clientes::obtener).delete(clientes::eliminar),
        )
        .route("/api/clientes/:id/exportar", get(clientes::exportar))
        .route("/api/compras", post(clientes::crear_compra))
        .route("/api/reporte-fidelizacion/generar", get(reportes::generar))
        .with_state(state)
}

/// Wraps a rendered export as an attachment download response.
pub(crate) fn respuesta_descarga(export: Export) -> Response {
    (
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.bytes,
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, cuerpo) = match &self {
            Error::ClienteNoEncontrado { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Cliente no encontrado" }),
            ),
            Error::SinClientesElegibles => (
                StatusCode::NOT_FOUND,
                json!({ "mensaje": self.to_string() }),
            ),
            Error::FormatoInvalido { .. } => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            Error::Validacion { message } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            _ => {
                tracing::error!("Error interno: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Error interno del servidor" }),
                )
            }
        };
        (status, Json(cuerpo)).into_response()
    }
}
