//! Fidelización report handler.

use super::{AppState, respuesta_descarga};
use crate::{core, errors::Result};
use axum::{extract::State, response::Response};

/// `GET /api/reporte-fidelizacion/generar`
///
/// Streams the eligibility report as an XLSX attachment, or maps the
/// no-eligible-customers condition to a 404 with an explanatory message.
pub async fn generar(State(state): State<AppState>) -> Result<Response> {
    let export =
        core::reporte::generar_reporte_fidelizacion(&state.db, &state.fidelizacion).await?;
    Ok(respuesta_descarga(export))
}
