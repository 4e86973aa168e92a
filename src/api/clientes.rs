//! Cliente-facing handlers: tipos de documento, CRUD, búsqueda, compra
//! creation, and the multi-format profile export.

use super::{AppState, respuesta_descarga};
use crate::{
    core,
    entities::{EstadoCompra, cliente, compra, tipo_documento},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};

/// `GET /api/tipos-documento`
pub async fn listar_tipos_documento(
    State(state): State<AppState>,
) -> Result<Json<Vec<tipo_documento::Model>>> {
    Ok(Json(core::cliente::tipos_documento_activos(&state.db).await?))
}

/// `GET /api/clientes`
pub async fn listar(State(state): State<AppState>) -> Result<Json<Vec<cliente::Model>>> {
    Ok(Json(core::cliente::listar_clientes(&state.db).await?))
}

/// Creation payload for a cliente.
#[derive(Debug, Deserialize)]
pub struct ClienteNuevo {
    /// Tipo de documento id (must reference an active tipo)
    pub tipo_documento_id: i64,
    /// Document number, unique per tipo
    pub numero_documento: String,
    /// First name
    pub nombre: String,
    /// Surname
    pub apellido: String,
    /// Email address
    pub correo: String,
    /// Phone number
    pub telefono: String,
}

/// `POST /api/clientes`
pub async fn crear(
    State(state): State<AppState>,
    Json(payload): Json<ClienteNuevo>,
) -> Result<(StatusCode, Json<cliente::Model>)> {
    let creado = core::cliente::crear_cliente(
        &state.db,
        payload.tipo_documento_id,
        payload.numero_documento,
        payload.nombre,
        payload.apellido,
        payload.correo,
        payload.telefono,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

/// `GET /api/clientes/:id`
pub async fn obtener(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<cliente::Model>> {
    let encontrado = core::cliente::obtener_cliente(&state.db, id)
        .await?
        .ok_or_else(|| Error::ClienteNoEncontrado {
            documento: id.to_string(),
        })?;
    Ok(Json(encontrado))
}

/// `DELETE /api/clientes/:id`
pub async fn eliminar(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    core::cliente::eliminar_cliente(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters of the búsqueda endpoint. Both are required; they
/// arrive as strings so their absence can be reported as a validation
/// error instead of a routing failure.
#[derive(Debug, Deserialize)]
pub struct BusquedaParams {
    /// Tipo de documento id
    pub tipo_documento_id: Option<String>,
    /// Document number
    pub numero_documento: Option<String>,
}

/// Búsqueda response: the cliente with its tipo, purchase history, and
/// completed-purchase summary.
#[derive(Debug, Serialize)]
pub struct ClienteBusqueda {
    /// The cliente's stored fields
    #[serde(flatten)]
    pub cliente: cliente::Model,
    /// Derived full name
    pub nombre_completo: String,
    /// The referenced tipo de documento
    pub tipo_documento: Option<tipo_documento::Model>,
    /// All compras, newest first
    pub compras: Vec<compra::Model>,
    /// Number of completed compras
    pub total_compras: usize,
    /// Exact sum of completed compra amounts
    pub monto_total_compras: Decimal,
}

/// `GET /api/clientes/buscar?tipo_documento_id=..&numero_documento=..`
pub async fn buscar(
    State(state): State<AppState>,
    Query(params): Query<BusquedaParams>,
) -> Result<Json<ClienteBusqueda>> {
    let (tipo_documento_id, numero_documento) = validar_busqueda(&params)?;

    let encontrado =
        core::cliente::buscar_por_documento(&state.db, tipo_documento_id, &numero_documento)
            .await?
            .ok_or_else(|| Error::ClienteNoEncontrado {
                documento: numero_documento.clone(),
            })?;

    let tipo_documento =
        core::cliente::obtener_tipo_documento(&state.db, encontrado.tipo_documento_id).await?;
    let compras = core::compra::compras_de_cliente(&state.db, encontrado.id).await?;
    let (total_compras, monto_total_compras) =
        core::compra::resumen_compras(&state.db, encontrado.id).await?;

    let nombre_completo = encontrado.nombre_completo();
    Ok(Json(ClienteBusqueda {
        cliente: encontrado,
        nombre_completo,
        tipo_documento,
        compras,
        total_compras,
        monto_total_compras,
    }))
}

/// Both búsqueda parameters are mandatory and the id must be numeric.
fn validar_busqueda(params: &BusquedaParams) -> Result<(i64, String)> {
    let faltan = Error::Validacion {
        message: "Se requiere tipo_documento_id y numero_documento".to_string(),
    };

    let tipo = params
        .tipo_documento_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let numero = params
        .numero_documento
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match (tipo, numero) {
        (Some(tipo), Some(numero)) => {
            let tipo_documento_id = tipo.parse().map_err(|_| Error::Validacion {
                message: "tipo_documento_id debe ser numérico".to_string(),
            })?;
            Ok((tipo_documento_id, numero.to_string()))
        }
        _ => Err(faltan),
    }
}

/// Creation payload for a compra.
#[derive(Debug, Deserialize)]
pub struct CompraNueva {
    /// Owning cliente id
    pub cliente_id: i64,
    /// Globally unique invoice number
    pub numero_factura: String,
    /// Purchase timestamp; defaults to now
    pub fecha_compra: Option<DateTimeUtc>,
    /// Monetary amount (COP), non-negative
    pub monto: Decimal,
    /// Optional description
    pub descripcion: Option<String>,
    /// Status; defaults to completada
    pub estado: Option<EstadoCompra>,
}

/// `POST /api/compras`
pub async fn crear_compra(
    State(state): State<AppState>,
    Json(payload): Json<CompraNueva>,
) -> Result<(StatusCode, Json<compra::Model>)> {
    let creada = core::compra::crear_compra(
        &state.db,
        payload.cliente_id,
        payload.numero_factura,
        payload.fecha_compra,
        payload.monto,
        payload.descripcion,
        payload.estado,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(creada)))
}

/// Query parameter of the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportarParams {
    /// One of `csv`, `excel`, `txt`; defaults to `csv`
    pub formato: Option<String>,
}

/// `GET /api/clientes/:id/exportar?formato=csv|excel|txt`
pub async fn exportar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ExportarParams>,
) -> Result<Response> {
    let formato = params.formato.as_deref().unwrap_or("csv").parse()?;
    let export = core::export::exportar_cliente(&state.db, id, formato).await?;
    Ok(respuesta_descarga(export))
}
