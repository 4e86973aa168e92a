//! Compra business logic - Handles purchase records.
//!
//! Compras are append-only from the core's point of view: they are created
//! here with the invariants the data model requires (globally unique invoice
//! number, non-negative amount, two decimal places) and afterwards only read.
//! Monetary summing is done in exact `Decimal` arithmetic, never in floats.

use crate::{
    entities::{Cliente, Compra, EstadoCompra, compra},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new compra for a cliente.
///
/// Validates that the cliente exists, the invoice number is non-blank and
/// not already taken by any compra of any cliente, and the amount is
/// non-negative. `fecha_compra` defaults to now and `estado` to
/// `completada`, matching how purchases are normally recorded.
pub async fn crear_compra(
    db: &DatabaseConnection,
    cliente_id: i64,
    numero_factura: String,
    fecha_compra: Option<DateTimeUtc>,
    monto: Decimal,
    descripcion: Option<String>,
    estado: Option<EstadoCompra>,
) -> Result<compra::Model> {
    if numero_factura.trim().is_empty() {
        return Err(Error::Validacion {
            message: "El número de factura no puede estar vacío".to_string(),
        });
    }

    if monto < Decimal::ZERO {
        return Err(Error::Validacion {
            message: "El monto no puede ser negativo".to_string(),
        });
    }

    Cliente::find_by_id(cliente_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ClienteNoEncontrado {
            documento: cliente_id.to_string(),
        })?;

    // Invoice numbers are globally unique across all clientes
    let existente = Compra::find()
        .filter(compra::Column::NumeroFactura.eq(numero_factura.trim()))
        .one(db)
        .await?;
    if existente.is_some() {
        return Err(Error::Validacion {
            message: format!(
                "Ya existe una compra con la factura {}",
                numero_factura.trim()
            ),
        });
    }

    let compra = compra::ActiveModel {
        cliente_id: Set(cliente_id),
        numero_factura: Set(numero_factura.trim().to_string()),
        fecha_compra: Set(fecha_compra.unwrap_or_else(chrono::Utc::now)),
        monto: Set(monto.round_dp(2)),
        descripcion: Set(descripcion),
        estado: Set(estado.unwrap_or(EstadoCompra::Completada)),
        ..Default::default()
    };

    let result = compra.insert(db).await?;
    Ok(result)
}

/// Retrieves all compras for a cliente, ordered by fecha (newest first).
///
/// Includes every estado: the profile export must show pending and
/// cancelled purchases too, it is only the aggregations that filter.
pub async fn compras_de_cliente(
    db: &DatabaseConnection,
    cliente_id: i64,
) -> Result<Vec<compra::Model>> {
    Compra::find()
        .filter(compra::Column::ClienteId.eq(cliente_id))
        .order_by_desc(compra::Column::FechaCompra)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Summarizes a cliente's completed compras: `(count, total)`.
///
/// Only compras with estado `completada` participate, and the total is
/// folded in `Decimal` so repeated summing never drifts.
pub async fn resumen_compras(
    db: &DatabaseConnection,
    cliente_id: i64,
) -> Result<(usize, Decimal)> {
    let completadas = Compra::find()
        .filter(compra::Column::ClienteId.eq(cliente_id))
        .filter(compra::Column::Estado.eq(EstadoCompra::Completada))
        .all(db)
        .await?;

    let total = completadas
        .iter()
        .fold(Decimal::ZERO, |acc, c| acc + c.monto);

    Ok((completadas.len(), total))
}
