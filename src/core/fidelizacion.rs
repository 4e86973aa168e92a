//! Loyalty eligibility engine.
//!
//! Identifies the clientes eligible for the fidelización program: active
//! clientes whose completed compras within a trailing window sum to at least
//! a minimum amount. The whole computation is one aggregation pass over the
//! matching compras, so the total that is threshold-tested is by
//! construction the total that gets reported.

use crate::{
    entities::{Cliente, Compra, EstadoCompra, TipoDocumento, cliente, compra},
    errors::Result,
};
use chrono::Duration;
use rust_decimal::Decimal;
use sea_orm::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// One row of the eligibility result: a qualifying cliente and their
/// completed-purchase total inside the window.
#[derive(Debug, Clone)]
pub struct ClienteElegible {
    /// The qualifying cliente
    pub cliente: cliente::Model,
    /// Display name of the cliente's tipo de documento
    pub tipo_documento: String,
    /// Sum of completed compras within the window, exact to two decimals
    pub total: Decimal,
}

/// Computes the clientes eligible for the loyalty program.
///
/// A cliente qualifies when it is active and the sum of its compras with
/// estado `completada` and `fecha_compra >= as_of - ventana_dias` reaches
/// `monto_minimo`. Sums are folded in `Decimal`; no floating point is
/// involved. The result is sorted descending by total, with ties broken
/// ascending by cliente id so the output is deterministic.
///
/// An empty result is a normal outcome here; the report layer decides
/// whether that becomes a not-found condition.
pub async fn clientes_elegibles(
    db: &DatabaseConnection,
    as_of: DateTimeUtc,
    ventana_dias: i64,
    monto_minimo: Decimal,
) -> Result<Vec<ClienteElegible>> {
    let corte = as_of - Duration::days(ventana_dias);

    let compras = Compra::find()
        .filter(compra::Column::Estado.eq(EstadoCompra::Completada))
        .filter(compra::Column::FechaCompra.gte(corte))
        .all(db)
        .await?;

    if compras.is_empty() {
        return Ok(Vec::new());
    }

    // Single pass: the per-cliente total used for the threshold test is the
    // same value that ends up in the report.
    let mut totales: HashMap<i64, Decimal> = HashMap::new();
    for c in &compras {
        *totales.entry(c.cliente_id).or_insert(Decimal::ZERO) += c.monto;
    }

    let ids: Vec<i64> = totales.keys().copied().collect();
    let clientes = Cliente::find()
        .filter(cliente::Column::Activo.eq(true))
        .filter(cliente::Column::Id.is_in(ids))
        .all(db)
        .await?;

    let tipos: HashMap<i64, String> = TipoDocumento::find()
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.nombre))
        .collect();

    let mut elegibles: Vec<ClienteElegible> = clientes
        .into_iter()
        .filter_map(|cl| {
            let total = totales.get(&cl.id).copied().unwrap_or(Decimal::ZERO);
            if total < monto_minimo {
                return None;
            }
            let tipo_documento = tipos.get(&cl.tipo_documento_id).cloned().unwrap_or_default();
            Some(ClienteElegible {
                cliente: cl,
                tipo_documento,
                total,
            })
        })
        .collect();

    elegibles.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.cliente.id.cmp(&b.cliente.id))
    });

    debug!(
        elegibles = elegibles.len(),
        ventana_dias, "Cómputo de fidelización terminado"
    );

    Ok(elegibles)
}
