//! Compra entity - Purchase records attached to a cliente.
//!
//! Each compra belongs to exactly one cliente for its lifetime and carries a
//! globally unique `numero_factura`. Amounts are stored as exact decimals
//! with two places of currency precision. Only compras whose `estado` is
//! [`EstadoCompra::Completada`] count toward monetary aggregations.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Compra database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "compras")]
pub struct Model {
    /// Unique identifier for the compra
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the cliente this compra belongs to
    pub cliente_id: i64,
    /// Invoice number, globally unique across all clientes
    #[sea_orm(unique)]
    pub numero_factura: String,
    /// When the purchase took place
    pub fecha_compra: DateTimeUtc,
    /// Monetary amount (COP), non-negative, two decimal places
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub monto: Decimal,
    /// Optional free-text description
    pub descripcion: Option<String>,
    /// Purchase status: `pendiente`, `completada`, or `cancelada`
    pub estado: EstadoCompra,
}

/// Status of a compra. Only `Completada` contributes to totals.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum EstadoCompra {
    /// Purchase not yet settled
    #[sea_orm(string_value = "pendiente")]
    Pendiente,
    /// Purchase settled; the only status counted in aggregations
    #[sea_orm(string_value = "completada")]
    Completada,
    /// Purchase cancelled
    #[sea_orm(string_value = "cancelada")]
    Cancelada,
}

impl EstadoCompra {
    /// The stored/displayed form of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::Completada => "completada",
            Self::Cancelada => "cancelada",
        }
    }
}

impl std::fmt::Display for EstadoCompra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines relationships between Compra and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each compra belongs to one cliente
    #[sea_orm(
        belongs_to = "super::cliente::Entity",
        from = "Column::ClienteId",
        to = "super::cliente::Column::Id",
        on_delete = "Cascade"
    )]
    Cliente,
}

impl Related<super::cliente::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cliente.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
