//! Cliente entity - Customer master data.
//!
//! A cliente is identified by the pair (`tipo_documento_id`,
//! `numero_documento`); that uniqueness is enforced at creation time in the
//! core layer. `fecha_registro` is set once when the row is created and
//! never updated. Deleting a cliente removes its compras as well.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cliente database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    /// Unique identifier for the cliente
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the tipo de documento forming the natural key
    pub tipo_documento_id: i64,
    /// Document number, unique per tipo de documento
    pub numero_documento: String,
    /// First name
    pub nombre: String,
    /// Surname
    pub apellido: String,
    /// Email address
    pub correo: String,
    /// Phone number
    pub telefono: String,
    /// When the cliente was registered (set once at creation)
    pub fecha_registro: DateTimeUtc,
    /// Whether the cliente is active; inactive clientes are invisible to
    /// búsqueda and to the loyalty report
    pub activo: bool,
}

impl Model {
    /// Full name, derived from `nombre` and `apellido` (never stored).
    #[must_use]
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Defines relationships between Cliente and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cliente references one tipo de documento
    #[sea_orm(
        belongs_to = "super::tipo_documento::Entity",
        from = "Column::TipoDocumentoId",
        to = "super::tipo_documento::Column::Id"
    )]
    TipoDocumento,
    /// One cliente has many compras
    #[sea_orm(has_many = "super::compra::Entity")]
    Compras,
}

impl Related<super::tipo_documento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TipoDocumento.def()
    }
}

impl Related<super::compra::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Compras.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
