//! Tipo de documento entity - Reference data for identity document kinds.
//!
//! Each row classifies an identity document (NIT, cédula, pasaporte) and is
//! referenced by clientes as half of their natural key. Rows are deactivated
//! via `activo` rather than deleted while any cliente references them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tipo de documento database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tipos_documento")]
pub struct Model {
    /// Unique identifier for the tipo de documento
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short unique code (e.g., `"CC"`, `"NIT"`, `"PP"`)
    #[sea_orm(unique)]
    pub codigo: String,
    /// Display name (e.g., "Cédula de Ciudadanía")
    pub nombre: String,
    /// Optional longer description
    pub descripcion: Option<String>,
    /// Whether this tipo is available for new clientes
    pub activo: bool,
}

/// Defines relationships between `TipoDocumento` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One tipo de documento is referenced by many clientes
    #[sea_orm(has_many = "super::cliente::Entity")]
    Clientes,
}

impl Related<super::cliente::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clientes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
