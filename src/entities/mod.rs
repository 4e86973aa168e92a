//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod cliente;
pub mod compra;
pub mod tipo_documento;

// Re-export specific types to avoid conflicts
pub use cliente::{Column as ClienteColumn, Entity as Cliente, Model as ClienteModel};
pub use compra::{
    Column as CompraColumn, Entity as Compra, EstadoCompra, Model as CompraModel,
};
pub use tipo_documento::{
    Column as TipoDocumentoColumn, Entity as TipoDocumento, Model as TipoDocumentoModel,
};
