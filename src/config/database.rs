//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{Cliente, Compra, TipoDocumento};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Statements carry `IF NOT EXISTS` so this is safe to run on every
/// startup against an existing database file.
///
/// # Errors
/// Returns an error if any table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut tipo_documento_table = schema.create_table_from_entity(TipoDocumento);
    let mut cliente_table = schema.create_table_from_entity(Cliente);
    let mut compra_table = schema.create_table_from_entity(Compra);

    tipo_documento_table.if_not_exists();
    cliente_table.if_not_exists();
    compra_table.if_not_exists();

    db.execute(builder.build(&tipo_documento_table)).await?;
    db.execute(builder.build(&cliente_table)).await?;
    db.execute(builder.build(&compra_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        cliente::Model as ClienteModel, compra::Model as CompraModel,
        tipo_documento::Model as TipoDocumentoModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<TipoDocumentoModel> = TipoDocumento::find().limit(1).all(&db).await?;
        let _: Vec<ClienteModel> = Cliente::find().limit(1).all(&db).await?;
        let _: Vec<CompraModel> = Compra::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<ClienteModel> = Cliente::find().limit(1).all(&db).await?;
        Ok(())
    }
}
