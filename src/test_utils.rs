//! Shared test utilities for `Fideliza`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::{cliente, compra},
    entities::{self, EstadoCompra},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test tipo de documento, active by default.
pub async fn create_test_tipo_documento(
    db: &DatabaseConnection,
    codigo: &str,
    nombre: &str,
) -> Result<entities::tipo_documento::Model> {
    let tipo = entities::tipo_documento::ActiveModel {
        codigo: Set(codigo.to_string()),
        nombre: Set(nombre.to_string()),
        descripcion: Set(None),
        activo: Set(true),
        ..Default::default()
    };
    tipo.insert(db).await.map_err(Into::into)
}

/// Creates a test cliente with sensible defaults.
///
/// # Defaults
/// * `nombre`: `"Juan"`
/// * `apellido`: `"Pérez"`
/// * `correo`: `"juan.perez@example.com"`
/// * `telefono`: `"3001234567"`
pub async fn create_test_cliente(
    db: &DatabaseConnection,
    tipo_documento_id: i64,
    numero_documento: &str,
) -> Result<entities::cliente::Model> {
    cliente::crear_cliente(
        db,
        tipo_documento_id,
        numero_documento.to_string(),
        "Juan".to_string(),
        "Pérez".to_string(),
        "juan.perez@example.com".to_string(),
        "3001234567".to_string(),
    )
    .await
}

/// Creates a test cliente with custom name and active flag.
/// Use this when a test needs an inactive cliente or specific ordering.
pub async fn create_custom_cliente(
    db: &DatabaseConnection,
    tipo_documento_id: i64,
    numero_documento: &str,
    nombre: &str,
    apellido: &str,
    activo: bool,
) -> Result<entities::cliente::Model> {
    let cliente = entities::cliente::ActiveModel {
        tipo_documento_id: Set(tipo_documento_id),
        numero_documento: Set(numero_documento.to_string()),
        nombre: Set(nombre.to_string()),
        apellido: Set(apellido.to_string()),
        correo: Set(format!(
            "{}.{}@example.com",
            nombre.to_lowercase(),
            apellido.to_lowercase()
        )),
        telefono: Set("3001234567".to_string()),
        fecha_registro: Set(chrono::Utc::now()),
        activo: Set(activo),
        ..Default::default()
    };
    cliente.insert(db).await.map_err(Into::into)
}

/// Creates a test compra with sensible defaults.
///
/// # Defaults
/// * `fecha_compra`: now
/// * `estado`: completada
/// * `descripcion`: None
pub async fn create_test_compra(
    db: &DatabaseConnection,
    cliente_id: i64,
    numero_factura: &str,
    monto: i64,
) -> Result<entities::compra::Model> {
    compra::crear_compra(
        db,
        cliente_id,
        numero_factura.to_string(),
        None,
        Decimal::from(monto),
        None,
        None,
    )
    .await
}

/// Creates a test compra with explicit amount, estado, and fecha.
/// Use this for eligibility-window and status-filtering scenarios.
pub async fn create_custom_compra(
    db: &DatabaseConnection,
    cliente_id: i64,
    numero_factura: &str,
    monto: Decimal,
    estado: EstadoCompra,
    fecha_compra: DateTimeUtc,
) -> Result<entities::compra::Model> {
    compra::crear_compra(
        db,
        cliente_id,
        numero_factura.to_string(),
        Some(fecha_compra),
        monto,
        None,
        Some(estado),
    )
    .await
}
