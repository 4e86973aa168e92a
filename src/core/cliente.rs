//! Cliente business logic - Handles all cliente-related operations.
//!
//! Provides functions for looking up clientes by natural key, creating them
//! with the uniqueness checks the data model requires, listing, and deleting
//! them together with their compras. All functions are async and return
//! Result types for error handling.

use crate::{
    entities::{Cliente, Compra, TipoDocumento, cliente, compra, tipo_documento},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Retrieves all active tipos de documento, ordered alphabetically by name.
///
/// This is the list offered to callers when they need to identify a cliente;
/// deactivated tipos stay out of it but remain referenced by existing rows.
pub async fn tipos_documento_activos(
    db: &DatabaseConnection,
) -> Result<Vec<tipo_documento::Model>> {
    TipoDocumento::find()
        .filter(tipo_documento::Column::Activo.eq(true))
        .order_by_asc(tipo_documento::Column::Nombre)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a tipo de documento by its unique ID.
pub async fn obtener_tipo_documento(
    db: &DatabaseConnection,
    tipo_documento_id: i64,
) -> Result<Option<tipo_documento::Model>> {
    TipoDocumento::find_by_id(tipo_documento_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a cliente by its unique ID, regardless of active flag.
///
/// Used for direct lookups by primary key, such as the export operation,
/// which must also serve clientes that have since been deactivated.
pub async fn obtener_cliente(
    db: &DatabaseConnection,
    cliente_id: i64,
) -> Result<Option<cliente::Model>> {
    Cliente::find_by_id(cliente_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active cliente by its natural key (tipo de documento + número).
///
/// This is the búsqueda operation: inactive clientes are invisible here,
/// and a missing row is reported as `None` so callers decide whether that
/// is a not-found condition.
pub async fn buscar_por_documento(
    db: &DatabaseConnection,
    tipo_documento_id: i64,
    numero_documento: &str,
) -> Result<Option<cliente::Model>> {
    Cliente::find()
        .filter(cliente::Column::TipoDocumentoId.eq(tipo_documento_id))
        .filter(cliente::Column::NumeroDocumento.eq(numero_documento))
        .filter(cliente::Column::Activo.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all clientes ordered by apellido then nombre.
pub async fn listar_clientes(db: &DatabaseConnection) -> Result<Vec<cliente::Model>> {
    Cliente::find()
        .order_by_asc(cliente::Column::Apellido)
        .order_by_asc(cliente::Column::Nombre)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new cliente, performing input validation.
///
/// Validates that the tipo de documento exists and is active, that the
/// identifying fields are non-blank, and that no cliente already holds the
/// same (tipo de documento, número de documento) pair. `fecha_registro` is
/// set here, once, and the cliente starts active.
pub async fn crear_cliente(
    db: &DatabaseConnection,
    tipo_documento_id: i64,
    numero_documento: String,
    nombre: String,
    apellido: String,
    correo: String,
    telefono: String,
) -> Result<cliente::Model> {
    if numero_documento.trim().is_empty() {
        return Err(Error::Validacion {
            message: "El número de documento no puede estar vacío".to_string(),
        });
    }
    if nombre.trim().is_empty() || apellido.trim().is_empty() {
        return Err(Error::Validacion {
            message: "Nombre y apellido son obligatorios".to_string(),
        });
    }

    let tipo = obtener_tipo_documento(db, tipo_documento_id).await?;
    if !tipo.is_some_and(|t| t.activo) {
        return Err(Error::Validacion {
            message: "Tipo de documento no válido".to_string(),
        });
    }

    // Natural key uniqueness: one cliente per (tipo, número), active or not
    let existente = Cliente::find()
        .filter(cliente::Column::TipoDocumentoId.eq(tipo_documento_id))
        .filter(cliente::Column::NumeroDocumento.eq(numero_documento.trim()))
        .one(db)
        .await?;
    if existente.is_some() {
        return Err(Error::Validacion {
            message: format!(
                "Ya existe un cliente con el documento {}",
                numero_documento.trim()
            ),
        });
    }

    let cliente = cliente::ActiveModel {
        tipo_documento_id: Set(tipo_documento_id),
        numero_documento: Set(numero_documento.trim().to_string()),
        nombre: Set(nombre.trim().to_string()),
        apellido: Set(apellido.trim().to_string()),
        correo: Set(correo.trim().to_string()),
        telefono: Set(telefono.trim().to_string()),
        fecha_registro: Set(chrono::Utc::now()),
        activo: Set(true),
        ..Default::default()
    };

    let result = cliente.insert(db).await?;
    Ok(result)
}

/// Deletes a cliente and all of its compras in a single transaction.
///
/// The compras dependency is hard: they belong to exactly one cliente, so
/// they go with it. Both deletions happen inside one database transaction
/// so a failure leaves everything in place.
pub async fn eliminar_cliente(db: &DatabaseConnection, cliente_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Cliente::find_by_id(cliente_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ClienteNoEncontrado {
            documento: cliente_id.to_string(),
        })?;

    Compra::delete_many()
        .filter(compra::Column::ClienteId.eq(cliente_id))
        .exec(&txn)
        .await?;

    Cliente::delete_by_id(cliente_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_crear_y_buscar_cliente() -> Result<()> {
        let db = setup_test_db().await?;
        let tipo = create_test_tipo_documento(&db, "CC", "Cédula de Ciudadanía").await?;

        let creado = create_test_cliente(&db, tipo.id, "12345678").await?;
        assert!(creado.activo);
        assert_eq!(creado.nombre_completo(), "Juan Pérez");

        let encontrado = buscar_por_documento(&db, tipo.id, "12345678").await?;
        assert_eq!(encontrado.map(|c| c.id), Some(creado.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_buscar_cliente_inexistente() -> Result<()> {
        let db = setup_test_db().await?;
        let tipo = create_test_tipo_documento(&db, "CC", "Cédula de Ciudadanía").await?;

        let encontrado = buscar_por_documento(&db, tipo.id, "99999999").await?;
        assert!(encontrado.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_buscar_no_ve_clientes_inactivos() -> Result<()> {
        let db = setup_test_db().await?;
        let tipo = create_test_tipo_documento(&db, "CC", "Cédula de Ciudadanía").await?;
        create_custom_cliente(&db, tipo.id, "12345678", "Ana", "Gómez", false).await?;

        let encontrado = buscar_por_documento(&db, tipo.id, "12345678").await?;
        assert!(encontrado.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_documento_duplicado_rechazado() -> Result<()> {
        let db = setup_test_db().await?;
        let tipo = create_test_tipo_documento(&db, "CC", "Cédula de Ciudadanía").await?;
        create_test_cliente(&db, tipo.id, "12345678").await?;

        let resultado = crear_cliente(
            &db,
            tipo.id,
            "12345678".to_string(),
            "Otro".to_string(),
            "Cliente".to_string(),
            "otro@example.com".to_string(),
            "3000000000".to_string(),
        )
        .await;
        assert!(matches!(resultado, Err(Error::Validacion { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_mismo_numero_distinto_tipo_permitido() -> Result<()> {
        let db = setup_test_db().await?;
        let cc = create_test_tipo_documento(&db, "CC", "Cédula de Ciudadanía").await?;
        let nit = create_test_tipo_documento(&db, "NIT", "NIT").await?;
        create_test_cliente(&db, cc.id, "12345678").await?;

        let resultado = create_test_cliente(&db, nit.id, "12345678").await;
        assert!(resultado.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_tipo_documento_invalido_rechazado() -> Result<()> {
        let db = setup_test_db().await?;

        let resultado = crear_cliente(
            &db,
            999,
            "12345678".to_string(),
            "Juan".to_string(),
            "Pérez".to_string(),
            "juan@example.com".to_string(),
            "3000000000".to_string(),
        )
        .await;
        assert!(matches!(resultado, Err(Error::Validacion { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_eliminar_cliente_borra_sus_compras() -> Result<()> {
        let db = setup_test_db().await?;
        let tipo = create_test_tipo_documento(&db, "CC", "Cédula de Ciudadanía").await?;
        let cliente = create_test_cliente(&db, tipo.id, "12345678").await?;
        create_test_compra(&db, cliente.id, "F-001", 100_000).await?;
        create_test_compra(&db, cliente.id, "F-002", 200_000).await?;

        eliminar_cliente(&db, cliente.id).await?;

        assert!(obtener_cliente(&db, cliente.id).await?.is_none());
        let restantes = crate::core::compra::compras_de_cliente(&db, cliente.id).await?;
        assert!(restantes.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_eliminar_cliente_inexistente() -> Result<()> {
        let db = setup_test_db().await?;

        let resultado = eliminar_cliente(&db, 999).await;
        assert!(matches!(
            resultado,
            Err(Error::ClienteNoEncontrado { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_listar_ordena_por_apellido_y_nombre() -> Result<()> {
        let db = setup_test_db().await?;
        let tipo = create_test_tipo_documento(&db, "CC", "Cédula de Ciudadanía").await?;
        create_custom_cliente(&db, tipo.id, "1", "Carlos", "Zapata", true).await?;
        create_custom_cliente(&db, tipo.id, "2", "Beatriz", "Arango", true).await?;
        create_custom_cliente(&db, tipo.id, "3", "Andrés", "Arango", true).await?;

        let clientes = listar_clientes(&db).await?;
        let nombres: Vec<String> = clientes.iter().map(cliente::Model::nombre_completo).collect();
        assert_eq!(
            nombres,
            vec!["Andrés Arango", "Beatriz Arango", "Carlos Zapata"]
        );
        Ok(())
    }
}
