//! Unified error types and result handling for the whole crate.
//!
//! Every recoverable condition the core can signal is a variant here; the
//! API layer maps them onto HTTP responses (not-found, bad-request) while
//! infrastructure failures convert in via `#[from]`.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested cliente does not exist (or is inactive, for lookups
    /// that only see active clientes).
    #[error("Cliente no encontrado: {documento}")]
    ClienteNoEncontrado {
        /// Identifier used in the failed lookup (document number or id)
        documento: String,
    },

    /// The eligibility report was requested but no cliente meets the
    /// loyalty criteria. Distinct from an empty-file render on purpose.
    #[error("No hay clientes que cumplan los criterios de fidelización")]
    SinClientesElegibles,

    /// An unrecognized export format was requested.
    #[error("Formato no válido. Use: csv, excel o txt")]
    FormatoInvalido {
        /// The rejected format value, kept for logging and tests
        formato: String,
    },

    /// Malformed or missing input on an otherwise valid request.
    #[error("{message}")]
    Validacion {
        /// Human-readable description of what is missing or malformed
        message: String,
    },

    /// Configuration loading or parsing failure.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Database error from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX workbook construction error.
    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
