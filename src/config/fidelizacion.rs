//! Loyalty report parameter loading from config.toml.
//!
//! The eligibility window and minimum spend are business parameters rather
//! than code constants, so they live in an optional `config.toml` next to
//! the binary. Missing file or missing keys fall back to the defaults the
//! report has always used: a 30-day trailing window and a 5,000,000 COP
//! minimum.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Parameters for the fidelización eligibility computation.
#[derive(Debug, Deserialize, Clone)]
pub struct FidelizacionConfig {
    /// Trailing window, in days, over which completed compras are summed
    #[serde(default = "ventana_dias_defecto")]
    pub ventana_dias: i64,
    /// Minimum completed-purchase total (COP) to qualify
    #[serde(default = "monto_minimo_defecto")]
    pub monto_minimo: Decimal,
}

impl Default for FidelizacionConfig {
    fn default() -> Self {
        Self {
            ventana_dias: ventana_dias_defecto(),
            monto_minimo: monto_minimo_defecto(),
        }
    }
}

fn ventana_dias_defecto() -> i64 {
    30
}

fn monto_minimo_defecto() -> Decimal {
    Decimal::from(5_000_000)
}

/// Structure of the config.toml file
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    fidelizacion: FidelizacionConfig,
}

/// Loads loyalty parameters from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FidelizacionConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let parsed: ConfigFile = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    Ok(parsed.fidelizacion)
}

/// Loads loyalty parameters from the default location (./config.toml),
/// falling back to the coded defaults when the file does not exist.
///
/// # Errors
/// Returns an error only if the file exists but cannot be parsed.
pub fn load_default_config() -> Result<FidelizacionConfig> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        Ok(FidelizacionConfig::default())
    }
}
