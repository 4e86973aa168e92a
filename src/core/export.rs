//! Customer profile export - renders one cliente plus purchase history into
//! one of three interchangeable formats.
//!
//! The three renderers share a single field-extraction step
//! ([`campos_cliente`]) so the data shown is identical across formats;
//! they diverge only in byte-level serialization. CSV and TXT pre-format
//! the amount as currency text, the spreadsheet stores the numeric value
//! so downstream arithmetic still works.

use crate::{
    core,
    entities::{cliente, compra},
    errors::{Error, Result},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use sea_orm::DatabaseConnection;
use std::str::FromStr;

/// Content type for CSV downloads.
pub const CONTENT_TYPE_CSV: &str = "text/csv; charset=utf-8";
/// Content type for XLSX downloads.
pub const CONTENT_TYPE_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Content type for plain text downloads.
pub const CONTENT_TYPE_TXT: &str = "text/plain; charset=utf-8";

/// Column titles of the purchase table, shared by every renderer.
const ENCABEZADO_COMPRAS: [&str; 4] = ["Número Factura", "Fecha", "Monto", "Estado"];

/// The three supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated text
    Csv,
    /// Single-sheet XLSX workbook
    Excel,
    /// Fixed-width framed plain text
    Txt,
}

impl FromStr for ExportFormat {
    type Err = Error;

    /// Parses a format name case-insensitively. Anything other than the
    /// three accepted values is a client-input error, never a best-effort
    /// default.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" => Ok(Self::Excel),
            "txt" => Ok(Self::Txt),
            _ => Err(Error::FormatoInvalido {
                formato: s.to_string(),
            }),
        }
    }
}

/// A rendered export: the file bytes plus the metadata the HTTP layer
/// needs to serve it as a download.
#[derive(Debug, Clone)]
pub struct Export {
    /// Serialized file content
    pub bytes: Vec<u8>,
    /// Suggested filename for `Content-Disposition`
    pub filename: String,
    /// MIME content type
    pub content_type: &'static str,
}

/// Everything a profile renderer needs, gathered once.
#[derive(Debug)]
struct PerfilCliente {
    cliente: cliente::Model,
    tipo_documento: String,
    compras: Vec<compra::Model>,
}

/// Exports a cliente's profile and full purchase history in the requested
/// format.
///
/// The cliente is looked up by id (`ClienteNoEncontrado` if absent) and its
/// compras fetched newest-first; every estado is included, only the
/// aggregating operations filter by status.
pub async fn exportar_cliente(
    db: &DatabaseConnection,
    cliente_id: i64,
    formato: ExportFormat,
) -> Result<Export> {
    let cliente = core::cliente::obtener_cliente(db, cliente_id)
        .await?
        .ok_or_else(|| Error::ClienteNoEncontrado {
            documento: cliente_id.to_string(),
        })?;

    let tipo_documento = core::cliente::obtener_tipo_documento(db, cliente.tipo_documento_id)
        .await?
        .map(|t| t.nombre)
        .unwrap_or_default();

    let compras = core::compra::compras_de_cliente(db, cliente_id).await?;

    let perfil = PerfilCliente {
        cliente,
        tipo_documento,
        compras,
    };

    match formato {
        ExportFormat::Csv => render_csv(&perfil),
        ExportFormat::Excel => render_excel(&perfil),
        ExportFormat::Txt => render_txt(&perfil),
    }
}

/// The seven labeled profile fields, in the order every format shows them.
fn campos_cliente(perfil: &PerfilCliente) -> [(&'static str, String); 7] {
    let c = &perfil.cliente;
    [
        ("Tipo de Documento", perfil.tipo_documento.clone()),
        ("Número de Documento", c.numero_documento.clone()),
        ("Nombre", c.nombre.clone()),
        ("Apellido", c.apellido.clone()),
        ("Correo", c.correo.clone()),
        ("Teléfono", c.telefono.clone()),
        (
            "Fecha de Registro",
            c.fecha_registro.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
    ]
}

/// Formats an amount as currency: `$` prefix, thousands separators, two
/// decimals. Rounding happens here at the render boundary only.
pub(crate) fn formato_moneda(monto: Decimal) -> String {
    let texto = format!("{:.2}", monto.round_dp(2));
    let (entero, decimales) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));
    let (signo, digitos) = entero
        .strip_prefix('-')
        .map_or(("", entero), |resto| ("-", resto));
    format!("${signo}{}.{decimales}", agrupar_miles(digitos))
}

/// Inserts a comma every three digits, counting from the right.
fn agrupar_miles(digitos: &str) -> String {
    let mut agrupado = String::new();
    for (i, ch) in digitos.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            agrupado.push(',');
        }
        agrupado.push(ch);
    }
    agrupado.chars().rev().collect()
}

/// Bold white on dark blue, centered - the header style of both the
/// profile purchase table and the fidelización report.
pub(crate) fn formato_encabezado() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x0036_6092))
        .set_align(FormatAlign::Center)
}

fn render_csv(perfil: &PerfilCliente) -> Result<Export> {
    // Rows vary in width (labeled pairs, a blank separator, the purchase
    // table), so the writer must be flexible.
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record(["Campo", "Valor"])?;
    for (campo, valor) in campos_cliente(perfil) {
        wtr.write_record([campo, valor.as_str()])?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["Compras"])?;
    wtr.write_record(ENCABEZADO_COMPRAS)?;
    for compra in &perfil.compras {
        let fecha = compra.fecha_compra.format("%Y-%m-%d").to_string();
        let monto = formato_moneda(compra.monto);
        wtr.write_record([
            compra.numero_factura.as_str(),
            fecha.as_str(),
            monto.as_str(),
            compra.estado.as_str(),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;

    Ok(Export {
        bytes,
        filename: format!("cliente_{}.csv", perfil.cliente.numero_documento),
        content_type: CONTENT_TYPE_CSV,
    })
}

fn render_excel(perfil: &PerfilCliente) -> Result<Export> {
    let mut workbook = Workbook::new();
    let hoja = workbook.add_worksheet();
    hoja.set_name("Cliente")?;

    hoja.write_string(0, 0, "Campo")?;
    hoja.write_string(0, 1, "Valor")?;

    let mut fila: u32 = 1;
    for (campo, valor) in campos_cliente(perfil) {
        hoja.write_string(fila, 0, campo)?;
        hoja.write_string(fila, 1, &valor)?;
        fila += 1;
    }

    // One blank row, then the styled purchase table header
    fila += 1;
    let encabezado = formato_encabezado();
    for (col, titulo) in ENCABEZADO_COMPRAS.iter().enumerate() {
        hoja.write_string_with_format(fila, col as u16, *titulo, &encabezado)?;
    }
    fila += 1;

    for compra in &perfil.compras {
        hoja.write_string(fila, 0, &compra.numero_factura)?;
        hoja.write_string(fila, 1, compra.fecha_compra.format("%Y-%m-%d").to_string())?;
        // Numeric cell, not currency text: spreadsheets get to do math
        hoja.write_number(
            fila,
            2,
            compra.monto.round_dp(2).to_f64().unwrap_or_default(),
        )?;
        hoja.write_string(fila, 3, compra.estado.as_str())?;
        fila += 1;
    }

    hoja.set_column_width(0, 20)?;
    hoja.set_column_width(1, 30)?;

    let bytes = workbook.save_to_buffer()?;

    Ok(Export {
        bytes,
        filename: format!("cliente_{}.xlsx", perfil.cliente.numero_documento),
        content_type: CONTENT_TYPE_XLSX,
    })
}

fn render_txt(perfil: &PerfilCliente) -> Result<Export> {
    let regla = "=".repeat(50);
    let separador = "-".repeat(50);
    let mut salida = String::new();

    salida.push_str(&regla);
    salida.push('\n');
    salida.push_str("INFORMACIÓN DEL CLIENTE\n");
    salida.push_str(&regla);
    salida.push_str("\n\n");

    for (campo, valor) in campos_cliente(perfil) {
        salida.push_str(&format!("{campo}: {valor}\n"));
    }
    salida.push('\n');

    salida.push_str(&regla);
    salida.push('\n');
    salida.push_str("COMPRAS\n");
    salida.push_str(&regla);
    salida.push_str("\n\n");

    for compra in &perfil.compras {
        salida.push_str(&format!("Factura: {}\n", compra.numero_factura));
        salida.push_str(&format!(
            "Fecha: {}\n",
            compra.fecha_compra.format("%Y-%m-%d")
        ));
        salida.push_str(&format!("Monto: {}\n", formato_moneda(compra.monto)));
        salida.push_str(&format!("Estado: {}\n", compra.estado));
        salida.push_str(&separador);
        salida.push('\n');
    }

    Ok(Export {
        bytes: salida.into_bytes(),
        filename: format!("cliente_{}.txt", perfil.cliente.numero_documento),
        content_type: CONTENT_TYPE_TXT,
    })
}
