//! Core business logic - framework-agnostic cliente, compra, eligibility,
//! and export operations.
//!
//! Everything here is a pure read-and-render pass over data supplied by the
//! store: no module holds state between invocations, so concurrent requests
//! never need coordination.

/// Cliente lookup, creation, listing, and deletion
pub mod cliente;
/// Compra creation, history, and completed-purchase summaries
pub mod compra;
/// Multi-format customer profile export (csv / excel / txt)
pub mod export;
/// Loyalty eligibility engine
pub mod fidelizacion;
/// Loyalty eligibility report rendering
pub mod reporte;
