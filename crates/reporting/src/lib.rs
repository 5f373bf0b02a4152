//! Invoice analytics.
//!
//! Pure aggregations over already-generated invoices; nothing here mutates or
//! persists them.

pub mod cost_center;
pub mod directory;
pub mod summary;

pub use cost_center::{CostCenterReport, UNASSIGNED, generate_cost_center_report};
pub use directory::{NoToolDirectory, ToolDirectory, UNCATEGORIZED};
pub use summary::{InvoiceSummary, PaymentMetrics, generate_invoice_summary};
