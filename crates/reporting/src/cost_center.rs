//! Per-cost-center cost analytics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use toolfleet_core::math::ratio;
use toolfleet_invoicing::Invoice;

use crate::directory::{ToolDirectory, UNCATEGORIZED};

/// Key used for invoices that are not charged to a cost center.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCenterReport {
    pub cost_center: String,
    /// Sum of invoice totals (taxes included).
    pub total_cost: f64,
    pub invoice_count: usize,
    pub average_cost: f64,
    /// Line totals (before taxes) by tool category.
    pub category_breakdown: BTreeMap<String, f64>,
}

/// One report row per cost center, sorted by cost center key.
pub fn generate_cost_center_report<D>(invoices: &[Invoice], directory: &D) -> Vec<CostCenterReport>
where
    D: ToolDirectory + ?Sized,
{
    let mut rows: BTreeMap<String, CostCenterReport> = BTreeMap::new();

    for invoice in invoices {
        let key = invoice
            .cost_center_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNASSIGNED.to_string());

        let row = rows.entry(key.clone()).or_insert_with(|| CostCenterReport {
            cost_center: key,
            total_cost: 0.0,
            invoice_count: 0,
            average_cost: 0.0,
            category_breakdown: BTreeMap::new(),
        });

        row.total_cost += invoice.total;
        row.invoice_count += 1;

        for line in &invoice.line_items {
            let category = directory.category_of(&line.tool_id).unwrap_or(UNCATEGORIZED);
            *row.category_breakdown.entry(category.to_string()).or_insert(0.0) += line.line_total;
        }
    }

    let report: Vec<CostCenterReport> = rows
        .into_values()
        .map(|mut row| {
            row.average_cost = ratio(row.total_cost, row.invoice_count as f64);
            row
        })
        .collect();

    debug!(
        invoices = invoices.len(),
        cost_centers = report.len(),
        "cost center report computed"
    );
    report
}
