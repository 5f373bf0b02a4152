//! Portfolio-level invoice summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use toolfleet_core::math::{mean, ratio};
use toolfleet_invoicing::{Invoice, InvoiceStatus};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Collection health of a set of invoices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMetrics {
    /// Paid invoices whose payment date is on or before the due date.
    pub on_time_payments: usize,
    /// Sum of totals currently in `Overdue` status.
    pub overdue_amount: f64,
    /// Mean days late across paid invoices; early payments count as 0.
    pub average_payment_delay_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total_invoices: usize,
    pub total_revenue: f64,
    pub average_invoice_value: f64,
    /// Every status is present, with 0 for statuses that do not occur.
    pub status_breakdown: BTreeMap<InvoiceStatus, usize>,
    pub payment_metrics: PaymentMetrics,
}

/// Summarize `invoices`. An empty slice yields an all-zero summary.
pub fn generate_invoice_summary(invoices: &[Invoice]) -> InvoiceSummary {
    let total_revenue: f64 = invoices.iter().map(|i| i.total).sum();

    let mut status_breakdown: BTreeMap<InvoiceStatus, usize> =
        InvoiceStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for invoice in invoices {
        *status_breakdown.entry(invoice.status).or_insert(0) += 1;
    }

    let overdue_amount = invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Overdue)
        .map(|i| i.total)
        .sum();

    let delays: Vec<f64> = invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Paid)
        .filter_map(|i| {
            let paid = i.paid_date?;
            let late_ms = (paid - i.due_date).num_milliseconds().max(0);
            Some(late_ms as f64 / MILLIS_PER_DAY)
        })
        .collect();

    let summary = InvoiceSummary {
        total_invoices: invoices.len(),
        total_revenue,
        average_invoice_value: ratio(total_revenue, invoices.len() as f64),
        status_breakdown,
        payment_metrics: PaymentMetrics {
            on_time_payments: invoices.iter().filter(|i| i.is_paid_on_time()).count(),
            overdue_amount,
            average_payment_delay_days: mean(&delays),
        },
    };

    debug!(
        invoices = summary.total_invoices,
        revenue = summary.total_revenue,
        "invoice summary computed"
    );
    summary
}
