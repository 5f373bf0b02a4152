use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use toolfleet_core::{CostCenterId, CrewId, ProjectId, ToolId};

use crate::config::AllocationMethod;
use crate::model::Tool;
use crate::period::BillingPeriod;

/// Flat number of days a monthly rate is spread over, regardless of the calendar month.
pub const DAYS_PER_BILLING_MONTH: f64 = 30.0;

/// Invoice status lifecycle.
///
/// Generated invoices start as `Draft`; every other transition is made by the
/// caller's invoice store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Disputed,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 6] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Disputed,
        InvoiceStatus::Cancelled,
    ];
}

/// Invoice line for one tool (or one share of a split tool).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub tool_id: ToolId,
    pub tool_name: String,
    pub quantity: u32,
    pub monthly_rate: f64,
    pub days_used: u32,
    /// Share of the tool's cost billed on this line, in (0, 1].
    pub split_factor: f64,
    pub line_total: f64,
    pub description: String,
}

impl LineItem {
    /// Line for `tool` over `period`, billing `split_factor` of its cost.
    pub fn for_tool(tool: &Tool, period: &BillingPeriod, split_factor: f64) -> Self {
        let days_used = period.days_in_period();
        let line_total = line_total(tool.monthly_rate, split_factor, days_used);

        let description = if split_factor < 1.0 {
            format!(
                "{} ({}) rental, {} days, {:.0}% allocation",
                tool.name,
                tool.category,
                days_used,
                split_factor * 100.0
            )
        } else {
            format!("{} ({}) rental, {} days", tool.name, tool.category, days_used)
        };

        Self {
            tool_id: tool.id.clone(),
            tool_name: tool.name.clone(),
            quantity: 1,
            monthly_rate: tool.monthly_rate,
            days_used,
            split_factor,
            line_total,
            description,
        }
    }
}

/// `(monthly_rate × split_factor / 30) × days`.
pub fn line_total(monthly_rate: f64, split_factor: f64, days: u32) -> f64 {
    (monthly_rate * split_factor / DAYS_PER_BILLING_MONTH) * f64::from(days)
}

/// A generated rental invoice.
///
/// At most one of `project_id`, `cost_center_id` and `crew_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(rename = "projectID", alias = "projectId", default)]
    pub project_id: Option<ProjectId>,
    #[serde(rename = "costCenterID", alias = "costCenterId", default)]
    pub cost_center_id: Option<CostCenterId>,
    #[serde(rename = "crewID", alias = "crewId", default)]
    pub crew_id: Option<CrewId>,
    pub allocation_method: AllocationMethod,
    pub billing_period: BillingPeriod,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub taxes: f64,
    pub total: f64,
    pub due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub paid_date: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Draft invoice with untaxed totals; call [`Invoice::apply_taxes`] to finalize.
    pub fn draft(
        id: String,
        allocation_method: AllocationMethod,
        billing_period: BillingPeriod,
        line_items: Vec<LineItem>,
        due_date: DateTime<Utc>,
    ) -> Self {
        let subtotal = line_items.iter().map(|l| l.line_total).sum();
        Self {
            id,
            project_id: None,
            cost_center_id: None,
            crew_id: None,
            allocation_method,
            billing_period,
            line_items,
            subtotal,
            taxes: 0.0,
            total: subtotal,
            due_date,
            status: InvoiceStatus::Draft,
            paid_date: None,
        }
    }

    /// Recompute subtotal, taxes and total from the line items.
    pub fn apply_taxes(&mut self, include_taxes: bool, tax_rate: f64) {
        self.subtotal = self.line_items.iter().map(|l| l.line_total).sum();
        self.taxes = if include_taxes {
            self.subtotal * tax_rate
        } else {
            0.0
        };
        self.total = self.subtotal + self.taxes;
    }

    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
    }

    pub fn mark_sent(&mut self) {
        self.status = InvoiceStatus::Sent;
    }

    pub fn mark_paid(&mut self, paid_at: DateTime<Utc>) {
        self.status = InvoiceStatus::Paid;
        self.paid_date = Some(paid_at);
    }

    /// Paid with a recorded payment date no later than the due date.
    pub fn is_paid_on_time(&self) -> bool {
        self.status == InvoiceStatus::Paid && self.paid_date.is_some_and(|paid| paid <= self.due_date)
    }

    pub fn tool_ids(&self) -> impl Iterator<Item = &ToolId> {
        self.line_items.iter().map(|l| &l.tool_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn january() -> BillingPeriod {
        BillingPeriod::for_month(2024, 1).unwrap()
    }

    fn drill() -> Tool {
        Tool::new("T-1", "Hammer drill", "Drilling", 900.0)
    }

    #[test]
    fn full_month_line_bills_monthly_rate() {
        let line = LineItem::for_tool(&drill(), &january(), 1.0);
        assert_eq!(line.days_used, 30);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.line_total, 900.0);
        assert_eq!(line.description, "Hammer drill (Drilling) rental, 30 days");
    }

    #[test]
    fn split_line_mentions_allocation_share() {
        let line = LineItem::for_tool(&drill(), &january(), 0.6);
        assert_eq!(line.line_total, (900.0 * 0.6 / 30.0) * 30.0);
        assert!(line.description.ends_with("60% allocation"));
    }

    #[test]
    fn taxes_follow_configuration() {
        let period = january();
        let lines = vec![LineItem::for_tool(&drill(), &period, 1.0)];
        let mut invoice = Invoice::draft(
            "INV-1".to_string(),
            AllocationMethod::Project,
            period.clone(),
            lines,
            period.due_date(30),
        );

        invoice.apply_taxes(true, 0.1);
        assert_eq!(invoice.subtotal, 900.0);
        assert!((invoice.taxes - 90.0).abs() < 1e-9);
        assert!((invoice.total - 990.0).abs() < 1e-9);

        invoice.apply_taxes(false, 0.1);
        assert_eq!(invoice.taxes, 0.0);
        assert_eq!(invoice.total, invoice.subtotal);
    }

    #[test]
    fn paid_on_time_requires_payment_before_due_date() {
        let period = january();
        let due = period.due_date(30);
        let mut invoice = Invoice::draft(
            "INV-1".to_string(),
            AllocationMethod::Crew,
            period,
            Vec::new(),
            due,
        );
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert!(!invoice.is_paid_on_time());

        invoice.mark_paid(due);
        assert!(invoice.is_paid_on_time());

        invoice.mark_paid(due + Duration::days(1));
        assert!(!invoice.is_paid_on_time());
    }
}
