//! Invoicing domain module for tool-fleet rentals.
//!
//! This crate contains the business rules that turn rented tools into invoices,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! The only non-deterministic piece, the invoice id suffix, sits behind
//! [`InvoiceIdGenerator`].

pub mod allocation;
pub mod config;
pub mod id_gen;
pub mod invoice;
pub mod model;
pub mod period;
pub mod rules;

pub use allocation::{AllocationEngine, cost_center_code_for_category};
pub use config::{AllocationMethod, InvoicingConfig};
pub use id_gen::{InvoiceIdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use invoice::{Invoice, InvoiceStatus, LineItem};
pub use model::{CostCenter, Crew, Project, ProjectComplexity, Tool};
pub use period::BillingPeriod;
pub use rules::{Allocation, AllocationRule, AllocationTarget, NoopRuleEvaluator, RuleEvaluator};
