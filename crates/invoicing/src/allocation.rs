//! Allocation engine: distributes tool rental costs into invoices.
//!
//! Missing lookups are never errors here. A tool whose project, cost center or crew
//! cannot be resolved is dropped from the batch and the rest is still invoiced.

use tracing::{debug, info, warn};

use toolfleet_core::entity::find_by_id;
use toolfleet_core::RuleId;

use crate::config::{AllocationMethod, InvoicingConfig};
use crate::id_gen::{InvoiceIdGenerator, RandomIdGenerator};
use crate::invoice::{Invoice, LineItem};
use crate::model::{CostCenter, Crew, Project, Tool};
use crate::period::BillingPeriod;
use crate::rules::{Allocation, AllocationRule, AllocationTarget, NoopRuleEvaluator, RuleEvaluator};

/// Tools above this monthly rate are split between construction and engineering in mixed mode.
pub const HIGH_VALUE_THRESHOLD: f64 = 1000.0;
pub const CONSTRUCTION_SHARE: f64 = 0.6;
pub const ENGINEERING_SHARE: f64 = 0.4;

pub const CODE_SAFETY: &str = "SAFETY";
pub const CODE_CONSTRUCTION: &str = "CONSTRUCTION";
pub const CODE_ENGINEERING: &str = "ENGINEERING";
pub const CODE_GENERAL: &str = "GENERAL";

/// Accounting code a tool category is charged to in cost-center mode.
pub fn cost_center_code_for_category(category: &str) -> &'static str {
    match category {
        "Safety" => CODE_SAFETY,
        "Drilling" | "Cutting" => CODE_CONSTRUCTION,
        "Layout" | "Measuring" => CODE_ENGINEERING,
        _ => CODE_GENERAL,
    }
}

fn find_cost_center_by_code<'a>(cost_centers: &'a [CostCenter], code: &str) -> Option<&'a CostCenter> {
    cost_centers.iter().find(|cc| cc.accounting_code.contains(code))
}

/// Invoice generator for one configuration and one rule registry.
pub struct AllocationEngine {
    config: InvoicingConfig,
    rules: Vec<AllocationRule>,
    id_generator: Box<dyn InvoiceIdGenerator>,
    rule_evaluator: Box<dyn RuleEvaluator>,
}

impl core::fmt::Debug for AllocationEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AllocationEngine")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl AllocationEngine {
    pub fn new(config: InvoicingConfig) -> Self {
        Self {
            config,
            rules: Vec::new(),
            id_generator: Box::new(RandomIdGenerator),
            rule_evaluator: Box::new(NoopRuleEvaluator),
        }
    }

    pub fn with_id_generator(mut self, generator: impl InvoiceIdGenerator + 'static) -> Self {
        self.id_generator = Box::new(generator);
        self
    }

    pub fn with_rule_evaluator(mut self, evaluator: impl RuleEvaluator + 'static) -> Self {
        self.rule_evaluator = Box::new(evaluator);
        self
    }

    pub fn config(&self) -> &InvoicingConfig {
        &self.config
    }

    /// Register a rule; a rule with the same id is replaced.
    pub fn add_allocation_rule(&mut self, rule: AllocationRule) {
        if let Some(existing) = self.rules.iter_mut().find(|r| r.id == rule.id) {
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    pub fn remove_allocation_rule(&mut self, id: &RuleId) -> Option<AllocationRule> {
        let index = self.rules.iter().position(|r| &r.id == id)?;
        Some(self.rules.remove(index))
    }

    pub fn allocation_rules(&self) -> &[AllocationRule] {
        &self.rules
    }

    /// Generate invoices for `billing_period` using the configured allocation method.
    ///
    /// Taxes are applied to every invoice as a final pass.
    pub fn generate_invoices(
        &self,
        tools: &[Tool],
        projects: &[Project],
        cost_centers: &[CostCenter],
        crews: &[Crew],
        billing_period: &BillingPeriod,
    ) -> Vec<Invoice> {
        let method = self.config.allocation_method;
        let mut invoices = match method {
            AllocationMethod::Project => self.allocate_by_project(tools, projects, billing_period),
            AllocationMethod::CostCenter => {
                self.allocate_by_cost_center(tools, cost_centers, billing_period)
            }
            AllocationMethod::Crew => self.allocate_by_crew(tools, crews, billing_period),
            AllocationMethod::Mixed => self.allocate_mixed(tools, cost_centers, billing_period),
        };

        for invoice in &mut invoices {
            invoice.apply_taxes(self.config.include_taxes, self.config.tax_rate);
        }

        info!(
            method = %method,
            period = %billing_period.period_code(),
            tools = tools.len(),
            invoices = invoices.len(),
            "generated invoices"
        );

        invoices
    }

    fn allocate_by_project(
        &self,
        tools: &[Tool],
        projects: &[Project],
        period: &BillingPeriod,
    ) -> Vec<Invoice> {
        for tool in tools {
            match &tool.assigned_project_id {
                None => debug!(tool = %tool.id, "tool has no project assignment; not invoiced"),
                Some(project_id) if find_by_id(projects, project_id).is_none() => {
                    warn!(tool = %tool.id, project = %project_id, "assigned project not found; tool dropped")
                }
                Some(_) => {}
            }
        }

        projects
            .iter()
            .filter_map(|project| {
                let assigned: Vec<&Tool> = tools
                    .iter()
                    .filter(|t| t.assigned_project_id.as_ref() == Some(&project.id))
                    .collect();
                if assigned.is_empty() {
                    return None;
                }

                debug!(project = %project.id, tools = assigned.len(), "allocating to project");
                let mut invoice = self.build_invoice(project.id.as_str(), &assigned, 1.0, period);
                invoice.project_id = Some(project.id.clone());
                Some(invoice)
            })
            .collect()
    }

    fn allocate_by_cost_center(
        &self,
        tools: &[Tool],
        cost_centers: &[CostCenter],
        period: &BillingPeriod,
    ) -> Vec<Invoice> {
        if cost_centers.is_empty() {
            if !tools.is_empty() {
                warn!(tools = tools.len(), "no cost centers supplied; nothing invoiced");
            }
            return Vec::new();
        }

        // Indexed by position in `cost_centers` to keep input order; index 0 is the fallback.
        let mut buckets: Vec<Vec<&Tool>> = vec![Vec::new(); cost_centers.len()];
        for tool in tools {
            let code = cost_center_code_for_category(&tool.category);
            let index = cost_centers
                .iter()
                .position(|cc| cc.accounting_code.contains(code))
                .unwrap_or(0);
            buckets[index].push(tool);
        }

        cost_centers
            .iter()
            .zip(buckets)
            .filter(|(_, assigned)| !assigned.is_empty())
            .map(|(cost_center, assigned)| {
                debug!(cost_center = %cost_center.id, tools = assigned.len(), "allocating to cost center");
                let mut invoice =
                    self.build_invoice(cost_center.id.as_str(), &assigned, 1.0, period);
                invoice.cost_center_id = Some(cost_center.id.clone());
                invoice
            })
            .collect()
    }

    fn allocate_by_crew(&self, tools: &[Tool], crews: &[Crew], period: &BillingPeriod) -> Vec<Invoice> {
        crews
            .iter()
            .filter_map(|crew| {
                let assigned: Vec<&Tool> = tools
                    .iter()
                    .filter(|t| crew.tool_ids.contains(&t.id))
                    .collect();
                if assigned.is_empty() {
                    debug!(crew = %crew.id, "crew has no matching tools; no invoice");
                    return None;
                }

                let mut invoice = self.build_invoice(crew.id.as_str(), &assigned, 1.0, period);
                invoice.crew_id = Some(crew.id.clone());
                Some(invoice)
            })
            .collect()
    }

    fn allocate_mixed(
        &self,
        tools: &[Tool],
        cost_centers: &[CostCenter],
        period: &BillingPeriod,
    ) -> Vec<Invoice> {
        let allocations = match self.rule_evaluator.evaluate(&self.rules, tools, cost_centers) {
            Some(allocations) => allocations,
            None => {
                if !self.rules.is_empty() {
                    debug!(
                        rules = self.rules.len(),
                        "registered allocation rules not evaluated; using threshold split"
                    );
                }
                threshold_split(tools, cost_centers)
            }
        };

        allocations
            .into_iter()
            .filter(|a| !a.tools.is_empty())
            .map(|allocation| {
                let assigned: Vec<&Tool> = allocation.tools.iter().collect();
                let mut invoice = self.build_invoice(
                    allocation.target.entity_id(),
                    &assigned,
                    allocation.split_factor,
                    period,
                );
                match allocation.target {
                    AllocationTarget::Project(id) => invoice.project_id = Some(id),
                    AllocationTarget::CostCenter(id) => invoice.cost_center_id = Some(id),
                    AllocationTarget::AccountingCode(_) | AllocationTarget::General => {}
                }
                invoice
            })
            .collect()
    }

    fn build_invoice(
        &self,
        entity_id: &str,
        tools: &[&Tool],
        split_factor: f64,
        period: &BillingPeriod,
    ) -> Invoice {
        let line_items = tools
            .iter()
            .map(|tool| LineItem::for_tool(tool, period, split_factor))
            .collect();

        Invoice::draft(
            self.id_generator
                .generate(&self.config.invoice_prefix, entity_id, period),
            self.config.allocation_method,
            period.clone(),
            line_items,
            period.due_date(self.config.payment_terms_days),
        )
    }
}

/// Built-in mixed-mode policy.
///
/// High-value tools are split 60/40 between construction and engineering; the rest
/// bill fully to their project or to the GENERAL bucket. Groups come out in
/// first-seen order.
pub fn threshold_split(tools: &[Tool], cost_centers: &[CostCenter]) -> Vec<Allocation> {
    let resolve = |code: &str| match find_cost_center_by_code(cost_centers, code) {
        Some(cc) => AllocationTarget::CostCenter(cc.id.clone()),
        None => AllocationTarget::AccountingCode(code.to_string()),
    };
    let construction = resolve(CODE_CONSTRUCTION);
    let engineering = resolve(CODE_ENGINEERING);

    let mut groups: Vec<Allocation> = Vec::new();
    let mut push = |target: &AllocationTarget, split_factor: f64, tool: &Tool| {
        let existing = groups
            .iter_mut()
            .find(|g| &g.target == target && g.split_factor.to_bits() == split_factor.to_bits());
        match existing {
            Some(group) => group.tools.push(tool.clone()),
            None => groups.push(Allocation {
                target: target.clone(),
                tools: vec![tool.clone()],
                split_factor,
            }),
        }
    };

    for tool in tools {
        if tool.monthly_rate > HIGH_VALUE_THRESHOLD {
            push(&construction, CONSTRUCTION_SHARE, tool);
            push(&engineering, ENGINEERING_SHARE, tool);
        } else {
            let target = match &tool.assigned_project_id {
                Some(project_id) => AllocationTarget::Project(project_id.clone()),
                None => AllocationTarget::General,
            };
            push(&target, 1.0, tool);
        }
    }

    groups
}
