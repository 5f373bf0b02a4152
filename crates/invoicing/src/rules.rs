//! Allocation targets, the rule registry's record type and the rule-evaluation seam.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use toolfleet_core::{CostCenterId, ProjectId, RuleId};

use crate::model::{CostCenter, Tool};

/// Where a group of tool costs is billed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum AllocationTarget {
    Project(ProjectId),
    CostCenter(CostCenterId),
    /// A fixed accounting code with no matching cost center in the input.
    AccountingCode(String),
    /// Unassigned tools in mixed mode.
    General,
}

impl AllocationTarget {
    /// Id embedded in the invoice number.
    pub fn entity_id(&self) -> &str {
        match self {
            AllocationTarget::Project(id) => id.as_str(),
            AllocationTarget::CostCenter(id) => id.as_str(),
            AllocationTarget::AccountingCode(code) => code,
            AllocationTarget::General => "GENERAL",
        }
    }
}

/// A group of tools billed to one target at one split factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub target: AllocationTarget,
    pub tools: Vec<Tool>,
    pub split_factor: f64,
}

/// A caller-registered allocation rule.
///
/// The rule body is kept opaque: no matching or effect semantics are defined for it
/// yet, and the default evaluator ignores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRule {
    pub id: RuleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub definition: JsonValue,
}

impl AllocationRule {
    pub fn new(id: impl Into<RuleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            definition: JsonValue::Null,
        }
    }

    pub fn with_definition(mut self, definition: JsonValue) -> Self {
        self.definition = definition;
        self
    }
}

/// Turns registered rules into allocations for mixed-mode invoicing.
///
/// Returning `None` means "no opinion": the engine falls back to its built-in
/// threshold split.
pub trait RuleEvaluator: Send + Sync {
    fn evaluate(
        &self,
        rules: &[AllocationRule],
        tools: &[Tool],
        cost_centers: &[CostCenter],
    ) -> Option<Vec<Allocation>>;
}

/// Evaluator that never produces allocations, so registered rules have no effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRuleEvaluator;

impl RuleEvaluator for NoopRuleEvaluator {
    fn evaluate(
        &self,
        _rules: &[AllocationRule],
        _tools: &[Tool],
        _cost_centers: &[CostCenter],
    ) -> Option<Vec<Allocation>> {
        None
    }
}
