//! Project risk assessment.

use serde::{Deserialize, Serialize};

use toolfleet_invoicing::ProjectComplexity;

use crate::model::{ProjectProfile, RecommendedTool};

pub const LONG_TIMELINE_MONTHS: u32 = 18;
pub const LARGE_CREW: u32 = 25;
/// Tool spend above this share of the budget is a risk.
pub const TOOL_BUDGET_SHARE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn from_triggered(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub factor: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<RiskFactor>,
}

struct RiskRule {
    triggered: fn(&ProjectProfile, f64) -> bool,
    factor: &'static str,
    mitigation: &'static str,
}

const RULES: &[RiskRule] = &[
    RiskRule {
        triggered: |p, _| p.complexity == ProjectComplexity::High,
        factor: "High project complexity",
        mitigation: "Dedicated fleet manager and priority repair turnaround",
    },
    RiskRule {
        triggered: |p, _| p.timeline > LONG_TIMELINE_MONTHS,
        factor: "Extended project timeline",
        mitigation: "Scheduled tool swaps and preventive maintenance",
    },
    RiskRule {
        triggered: |p, _| p.labor_count > LARGE_CREW,
        factor: "Large workforce",
        mitigation: "Tool tracking and per-crew assignment reports",
    },
    RiskRule {
        triggered: |p, cost| cost > p.budget * TOOL_BUDGET_SHARE,
        factor: "Tool costs exceed 15% of project budget",
        mitigation: "Move low-utilization tools to Tools on Demand",
    },
];

/// Evaluate each rule independently; the level depends only on how many fired.
pub fn assess_risk(profile: &ProjectProfile, tools: &[RecommendedTool]) -> RiskAssessment {
    let total_cost: f64 = tools.iter().map(|t| t.total_cost).sum();

    let factors: Vec<RiskFactor> = RULES
        .iter()
        .filter(|rule| (rule.triggered)(profile, total_cost))
        .map(|rule| RiskFactor {
            factor: rule.factor.to_string(),
            mitigation: rule.mitigation.to_string(),
        })
        .collect();

    RiskAssessment {
        level: RiskLevel::from_triggered(factors.len()),
        factors,
    }
}
