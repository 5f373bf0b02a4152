//! Derived financial insights for a recommendation set.

use serde::{Deserialize, Serialize};

use toolfleet_core::math::ratio;
use toolfleet_invoicing::ProjectComplexity;

use crate::model::{ProjectProfile, RecommendedTool};

/// Savings estimate multiplier applied to total fleet cost.
pub const SAVINGS_MULTIPLIER: f64 = 2.5;
/// Share of monthly cost assumed to be recovered each month.
pub const MONTHLY_RECOVERY_RATE: f64 = 0.3;

pub const CRITICAL_CATEGORIES: &[&str] = &["drilling", "cutting", "safety"];

/// Expected risk reduction from fleet management, by project complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskReduction {
    Significant,
    Moderate,
    Standard,
}

impl From<ProjectComplexity> for RiskReduction {
    fn from(complexity: ProjectComplexity) -> Self {
        match complexity {
            ProjectComplexity::High => RiskReduction::Significant,
            ProjectComplexity::Medium => RiskReduction::Moderate,
            ProjectComplexity::Low => RiskReduction::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInsights {
    pub total_cost: f64,
    pub monthly_cost: f64,
    pub estimated_savings: f64,
    /// Months; 0 when there is no monthly cost.
    pub payback_period: f64,
    pub critical_tools: usize,
    pub risk_reduction: RiskReduction,
}

pub fn calculate_insights(profile: &ProjectProfile, tools: &[RecommendedTool]) -> FinancialInsights {
    let total_cost: f64 = tools.iter().map(|t| t.total_cost).sum();
    let monthly_cost: f64 = tools.iter().map(|t| t.monthly_cost).sum();

    FinancialInsights {
        total_cost,
        monthly_cost,
        estimated_savings: total_cost * SAVINGS_MULTIPLIER,
        payback_period: ratio(total_cost, monthly_cost * MONTHLY_RECOVERY_RATE),
        critical_tools: tools
            .iter()
            .filter(|t| t.category_contains(CRITICAL_CATEGORIES))
            .count(),
        risk_reduction: profile.complexity.into(),
    }
}
