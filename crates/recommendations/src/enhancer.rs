//! Annotates recommendations with service and risk metadata.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{ArchetypeMatch, TodSuitability, archetype_match, tod_suitability};
use crate::insights::{FinancialInsights, calculate_insights};
use crate::model::{ProjectProfile, RecommendedTool};
use crate::risk::{RiskAssessment, assess_risk};
use crate::tod::{ToolsOnDemandAnalysis, analyze_tools_on_demand};

pub const SERVICE_ADVANTAGES: &[&str] = &[
    "Repair, maintenance and calibration included",
    "Loaner tool provided during repairs",
    "Theft and damage coverage",
    "Fixed monthly cost per tool",
    "Tool replacement at end of lifecycle",
];

pub const RISK_MITIGATIONS: &[&str] = &[
    "Reduced downtime from equipment failure",
    "Current tools meet safety standards",
    "Predictable budgeting with no surprise repair bills",
    "Asset tracking reduces tool loss",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedRecommendation {
    #[serde(flatten)]
    pub tool: RecommendedTool,
    pub service_advantages: Vec<String>,
    pub risk_mitigations: Vec<String>,
    pub tod_suitability: TodSuitability,
    pub archetype_match: ArchetypeMatch,
}

/// Everything the sales view needs for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub recommendations: Vec<EnhancedRecommendation>,
    pub insights: FinancialInsights,
    pub tools_on_demand: ToolsOnDemandAnalysis,
    pub risk: RiskAssessment,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn enhance_recommendations(
    profile: &ProjectProfile,
    tools: &[RecommendedTool],
) -> Vec<EnhancedRecommendation> {
    tools
        .iter()
        .map(|tool| EnhancedRecommendation {
            tool: tool.clone(),
            service_advantages: owned(SERVICE_ADVANTAGES),
            risk_mitigations: owned(RISK_MITIGATIONS),
            tod_suitability: tod_suitability(tool),
            archetype_match: archetype_match(profile, tool),
        })
        .collect()
}

pub fn build_report(profile: &ProjectProfile, tools: &[RecommendedTool]) -> RecommendationReport {
    let report = RecommendationReport {
        recommendations: enhance_recommendations(profile, tools),
        insights: calculate_insights(profile, tools),
        tools_on_demand: analyze_tools_on_demand(profile, tools),
        risk: assess_risk(profile, tools),
    };

    debug!(
        tools = tools.len(),
        risk = ?report.risk.level,
        hybrid = report.tools_on_demand.recommend_hybrid,
        "recommendation report built"
    );
    report
}
