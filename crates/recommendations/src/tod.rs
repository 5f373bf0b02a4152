//! Tools-on-Demand candidate analysis.

use serde::{Deserialize, Serialize};

use crate::model::{ProjectProfile, RecommendedTool};

pub const TOD_CATEGORIES: &[&str] = &["cutting", "demolition", "specialty"];
/// A candidate is needed for less than this share of the project timeline.
pub const TOD_UTILIZATION_CUTOFF: f64 = 0.6;
pub const TOD_SAVINGS_RATE: f64 = 0.25;
/// Savings above which a hybrid fleet + on-demand strategy is recommended.
pub const HYBRID_SAVINGS_THRESHOLD: f64 = 5000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsOnDemandAnalysis {
    pub candidates: Vec<RecommendedTool>,
    pub potential_savings: f64,
    pub recommend_hybrid: bool,
    pub strategy: String,
}

pub fn is_tod_candidate(profile: &ProjectProfile, tool: &RecommendedTool) -> bool {
    tool.category_contains(TOD_CATEGORIES)
        && tool.rental_duration < f64::from(profile.timeline) * TOD_UTILIZATION_CUTOFF
}

pub fn analyze_tools_on_demand(profile: &ProjectProfile, tools: &[RecommendedTool]) -> ToolsOnDemandAnalysis {
    let candidates: Vec<RecommendedTool> = tools
        .iter()
        .filter(|t| is_tod_candidate(profile, t))
        .cloned()
        .collect();

    let potential_savings = candidates.iter().map(|t| t.total_cost).sum::<f64>() * TOD_SAVINGS_RATE;
    let recommend_hybrid = potential_savings > HYBRID_SAVINGS_THRESHOLD;

    let strategy = if recommend_hybrid {
        format!(
            "Hybrid: fleet management for core tools, Tools on Demand for {} short-use tool(s)",
            candidates.len()
        )
    } else {
        "Fleet management for all recommended tools".to_string()
    };

    ToolsOnDemandAnalysis {
        candidates,
        potential_savings,
        recommend_hybrid,
        strategy,
    }
}
