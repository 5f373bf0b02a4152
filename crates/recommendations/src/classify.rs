//! Qualitative classification of recommended tools.

use serde::{Deserialize, Serialize};

use crate::model::{ProjectProfile, RecommendedTool};

/// How well a tool fits short-term Tools-on-Demand rental instead of a fleet contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodSuitability {
    Excellent,
    Good,
    Limited,
    NotSuitable,
}

/// How central a tool is to the project's archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeMatch {
    Essential,
    Recommended,
    Situational,
}

/// Checked in order; the first matching row wins.
const TOD_RULES: &[(&[&str], TodSuitability)] = &[
    (&["demolition", "specialty"], TodSuitability::Excellent),
    (&["cutting", "grinding"], TodSuitability::Good),
    (&["drilling", "fastening", "anchoring"], TodSuitability::Limited),
    (&["measuring", "layout", "detection"], TodSuitability::NotSuitable),
];

pub const POWER_TOOL_CATEGORIES: &[&str] = &["drilling", "cutting", "demolition", "grinding", "fastening"];

/// Project types whose work is dominated by power-tool use.
pub const HEAVY_PROJECT_TYPES: &[&str] = &["commercial", "industrial", "infrastructure"];

pub fn tod_suitability(tool: &RecommendedTool) -> TodSuitability {
    TOD_RULES
        .iter()
        .find(|(needles, _)| tool.category_contains(needles))
        .map(|(_, suitability)| *suitability)
        .unwrap_or(TodSuitability::Good)
}

pub fn is_power_tool(tool: &RecommendedTool) -> bool {
    tool.category_contains(POWER_TOOL_CATEGORIES)
}

pub fn archetype_match(profile: &ProjectProfile, tool: &RecommendedTool) -> ArchetypeMatch {
    let project_type = profile.project_type.to_lowercase();
    let heavy = HEAVY_PROJECT_TYPES.contains(&project_type.as_str());

    match (heavy, is_power_tool(tool)) {
        (true, true) => ArchetypeMatch::Essential,
        (true, false) | (false, true) => ArchetypeMatch::Recommended,
        (false, false) => ArchetypeMatch::Situational,
    }
}
