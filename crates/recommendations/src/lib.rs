//! Sales-side enrichment of tool recommendations.
//!
//! Everything here is a stateless function of a project profile and a list of
//! recommended tools. All thresholds are fixed business constants.

pub mod classify;
pub mod enhancer;
pub mod insights;
pub mod model;
pub mod risk;
pub mod tod;

pub use classify::{ArchetypeMatch, TodSuitability, archetype_match, tod_suitability};
pub use enhancer::{EnhancedRecommendation, RecommendationReport, build_report, enhance_recommendations};
pub use insights::{FinancialInsights, RiskReduction, calculate_insights};
pub use model::{ProjectProfile, RecommendedTool};
pub use risk::{RiskAssessment, RiskFactor, RiskLevel, assess_risk};
pub use tod::{ToolsOnDemandAnalysis, analyze_tools_on_demand};
