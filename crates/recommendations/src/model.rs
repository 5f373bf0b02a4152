use serde::{Deserialize, Serialize};

use toolfleet_core::ToolId;
use toolfleet_invoicing::{Project, ProjectComplexity};

/// The project characteristics recommendations are scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProfile {
    /// e.g. "commercial", "industrial", "residential".
    #[serde(rename = "type")]
    pub project_type: String,
    pub complexity: ProjectComplexity,
    /// Planned duration in months.
    pub timeline: u32,
    pub labor_count: u32,
    pub budget: f64,
}

impl From<&Project> for ProjectProfile {
    fn from(project: &Project) -> Self {
        Self {
            project_type: project.project_type.clone(),
            complexity: project.complexity,
            timeline: project.timeline,
            labor_count: project.labor_count,
            budget: project.budget,
        }
    }
}

/// A tool proposed for the project by the recommendation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTool {
    pub id: ToolId,
    pub name: String,
    pub category: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub monthly_cost: f64,
    /// Cost over the whole rental duration.
    pub total_cost: f64,
    /// Months the tool is needed on the project.
    pub rental_duration: f64,
}

fn default_quantity() -> u32 {
    1
}

impl RecommendedTool {
    pub fn new(
        id: impl Into<ToolId>,
        name: impl Into<String>,
        category: impl Into<String>,
        monthly_cost: f64,
        rental_duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            quantity: 1,
            monthly_cost,
            total_cost: monthly_cost * rental_duration,
            rental_duration,
        }
    }

    pub(crate) fn category_contains(&self, needles: &[&str]) -> bool {
        let category = self.category.to_lowercase();
        needles.iter().any(|n| category.contains(n))
    }
}
