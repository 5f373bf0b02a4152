//! Read-only inputs to invoice generation.

use serde::{Deserialize, Serialize};

use toolfleet_core::{CostCenterId, CrewId, Entity, ProjectId, ToolId};

/// A rented tool in the customer's fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub category: String,
    /// Monthly rental rate in currency units.
    pub monthly_rate: f64,
    #[serde(default, rename = "assignedProjectID", alias = "assignedProjectId")]
    pub assigned_project_id: Option<ProjectId>,
}

impl Tool {
    pub fn new(
        id: impl Into<ToolId>,
        name: impl Into<String>,
        category: impl Into<String>,
        monthly_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            monthly_rate,
            assigned_project_id: None,
        }
    }

    pub fn assigned_to(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.assigned_project_id = Some(project_id.into());
        self
    }
}

impl Entity for Tool {
    type Id = ToolId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Project complexity as captured during sales qualification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectComplexity {
    Low,
    #[default]
    Medium,
    High,
}

/// A customer construction project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub contract_value: f64,
    /// Free-form type, e.g. "commercial", "residential".
    #[serde(rename = "type", default)]
    pub project_type: String,
    #[serde(default)]
    pub complexity: ProjectComplexity,
    /// Planned duration in months.
    #[serde(default)]
    pub timeline: u32,
    #[serde(default)]
    pub labor_count: u32,
    #[serde(default)]
    pub budget: f64,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contract_value: 0.0,
            project_type: String::new(),
            complexity: ProjectComplexity::default(),
            timeline: 0,
            labor_count: 0,
            budget: 0.0,
        }
    }
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An accounting bucket that rental costs can be charged to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCenter {
    pub id: CostCenterId,
    /// e.g. "CC-CONSTRUCTION-01"; matched by substring.
    pub accounting_code: String,
    pub department: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl CostCenter {
    pub fn new(
        id: impl Into<CostCenterId>,
        accounting_code: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            accounting_code: accounting_code.into(),
            department: department.into(),
            name: None,
        }
    }
}

impl Entity for CostCenter {
    type Id = CostCenterId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A field crew and the tools checked out to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crew {
    pub id: CrewId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "toolIDs", alias = "toolIds")]
    pub tool_ids: Vec<ToolId>,
}

impl Crew {
    pub fn new(id: impl Into<CrewId>, tool_ids: Vec<ToolId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            tool_ids,
        }
    }
}

impl Entity for Crew {
    type Id = CrewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
