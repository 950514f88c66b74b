use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    ProjectStatus {
        NotStarted => "Not Started",
        InProgress => "In Progress",
        OnHold => "On Hold",
        Completed => "Completed",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::NotStarted
    }
}

/// Child task of an internal project. Has no identity outside its project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchNote {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Project aggregate: the parent row plus its ordered task and note children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
    #[serde(default)]
    pub research_notes: Vec<ResearchNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_idea_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_idea_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_engagement_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_engagement_name: Option<String>,
}

impl InternalProject {
    pub fn task(&self, task_id: &str) -> Option<&ProjectTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut ProjectTask> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    /// Remove a child task, returning it if it was present
    pub fn remove_task(&mut self, task_id: &str) -> Option<ProjectTask> {
        let index = self.tasks.iter().position(|t| t.id == task_id)?;
        Some(self.tasks.remove(index))
    }
}

/// Caller-supplied overrides for idea-to-project conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOverrides {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}
