use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Daily tasks are keyed by day, weekly tasks by the Monday of their week
    TaskType {
        Daily => "daily",
        Weekly => "weekly",
    }
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::Daily
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(rename = "type", default)]
    pub kind: TaskType,
    pub date: NaiveDate,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_priority: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        kind: TaskType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            is_completed: false,
            kind,
            date,
            created_at: Utc::now(),
            is_priority: false,
            subtasks: Vec::new(),
            engagement_id: None,
            engagement_name: None,
            project_id: None,
            project_name: None,
        }
    }

    /// True when this task is a projection of a project's child task
    pub fn is_project_derived(&self) -> bool {
        self.project_id.is_some()
    }
}
