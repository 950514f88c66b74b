use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::project::{ConversionOverrides, InternalProject, ProjectStatus};
use crate::utils::generate_id;

wire_enum! {
    IdeaStatus {
        New => "New",
        Planned => "Planned",
        InProgress => "In Progress",
        Implemented => "Implemented",
        Discarded => "Discarded",
    }
}

impl Default for IdeaStatus {
    fn default() -> Self {
        IdeaStatus::New
    }
}

wire_enum! {
    IdeaPriority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

impl Default for IdeaPriority {
    fn default() -> Self {
        IdeaPriority::Medium
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaEntry {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    /// Mirror of the first entry for older clients
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entries: Vec<IdeaEntry>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: IdeaPriority,
    #[serde(default)]
    pub status: IdeaStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_summary_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_to_project_id: Option<String>,
}

impl Idea {
    /// Content of the first entry, falling back to the legacy description
    pub fn lead_text(&self) -> &str {
        self.entries
            .first()
            .map(|e| e.content.as_str())
            .unwrap_or(self.description.as_str())
    }

    pub fn is_converted(&self) -> bool {
        self.converted_to_project_id.is_some()
    }

    /// Append a new entry, keeping `description` mirrored to the first entry
    pub fn append_entry(&mut self, content: impl Into<String>) -> &IdeaEntry {
        let now = Utc::now();
        self.entries.push(IdeaEntry {
            id: generate_id("entry"),
            content: content.into(),
            timestamp: now,
        });
        if let Some(first) = self.entries.first() {
            self.description = first.content.clone();
        }
        self.updated_at = now;
        &self.entries[self.entries.len() - 1]
    }

    /// Build the project produced by converting this idea
    pub fn to_project(
        &self,
        project_id: String,
        today: NaiveDate,
        overrides: &ConversionOverrides,
    ) -> InternalProject {
        InternalProject {
            id: project_id,
            name: overrides.name.clone().unwrap_or_else(|| self.title.clone()),
            description: overrides
                .description
                .clone()
                .unwrap_or_else(|| self.lead_text().to_string()),
            status: overrides.status.unwrap_or(ProjectStatus::NotStarted),
            start_date: overrides.start_date.unwrap_or(today),
            due_date: overrides.due_date,
            created_at: Utc::now(),
            tasks: Vec::new(),
            research_notes: Vec::new(),
            source_idea_id: Some(self.id.clone()),
            source_idea_title: Some(self.title.clone()),
            source_engagement_id: self.engagement_id.clone(),
            source_engagement_name: self.engagement_name.clone(),
        }
    }

    /// Record a completed conversion. Conversion always ends in `Implemented`.
    pub fn mark_converted(&mut self, project_id: impl Into<String>) {
        self.converted_to_project_id = Some(project_id.into());
        self.status = IdeaStatus::Implemented;
        self.updated_at = Utc::now();
    }
}
