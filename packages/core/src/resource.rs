// ABOUTME: The Resource trait tying each entity to its REST collection
// ABOUTME: Shared by the API router and the client backend so paths agree

use serde::{de::DeserializeOwned, Serialize};

use crate::types::{
    CalendarEvent, Engagement, Highlight, Idea, InternalProject, Note, Task, UsefulLink,
};
use crate::validation::{require, validate_url, ValidationError};

/// An entity persisted as a whole object under `/api/<COLLECTION>`
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment of the REST collection, e.g. `engagements`
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Required-field checks run before an upsert is accepted
    fn validate(&self) -> Result<(), ValidationError> {
        require("id", self.id())
    }
}

impl Resource for Engagement {
    const COLLECTION: &'static str = "engagements";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("name", &self.name)
    }
}

impl Resource for Task {
    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("content", &self.content)?;
        for subtask in &self.subtasks {
            require("subtask.id", &subtask.id)?;
        }
        Ok(())
    }
}

impl Resource for InternalProject {
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("name", &self.name)?;
        for task in &self.tasks {
            require("task.id", &task.id)?;
        }
        for note in &self.research_notes {
            require("researchNote.id", &note.id)?;
        }
        Ok(())
    }
}

impl Resource for Idea {
    const COLLECTION: &'static str = "ideas";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("title", &self.title)
    }
}

impl Resource for Highlight {
    const COLLECTION: &'static str = "highlights";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("content", &self.content)
    }
}

impl Resource for CalendarEvent {
    const COLLECTION: &'static str = "events";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("title", &self.title)
    }
}

impl Resource for UsefulLink {
    const COLLECTION: &'static str = "links";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("title", &self.title)?;
        validate_url("url", &self.url)
    }
}

impl Resource for Note {
    const COLLECTION: &'static str = "notes";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("title", &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskType;
    use chrono::NaiveDate;

    #[test]
    fn test_task_requires_content() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let task = Task::new("task-1", "", TaskType::Daily, date);
        assert_eq!(task.validate(), Err(ValidationError::MissingField("content")));

        let task = Task::new("task-1", "Ship it", TaskType::Daily, date);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_link_requires_http_url() {
        let link: UsefulLink = serde_json::from_value(serde_json::json!({
            "id": "link-1",
            "title": "Runbook",
            "url": "javascript:alert(1)"
        }))
        .unwrap();
        assert!(link.validate().is_err());
    }

    #[test]
    fn test_collections_are_distinct() {
        let names = [
            Engagement::COLLECTION,
            Task::COLLECTION,
            InternalProject::COLLECTION,
            Idea::COLLECTION,
            Highlight::COLLECTION,
            CalendarEvent::COLLECTION,
            UsefulLink::COLLECTION,
            Note::COLLECTION,
        ];
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
