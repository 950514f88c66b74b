use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{generate_id, today};

wire_enum! {
    /// Lifecycle state of a client engagement
    EngagementStatus {
        Active => "Active",
        OnHold => "On Hold",
        Completed => "Completed",
        AtRisk => "At Risk",
    }
}

impl Default for EngagementStatus {
    fn default() -> Self {
        EngagementStatus::Active
    }
}

wire_enum! {
    TimelineEntryType {
        Note => "note",
        Meeting => "meeting",
        Email => "email",
        Milestone => "milestone",
        Update => "update",
    }
}

impl Default for TimelineEntryType {
    fn default() -> Self {
        TimelineEntryType::Note
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: TimelineEntryType,
}

/// A file attached to an engagement, carried inline as base64
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub data: String,
    pub upload_date: DateTime<Utc>,
}

impl EngagementFile {
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            id: generate_id("file"),
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            data: STANDARD.encode(bytes),
            upload_date: Utc::now(),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.as_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub id: String,
    #[serde(default)]
    pub engagement_number: String,
    #[serde(default)]
    pub org_id: String,
    #[serde(default)]
    pub account_name: String,
    pub name: String,
    #[serde(default)]
    pub status: EngagementStatus,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub files: Vec<EngagementFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_summary_date: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Engagement {
    /// Build a new engagement seeded with one timeline entry, as the creation form does
    pub fn new_with_seed(
        engagement_number: impl Into<String>,
        org_id: impl Into<String>,
        account_name: impl Into<String>,
        name: impl Into<String>,
        seed_note: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id("eng"),
            engagement_number: engagement_number.into(),
            org_id: org_id.into(),
            account_name: account_name.into(),
            name: name.into(),
            status: EngagementStatus::Active,
            timeline: vec![TimelineEntry {
                id: generate_id("tl"),
                date: today(),
                content: seed_note.into(),
                kind: TimelineEntryType::Note,
            }],
            files: Vec::new(),
            ai_summary: None,
            last_summary_date: None,
            created_at: Utc::now(),
        }
    }
}
