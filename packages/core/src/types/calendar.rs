use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

wire_enum! {
    EventType {
        Meeting => "meeting",
        Work => "work",
        Personal => "personal",
    }
}

impl Default for EventType {
    fn default() -> Self {
        EventType::Meeting
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    /// `HH:MM`, kept verbatim
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_notes: Option<String>,
    /// Minutes of meeting sent
    #[serde(default)]
    pub mom_sent: bool,
}
