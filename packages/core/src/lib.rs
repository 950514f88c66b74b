// ABOUTME: Core domain types, traits, and utilities for Dayboard
// ABOUTME: Foundational package shared by storage, API, and client crates

pub mod constants;
pub mod resource;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    CalendarEvent, ConversionOverrides, Engagement, EngagementFile, EngagementStatus, EventType,
    Highlight, Idea, IdeaEntry, IdeaPriority, IdeaStatus, InternalProject, Note, ProjectStatus,
    ProjectTask, ResearchNote, Subtask, Task, TaskType, TimelineEntry, TimelineEntryType,
    UsefulLink, User,
};

pub use resource::Resource;

// Re-export constants
pub use constants::{database_file, dayboard_dir, TAB_ORDER_SETTING};

// Re-export utilities
pub use utils::{generate_id, today, week_start};

// Re-export validation
pub use validation::{require, ValidationError};
