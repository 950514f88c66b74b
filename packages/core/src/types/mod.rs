// ABOUTME: Domain type definitions for every Dayboard entity
// ABOUTME: Wire shapes are camelCase JSON; nested records are explicit types

/// Declares a closed string enum with its wire spelling, `as_str` and `FromStr`
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::validation::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(crate::validation::ValidationError::InvalidEnum {
                        field: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

mod calendar;
mod engagement;
mod highlight;
mod idea;
mod link;
mod note;
mod project;
mod task;
mod user;

pub use calendar::{CalendarEvent, EventType};
pub use engagement::{
    Engagement, EngagementFile, EngagementStatus, TimelineEntry, TimelineEntryType,
};
pub use highlight::Highlight;
pub use idea::{Idea, IdeaEntry, IdeaPriority, IdeaStatus};
pub use link::UsefulLink;
pub use note::Note;
pub use project::{ConversionOverrides, InternalProject, ProjectStatus, ProjectTask, ResearchNote};
pub use task::{Subtask, Task, TaskType};
pub use user::User;
