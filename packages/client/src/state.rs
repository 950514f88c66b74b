// ABOUTME: Application state container: one ordered collection per entity plus navigation
// ABOUTME: Also defines the Task/ProjectTask duality used by the master task list

use chrono::NaiveDate;
use dayboard_core::{
    CalendarEvent, Engagement, Highlight, Idea, InternalProject, Note, ProjectTask, Resource,
    Task, TaskType, UsefulLink,
};

/// Which screen the client is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Engagements,
    EngagementDetail(String),
    Tasks,
    Projects,
    Ideas,
    Highlights,
    Calendar,
    Links,
    Notes,
}

/// Tab order used until the user saves their own
pub fn default_tab_order() -> Vec<String> {
    [
        "dashboard",
        "engagements",
        "tasks",
        "projects",
        "ideas",
        "highlights",
        "calendar",
        "links",
        "notes",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Everything the client knows. Collections are newest first.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub engagements: Vec<Engagement>,
    pub tasks: Vec<Task>,
    pub projects: Vec<InternalProject>,
    pub ideas: Vec<Idea>,
    pub highlights: Vec<Highlight>,
    pub events: Vec<CalendarEvent>,
    pub links: Vec<UsefulLink>,
    pub notes: Vec<Note>,
    pub view: View,
    pub tab_order: Vec<String>,
}

impl AppState {
    /// Project that owns a project task with this id, if any
    pub fn project_owning_task(&self, task_id: &str) -> Option<&InternalProject> {
        self.projects.iter().find(|p| p.task(task_id).is_some())
    }
}

/// A resource with a collection in [`AppState`]
pub trait Tracked: Resource {
    fn collection(state: &AppState) -> &Vec<Self>;
    fn collection_mut(state: &mut AppState) -> &mut Vec<Self>;

    /// Called after a record is removed locally
    fn on_removed(_state: &mut AppState, _id: &str) {}

    /// Set when this row is a view onto a project's task rather than its own record
    fn as_project_task(&self) -> Option<TaskRef> {
        None
    }

    /// Detach a child row from the project that owns it, returning the project to persist
    fn remove_from_project(_state: &mut AppState, _id: &str) -> Option<InternalProject> {
        None
    }
}

macro_rules! tracked {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl Tracked for $ty {
                fn collection(state: &AppState) -> &Vec<Self> {
                    &state.$field
                }

                fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
                    &mut state.$field
                }
            }
        )+
    };
}

tracked! {
    InternalProject => projects,
    Idea => ideas,
    Highlight => highlights,
    CalendarEvent => events,
    UsefulLink => links,
    Note => notes,
}

impl Tracked for Task {
    fn collection(state: &AppState) -> &Vec<Self> {
        &state.tasks
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.tasks
    }

    fn as_project_task(&self) -> Option<TaskRef> {
        self.project_id.is_some().then(|| TaskRef::from(self.clone()))
    }

    fn remove_from_project(state: &mut AppState, id: &str) -> Option<InternalProject> {
        let project = state.projects.iter_mut().find(|p| p.task(id).is_some())?;
        project.remove_task(id);
        Some(project.clone())
    }
}

impl Tracked for Engagement {
    fn collection(state: &AppState) -> &Vec<Self> {
        &state.engagements
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.engagements
    }

    /// Leaving a deleted engagement's detail page
    fn on_removed(state: &mut AppState, id: &str) {
        if matches!(&state.view, View::EngagementDetail(open) if open == id) {
            state.view = View::Dashboard;
        }
    }
}

/// A row of the master task list: either a standalone task or a view onto a
/// project's task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskRef {
    Standalone(Task),
    ProjectDerived {
        project_id: String,
        task: ProjectTask,
    },
}

impl TaskRef {
    pub fn id(&self) -> &str {
        match self {
            TaskRef::Standalone(task) => &task.id,
            TaskRef::ProjectDerived { task, .. } => &task.id,
        }
    }

    /// Task-shaped view. Project tasks always show as today's daily tasks.
    pub fn to_task(&self, today: NaiveDate, state: &AppState) -> Task {
        match self {
            TaskRef::Standalone(task) => task.clone(),
            TaskRef::ProjectDerived { project_id, task } => {
                let project_name = state
                    .projects
                    .iter()
                    .find(|p| &p.id == project_id)
                    .map(|p| p.name.clone());

                let mut view =
                    Task::new(task.id.clone(), task.content.clone(), TaskType::Daily, today);
                view.is_completed = task.is_completed;
                view.project_id = Some(project_id.clone());
                view.project_name = project_name;
                view
            }
        }
    }
}

impl From<Task> for TaskRef {
    /// Views produced by the master list carry `projectId`; everything else is standalone
    fn from(task: Task) -> Self {
        match task.project_id.clone() {
            Some(project_id) => TaskRef::ProjectDerived {
                project_id,
                task: ProjectTask {
                    id: task.id,
                    content: task.content,
                    is_completed: task.is_completed,
                },
            },
            None => TaskRef::Standalone(task),
        }
    }
}
