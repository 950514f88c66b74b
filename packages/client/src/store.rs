// ABOUTME: The only mutation entry points for client state
// ABOUTME: Each mutation updates AppState immediately, then persists in a spawned task

use std::sync::Arc;

use chrono::NaiveDate;
use dayboard_core::{
    generate_id, CalendarEvent, ConversionOverrides, Engagement, EngagementFile,
    EngagementStatus, Highlight, Idea, InternalProject, Note, ProjectTask, Task, TimelineEntry,
    TimelineEntryType, UsefulLink, TAB_ORDER_SETTING,
};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::backend::{fetch_all, persist, Backend};
use crate::error::{ClientError, ClientResult};
use crate::state::{default_tab_order, AppState, TaskRef, Tracked, View};

/// Handle to a background persistence request.
///
/// Dropping it lets the request finish on its own; awaiting [`PendingSync::wait`]
/// blocks until the backend call has completed (successfully or not).
#[derive(Debug)]
pub struct PendingSync(Option<JoinHandle<()>>);

impl PendingSync {
    /// A handle with nothing to wait for
    pub fn idle() -> Self {
        Self(None)
    }

    pub async fn wait(self) {
        if let Some(handle) = self.0 {
            if let Err(e) = handle.await {
                error!("Background sync task failed: {}", e);
            }
        }
    }
}

/// Client state plus the backend it mirrors to
pub struct Store<B: Backend> {
    state: AppState,
    backend: Arc<B>,
}

impl<B: Backend> Store<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            state: AppState {
                tab_order: default_tab_order(),
                ..Default::default()
            },
            backend,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Replace every collection with the server's copy
    pub async fn load_all(&mut self) -> ClientResult<()> {
        let backend = self.backend.as_ref();
        let (engagements, tasks, projects, ideas, highlights, events, links, notes) =
            tokio::try_join!(
                fetch_all::<Engagement, _>(backend),
                fetch_all::<Task, _>(backend),
                fetch_all::<InternalProject, _>(backend),
                fetch_all::<Idea, _>(backend),
                fetch_all::<Highlight, _>(backend),
                fetch_all::<CalendarEvent, _>(backend),
                fetch_all::<UsefulLink, _>(backend),
                fetch_all::<Note, _>(backend),
            )?;

        self.state.engagements = engagements;
        self.state.tasks = tasks;
        self.state.projects = projects;
        self.state.ideas = ideas;
        self.state.highlights = highlights;
        self.state.events = events;
        self.state.links = links;
        self.state.notes = notes;

        debug!(
            "Loaded {} engagements, {} tasks, {} projects, {} ideas",
            self.state.engagements.len(),
            self.state.tasks.len(),
            self.state.projects.len(),
            self.state.ideas.len()
        );
        Ok(())
    }

    /// Persist in the background. Failures are logged and local state is kept.
    fn spawn_save<R: Tracked>(&self, item: R) -> PendingSync {
        let backend = Arc::clone(&self.backend);
        PendingSync(Some(tokio::spawn(async move {
            if let Err(e) = persist(backend.as_ref(), &item).await {
                error!("Failed to save {} {}: {}", R::COLLECTION, item.id(), e);
            }
        })))
    }

    fn spawn_delete(&self, collection: &'static str, id: String) -> PendingSync {
        let backend = Arc::clone(&self.backend);
        PendingSync(Some(tokio::spawn(async move {
            if let Err(e) = backend.delete(collection, &id).await {
                error!("Failed to delete {} {}: {}", collection, id, e);
            }
        })))
    }

    /// Insert at the head of its collection and create it remotely.
    /// A task carrying `projectId` is appended to that project instead.
    pub fn add<R: Tracked>(&mut self, item: R) -> PendingSync {
        if let Some(TaskRef::ProjectDerived { project_id, task }) = item.as_project_task() {
            return self.save_project_task(&project_id, task, true);
        }

        R::collection_mut(&mut self.state).insert(0, item.clone());
        self.spawn_save(item)
    }

    /// Replace the record with the same id and upsert it remotely.
    /// A task carrying `projectId` updates its owning project instead.
    pub fn update<R: Tracked>(&mut self, item: R) -> PendingSync {
        if let Some(task_ref) = item.as_project_task() {
            return self.update_task(task_ref);
        }

        let collection = R::collection_mut(&mut self.state);
        match collection.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item.clone(),
            None => warn!("Updating {} {} that is not loaded locally", R::COLLECTION, item.id()),
        }
        self.spawn_save(item)
    }

    /// Remove locally and delete remotely. A task id owned by a project is
    /// removed from that project, which is then saved whole.
    pub fn delete<R: Tracked>(&mut self, id: &str) -> PendingSync {
        if let Some(project) = R::remove_from_project(&mut self.state, id) {
            return self.spawn_save(project);
        }

        R::collection_mut(&mut self.state).retain(|existing| existing.id() != id);
        R::on_removed(&mut self.state, id);
        self.spawn_delete(R::COLLECTION, id.to_string())
    }

    // Master task list

    /// Standalone tasks first, then one row per project task
    pub fn task_refs(&self) -> Vec<TaskRef> {
        let standalone = self.state.tasks.iter().cloned().map(TaskRef::Standalone);
        let derived = self.state.projects.iter().flat_map(|project| {
            project.tasks.iter().map(|task| TaskRef::ProjectDerived {
                project_id: project.id.clone(),
                task: task.clone(),
            })
        });
        standalone.chain(derived).collect()
    }

    /// Task-shaped rows for the combined task list
    pub fn master_tasks(&self, today: NaiveDate) -> Vec<Task> {
        self.task_refs()
            .iter()
            .map(|task_ref| task_ref.to_task(today, &self.state))
            .collect()
    }

    /// Update a master-list row. Project rows persist the whole owning project.
    pub fn update_task(&mut self, task: impl Into<TaskRef>) -> PendingSync {
        match task.into() {
            TaskRef::Standalone(task) => self.update(task),
            TaskRef::ProjectDerived { project_id, task } => {
                self.save_project_task(&project_id, task, false)
            }
        }
    }

    /// Delete a master-list row by id, resolving project ownership first
    pub fn delete_task(&mut self, id: &str) -> PendingSync {
        self.delete::<Task>(id)
    }

    fn save_project_task(
        &mut self,
        project_id: &str,
        task: ProjectTask,
        append_missing: bool,
    ) -> PendingSync {
        let Some(project) = self.state.projects.iter_mut().find(|p| p.id == project_id) else {
            warn!("Project {} for task {} is not loaded", project_id, task.id);
            return PendingSync::idle();
        };

        match project.task_mut(&task.id) {
            Some(existing) => {
                existing.content = task.content;
                existing.is_completed = task.is_completed;
            }
            None if append_missing => project.tasks.push(task),
            None => {
                warn!("Project {} has no task {}", project_id, task.id);
                return PendingSync::idle();
            }
        }

        let project = project.clone();
        self.spawn_save(project)
    }

    // Engagement helpers

    fn modify_engagement(
        &mut self,
        id: &str,
        change: impl FnOnce(&mut Engagement),
    ) -> ClientResult<PendingSync> {
        let engagement = self
            .state
            .engagements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ClientError::NotFound {
                collection: "engagements",
                id: id.to_string(),
            })?;

        change(engagement);
        let engagement = engagement.clone();
        Ok(self.spawn_save(engagement))
    }

    pub fn add_timeline_entry(
        &mut self,
        engagement_id: &str,
        date: NaiveDate,
        kind: TimelineEntryType,
        content: impl Into<String>,
    ) -> ClientResult<PendingSync> {
        let entry = TimelineEntry {
            id: generate_id("tl"),
            date,
            content: content.into(),
            kind,
        };
        self.modify_engagement(engagement_id, |e| e.timeline.push(entry))
    }

    pub fn attach_file(
        &mut self,
        engagement_id: &str,
        file: EngagementFile,
    ) -> ClientResult<PendingSync> {
        self.modify_engagement(engagement_id, |e| e.files.push(file))
    }

    pub fn remove_file(&mut self, engagement_id: &str, file_id: &str) -> ClientResult<PendingSync> {
        self.modify_engagement(engagement_id, |e| e.files.retain(|f| f.id != file_id))
    }

    pub fn set_engagement_status(
        &mut self,
        engagement_id: &str,
        status: EngagementStatus,
    ) -> ClientResult<PendingSync> {
        self.modify_engagement(engagement_id, |e| e.status = status)
    }

    // Ideas

    pub fn append_idea_entry(
        &mut self,
        idea_id: &str,
        content: impl Into<String>,
    ) -> ClientResult<PendingSync> {
        let idea = self
            .state
            .ideas
            .iter_mut()
            .find(|i| i.id == idea_id)
            .ok_or_else(|| ClientError::NotFound {
                collection: "ideas",
                id: idea_id.to_string(),
            })?;

        idea.append_entry(content);
        let idea = idea.clone();
        Ok(self.spawn_save(idea))
    }

    /// Convert on the server, then mirror the result locally.
    ///
    /// Not optimistic: the project id is assigned by the server.
    pub async fn convert_idea(
        &mut self,
        idea_id: &str,
        overrides: &ConversionOverrides,
    ) -> ClientResult<InternalProject> {
        let raw = self.backend.convert_idea(idea_id, overrides).await?;
        let project: InternalProject = serde_json::from_value(raw)?;

        let projects = &mut self.state.projects;
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => projects.insert(0, project.clone()),
        }

        if let Some(idea) = self.state.ideas.iter_mut().find(|i: &&mut Idea| i.id == idea_id) {
            idea.mark_converted(project.id.clone());
        }

        Ok(project)
    }

    // Navigation

    pub fn navigate(&mut self, view: View) {
        self.state.view = view;
    }

    pub fn open_engagement(&mut self, id: &str) {
        self.navigate(View::EngagementDetail(id.to_string()));
    }

    // Tab order

    /// Fetch the saved tab order, keeping the default when none is stored
    pub async fn load_tab_order(&mut self) -> ClientResult<&[String]> {
        let stored = self.backend.get_setting(TAB_ORDER_SETTING).await?;
        self.state.tab_order = match stored {
            Value::Null => default_tab_order(),
            value => serde_json::from_value(value)?,
        };
        Ok(&self.state.tab_order)
    }

    pub fn save_tab_order(&mut self, order: Vec<String>) -> PendingSync {
        self.state.tab_order = order.clone();

        let backend = Arc::clone(&self.backend);
        PendingSync(Some(tokio::spawn(async move {
            let value = Value::from(order);
            if let Err(e) = backend.put_setting(TAB_ORDER_SETTING, value).await {
                error!("Failed to save tab order: {}", e);
            }
        })))
    }
}
