use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use dayboard_client::{Backend, ClientError, ClientResult, Store, View};
use dayboard_core::{
    ConversionOverrides, Engagement, EngagementStatus, Idea, IdeaStatus, InternalProject, Note,
    ProjectTask, Task, TaskType, TimelineEntryType, TAB_ORDER_SETTING,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Save(String, Value),
    Delete(String, String),
    Convert(String),
    PutSetting(String, Value),
}

/// Backend double that records every call and serves canned lists
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    lists: HashMap<String, Vec<Value>>,
    settings: Mutex<HashMap<String, Value>>,
    converted: Option<Value>,
    fail: bool,
}

impl RecordingBackend {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn with_list<T: Serialize>(mut self, collection: &str, items: &[T]) -> Self {
        let values = items
            .iter()
            .map(|item| serde_json::to_value(item).unwrap())
            .collect();
        self.lists.insert(collection.to_string(), values);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ClientError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn list(&self, collection: &str) -> ClientResult<Vec<Value>> {
        Ok(self.lists.get(collection).cloned().unwrap_or_default())
    }

    async fn save(&self, collection: &str, body: Value) -> ClientResult<Value> {
        self.record(Call::Save(collection.to_string(), body.clone()))?;
        Ok(body)
    }

    async fn delete(&self, collection: &str, id: &str) -> ClientResult<()> {
        self.record(Call::Delete(collection.to_string(), id.to_string()))
    }

    async fn convert_idea(
        &self,
        idea_id: &str,
        _overrides: &ConversionOverrides,
    ) -> ClientResult<Value> {
        self.record(Call::Convert(idea_id.to_string()))?;
        Ok(self.converted.clone().unwrap_or(Value::Null))
    }

    async fn get_setting(&self, key: &str) -> ClientResult<Value> {
        Ok(self.settings.lock().unwrap().get(key).cloned().unwrap_or(Value::Null))
    }

    async fn put_setting(&self, key: &str, value: Value) -> ClientResult<()> {
        self.record(Call::PutSetting(key.to_string(), value.clone()))?;
        self.settings.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project(id: &str, tasks: &[(&str, &str, bool)]) -> InternalProject {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Project {}", id),
        "description": "",
        "status": "In Progress",
        "startDate": "2024-01-01",
        "createdAt": "2024-01-01T00:00:00Z",
        "tasks": tasks.iter().map(|(id, content, done)| json!({
            "id": id, "content": content, "isCompleted": done
        })).collect::<Vec<_>>(),
        "researchNotes": []
    }))
    .unwrap()
}

fn idea(id: &str) -> Idea {
    serde_json::from_value(json!({
        "id": id,
        "title": "Status tool",
        "description": "Script for Jira",
        "category": "Tools",
        "priority": "High",
        "status": "New",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_add_prepends_and_saves() {
    let backend = Arc::new(RecordingBackend::default());
    let mut store = Store::new(Arc::clone(&backend));

    store.add(Task::new("t-1", "First", TaskType::Daily, date(2024, 1, 1))).wait().await;
    store.add(Task::new("t-2", "Second", TaskType::Daily, date(2024, 1, 1))).wait().await;

    let ids: Vec<_> = store.state().tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t-2", "t-1"]);

    let saved: Vec<_> = backend
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::Save(collection, body) => (collection, body["id"].as_str().unwrap().to_string()),
            other => panic!("unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(
        saved,
        vec![
            ("tasks".to_string(), "t-1".to_string()),
            ("tasks".to_string(), "t-2".to_string())
        ]
    );
}

#[tokio::test]
async fn test_failed_save_keeps_local_change() {
    let backend = Arc::new(RecordingBackend::failing());
    let mut store = Store::new(Arc::clone(&backend));

    let note: Note = serde_json::from_value(json!({
        "id": "note-1",
        "title": "Offline",
        "content": "",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    store.add(note).wait().await;

    assert_eq!(backend.calls().len(), 1);
    assert_eq!(store.state().notes.len(), 1);
    assert_eq!(store.state().notes[0].title, "Offline");
}

#[tokio::test]
async fn test_master_list_merges_project_tasks() {
    let standalone = Task::new("t-1", "Standalone", TaskType::Weekly, date(2024, 1, 1));
    let backend = Arc::new(
        RecordingBackend::default()
            .with_list("tasks", &[standalone])
            .with_list("projects", &[project("p-1", &[("pt-1", "Cutover", false)])]),
    );
    let mut store = Store::new(backend);
    store.load_all().await.unwrap();

    let today = date(2024, 3, 15);
    let tasks = store.master_tasks(today);
    assert_eq!(tasks.len(), 2);

    assert_eq!(tasks[0].id, "t-1");
    assert_eq!(tasks[0].kind, TaskType::Weekly);

    let derived = &tasks[1];
    assert_eq!(derived.id, "pt-1");
    assert_eq!(derived.kind, TaskType::Daily);
    assert_eq!(derived.date, today);
    assert_eq!(derived.project_id.as_deref(), Some("p-1"));
    assert_eq!(derived.project_name.as_deref(), Some("Project p-1"));
}

#[tokio::test]
async fn test_updating_project_task_saves_project() {
    let backend = Arc::new(
        RecordingBackend::default()
            .with_list("projects", &[project("p-1", &[("pt-1", "Cutover", false)])]),
    );
    let mut store = Store::new(Arc::clone(&backend));
    store.load_all().await.unwrap();

    let mut view = store.master_tasks(date(2024, 3, 15)).remove(0);
    view.is_completed = true;
    view.content = "Cutover done".to_string();
    store.update_task(view).wait().await;

    assert!(store.state().tasks.is_empty());
    assert_eq!(
        store.state().projects[0].tasks,
        vec![ProjectTask {
            id: "pt-1".to_string(),
            content: "Cutover done".to_string(),
            is_completed: true,
        }]
    );

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Save(collection, body) => {
            assert_eq!(collection, "projects");
            assert_eq!(body["id"], "p-1");
            assert_eq!(body["tasks"][0]["isCompleted"], true);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_generic_update_of_project_row_saves_project() {
    let backend = Arc::new(
        RecordingBackend::default()
            .with_list("projects", &[project("p-1", &[("pt-1", "Cutover", false)])]),
    );
    let mut store = Store::new(Arc::clone(&backend));
    store.load_all().await.unwrap();

    let mut view = store.master_tasks(date(2024, 3, 15)).remove(0);
    view.is_completed = true;
    store.update(view).wait().await;

    assert!(store.state().tasks.is_empty());
    assert!(store.state().projects[0].tasks[0].is_completed);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Save(collection, body) => {
            assert_eq!(collection, "projects");
            assert_eq!(body["tasks"][0]["isCompleted"], true);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_adding_task_with_project_id_appends_to_project() {
    let backend = Arc::new(
        RecordingBackend::default()
            .with_list("projects", &[project("p-1", &[("pt-1", "Cutover", false)])]),
    );
    let mut store = Store::new(Arc::clone(&backend));
    store.load_all().await.unwrap();

    let mut task = Task::new("pt-2", "Rollback plan", TaskType::Daily, date(2024, 3, 15));
    task.project_id = Some("p-1".to_string());
    store.add(task).wait().await;

    assert!(store.state().tasks.is_empty());
    let ids: Vec<_> = store.state().projects[0]
        .tasks
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["pt-1", "pt-2"]);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::Save(collection, _) if collection == "projects"));
}

#[tokio::test]
async fn test_generic_delete_of_project_task_saves_project() {
    let backend = Arc::new(
        RecordingBackend::default()
            .with_list("projects", &[project("p-1", &[("pt-1", "Cutover", false)])]),
    );
    let mut store = Store::new(Arc::clone(&backend));
    store.load_all().await.unwrap();

    store.delete::<Task>("pt-1").wait().await;

    assert!(store.state().projects[0].tasks.is_empty());
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::Save(collection, _) if collection == "projects"));
}

#[tokio::test]
async fn test_deleting_project_task_saves_project() {
    let tasks = [("pt-1", "A", false), ("pt-2", "B", false)];
    let backend = Arc::new(
        RecordingBackend::default().with_list("projects", &[project("p-1", &tasks)]),
    );
    let mut store = Store::new(Arc::clone(&backend));
    store.load_all().await.unwrap();

    store.delete_task("pt-1").wait().await;

    let remaining: Vec<_> = store.state().projects[0]
        .tasks
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(remaining, vec!["pt-2"]);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::Save(collection, _) if collection == "projects"));
}

#[tokio::test]
async fn test_deleting_standalone_task() {
    let backend = Arc::new(RecordingBackend::default());
    let mut store = Store::new(Arc::clone(&backend));

    store.add(Task::new("t-1", "Standalone", TaskType::Daily, date(2024, 1, 1))).wait().await;
    store.delete_task("t-1").wait().await;

    assert!(store.state().tasks.is_empty());
    assert_eq!(
        backend.calls().last(),
        Some(&Call::Delete("tasks".to_string(), "t-1".to_string()))
    );
}

#[tokio::test]
async fn test_deleting_open_engagement_returns_to_dashboard() {
    let backend = Arc::new(RecordingBackend::default());
    let mut store = Store::new(Arc::clone(&backend));

    let engagement = Engagement::new_with_seed("ENG-1", "org-1", "Acme", "Rollout", "Kickoff");
    let id = engagement.id.clone();
    store.add(engagement).wait().await;
    store.open_engagement(&id);
    assert_eq!(store.state().view, View::EngagementDetail(id.clone()));

    store.delete::<Engagement>(&id).wait().await;

    assert_eq!(store.state().view, View::Dashboard);
    assert!(store.state().engagements.is_empty());
    assert_eq!(
        backend.calls().last(),
        Some(&Call::Delete("engagements".to_string(), id))
    );
}

#[tokio::test]
async fn test_engagement_helpers() {
    let backend = Arc::new(RecordingBackend::default());
    let mut store = Store::new(Arc::clone(&backend));

    let engagement = Engagement::new_with_seed("ENG-1", "org-1", "Acme", "Rollout", "Kickoff");
    let id = engagement.id.clone();
    store.add(engagement).wait().await;

    store
        .add_timeline_entry(&id, date(2024, 2, 1), TimelineEntryType::Meeting, "Steering call")
        .unwrap()
        .wait()
        .await;
    store
        .set_engagement_status(&id, EngagementStatus::OnHold)
        .unwrap()
        .wait()
        .await;

    let engagement = &store.state().engagements[0];
    assert_eq!(engagement.timeline.len(), 2);
    assert_eq!(engagement.timeline[1].content, "Steering call");
    assert_eq!(engagement.status, EngagementStatus::OnHold);
    assert_eq!(backend.calls().len(), 3);

    let missing = store.set_engagement_status("nope", EngagementStatus::Completed);
    assert!(matches!(missing, Err(ClientError::NotFound { collection: "engagements", .. })));
}

#[tokio::test]
async fn test_append_idea_entry_mirrors_description() {
    let backend = Arc::new(RecordingBackend::default());
    let mut store = Store::new(Arc::clone(&backend));
    store.add(idea("idea-1")).wait().await;

    store.append_idea_entry("idea-1", "First thought").unwrap().wait().await;
    store.append_idea_entry("idea-1", "Second thought").unwrap().wait().await;

    let idea = &store.state().ideas[0];
    assert_eq!(idea.entries.len(), 2);
    assert_eq!(idea.description, "First thought");
    assert_eq!(backend.calls().len(), 3);
}

#[tokio::test]
async fn test_convert_idea_updates_both_collections() {
    let converted = {
        let mut p = project("proj-9", &[]);
        p.source_idea_id = Some("idea-1".to_string());
        serde_json::to_value(p).unwrap()
    };
    let backend = Arc::new(RecordingBackend {
        converted: Some(converted),
        ..Default::default()
    });
    let mut store = Store::new(Arc::clone(&backend));
    store.add(idea("idea-1")).wait().await;

    let project = store
        .convert_idea("idea-1", &ConversionOverrides::default())
        .await
        .unwrap();
    assert_eq!(project.id, "proj-9");

    // Converting again must not duplicate the local project
    store
        .convert_idea("idea-1", &ConversionOverrides::default())
        .await
        .unwrap();

    assert_eq!(store.state().projects.len(), 1);
    let idea = &store.state().ideas[0];
    assert_eq!(idea.converted_to_project_id.as_deref(), Some("proj-9"));
    assert_eq!(idea.status, IdeaStatus::Implemented);
}

#[tokio::test]
async fn test_tab_order_round_trip() {
    let backend = Arc::new(RecordingBackend::default());
    let mut store = Store::new(Arc::clone(&backend));

    let default_order = store.load_tab_order().await.unwrap().to_vec();
    assert_eq!(default_order[0], "dashboard");

    let order = vec!["notes".to_string(), "dashboard".to_string()];
    store.save_tab_order(order.clone()).wait().await;
    assert_eq!(store.state().tab_order, order);
    assert_eq!(
        backend.calls(),
        vec![Call::PutSetting(TAB_ORDER_SETTING.to_string(), json!(["notes", "dashboard"]))]
    );

    let mut fresh = Store::new(backend);
    assert_eq!(fresh.load_tab_order().await.unwrap(), order.as_slice());
}
