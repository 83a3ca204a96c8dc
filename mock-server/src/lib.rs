use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const DEFAULT_PRIORITY: &str = "متوسطة";
const DEFAULT_TASK_STATUS: &str = "جديدة";
const DEFAULT_MEETING_STATUS: &str = "مجدولة";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<i64>,
    pub created_by: Option<i64>,
    pub priority: String,
    pub status: String,
    pub progress: u8,
    pub due_date: Option<String>,
}

#[derive(Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<i64>,
    pub created_by: Option<i64>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub progress: Option<u8>,
    pub due_date: Option<String>,
}

#[derive(Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<i64>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub progress: Option<u8>,
    pub due_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub join_date: Option<String>,
    pub manager_id: Option<i64>,
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub join_date: Option<String>,
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub manager_id: Option<i64>,
    pub permissions: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub meeting_date: Option<String>,
    pub location: Option<String>,
    pub organizer_id: Option<i64>,
    pub goal: Option<String>,
    pub reality: Option<String>,
    pub options: Option<String>,
    pub way_forward: Option<String>,
    pub attendees: Vec<i64>,
    pub status: String,
}

#[derive(Deserialize)]
pub struct NewMeeting {
    pub title: String,
    pub description: Option<String>,
    pub meeting_date: Option<String>,
    pub location: Option<String>,
    pub organizer_id: Option<i64>,
    pub goal: Option<String>,
    pub reality: Option<String>,
    pub options: Option<String>,
    pub way_forward: Option<String>,
    #[serde(default)]
    pub attendees: Vec<i64>,
}

#[derive(Deserialize)]
pub struct MeetingUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub meeting_date: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub way_forward: Option<String>,
    pub attendees: Option<Vec<i64>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
}

#[derive(Deserialize)]
pub struct NewNotification {
    pub message: String,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
    users: BTreeMap<i64, User>,
    meetings: BTreeMap<i64, Meeting>,
    notifications: Vec<Notification>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Missing ids answer 404 with a JSON body, like every other route.
type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn not_found(kind: &str, id: i64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{kind} {id} not found") })),
    )
}

pub fn app() -> Router {
    app_with_db(Db::default())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", get(get_task).put(update_task).delete(delete_task))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/api/meetings", get(list_meetings).post(create_meeting))
        .route("/api/meetings/{id}", get(get_meeting).put(update_meeting))
        .route(
            "/api/notifications",
            get(list_notifications).post(create_notification),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- tasks ---

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    Json(db.read().await.tasks.values().cloned().collect())
}

async fn create_task(State(db): State<Db>, Json(input): Json<NewTask>) -> (StatusCode, Json<Task>) {
    let mut store = db.write().await;
    let task = Task {
        id: store.next_id(),
        title: input.title,
        description: input.description,
        assigned_to: input.assigned_to,
        created_by: input.created_by,
        priority: input.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        status: input.status.unwrap_or_else(|| DEFAULT_TASK_STATUS.to_string()),
        progress: input.progress.unwrap_or(0),
        due_date: input.due_date,
    };
    store.tasks.insert(task.id, task.clone());
    tracing::info!(id = task.id, "task created");
    (StatusCode::CREATED, Json(task))
}

async fn get_task(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Task> {
    let store = db.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or_else(|| not_found("task", id))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TaskUpdate>,
) -> ApiResult<Task> {
    let mut store = db.write().await;
    let task = store.tasks.get_mut(&id).ok_or_else(|| not_found("task", id))?;
    if let Some(title) = input.title {
        task.title = title;
    }
    if input.description.is_some() {
        task.description = input.description;
    }
    if input.assigned_to.is_some() {
        task.assigned_to = input.assigned_to;
    }
    if let Some(priority) = input.priority {
        task.priority = priority;
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    if let Some(progress) = input.progress {
        task.progress = progress;
    }
    if input.due_date.is_some() {
        task.due_date = input.due_date;
    }
    tracing::info!(id, "task updated");
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Value> {
    let mut store = db.write().await;
    store.tasks.remove(&id).ok_or_else(|| not_found("task", id))?;
    tracing::info!(id, "task deleted");
    Ok(Json(json!({ "deleted": id })))
}

// --- users ---

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.read().await.users.values().cloned().collect())
}

async fn create_user(State(db): State<Db>, Json(input): Json<NewUser>) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    let user = User {
        id: store.next_id(),
        name: input.name,
        email: input.email,
        position: input.position,
        department: input.department,
        join_date: input.join_date,
        manager_id: input.manager_id,
        permissions: input.permissions,
    };
    store.users.insert(user.id, user.clone());
    tracing::info!(id = user.id, "user created");
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<User> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or_else(|| not_found("user", id))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UserUpdate>,
) -> ApiResult<User> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or_else(|| not_found("user", id))?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(position) = input.position {
        user.position = position;
    }
    if let Some(department) = input.department {
        user.department = department;
    }
    if input.manager_id.is_some() {
        user.manager_id = input.manager_id;
    }
    if let Some(permissions) = input.permissions {
        user.permissions = permissions;
    }
    tracing::info!(id, "user updated");
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Value> {
    let mut store = db.write().await;
    store.users.remove(&id).ok_or_else(|| not_found("user", id))?;
    tracing::info!(id, "user deleted");
    Ok(Json(json!({ "deleted": id })))
}

// --- meetings ---

async fn list_meetings(State(db): State<Db>) -> Json<Vec<Meeting>> {
    Json(db.read().await.meetings.values().cloned().collect())
}

async fn create_meeting(
    State(db): State<Db>,
    Json(input): Json<NewMeeting>,
) -> (StatusCode, Json<Meeting>) {
    let mut store = db.write().await;
    let meeting = Meeting {
        id: store.next_id(),
        title: input.title,
        description: input.description,
        meeting_date: input.meeting_date,
        location: input.location,
        organizer_id: input.organizer_id,
        goal: input.goal,
        reality: input.reality,
        options: input.options,
        way_forward: input.way_forward,
        attendees: input.attendees,
        status: DEFAULT_MEETING_STATUS.to_string(),
    };
    store.meetings.insert(meeting.id, meeting.clone());
    tracing::info!(id = meeting.id, "meeting created");
    (StatusCode::CREATED, Json(meeting))
}

async fn get_meeting(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Meeting> {
    let store = db.read().await;
    store.meetings.get(&id).cloned().map(Json).ok_or_else(|| not_found("meeting", id))
}

async fn update_meeting(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<MeetingUpdate>,
) -> ApiResult<Meeting> {
    let mut store = db.write().await;
    let meeting = store.meetings.get_mut(&id).ok_or_else(|| not_found("meeting", id))?;
    if let Some(title) = input.title {
        meeting.title = title;
    }
    if input.description.is_some() {
        meeting.description = input.description;
    }
    if input.meeting_date.is_some() {
        meeting.meeting_date = input.meeting_date;
    }
    if input.location.is_some() {
        meeting.location = input.location;
    }
    if let Some(status) = input.status {
        meeting.status = status;
    }
    if input.way_forward.is_some() {
        meeting.way_forward = input.way_forward;
    }
    if let Some(attendees) = input.attendees {
        meeting.attendees = attendees;
    }
    tracing::info!(id, "meeting updated");
    Ok(Json(meeting.clone()))
}

// --- notifications ---

async fn list_notifications(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    Json(json!({ "notifications": store.notifications }))
}

async fn create_notification(
    State(db): State<Db>,
    Json(input): Json<NewNotification>,
) -> (StatusCode, Json<Notification>) {
    let notification = Notification {
        id: Uuid::new_v4(),
        message: input.message,
    };
    db.write().await.notifications.push(notification.clone());
    (StatusCode::CREATED, Json(notification))
}
