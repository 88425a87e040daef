// 测试用的内存笔记服务: axum 跑在后台线程里, 行为和 Banchoo 服务端一致
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use banchoo_api_check::Config;
use serde_json::{Value, json};

/// Ways the test server can misbehave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fault {
    #[default]
    None,
    /// Create answers 201 instead of 200.
    CreatedStatus,
    /// Create echoes different content than it stored.
    WrongContent,
    /// Create answers with a body that is not a note.
    GarbageBody,
    /// `GET /notes/{id}` reports a different id.
    WrongId,
    /// PUT answers 500 and changes nothing.
    UpdateFails,
    /// PUT answers 200 but changes nothing.
    IgnoreUpdates,
    /// DELETE answers 404.
    DeleteFails,
    /// DELETE answers 200 but keeps the record.
    KeepDeleted,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ServerOptions {
    pub fault: Fault,
    /// Number of `GET /notes` calls answered 503 before the server is ready.
    pub not_ready_polls: usize,
}

#[derive(Debug, Default)]
pub struct ServerState {
    options: ServerOptions,
    next_id: AtomicI64,
    list_calls: AtomicUsize,
    notes: Mutex<BTreeMap<i64, String>>,
    created: Mutex<Vec<(String, Value)>>,
}

impl ServerState {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Collection and body of every POST, in arrival order.
    pub fn created(&self) -> Vec<(String, Value)> {
        self.created.lock().unwrap().clone()
    }

    pub fn live_notes(&self) -> usize {
        self.notes.lock().unwrap().len()
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<ServerState>,
}

impl TestServer {
    pub fn start() -> Self {
        Self::start_with(ServerOptions::default())
    }

    pub fn with_fault(fault: Fault) -> Self {
        Self::start_with(ServerOptions { fault, ..Default::default() })
    }

    pub fn start_with(options: ServerOptions) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(ServerState { options, next_id: AtomicI64::new(1), ..Default::default() });
        serve(listener, state.clone());
        TestServer { addr, state }
    }

    /// Starts listening on a free port only after `delay`; until then connections are refused.
    pub fn start_after(delay: Duration) -> Self {
        let addr = free_addr();
        let state = Arc::new(ServerState { next_id: AtomicI64::new(1), ..Default::default() });
        let serve_state = state.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let listener = TcpListener::bind(addr).unwrap();
            serve(listener, serve_state);
        });
        TestServer { addr, state }
    }

    pub fn config(&self) -> Config {
        Config::new(&format!("http://{}", self.addr)).unwrap()
    }
}

/// An address nothing listens on (bound once, then released).
pub fn free_addr() -> SocketAddr {
    TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap()
}

fn serve(listener: TcpListener, state: Arc<ServerState>) {
    listener.set_nonblocking(true).unwrap();
    let app = router(state);
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/notes", get(list_notes))
        .route("/notes/:id", get(get_note).put(update_note).delete(delete_note))
        .route("/memos", post(create_memo))
        .route("/tasks", post(create_task))
        .route("/events", post(create_event))
        .with_state(state)
}

async fn list_notes(State(state): State<Arc<ServerState>>) -> Response {
    let call = state.list_calls.fetch_add(1, Ordering::SeqCst);
    if call < state.options.not_ready_polls {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let notes = state.notes.lock().unwrap();
    let body: Vec<Value> = notes.iter().map(|(id, content)| json!({ "id": id, "content": content })).collect();
    Json(body).into_response()
}

async fn create_memo(state: State<Arc<ServerState>>, body: Json<Value>) -> Response {
    create(state, "memos", body)
}

async fn create_task(state: State<Arc<ServerState>>, body: Json<Value>) -> Response {
    create(state, "tasks", body)
}

async fn create_event(state: State<Arc<ServerState>>, body: Json<Value>) -> Response {
    create(state, "events", body)
}

fn create(State(state): State<Arc<ServerState>>, collection: &str, Json(body): Json<Value>) -> Response {
    let Some(content) = body.get("content").and_then(Value::as_str).map(str::to_owned) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    state.created.lock().unwrap().push((collection.to_string(), body.clone()));

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    state.notes.lock().unwrap().insert(id, content.clone());

    match state.options.fault {
        Fault::CreatedStatus => (StatusCode::CREATED, Json(json!({ "id": id, "content": content }))).into_response(),
        Fault::WrongContent => Json(json!({ "id": id, "content": format!("{content}!") })).into_response(),
        Fault::GarbageBody => "created".into_response(),
        _ => Json(json!({ "id": id, "content": content })).into_response(),
    }
}

async fn get_note(State(state): State<Arc<ServerState>>, Path(id): Path<i64>) -> Response {
    let notes = state.notes.lock().unwrap();
    match notes.get(&id) {
        Some(content) => {
            let reported = if state.options.fault == Fault::WrongId { id + 1000 } else { id };
            Json(json!({ "id": reported, "content": content })).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_note(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    match state.options.fault {
        Fault::UpdateFails => return StatusCode::INTERNAL_SERVER_ERROR,
        Fault::IgnoreUpdates => return StatusCode::OK,
        _ => {}
    }
    let Some(content) = body.get("content").and_then(Value::as_str) else {
        return StatusCode::BAD_REQUEST;
    };
    match state.notes.lock().unwrap().get_mut(&id) {
        Some(stored) => {
            *stored = content.to_string();
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_note(State(state): State<Arc<ServerState>>, Path(id): Path<i64>) -> StatusCode {
    match state.options.fault {
        Fault::DeleteFails => return StatusCode::NOT_FOUND,
        Fault::KeepDeleted => return StatusCode::OK,
        _ => {}
    }
    match state.notes.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}
