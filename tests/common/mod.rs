//! Shared test utilities for integration tests.
#![allow(dead_code)]

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use a2a_rpc_client::builders::AgentCardBuilder;
use a2a_rpc_client::client::{ByteStream, HttpRequest, HttpResponse, HttpTransport};
use a2a_rpc_client::error::{A2AError, A2AResult};
use a2a_rpc_client::types::AgentCard;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use serde_json::{json, Value};

/// Route client logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("a2a_rpc_client=debug")
        .with_test_writer()
        .try_init();
}

// ============================================================================
// In-process agent
// ============================================================================

/// What the test agent has seen.
#[derive(Default)]
pub struct AgentState {
    /// Headers of every request to the RPC endpoint.
    pub rpc_headers: Mutex<Vec<HeaderMap>>,
    /// Number of agent card fetches.
    pub card_fetches: AtomicUsize,
    /// Card served at the well-known path; filled in on startup.
    pub card: Mutex<Option<AgentCard>>,
    /// Last push notification config stored via `tasks/pushNotification/set`.
    pub push_config: Mutex<Option<Value>>,
}

/// Build a default agent card for testing.
pub fn test_agent_card(url: &str) -> AgentCard {
    AgentCardBuilder::new("Test Echo Agent", "An echo agent for testing", "0.1.0")
        .with_url(url)
        .with_streaming(true)
        .with_skill(
            "echo",
            "Echo",
            "Echoes back messages",
            vec!["test".to_string()],
        )
        .build()
}

/// Start a test agent on a random port. Returns the base URL and its state.
///
/// Routes:
/// - `GET /.well-known/agent.json`: the agent card (`url` = `{base}/a2a`)
/// - `POST /a2a`: JSON-RPC endpoint
/// - `POST /broken`: always `500 Internal Error`
/// - `POST /garbage`: `200` with a body that is not JSON
/// - `POST /wrong-id`: answers with a different id
/// - `GET /bad-card/.well-known/agent.json`: not JSON
pub async fn start_test_server() -> (String, Arc<AgentState>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    let state = Arc::new(AgentState::default());
    *state.card.lock().unwrap() = Some(test_agent_card(&format!("{}/a2a", base_url)));

    let app = Router::new()
        .route("/.well-known/agent.json", get(serve_card))
        .route("/a2a", post(rpc))
        .route(
            "/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error") }),
        )
        .route("/garbage", post(|| async { "this is not json" }))
        .route("/wrong-id", post(wrong_id))
        .route(
            "/bad-card/.well-known/agent.json",
            get(|| async { "{not a card" }),
        )
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Brief wait for the server to start accepting connections.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    (base_url, state)
}

/// A base URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve_card(State(state): State<Arc<AgentState>>) -> Json<Value> {
    state.card_fetches.fetch_add(1, Ordering::SeqCst);
    let card = state.card.lock().unwrap().clone();
    Json(serde_json::to_value(card).unwrap())
}

async fn wrong_id() -> Json<Value> {
    Json(json!({
        "jsonrpc": "2.0",
        "id": "someone-else",
        "result": {"kind": "message", "messageId": "m", "role": "agent", "parts": []}
    }))
}

async fn rpc(
    State(state): State<Arc<AgentState>>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> Response {
    state.rpc_headers.lock().unwrap().push(headers);

    let id = request["id"].clone();
    let params = request["params"].clone();
    let reply = |result: Value| Json(json!({"jsonrpc": "2.0", "id": id, "result": result}));

    match request["method"].as_str().unwrap_or_default() {
        "message/send" => {
            let text = params["message"]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            if text == "direct" {
                return reply(json!({
                    "kind": "message",
                    "messageId": "reply-1",
                    "role": "agent",
                    "parts": [{"kind": "text", "text": "direct reply"}]
                }))
                .into_response();
            }
            let context_id = params["message"]["contextId"].clone();
            reply(completed_task("task-1", context_id, &format!("Echo: {text}"))).into_response()
        }
        "tasks/get" => {
            if params["id"] == "missing" {
                return Json(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": -32001, "message": "Task not found"}
                }))
                .into_response();
            }
            reply(completed_task(
                params["id"].as_str().unwrap_or_default(),
                json!("ctx-1"),
                "stored",
            ))
            .into_response()
        }
        "tasks/cancel" => reply(json!({
            "kind": "task",
            "id": params["id"],
            "contextId": "ctx-1",
            "status": {"state": "canceled"}
        }))
        .into_response(),
        "tasks/pushNotification/set" => {
            *state.push_config.lock().unwrap() = Some(params.clone());
            reply(params).into_response()
        }
        "tasks/pushNotification/get" => {
            let stored = state.push_config.lock().unwrap().clone();
            reply(stored.unwrap_or(Value::Null)).into_response()
        }
        "message/stream" | "tasks/resubscribe" => {
            let task_id = params["id"].as_str().unwrap_or("task-s").to_string();
            sse_response(&streamed_events(&task_id, &id))
        }
        _ => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": "Method not found"}
        }))
        .into_response(),
    }
}

fn completed_task(id: &str, context_id: Value, text: &str) -> Value {
    json!({
        "kind": "task",
        "id": id,
        "contextId": context_id,
        "status": {"state": "completed"},
        "artifacts": [{"artifactId": "a1", "parts": [{"kind": "text", "text": text}]}]
    })
}

/// Working status, one artifact, final completed status.
pub fn streamed_events(task_id: &str, id: &Value) -> Vec<Value> {
    let envelope = |result: Value| json!({"jsonrpc": "2.0", "id": id, "result": result});
    vec![
        envelope(json!({
            "kind": "status-update",
            "taskId": task_id,
            "contextId": "ctx-1",
            "status": {"state": "working"},
            "final": false
        })),
        envelope(json!({
            "kind": "artifact-update",
            "taskId": task_id,
            "contextId": "ctx-1",
            "artifact": {"artifactId": "a1", "parts": [{"kind": "text", "text": "chunk"}]}
        })),
        envelope(json!({
            "kind": "status-update",
            "taskId": task_id,
            "contextId": "ctx-1",
            "status": {"state": "completed"},
            "final": true
        })),
    ]
}

/// Frame each value as one SSE event.
pub fn sse_body(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| format!("data: {}\n\n", v))
        .collect()
}

fn sse_response(values: &[Value]) -> Response {
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        sse_body(values),
    )
        .into_response()
}

// ============================================================================
// Scripted transport
// ============================================================================

/// How a [`ScriptedTransport`] answers.
#[derive(Clone)]
pub enum Script {
    /// Respond with `status` and deliver `chunks` one by one.
    Body {
        status: u16,
        chunks: Vec<Vec<u8>>,
        /// Keep the body open (pending) after the last chunk.
        hold_open: bool,
    },
    /// Deliver `chunks`, then fail the body with a transport fault.
    BrokenBody { chunks: Vec<Vec<u8>> },
    /// Fail before any response arrives.
    Unreachable,
}

/// An [`HttpTransport`] that replays a script and records requests.
pub struct ScriptedTransport {
    script: Script,
    /// Every request executed.
    pub requests: Mutex<Vec<HttpRequest>>,
    /// Set once the most recent response body has been dropped.
    pub body_dropped: Arc<AtomicBool>,
}

impl ScriptedTransport {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            requests: Mutex::new(Vec::new()),
            body_dropped: Arc::new(AtomicBool::new(false)),
        })
    }

    /// A 200 response carrying `chunks`.
    pub fn chunks(chunks: Vec<Vec<u8>>) -> Arc<Self> {
        Self::new(Script::Body {
            status: 200,
            chunks,
            hold_open: false,
        })
    }

    /// A 200 response carrying `chunks` that never closes on its own.
    pub fn held_open(chunks: Vec<Vec<u8>>) -> Arc<Self> {
        Self::new(Script::Body {
            status: 200,
            chunks,
            hold_open: true,
        })
    }

    pub fn was_body_dropped(&self) -> bool {
        self.body_dropped.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> A2AResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);

        let ok = |chunks: &[Vec<u8>]| {
            chunks
                .iter()
                .map(|c| Ok(Bytes::from(c.clone())))
                .collect::<Vec<A2AResult<Bytes>>>()
        };

        let (status, body): (u16, ByteStream) = match &self.script {
            Script::Unreachable => return Err(A2AError::network("connection refused")),
            Script::Body {
                status,
                chunks,
                hold_open,
            } => {
                let items = futures::stream::iter(ok(chunks));
                let body = if *hold_open {
                    items.chain(futures::stream::pending()).boxed()
                } else {
                    items.boxed()
                };
                (*status, body)
            }
            Script::BrokenBody { chunks } => {
                let mut items = ok(chunks);
                items.push(Err(A2AError::stream("connection reset")));
                (200, futures::stream::iter(items).boxed())
            }
        };

        self.body_dropped.store(false, Ordering::SeqCst);
        let guarded = DropFlag {
            inner: body,
            dropped: self.body_dropped.clone(),
        };
        Ok(HttpResponse::new(status, guarded.boxed()))
    }
}

/// Sets a flag when the wrapped body is dropped.
struct DropFlag {
    inner: ByteStream,
    dropped: Arc<AtomicBool>,
}

impl Stream for DropFlag {
    type Item = A2AResult<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

/// Split `bytes` into chunks at the given offsets.
pub fn split_at(bytes: &[u8], offsets: &[usize]) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for &offset in offsets {
        chunks.push(bytes[start..offset].to_vec());
        start = offset;
    }
    chunks.push(bytes[start..].to_vec());
    chunks
}
