//! Integration tests for single-shot JSON-RPC calls against an in-process
//! agent.

mod common;

use common::{start_test_server, unreachable_url, Script, ScriptedTransport};

use a2a_rpc_client::builders::ClientBuilder;
use a2a_rpc_client::client::A2AClient;
use a2a_rpc_client::error::A2AError;
use a2a_rpc_client::types::*;
use a2a_rpc_client::utils::{create_text_message_object, reply_text};

// ============================================================================
// message/send
// ============================================================================

#[tokio::test]
async fn send_message_returns_task() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/a2a", base_url));

    let message = create_text_message_object("ctx-7", Role::User, "hello");
    let result = client.send_message(message).await.unwrap().unwrap();

    match &result {
        SendMessageResult::Task(task) => {
            assert_eq!(task.id, "task-1");
            assert_eq!(task.context_id, "ctx-7");
            assert_eq!(task.status.state, TaskState::Completed);
            assert!(task.status.state.is_terminal());
        }
        other => panic!("expected task, got {:?}", other),
    }
    assert_eq!(reply_text(&result), Some("Echo: hello"));
}

#[tokio::test]
async fn send_text_can_yield_direct_message() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/a2a", base_url));

    let result = client.send_text("ctx-1", "direct").await.unwrap().unwrap();
    match result {
        SendMessageResult::Message(msg) => {
            assert_eq!(msg.role, Role::Agent);
            assert_eq!(msg.parts[0].as_text(), Some("direct reply"));
        }
        other => panic!("expected message, got {:?}", other),
    }
}

// ============================================================================
// tasks/*
// ============================================================================

#[tokio::test]
async fn get_and_cancel_task() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/a2a", base_url));

    let task = client
        .get_task(TaskQueryParams::new("t-42").with_history_length(5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.id, "t-42");

    let task = client
        .cancel_task(TaskIdParams::new("t-42"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.status.state, TaskState::Canceled);
}

#[tokio::test]
async fn error_response_yields_none() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/a2a", base_url));

    let task = client.get_task(TaskQueryParams::new("missing")).await.unwrap();
    assert!(task.is_none());
}

#[tokio::test]
async fn send_request_exposes_error_object() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/a2a", base_url));

    let response = client
        .send_request("tasks/list", &serde_json::json!({}))
        .await
        .unwrap();
    assert!(response.result.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    assert_eq!(error.message, "Method not found");
}

#[tokio::test]
async fn push_notification_config_round_trip() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/a2a", base_url));

    let config = TaskPushNotificationConfig {
        task_id: "t-1".to_string(),
        push_notification_config: PushNotificationConfig {
            url: "https://hooks.example/a2a".to_string(),
            token: Some("tok".to_string()),
            authentication: Some(PushNotificationAuthenticationInfo {
                schemes: vec!["Bearer".to_string()],
                credentials: None,
            }),
        },
    };

    let stored = client
        .set_task_push_notification_config(config.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, config);

    let fetched = client
        .get_task_push_notification_config(TaskIdParams::new("t-1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.push_notification_config.url, "https://hooks.example/a2a");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn server_error_maps_to_http_error() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/broken", base_url));

    let err = client
        .get_task(TaskQueryParams::new("t"))
        .await
        .unwrap_err();
    assert_eq!(err, A2AError::http(500, "Internal Error"));
    assert_eq!(err.to_string(), "HTTP Error 500: Internal Error");
}

#[tokio::test]
async fn invalid_json_is_decode_error() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/garbage", base_url));

    let err = client
        .cancel_task(TaskIdParams::new("t"))
        .await
        .unwrap_err();
    assert!(err.is_decode(), "expected decode error, got {err}");
}

#[tokio::test]
async fn mismatched_id_is_tolerated() {
    let (base_url, _state) = start_test_server().await;
    let client = A2AClient::new(format!("{}/wrong-id", base_url));

    let result = client.send_text("ctx", "hi").await.unwrap();
    assert!(matches!(result, Some(SendMessageResult::Message(_))));
}

#[tokio::test]
async fn unreachable_agent_is_service_unavailable() {
    let client = A2AClient::new(format!("{}/a2a", unreachable_url().await));

    let err = client.send_text("ctx", "hi").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.reason().starts_with("Network communication error"));
}

#[tokio::test]
async fn result_of_wrong_shape_is_decode_error() {
    let body = br#"{"jsonrpc":"2.0","id":"x","result":{"unexpected":true}}"#.to_vec();
    let transport = ScriptedTransport::chunks(vec![body]);
    let client = ClientBuilder::new()
        .with_url("http://agent.test/a2a")
        .with_transport(transport)
        .build()
        .unwrap();

    let err = client.get_task(TaskQueryParams::new("t")).await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn null_result_is_none() {
    let transport =
        ScriptedTransport::chunks(vec![br#"{"jsonrpc":"2.0","id":"x","result":null}"#.to_vec()]);
    let client = ClientBuilder::new()
        .with_url("http://agent.test/a2a")
        .with_transport(transport)
        .build()
        .unwrap();

    assert!(client.get_task(TaskQueryParams::new("t")).await.unwrap().is_none());
}

// ============================================================================
// Requests on the wire
// ============================================================================

#[tokio::test]
async fn protocol_headers_win_over_caller_headers() {
    let (base_url, state) = start_test_server().await;
    let client = ClientBuilder::new()
        .with_url(format!("{}/a2a", base_url))
        .with_header("Accept", "text/html")
        .with_header("X-Request-Source", "tests")
        .with_bearer_token("secret")
        .build()
        .unwrap();

    client.get_task(TaskQueryParams::new("t")).await.unwrap();

    let headers = state.rpc_headers.lock().unwrap().last().cloned().unwrap();
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["x-request-source"], "tests");
    assert_eq!(headers["authorization"], "Bearer secret");
}

#[tokio::test]
async fn envelope_carries_method_params_and_fresh_id() {
    let transport = ScriptedTransport::new(Script::Body {
        status: 200,
        chunks: vec![br#"{"jsonrpc":"2.0","result":null}"#.to_vec()],
        hold_open: false,
    });
    let client = ClientBuilder::new()
        .with_url("http://agent.test/a2a")
        .with_transport(transport.clone())
        .build()
        .unwrap();

    client.cancel_task(TaskIdParams::new("t-9")).await.unwrap();
    client.cancel_task(TaskIdParams::new("t-9")).await.unwrap();

    let requests = transport.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);

    let bodies: Vec<serde_json::Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(r.body.as_ref().unwrap()).unwrap())
        .collect();
    assert_eq!(requests[0].method, reqwest::Method::POST);
    assert_eq!(requests[0].url, "http://agent.test/a2a");
    assert_eq!(bodies[0]["jsonrpc"], "2.0");
    assert_eq!(bodies[0]["method"], "tasks/cancel");
    assert_eq!(bodies[0]["params"], serde_json::json!({"id": "t-9"}));
    assert_ne!(bodies[0]["id"], bodies[1]["id"]);
}
