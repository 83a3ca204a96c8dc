//! Verify the domain helpers against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector names a helper, its input, the request it must produce, a
//! simulated transport outcome and the expected result. Comparing parsed JSON
//! (not raw strings) avoids false negatives from field ordering.

mod common;

use common::{client, MockTransport, Scripted, TestClient};
use rivaq_core::{ErrorKind, HttpMethod, RequestError};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        "PATCH" => HttpMethod::Patch,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "NetworkFailure" => ErrorKind::NetworkFailure,
        "ParseFailure" => ErrorKind::ParseFailure,
        "Status" => ErrorKind::Status,
        other => panic!("unknown error kind: {other}"),
    }
}

async fn invoke(client: &TestClient, case: &Value) -> Result<Value, RequestError> {
    let input = &case["input"];
    let id = case["id"].as_i64();
    match case["call"].as_str().unwrap() {
        "create_task" => client.create_task(input).await,
        "update_task" => client.update_task(id.unwrap(), input).await,
        "delete_task" => client.delete_task(id.unwrap()).await,
        "create_user" => client.create_user(input).await,
        "update_user" => client.update_user(id.unwrap(), input).await,
        "delete_user" => client.delete_user(id.unwrap()).await,
        "create_meeting" => client.create_meeting(input).await,
        "update_meeting" => client.update_meeting(id.unwrap(), input).await,
        other => panic!("unknown call: {other}"),
    }
}

fn scripted(case: &Value) -> Scripted {
    if let Some(message) = case["network_error"].as_str() {
        return Scripted::Fail(message.to_string());
    }
    let sim = &case["simulated_response"];
    Scripted::Respond(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap().to_string(),
    )
}

async fn run_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transport = MockTransport::new([scripted(case)]);
        let client = client(transport.clone());

        let result = invoke(&client, case).await;

        // Verify the request
        let sent = transport.sent();
        assert_eq!(sent.len(), 1, "{name}: one request");
        let expected_req = &case["expected_request"];
        assert_eq!(sent[0].method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(sent[0].path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(sent[0].header("content-type"), Some("application/json"), "{name}: content-type");
        match &expected_req["body"] {
            Value::Null => assert!(sent[0].body.is_none(), "{name}: body should be None"),
            expected => {
                let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
                assert_eq!(&body, expected, "{name}: body");
            }
        }

        // Verify the outcome
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), parse_kind(expected_error.as_str().unwrap()), "{name}: error kind");
        } else {
            assert_eq!(result.unwrap(), case["expected_result"], "{name}: result");
        }
        let expected_notifications = case["expected_notifications"].as_u64().unwrap() as usize;
        assert_eq!(client.notifier().open().len(), expected_notifications, "{name}: notifications");
    }
}

#[tokio::test(start_paused = true)]
async fn task_test_vectors() {
    run_vectors(include_str!("../../test-vectors/tasks.json")).await;
}

#[tokio::test(start_paused = true)]
async fn user_test_vectors() {
    run_vectors(include_str!("../../test-vectors/users.json")).await;
}

#[tokio::test(start_paused = true)]
async fn meeting_test_vectors() {
    run_vectors(include_str!("../../test-vectors/meetings.json")).await;
}
