mod common;

use std::time::Duration;

use common::{setup, task_json};
use reqwest::StatusCode;
use serde_json::json;
use taskdeck::{ClientConfig, TaskClient, TaskError, TaskStatus};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_tasks_keeps_server_order() {
    let (server, view) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json(3, "C", "overdue"),
            task_json(1, "A", "pending"),
            task_json(2, "B", "in progress"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = assert_ok!(view.client().list_tasks().await);
    let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(tasks[2].status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_create_task_posts_without_body() {
    let (server, view) = setup().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42,
            "name": "Generated",
            "status": "pending",
            "updatedDate": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let task = assert_ok!(view.client().create_task().await);
    assert_eq!(task.id, 42);
    assert_eq!(task.updated_date, None);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_update_status_sends_query_parameter() {
    let (server, view) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/3"))
        .and(query_param("status", "in progress"))
        .respond_with(ResponseTemplate::new(200).set_body_string("whatever"))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(view.client().update_status(3, TaskStatus::InProgress).await);
}

#[tokio::test]
async fn test_non_success_status_is_an_api_error() {
    let (server, view) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    match view.client().list_tasks().await {
        Err(TaskError::Api { status, message }) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_a_decode_error() {
    let (server, view) = setup().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json(1, "A", "archived"),
        ])))
        .mount(&server)
        .await;

    assert!(matches!(
        view.client().list_tasks().await,
        Err(TaskError::Decode(_))
    ));
}

#[tokio::test]
async fn test_base_url_path_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(TaskClient::new(&format!("{}/api", server.uri())));
    let tasks = assert_ok!(client.list_tasks().await);
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_timeout_is_reported_as_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = assert_ok!(TaskClient::with_config(ClientConfig {
        base_url: server.uri(),
        timeout: Some(Duration::from_millis(100)),
        accept_invalid_certs: false,
    }));
    assert!(matches!(client.list_tasks().await, Err(TaskError::Http(_))));
}

#[tokio::test]
async fn test_connection_refused_is_an_http_error() {
    // Bind and drop a listener to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = assert_ok!(TaskClient::new(&format!("http://127.0.0.1:{}", port)));
    assert!(matches!(client.create_task().await, Err(TaskError::Http(_))));
}
