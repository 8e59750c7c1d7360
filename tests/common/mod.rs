//! Shared helpers for the HTTP integration tests.

use serde_json::{json, Value};
use taskdeck::{TaskClient, TaskView};
use wiremock::MockServer;

/// Starts a mock task service and a view pointed at it.
pub async fn setup() -> (MockServer, TaskView) {
    let server = MockServer::start().await;
    let client = TaskClient::new(&server.uri()).expect("mock server uri is valid");
    (server, TaskView::new(client))
}

/// A task as the service serializes it.
pub fn task_json(id: u64, name: &str, status: &str) -> Value {
    json!({ "id": id, "name": name, "status": status })
}
