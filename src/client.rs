use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{Result, TaskError};
use crate::models::{Task, TaskStatus};

/// Address of the task service when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://localhost:7269";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the task service. A path prefix is kept.
    pub base_url: String,
    /// Per-request timeout. `None` waits as long as the server takes.
    pub timeout: Option<Duration>,
    /// Accept self-signed or otherwise invalid TLS certificates.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            accept_invalid_certs: false,
        }
    }
}

/// Client for the three task service endpoints.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TaskClient {
    http_client: Client,
    base_url: Url,
}

impl TaskClient {
    /// Creates a client for `base_url` with default settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let mut base_url = Url::parse(&config.base_url)?;
        // Url::join drops the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http_client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// List tasks
    ///
    /// GET /tasks
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let builder = self.request(Method::GET, "tasks")?;
        let tasks: Vec<Task> = self.send_json(builder).await?;
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    /// Create a task; the server picks its attributes
    ///
    /// POST /tasks
    #[instrument(skip(self))]
    pub async fn create_task(&self) -> Result<Task> {
        let builder = self.request(Method::POST, "tasks")?;
        let task: Task = self.send_json(builder).await?;
        debug!(id = task.id, "created task");
        Ok(task)
    }

    /// Change the status of a task. The response body is ignored.
    ///
    /// PUT /tasks/{id}?status={status}
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: u64, status: TaskStatus) -> Result<()> {
        let builder = self
            .request(Method::PUT, &format!("tasks/{}", id))?
            .query(&[("status", status.as_str())]);
        self.send(builder).await?;
        debug!(id, %status, "updated task status");
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaskError::api_error(status, &body));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
