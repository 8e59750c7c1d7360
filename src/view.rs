use std::fmt;

use tracing::{info, warn};

use crate::client::TaskClient;
use crate::error::{Result, TaskError};
use crate::models::{Task, TaskStatus};

/// A request the view can issue against the task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FetchAll,
    Generate,
    UpdateStatus { id: u64, status: TaskStatus },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::FetchAll => f.write_str("fetch tasks"),
            Action::Generate => f.write_str("generate task"),
            Action::UpdateStatus { id, status } => write!(f, "set task {} to '{}'", id, status),
        }
    }
}

/// Completion of an [`Action`] that ran detached from the view.
#[derive(Debug)]
pub enum Outcome {
    Fetched(Vec<Task>),
    Created(Task),
    StatusUpdated { id: u64, status: TaskStatus },
    Failed { action: Action, error: TaskError },
}

impl Outcome {
    /// Runs `action` against the service and packages the result.
    pub async fn run(client: &TaskClient, action: Action) -> Outcome {
        let res = match action {
            Action::FetchAll => client.list_tasks().await.map(Outcome::Fetched),
            Action::Generate => client.create_task().await.map(Outcome::Created),
            Action::UpdateStatus { id, status } => client
                .update_status(id, status)
                .await
                .map(|_| Outcome::StatusUpdated { id, status }),
        };
        res.unwrap_or_else(|error| Outcome::Failed { action, error })
    }
}

/// Local copy of the server's task list.
///
/// The list is only known to match the server right after a fetch. Status
/// changes are never applied locally; a successful update is followed by a
/// full re-fetch instead.
#[derive(Debug, Clone)]
pub struct TaskView {
    client: TaskClient,
    tasks: Vec<Task>,
}

impl TaskView {
    pub fn new(client: TaskClient) -> Self {
        Self { client, tasks: Vec::new() }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    /// Tasks in server order, with generated tasks appended.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replaces the local list with the server's.
    ///
    /// On error the previous list is kept.
    pub async fn fetch_all(&mut self) -> Result<()> {
        let tasks = self.client.list_tasks().await?;
        self.replace(tasks);
        Ok(())
    }

    /// Asks the server for a new task and appends it.
    ///
    /// Returns the task as the server created it.
    pub async fn generate(&mut self) -> Result<Task> {
        let task = self.client.create_task().await?;
        self.append(task.clone());
        Ok(task)
    }

    /// Sends the new status, then re-fetches everything.
    ///
    /// If the update fails nothing is re-fetched and the list is untouched.
    pub async fn update_status(&mut self, id: u64, status: TaskStatus) -> Result<()> {
        self.client.update_status(id, status).await?;
        info!(id, %status, "status updated, resynchronizing");
        self.fetch_all().await
    }

    /// Folds a detached completion into the list.
    ///
    /// Returns the follow-up request the caller should issue, if any.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Action> {
        match outcome {
            Outcome::Fetched(tasks) => {
                self.replace(tasks);
                None
            }
            Outcome::Created(task) => {
                self.append(task);
                None
            }
            Outcome::StatusUpdated { id, status } => {
                info!(id, %status, "status updated, resynchronizing");
                Some(Action::FetchAll)
            }
            Outcome::Failed { action, error } => {
                warn!(%action, %error, "request failed");
                None
            }
        }
    }

    fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }
}
