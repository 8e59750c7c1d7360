pub mod client;
pub mod commands;
pub mod error;
pub mod models;
pub mod theme;
pub mod tui;
pub mod view;

pub use client::{ClientConfig, TaskClient, DEFAULT_BASE_URL};
pub use error::{Result, TaskError};
pub use models::{Task, TaskStatus};
pub use view::{Action, Outcome, TaskView};
