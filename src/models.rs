use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Placeholder shown when a task has never been modified.
pub const NO_TIMESTAMP: &str = "-";

/// Lifecycle state of a task as tracked by the task service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress", alias = "in-progress", alias = "in_progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "overdue")]
    Overdue,
}

impl TaskStatus {
    /// Every status, in the order the picker offers them.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Overdue,
    ];

    /// The value the service expects on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }

    /// Position of this status in [`TaskStatus::ALL`].
    pub fn index(&self) -> usize {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Overdue => 3,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in progress" | "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "overdue" => Ok(TaskStatus::Overdue),
            _ => Err(TaskError::InvalidStatus(s.to_string())),
        }
    }
}

/// A single task as returned by the task service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: u64,
    /// The name of the task.
    pub name: String,
    /// Current status.
    pub status: TaskStatus,
    /// When the task was last modified, as sent by the server.
    /// `None` means the task was never modified.
    #[serde(
        rename = "updatedDate",
        alias = "updated_date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<String>,
}

impl Task {
    /// Text for the "Last Modified" column.
    ///
    /// Missing, null and empty values all render as [`NO_TIMESTAMP`].
    /// ISO-8601 timestamps are normalized to `YYYY-MM-DD HH:MM:SS`, with the
    /// UTC offset appended when the server sent one; anything else is shown as
    /// the server sent it.
    pub fn last_modified(&self) -> String {
        let raw = match self.updated_date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return NO_TIMESTAMP.to_string(),
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format("%Y-%m-%d %H:%M:%S %:z").to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_date(date: Option<&str>) -> Task {
        Task {
            id: 1,
            name: "A".into(),
            status: TaskStatus::Pending,
            updated_date: date.map(String::from),
        }
    }

    #[test]
    fn test_decode_wire_task() {
        let json = r#"{"id":7,"name":"Write docs","status":"in progress","updatedDate":"2025-01-02T10:00:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.name, "Write docs");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.updated_date.as_deref(), Some("2025-01-02T10:00:00"));
    }

    #[test]
    fn test_decode_missing_and_null_date() {
        let absent: Task = serde_json::from_str(r#"{"id":1,"name":"A","status":"pending"}"#).unwrap();
        assert_eq!(absent.updated_date, None);

        let null: Task =
            serde_json::from_str(r#"{"id":1,"name":"A","status":"pending","updatedDate":null}"#).unwrap();
        assert_eq!(null.updated_date, None);
    }

    #[test]
    fn test_decode_status_aliases() {
        let hyphen: Task = serde_json::from_str(r#"{"id":1,"name":"A","status":"in-progress"}"#).unwrap();
        assert_eq!(hyphen.status, TaskStatus::InProgress);

        let snake: Task = serde_json::from_str(r#"{"id":1,"name":"A","status":"in_progress"}"#).unwrap();
        assert_eq!(snake.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let res: Result<Task, _> = serde_json::from_str(r#"{"id":1,"name":"A","status":"archived"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_in_progress_serializes_with_space() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in progress\"");
    }

    #[test]
    fn test_parse_status_from_user_input() {
        assert_eq!("Pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!(" completed ".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!(matches!(
            "done".parse::<TaskStatus>(),
            Err(TaskError::InvalidStatus(s)) if s == "done"
        ));
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn test_last_modified_placeholder() {
        assert_eq!(task_with_date(None).last_modified(), "-");
        assert_eq!(task_with_date(Some("")).last_modified(), "-");
        assert_eq!(task_with_date(Some("   ")).last_modified(), "-");
    }

    #[test]
    fn test_last_modified_keeps_utc_offset() {
        let east = task_with_date(Some("2025-03-04T05:06:07+02:00")).last_modified();
        let west = task_with_date(Some("2025-03-04T05:06:07-07:00")).last_modified();
        assert_eq!(east, "2025-03-04 05:06:07 +02:00");
        assert_eq!(west, "2025-03-04 05:06:07 -07:00");
        assert_ne!(east, west);
    }

    #[test]
    fn test_last_modified_formats_timestamps() {
        assert_eq!(
            task_with_date(Some("2025-03-04T05:06:07.1234567")).last_modified(),
            "2025-03-04 05:06:07"
        );
        assert_eq!(
            task_with_date(Some("2025-03-04T05:06:07Z")).last_modified(),
            "2025-03-04 05:06:07 +00:00"
        );
        assert_eq!(task_with_date(Some("yesterday")).last_modified(), "yesterday");
    }
}
