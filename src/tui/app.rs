use ratatui::widgets::{ListState, TableState};

use crate::models::{Task, TaskStatus};
use crate::view::{Action, Outcome, TaskView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// The status picker is open for the task with this id.
    Picking(u64),
}

pub struct App {
    pub view: TaskView,
    pub state: TableState,
    pub picker_state: ListState,
    pub input_mode: InputMode,
    /// Last message for the footer (errors included).
    pub status_message: String,
    /// Requests issued but not yet applied.
    pub in_flight: usize,
}

impl App {
    pub fn new(view: TaskView) -> App {
        App {
            view,
            state: TableState::default(),
            picker_state: ListState::default(),
            input_mode: InputMode::Normal,
            status_message: String::from("Loading tasks..."),
            in_flight: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.view.tasks()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks().get(i))
    }

    /// Selects the next row, wrapping around.
    pub fn next(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous row, wrapping around.
    pub fn previous(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Records that `action` was dispatched.
    pub fn begin(&mut self, action: Action) -> Action {
        self.in_flight += 1;
        action
    }

    /// Applies a completed request and returns the follow-up, if any.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Action> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.status_message = match &outcome {
            Outcome::Fetched(tasks) => format!("Loaded {} task(s)", tasks.len()),
            Outcome::Created(task) => format!("Generated task {} '{}'", task.id, task.name),
            Outcome::StatusUpdated { id, status } => format!("Task {} set to '{}'", id, status),
            Outcome::Failed { action, error } => format!("Failed to {}: {}", action, error),
        };
        let follow_up = self.view.apply(outcome);
        self.clamp_selection();
        follow_up
    }

    fn clamp_selection(&mut self) {
        let len = self.tasks().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Opens the status picker on the selected task, preselecting its status.
    pub fn open_picker(&mut self) {
        if let Some(t) = self.selected_task() {
            let (id, current) = (t.id, t.status.index());
            self.picker_state.select(Some(current));
            self.input_mode = InputMode::Picking(id);
        }
    }

    pub fn close_picker(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn picker_next(&mut self) {
        let i = self.picker_state.selected().map_or(0, |i| (i + 1) % TaskStatus::ALL.len());
        self.picker_state.select(Some(i));
    }

    pub fn picker_previous(&mut self) {
        let len = TaskStatus::ALL.len();
        let i = self.picker_state.selected().map_or(0, |i| (i + len - 1) % len);
        self.picker_state.select(Some(i));
    }

    /// Closes the picker and returns the update to issue.
    ///
    /// Picking the status the task already has issues nothing.
    pub fn confirm_picker(&mut self) -> Option<Action> {
        let InputMode::Picking(id) = self.input_mode else {
            return None;
        };
        self.close_picker();
        let status = TaskStatus::ALL[self.picker_state.selected()?];
        let current = self.view.find(id).map(|t| t.status);
        if current == Some(status) {
            return None;
        }
        Some(Action::UpdateStatus { id, status })
    }
}
