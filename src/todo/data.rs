use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TodoID = String;

/// Completion state of a checklist item.
///
/// Items only move between states through [`StatusCycle::next`], one step at a time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TodoStatus {
    Empty,
    InProgress,
    Checked,
    NotNeeded,
    Unsure,
}

impl Default for TodoStatus {
    fn default() -> TodoStatus {
        TodoStatus::Empty
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoID,
    pub title: String,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Which toggle cycle checklist items follow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CycleKind {
    /// empty -> in-progress -> checked -> not-needed -> unsure
    Standard,
    /// empty -> checked -> not-needed -> unsure
    Legacy,
}

impl Default for CycleKind {
    fn default() -> CycleKind {
        CycleKind::Standard
    }
}

/// An ordered, wrapping sequence of statuses a toggle walks through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCycle {
    states: Vec<TodoStatus>,
}

impl StatusCycle {
    pub fn standard() -> StatusCycle {
        StatusCycle {
            states: vec![
                TodoStatus::Empty,
                TodoStatus::InProgress,
                TodoStatus::Checked,
                TodoStatus::NotNeeded,
                TodoStatus::Unsure,
            ],
        }
    }

    pub fn legacy() -> StatusCycle {
        StatusCycle {
            states: vec![
                TodoStatus::Empty,
                TodoStatus::Checked,
                TodoStatus::NotNeeded,
                TodoStatus::Unsure,
            ],
        }
    }

    pub fn states(&self) -> &[TodoStatus] {
        &self.states
    }

    /// The status following `status`. A status outside the cycle restarts it.
    pub fn next(&self, status: TodoStatus) -> TodoStatus {
        match self.states.iter().position(|s| *s == status) {
            Some(i) => self.states[(i + 1) % self.states.len()],
            None => self.states[0],
        }
    }
}

impl Default for StatusCycle {
    fn default() -> StatusCycle {
        StatusCycle::standard()
    }
}

impl From<CycleKind> for StatusCycle {
    fn from(kind: CycleKind) -> StatusCycle {
        match kind {
            CycleKind::Standard => StatusCycle::standard(),
            CycleKind::Legacy => StatusCycle::legacy(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub countable: usize,
    pub percent: u8,
}
