use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::data::*;

pub fn new_todo(title: &str) -> TodoItem {
    TodoItem {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        status: TodoStatus::Empty,
        completed_at: None,
    }
}

pub fn toggle(todo: &TodoItem, cycle: &StatusCycle) -> TodoItem {
    toggle_at(todo, cycle, Utc::now())
}

/// Advances `todo` one step along `cycle`, stamping `completed_at` only when
/// the new status is `Checked`.
pub fn toggle_at(todo: &TodoItem, cycle: &StatusCycle, now: DateTime<Utc>) -> TodoItem {
    let status = cycle.next(todo.status);

    TodoItem {
        status,
        completed_at: match status {
            TodoStatus::Checked => Some(now),
            _ => None,
        },
        ..todo.clone()
    }
}

pub fn progress<'a>(todos: impl IntoIterator<Item = &'a TodoItem>) -> Progress {
    let mut completed = 0;
    let mut countable = 0;

    for todo in todos {
        match todo.status {
            TodoStatus::NotNeeded => {}
            TodoStatus::Checked => {
                completed += 1;
                countable += 1;
            }
            _ => countable += 1,
        }
    }

    Progress {
        completed,
        countable,
        percent: percent_of(completed, countable),
    }
}

// Integer round-half-up of 100 * completed / countable.
fn percent_of(completed: usize, countable: usize) -> u8 {
    if countable == 0 {
        return 0;
    }

    ((200 * completed + countable) / (2 * countable)) as u8
}
