//! Typed UI events.
//!
//! The presentation layer identifies the widget that fired by a small JSON
//! object such as `{"type": "delete-task", "index": 7}`. Payloads are parsed
//! with serde into [`UiEvent`]; anything that does not match one of the known
//! shapes is rejected as a parse error.
//!
//! ```rust
//! use doable::libs::event::UiEvent;
//!
//! let event: UiEvent = r#"{"type": "task-checkbox", "index": 3}"#.parse()?;
//! assert_eq!(event, UiEvent::ToggleTask { index: 3 });
//! # Ok::<(), serde_json::Error>(())
//! ```

use super::category::Category;
use super::task::{known_priority, NewTask, Priority, Task, TaskPatch};
use crate::db::categories::Categories;
use crate::db::db::Db;
use crate::db::tasks::Tasks;
use crate::db::StoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiEvent {
    /// The completion checkbox of a task was clicked.
    #[serde(rename = "task-checkbox")]
    ToggleTask { index: i64 },
    /// Open the task form prefilled with a task.
    EditTask { index: i64 },
    DeleteTask { index: i64 },
    /// The task form was submitted. Without `task_id` a new task is created.
    SubmitTask {
        #[serde(default)]
        task_id: Option<i64>,
        #[serde(default)]
        title: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        due_date: Option<String>,
        #[serde(default, deserialize_with = "known_priority")]
        priority: Option<Priority>,
        #[serde(default)]
        category_id: Option<i64>,
    },
    AddCategory {
        name: String,
        #[serde(default)]
        color: Option<String>,
    },
    DeleteCategory { index: i64 },
}

impl FromStr for UiEvent {
    type Err = serde_json::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(raw)
    }
}

/// What happened as a result of an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    TaskCreated(Task),
    TaskChanged(Task),
    /// Task to prefill the edit form with.
    TaskForm(Task),
    TaskDeleted(i64),
    TaskMissing(i64),
    CategoryCreated(Category),
    CategoryDeleted(i64),
    CategoryMissing(i64),
}

/// Runs one event against the repositories.
pub fn dispatch(db: &Db, event: UiEvent) -> Result<EventOutcome, StoreError> {
    let tasks = Tasks::new(db);
    let categories = Categories::new(db);

    let outcome = match event {
        UiEvent::ToggleTask { index } => match tasks.toggle(index)? {
            Some(task) => EventOutcome::TaskChanged(task),
            None => EventOutcome::TaskMissing(index),
        },
        UiEvent::EditTask { index } => match tasks.get(index)? {
            Some(task) => EventOutcome::TaskForm(task),
            None => EventOutcome::TaskMissing(index),
        },
        UiEvent::DeleteTask { index } => {
            if tasks.delete(index)? {
                EventOutcome::TaskDeleted(index)
            } else {
                EventOutcome::TaskMissing(index)
            }
        }
        UiEvent::SubmitTask {
            task_id: Some(id),
            title,
            description,
            due_date,
            priority,
            category_id,
        } => {
            // The form always carries every field, so each one replaces the stored value.
            let patch = TaskPatch {
                title: Some(title),
                description: Some(description),
                due_date: Some(due_date),
                priority,
                category_id: Some(category_id),
                ..Default::default()
            };
            match tasks.update(id, &patch)? {
                Some(task) => EventOutcome::TaskChanged(task),
                None => EventOutcome::TaskMissing(id),
            }
        }
        UiEvent::SubmitTask {
            task_id: None,
            title,
            description,
            due_date,
            priority,
            category_id,
        } => {
            let new_task = NewTask {
                title,
                description,
                due_date,
                priority: priority.unwrap_or_default(),
                category_id,
            };
            EventOutcome::TaskCreated(tasks.create(&new_task)?)
        }
        UiEvent::AddCategory { name, color } => EventOutcome::CategoryCreated(categories.create(&name, color.as_deref())?),
        UiEvent::DeleteCategory { index } => {
            if categories.delete(index)? {
                EventOutcome::CategoryDeleted(index)
            } else {
                EventOutcome::CategoryMissing(index)
            }
        }
    };

    Ok(outcome)
}
