use super::db::Db;
use super::error::StoreError;
use crate::libs::task::{normalize_text, parse_due_date, NewTask, Task, TaskFilter, TaskPatch};
use chrono::Local;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

const SELECT_TASKS: &str = "SELECT id, title, description, due_date, priority, completed, category_id, created_at, updated_at FROM tasks";
const WHERE_ID: &str = "WHERE id = ?1";
// Completion status first, then due date with undated tasks last.
const ORDER_TASKS: &str = "ORDER BY completed ASC, due_date IS NULL, due_date ASC, id ASC";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, due_date, priority, completed, category_id, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, FALSE, ?5, ?6, ?6)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, due_date = ?4, priority = ?5, completed = ?6, category_id = ?7, updated_at = ?8
    WHERE id = ?1";
const TOGGLE_TASK: &str = "UPDATE tasks SET completed = NOT completed, updated_at = ?2 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Task repository. Every write runs in its own transaction.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(db: &'a Db) -> Self {
        Tasks { conn: &db.conn }
    }

    /// All tasks: incomplete before complete, then by due date (undated last).
    pub fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.list_filtered(TaskFilter::all())
    }

    pub fn list_filtered(&self, filter: TaskFilter) -> Result<Vec<Task>, StoreError> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        if filter.hide_completed {
            conditions.push("completed = FALSE");
        }
        if let Some(category_id) = filter.category_id {
            conditions.push("category_id = ?");
            params.push(category_id);
        }

        let sql = if conditions.is_empty() {
            format!("{} {}", SELECT_TASKS, ORDER_TASKS)
        } else {
            format!("{} WHERE {} {}", SELECT_TASKS, conditions.join(" AND "), ORDER_TASKS)
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params_from_iter(params.iter()), task_from_row)?;
        let mut tasks = Vec::new();
        for task_result in task_iter {
            tasks.push(task_result?);
        }

        Ok(tasks)
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>, StoreError> {
        Ok(select_task(self.conn, id)?)
    }

    /// Creates a task. An unreadable due date is dropped; the task is still created.
    pub fn create(&self, new_task: &NewTask) -> Result<Task, StoreError> {
        let title = validate_title(&new_task.title)?;
        let due_date = new_task.due_date.as_deref().and_then(|raw| {
            let parsed = parse_due_date(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                warn!(due_date = raw, "discarding unparseable due date");
            }
            parsed
        });
        let now = Local::now().naive_local();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            INSERT_TASK,
            params![
                title,
                normalize_text(new_task.description.as_deref()),
                due_date,
                new_task.priority,
                new_task.category_id,
                now
            ],
        )?;
        let id = tx.last_insert_rowid();
        let task = select_task(&tx, id)?.ok_or(StoreError::Storage(rusqlite::Error::QueryReturnedNoRows))?;
        tx.commit()?;

        debug!(task_id = id, "task created");
        Ok(task)
    }

    /// Applies the fields present in `patch`. Returns `None` when the task does not exist.
    ///
    /// An unreadable due date is left out of the update; every other supplied
    /// field is still applied. Keys the patch did not recognize are logged and
    /// otherwise ignored.
    pub fn update(&self, id: i64, patch: &TaskPatch) -> Result<Option<Task>, StoreError> {
        if !patch.ignored.is_empty() {
            let fields: Vec<&str> = patch.ignored.keys().map(String::as_str).collect();
            warn!(task_id = id, ?fields, "ignoring unknown task fields");
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut task = match select_task(&tx, id)? {
            Some(task) => task,
            None => return Ok(None),
        };

        apply_patch(&mut task, patch)?;
        task.updated_at = Local::now().naive_local();

        tx.execute(
            UPDATE_TASK,
            params![
                task.id,
                task.title,
                task.description,
                task.due_date,
                task.priority,
                task.completed,
                task.category_id,
                task.updated_at
            ],
        )?;
        tx.commit()?;

        debug!(task_id = id, "task updated");
        Ok(Some(task))
    }

    /// Returns whether a task with this id existed.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let affected = tx.execute(DELETE_TASK, params![id])?;
        tx.commit()?;
        Ok(affected > 0)
    }

    /// Flips the completion flag. Returns `None` when the task does not exist.
    pub fn toggle(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        if tx.execute(TOGGLE_TASK, params![id, Local::now().naive_local()])? == 0 {
            return Ok(None);
        }
        let task = select_task(&tx, id)?;
        tx.commit()?;
        Ok(task)
    }
}

fn apply_patch(task: &mut Task, patch: &TaskPatch) -> Result<(), StoreError> {
    if let Some(title) = &patch.title {
        task.title = validate_title(title)?;
    }
    if let Some(description) = &patch.description {
        task.description = normalize_text(description.as_deref());
    }
    if let Some(due_date) = &patch.due_date {
        match due_date.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
            None => task.due_date = None,
            Some(raw) => match parse_due_date(raw) {
                Some(date) => task.due_date = Some(date),
                None => warn!(task_id = task.id, due_date = raw, "dropping unparseable due date from update"),
            },
        }
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(completed) = patch.completed {
        task.completed = completed;
    }
    if let Some(category_id) = patch.category_id {
        task.category_id = category_id;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<String, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::Validation("task title must not be empty".to_string()));
    }
    Ok(title.to_string())
}

fn select_task(conn: &Connection, id: i64) -> rusqlite::Result<Option<Task>> {
    conn.query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id], task_from_row)
        .optional()
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        priority: row.get(4)?,
        completed: row.get(5)?,
        category_id: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
