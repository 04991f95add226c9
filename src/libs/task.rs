//! Task domain model and the pure derivations computed over it.
//!
//! A [`Task`] is a row as stored in the database. New tasks are described by
//! [`NewTask`] and changed through a [`TaskPatch`], which only carries the
//! fields a caller actually supplied.
//!
//! Due dates come in from the presentation layer as strings; [`parse_due_date`]
//! turns them into calendar dates and returns `None` for anything it cannot
//! read, so a bad date never takes the rest of an operation down with it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Task priority. Stored and exchanged as the integers 1, 2 and 3.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Strict conversion used when reading from storage.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Priority::Low),
            2 => Some(Priority::Medium),
            3 => Some(Priority::High),
            _ => None,
        }
    }

    pub fn value(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        priority_label(self.value())
    }
}

impl TryFrom<i64> for Priority {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Priority::from_value(value).ok_or_else(|| format!("priority must be 1, 2 or 3, got {}", value))
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = i64::column_result(value)?;
        Priority::from_value(raw).ok_or(FromSqlError::OutOfRange(raw))
    }
}

/// Maps a stored priority value to its display label.
pub fn priority_label(value: i64) -> &'static str {
    match value {
        1 => "Low",
        3 => "High",
        _ => "Medium",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub completed: bool,
    pub category_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        is_overdue(self, now)
    }

    pub fn priority_label(&self) -> &'static str {
        self.priority.label()
    }
}

/// A task is overdue once `now` has passed the start of its due day, unless it is completed.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    match task.due_date {
        Some(due) if !task.completed => now > due.and_time(NaiveTime::MIN),
        _ => false,
    }
}

/// Input for creating a task. The due date stays a raw string until the repository parses it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }
}

/// Partial update for a task.
///
/// `None` means "leave as is". For nullable columns the inner `Option` tells
/// a cleared value (`Some(None)`) apart from an absent one. When a patch is
/// deserialized from JSON, keys that do not name a task field land in
/// `ignored` instead of failing the whole update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "known_priority")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<i64>>,
    #[serde(flatten)]
    pub ignored: BTreeMap<String, serde_json::Value>,
}

impl TaskPatch {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
            && self.category_id.is_none()
    }
}

/// Marks a key as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reads an optional priority, dropping values outside 1..=3 with a warning
/// so the stored priority is left alone.
pub fn known_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let priority = Priority::from_value(value);
        if priority.is_none() {
            warn!(priority = value, "dropping out-of-range priority");
        }
        priority
    }))
}

/// The two list filters offered by the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub hide_completed: bool,
    pub category_id: Option<i64>,
}

impl TaskFilter {
    pub fn all() -> Self {
        Self::default()
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parses an ISO calendar date. Date-time strings are accepted and truncated to their date.
///
/// Returns `None` for empty input and for anything that is not a real
/// calendar date, such as `2024-02-30`.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|dt| dt.date())
}

/// Collapses blank optional text to `None`.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
