//! Dispatches a single UI event payload.
//!
//! This is the entry point for front ends that talk to doable through
//! `{"type": ..., "index": ...}` payloads instead of subcommands. After a
//! write the refreshed task list is printed, the same way the task list
//! widget re-renders after every callback.

use super::report;
use crate::{
    db::{categories::Categories, db::Db, tasks::Tasks},
    libs::{
        event::{dispatch, EventOutcome, UiEvent},
        messages::Message,
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct EventArgs {
    /// JSON payload, e.g. '{"type": "delete-task", "index": 3}'
    payload: String,
}

pub fn cmd(args: EventArgs) -> Result<()> {
    let event: UiEvent = match args.payload.parse() {
        Ok(event) => event,
        Err(e) => msg_bail_anyhow!(Message::InvalidEventPayload(e.to_string())),
    };

    let db = Db::new()?;
    let now = Local::now().naive_local();
    let outcome = match dispatch(&db, event) {
        Ok(outcome) => outcome,
        Err(e) => return report(e),
    };

    match outcome {
        EventOutcome::TaskForm(task) => {
            msg_print!(Message::EditFormFor(task.title.clone()), true);
            let category = match task.category_id {
                Some(id) => Categories::new(&db).get(id)?,
                None => None,
            };
            return View::task(&task, category.as_ref(), now);
        }
        EventOutcome::TaskCreated(task) => msg_success!(Message::TaskCreated(task.title)),
        EventOutcome::TaskChanged(task) => msg_success!(Message::TaskUpdated(task.title)),
        EventOutcome::TaskDeleted(id) => msg_success!(Message::TaskDeleted(id)),
        EventOutcome::TaskMissing(id) => msg_error!(Message::TaskNotFound(id)),
        EventOutcome::CategoryCreated(category) => msg_success!(Message::CategoryCreated(category.name)),
        EventOutcome::CategoryDeleted(id) => msg_success!(Message::CategoryDeletedById(id)),
        EventOutcome::CategoryMissing(id) => msg_error!(Message::CategoryNotFound(id.to_string())),
    }

    let tasks = Tasks::new(&db).list()?;
    View::tasks(&tasks, &Categories::new(&db).list()?, now)
}
