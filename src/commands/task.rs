use super::report;
use crate::{
    db::{categories::Categories, db::Db, tasks::Tasks},
    libs::{
        config::Config,
        messages::Message,
        task::{NewTask, Priority, Task, TaskFilter, TaskPatch},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks, incomplete first and by due date
    List {
        /// Hide completed tasks
        #[arg(long)]
        hide_completed: bool,
        /// Show completed tasks even when the configuration hides them
        #[arg(long, conflicts_with = "hide_completed")]
        show_completed: bool,
        /// Only show tasks in this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a new task
    Add {
        /// Task title
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a single task
    Show { id: i64 },
    /// Edit a task; prompts interactively when no field is given
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        #[arg(long)]
        clear_due: bool,
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
        /// Category name or ID
        #[arg(short, long, conflicts_with = "no_category")]
        category: Option<String>,
        #[arg(long)]
        no_category: bool,
        /// Raw JSON patch, e.g. '{"completed": true}'
        #[arg(long, conflicts_with_all = ["title", "description", "due", "clear_due", "priority", "category", "no_category"])]
        patch: Option<String>,
    },
    /// Toggle the completion flag of a task
    Done { id: i64 },
    /// Delete a task
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    let db = Db::new()?;
    match args.command {
        TaskCommand::List {
            hide_completed,
            show_completed,
            category,
            json,
        } => handle_list(&db, hide_completed, show_completed, category, json),
        TaskCommand::Add {
            title,
            description,
            due,
            priority,
            category,
        } => handle_add(&db, title, description, due, priority, category),
        TaskCommand::Show { id } => handle_show(&db, id),
        TaskCommand::Edit {
            id,
            title,
            description,
            due,
            clear_due,
            priority,
            category,
            no_category,
            patch,
        } => {
            let patch = match patch {
                Some(raw) => TaskPatch::from_json(&raw)?,
                None => {
                    let category_id = match category {
                        Some(identifier) => match Categories::new(&db).find(&identifier)? {
                            Some(found) => Some(Some(found.id)),
                            None => {
                                msg_error!(Message::CategoryNotFound(identifier));
                                return Ok(());
                            }
                        },
                        None if no_category => Some(None),
                        None => None,
                    };
                    TaskPatch {
                        title,
                        description: description.map(Some),
                        due_date: if clear_due { Some(None) } else { due.map(Some) },
                        priority,
                        category_id,
                        ..Default::default()
                    }
                }
            };
            handle_edit(&db, id, patch)
        }
        TaskCommand::Done { id } => handle_toggle(&db, id),
        TaskCommand::Delete { id, yes } => handle_delete(&db, id, yes),
    }
}

fn handle_list(db: &Db, hide_completed: bool, show_completed: bool, category: Option<String>, json: bool) -> Result<()> {
    let config = Config::read()?;
    let categories = Categories::new(db);

    let category_id = match category {
        Some(identifier) => match categories.find(&identifier)? {
            Some(found) => Some(found.id),
            None => {
                msg_error!(Message::CategoryNotFound(identifier));
                return Ok(());
            }
        },
        None => None,
    };
    let filter = TaskFilter {
        hide_completed: config.resolve_hide_completed(hide_completed, show_completed),
        category_id,
    };
    let tasks = Tasks::new(db).list_filtered(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks, &categories.list()?, Local::now().naive_local())
}

fn handle_add(db: &Db, title: String, description: Option<String>, due: Option<String>, priority: Priority, category: Option<String>) -> Result<()> {
    let category_id = match category {
        Some(identifier) => match Categories::new(db).find(&identifier)? {
            Some(found) => Some(found.id),
            None => {
                msg_error!(Message::CategoryNotFound(identifier));
                return Ok(());
            }
        },
        None => None,
    };

    let new_task = NewTask {
        title,
        description,
        due_date: due.clone(),
        priority,
        category_id,
    };
    match Tasks::new(db).create(&new_task) {
        Ok(task) => {
            if due.is_some() && task.due_date.is_none() {
                msg_warning!(Message::DueDateIgnored(due.unwrap_or_default()));
            }
            msg_success!(Message::TaskCreated(task.title));
            Ok(())
        }
        Err(e) => report(e),
    }
}

fn handle_show(db: &Db, id: i64) -> Result<()> {
    let task = match Tasks::new(db).get(id)? {
        Some(task) => task,
        None => {
            msg_error!(Message::TaskNotFound(id));
            return Ok(());
        }
    };
    let category = match task.category_id {
        Some(category_id) => Categories::new(db).get(category_id)?,
        None => None,
    };
    View::task(&task, category.as_ref(), Local::now().naive_local())
}

fn handle_edit(db: &Db, id: i64, patch: TaskPatch) -> Result<()> {
    let tasks = Tasks::new(db);
    let patch = if patch.is_empty() && patch.ignored.is_empty() {
        let task = match tasks.get(id)? {
            Some(task) => task,
            None => {
                msg_error!(Message::TaskNotFound(id));
                return Ok(());
            }
        };
        prompt_patch(db, &task)?
    } else {
        patch
    };

    if !patch.ignored.is_empty() {
        msg_warning!(Message::UnknownTaskFieldsIgnored(patch.ignored.keys().cloned().collect()));
    }
    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    match tasks.update(id, &patch) {
        Ok(Some(task)) => {
            msg_success!(Message::TaskUpdated(task.title));
            Ok(())
        }
        Ok(None) => {
            msg_error!(Message::TaskNotFound(id));
            Ok(())
        }
        Err(e) => report(e),
    }
}

/// Walks through every field with the current value as default and keeps only the changed ones.
fn prompt_patch(db: &Db, task: &Task) -> Result<TaskPatch> {
    let theme = ColorfulTheme::default();
    msg_print!(Message::EditingTask(task.title.clone()), true);

    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(task.title.clone())
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(task.description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let due: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .default(task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let labels: Vec<&str> = Priority::ALL.iter().map(|p| p.label()).collect();
    let current_priority = Priority::ALL.iter().position(|p| *p == task.priority).unwrap_or(1);
    let priority = Priority::ALL[Select::with_theme(&theme)
        .with_prompt(Message::PromptTaskPriority.to_string())
        .items(&labels)
        .default(current_priority)
        .interact()?];

    let categories = Categories::new(db).list()?;
    let mut options = vec![Message::NoCategoryOption.to_string()];
    options.extend(categories.iter().map(|c| c.name.clone()));
    let current_category = task
        .category_id
        .and_then(|id| categories.iter().position(|c| c.id == id))
        .map(|index| index + 1)
        .unwrap_or(0);
    let selection = Select::with_theme(&theme)
        .with_prompt(Message::PromptTaskCategory.to_string())
        .items(&options)
        .default(current_category)
        .interact()?;
    let category_id = if selection == 0 { None } else { Some(categories[selection - 1].id) };

    let current_due = task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    Ok(TaskPatch {
        title: (title != task.title).then_some(title),
        description: (Some(description.as_str()) != task.description.as_deref().or(Some(""))).then(|| Some(description)),
        due_date: (due != current_due).then(|| Some(due)),
        priority: (priority != task.priority).then_some(priority),
        category_id: (category_id != task.category_id).then_some(category_id),
        ..Default::default()
    })
}

fn handle_toggle(db: &Db, id: i64) -> Result<()> {
    match Tasks::new(db).toggle(id)? {
        Some(task) if task.completed => msg_success!(Message::TaskCompleted(task.title)),
        Some(task) => msg_info!(Message::TaskReopened(task.title)),
        None => msg_error!(Message::TaskNotFound(id)),
    }
    Ok(())
}

fn handle_delete(db: &Db, id: i64, yes: bool) -> Result<()> {
    let tasks = Tasks::new(db);
    let task = match tasks.get(id)? {
        Some(task) => task,
        None => {
            msg_error!(Message::TaskNotFound(id));
            return Ok(());
        }
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if tasks.delete(id)? {
        msg_success!(Message::TaskDeleted(id));
    } else {
        msg_error!(Message::TaskNotFound(id));
    }
    Ok(())
}
