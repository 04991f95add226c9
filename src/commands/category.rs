use super::report;
use crate::{
    db::{categories::Categories, db::Db},
    libs::{
        category::{Category, CategoryPatch},
        config::Config,
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Category color, #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List all categories
    List,
    /// Edit a category; prompts interactively when no field is given
    Edit {
        /// Category name or ID to edit
        category: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category; its tasks are kept without a category
    Delete {
        /// Category name or ID to delete
        category: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    let db = Db::new()?;
    match args.command {
        Some(CategoryCommand::Add { name, color }) => handle_add(&db, name, color),
        Some(CategoryCommand::List) => handle_list(&db),
        Some(CategoryCommand::Edit { category, name, color }) => handle_edit(&db, category, CategoryPatch { name, color, ..Default::default() }),
        Some(CategoryCommand::Delete { category, yes }) => handle_delete(&db, category, yes),
        None => handle_interactive(&db),
    }
}

fn handle_add(db: &Db, name: String, color: Option<String>) -> Result<()> {
    let color = color.unwrap_or_else(|| Config::read().map(|c| c.default_color()).unwrap_or_default());
    let color = if color.is_empty() { None } else { Some(color.as_str()) };

    match Categories::new(db).create(&name, color) {
        Ok(category) => {
            msg_success!(Message::CategoryCreated(category.name));
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            msg_error!(Message::CategoryAlreadyExists(name.trim().to_string()));
            Ok(())
        }
        Err(e) => report(e),
    }
}

fn handle_list(db: &Db) -> Result<()> {
    let categories_db = Categories::new(db);
    let categories = categories_db.list()?;

    if categories.is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }

    let counts = categories
        .iter()
        .map(|c| categories_db.task_count(c.id))
        .collect::<Result<Vec<_>, _>>()?;

    msg_print!(Message::CategoryListHeader, true);
    View::categories(&categories, &counts)
}

fn find(db: &Db, identifier: &str) -> Result<Option<Category>> {
    let category = Categories::new(db).find(identifier)?;
    if category.is_none() {
        msg_error!(Message::CategoryNotFound(identifier.to_string()));
    }
    Ok(category)
}

fn handle_edit(db: &Db, identifier: String, patch: CategoryPatch) -> Result<()> {
    let category = match find(db, &identifier)? {
        Some(c) => c,
        None => return Ok(()),
    };

    let patch = if patch.is_empty() {
        msg_print!(Message::EditingCategory(category.name.clone()), true);

        let new_name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryName.to_string())
            .default(category.name.clone())
            .interact_text()?;
        let new_color: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryColor.to_string())
            .default(category.color.clone())
            .interact_text()?;

        CategoryPatch {
            name: (new_name != category.name).then_some(new_name),
            color: (new_color != category.color).then_some(new_color),
            ..Default::default()
        }
    } else {
        patch
    };

    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let attempted_name = patch.name.clone().unwrap_or_else(|| category.name.clone());
    match Categories::new(db).update(category.id, &patch) {
        Ok(Some(updated)) => msg_success!(Message::CategoryUpdated(updated.name)),
        Ok(None) => msg_error!(Message::CategoryNotFound(identifier)),
        Err(e) if e.is_conflict() => msg_error!(Message::CategoryAlreadyExists(attempted_name)),
        Err(e) => return report(e),
    }
    Ok(())
}

fn handle_delete(db: &Db, identifier: String, yes: bool) -> Result<()> {
    let category = match find(db, &identifier)? {
        Some(c) => c,
        None => return Ok(()),
    };

    let categories_db = Categories::new(db);
    let task_count = categories_db.task_count(category.id)?;

    let prompt = if task_count > 0 {
        Message::ConfirmDeleteCategoryWithTasks(category.name.clone(), task_count)
    } else {
        Message::ConfirmDeleteCategory(category.name.clone())
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()?;

    if confirmed {
        categories_db.delete(category.id)?;
        msg_success!(Message::CategoryDeleted(category.name));
    } else {
        msg_info!(Message::OperationCancelled);
    }

    Ok(())
}

fn handle_interactive(db: &Db) -> Result<()> {
    let options = vec!["Add category", "List categories", "Edit category", "Delete category"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectCategoryAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptCategoryName.to_string())
                .interact_text()?;
            let color: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptCategoryColor.to_string())
                .allow_empty(true)
                .interact_text()?;
            handle_add(db, name, if color.is_empty() { None } else { Some(color) })
        }
        1 => handle_list(db),
        2 | 3 => {
            let categories = Categories::new(db).list()?;
            if categories.is_empty() {
                msg_info!(Message::NoCategoriesFound);
                return Ok(());
            }

            let prompt = if selection == 2 { Message::SelectCategoryToEdit } else { Message::SelectCategoryToDelete };
            let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
            let picked = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt.to_string())
                .items(&names)
                .interact()?;
            let id = categories[picked].id.to_string();

            if selection == 2 {
                handle_edit(db, id, CategoryPatch::default())
            } else {
                handle_delete(db, id, false)
            }
        }
        _ => Ok(()),
    }
}
