//! Display implementation for doable messages.
//!
//! All user-facing text lives here, in one `match`, so wording stays
//! consistent and every new [`Message`] variant needs an explicit phrasing.
//!
//! ```rust
//! use doable::libs::messages::Message;
//!
//! assert_eq!(Message::TaskNotFound(7).to_string(), "Task with ID 7 not found");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskCompleted(title) => format!("Task '{}' marked as done", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task with ID {} not found", id),
            Message::DueDateIgnored(raw) => format!("Could not read due date '{}', task saved without one", raw),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::NoTasksFound => "No tasks yet. Add one with `doable task add`".to_string(),
            Message::EditingTask(title) => format!("Editing task: {}", title),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::UnknownTaskFieldsIgnored(fields) => format!("Ignored unknown fields: {}", fields.join(", ")),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryUpdated(name) => format!("Category '{}' updated", name),
            Message::CategoryDeleted(name) => format!("Category '{}' deleted", name),
            Message::CategoryDeletedById(id) => format!("Category {} deleted", id),
            Message::CategoryNotFound(identifier) => format!("Category '{}' not found", identifier),
            Message::CategoryAlreadyExists(name) => format!("Category '{}' already exists", name),
            Message::CategoryListHeader => "Categories:".to_string(),
            Message::NoCategoriesFound => "No categories yet. Add one with `doable category add`".to_string(),
            Message::EditingCategory(name) => format!("Editing category: {}", name),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),
            Message::ConfirmDeleteCategoryWithTasks(name, count) => {
                format!("Category '{}' holds {} task(s); they will be kept without a category. Delete it?", name, count)
            }
            Message::SelectCategoryAction => "What do you want to do?".to_string(),
            Message::SelectCategoryToEdit => "Select a category to edit".to_string(),
            Message::SelectCategoryToDelete => "Select a category to delete".to_string(),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader => "Task statistics:".to_string(),

            // === EVENT MESSAGES ===
            Message::InvalidEventPayload(error) => format!("Invalid event payload: {}", error),
            Message::EditFormFor(title) => format!("Edit form for '{}':", title),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotPresent => "No configuration file to remove".to_string(),
            Message::InvalidColorKeptDefault(color) => format!("'{}' is not a #RRGGBB color, keeping the previous default", color),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskDueDate => "Due date YYYY-MM-DD (optional)".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptTaskCategory => "Category".to_string(),
            Message::PromptCategoryName => "Category name".to_string(),
            Message::PromptCategoryColor => "Color (#RRGGBB)".to_string(),
            Message::PromptDatabasePath => "Database file".to_string(),
            Message::PromptHideCompleted => "Hide completed tasks by default?".to_string(),
            Message::PromptDefaultColor => "Default category color (#RRGGBB)".to_string(),
            Message::NoCategoryOption => "(none)".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(current, latest) => format!("Database schema version {} of {}", current, latest),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };

        write!(f, "{}", text)
    }
}
