use super::category::Category;
use super::stats::Statistics;
use super::task::{Priority, Task};
use anyhow::Result;
use chrono::NaiveDateTime;
use prettytable::{row, Table};
use std::collections::HashMap;

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task], categories: &[Category], now: NaiveDateTime) -> Result<()> {
        let labels: HashMap<i64, String> = categories.iter().map(|c| (c.id, format!("{} {}", c.name, c.color))).collect();
        let mut table = Table::new();

        table.add_row(row!["ID", "DONE", "TITLE", "PRIORITY", "CATEGORY", "DUE"]);
        for task in tasks {
            let category = task.category_id.and_then(|id| labels.get(&id)).map(String::as_str).unwrap_or("");
            table.add_row(row![
                task.id,
                if task.completed { "x" } else { " " },
                task.title,
                task.priority_label(),
                category,
                due_text(task, now)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn task(task: &Task, category: Option<&Category>, now: NaiveDateTime) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["DESCRIPTION", task.description.as_deref().unwrap_or("")]);
        table.add_row(row!["DUE", due_text(task, now)]);
        table.add_row(row!["PRIORITY", task.priority_label()]);
        table.add_row(row!["COMPLETED", if task.completed { "yes" } else { "no" }]);
        table.add_row(row!["CATEGORY", category.map(|c| format!("{} ({})", c.name, c.color)).unwrap_or_default()]);
        table.add_row(row!["CREATED", task.created_at.format("%Y-%m-%d %H:%M")]);
        table.add_row(row!["UPDATED", task.updated_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();

        Ok(())
    }

    pub fn categories(categories: &[Category], task_counts: &[usize]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR", "TASKS"]);
        for (category, count) in categories.iter().zip(task_counts) {
            table.add_row(row![category.id, category.name, category.color, count]);
        }
        table.printstd();

        Ok(())
    }

    pub fn statistics(stats: &Statistics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TOTAL", "COMPLETED", "PENDING", "OVERDUE", "COMPLETION"]);
        table.add_row(row![
            stats.total,
            stats.completed,
            stats.pending,
            stats.overdue,
            format!("{:.1}%", stats.completion_rate)
        ]);
        table.printstd();

        let mut priorities = Table::new();
        priorities.add_row(row!["PRIORITY", "TASKS"]);
        for priority in Priority::ALL.iter().rev() {
            priorities.add_row(row![priority.label(), stats.by_priority.get(*priority)]);
        }
        priorities.printstd();

        Ok(())
    }

    /// Applied migrations followed by the ones still waiting to run.
    pub fn migrations(applied: &[(u32, String, String)], pending: &[(u32, &str)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["VERSION", "NAME", "APPLIED"]);
        for (version, name, applied_at) in applied {
            table.add_row(row![version, name, applied_at]);
        }
        for (version, name) in pending {
            table.add_row(row![version, name, "pending"]);
        }
        table.printstd();

        Ok(())
    }
}

fn due_text(task: &Task, now: NaiveDateTime) -> String {
    match task.due_date {
        Some(due) if task.is_overdue(now) => format!("{} (overdue)", due.format("%Y-%m-%d")),
        Some(due) => due.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}
