use super::db::Db;
use super::error::StoreError;
use crate::libs::category::{is_valid_color, Category, CategoryPatch, DEFAULT_COLOR};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

const SELECT_CATEGORIES: &str = "SELECT id, name, color, created_at, updated_at FROM categories";
const SELECT_ALL_CATEGORIES: &str = "SELECT id, name, color, created_at, updated_at FROM categories ORDER BY name ASC, id ASC";
const INSERT_CATEGORY: &str = "INSERT INTO categories (name, color, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)";
const UPDATE_CATEGORY: &str = "UPDATE categories SET name = ?2, color = ?3, updated_at = ?4 WHERE id = ?1";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const RELEASE_TASKS: &str = "UPDATE tasks SET category_id = NULL, updated_at = ?2 WHERE category_id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks WHERE category_id = ?1";

/// Category repository.
pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(db: &'a Db) -> Self {
        Categories { conn: &db.conn }
    }

    /// All categories ordered by name.
    pub fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_ALL_CATEGORIES)?;
        let category_iter = stmt.query_map([], category_from_row)?;

        let mut categories = Vec::new();
        for category in category_iter {
            categories.push(category?);
        }
        Ok(categories)
    }

    pub fn get(&self, id: i64) -> Result<Option<Category>, StoreError> {
        Ok(select_category(self.conn, id)?)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        Ok(self
            .conn
            .query_row(&format!("{} WHERE name = ?1", SELECT_CATEGORIES), params![name.trim()], category_from_row)
            .optional()?)
    }

    /// Looks a category up by numeric id, falling back to its name.
    pub fn find(&self, identifier: &str) -> Result<Option<Category>, StoreError> {
        if let Ok(id) = identifier.trim().parse::<i64>() {
            if let Some(category) = self.get(id)? {
                return Ok(Some(category));
            }
        }
        self.get_by_name(identifier)
    }

    /// Creates a category. A name that is already taken is a [`StoreError::Conflict`].
    pub fn create(&self, name: &str, color: Option<&str>) -> Result<Category, StoreError> {
        let name = validate_name(name)?;
        let color = validate_color(color.unwrap_or(DEFAULT_COLOR))?;
        let now = Local::now().naive_local();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(INSERT_CATEGORY, params![name, color, now])
            .map_err(|e| name_conflict(e, &name))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(category_id = id, "category created");
        Ok(Category {
            id,
            name,
            color,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the fields present in `patch`. Returns `None` when the category does not exist.
    pub fn update(&self, id: i64, patch: &CategoryPatch) -> Result<Option<Category>, StoreError> {
        if !patch.ignored.is_empty() {
            let fields: Vec<&str> = patch.ignored.keys().map(String::as_str).collect();
            warn!(category_id = id, ?fields, "ignoring unknown category fields");
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut category = match select_category(&tx, id)? {
            Some(category) => category,
            None => return Ok(None),
        };
        if let Some(name) = &patch.name {
            category.name = validate_name(name)?;
        }
        if let Some(color) = &patch.color {
            category.color = validate_color(color)?;
        }
        category.updated_at = Local::now().naive_local();

        tx.execute(UPDATE_CATEGORY, params![category.id, category.name, category.color, category.updated_at])
            .map_err(|e| name_conflict(e, &category.name))?;
        tx.commit()?;

        debug!(category_id = id, "category updated");
        Ok(Some(category))
    }

    /// Deletes a category. Its tasks are kept and become uncategorized.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let released = tx.execute(RELEASE_TASKS, params![id, Local::now().naive_local()])?;
        let affected = tx.execute(DELETE_CATEGORY, params![id])?;
        if affected == 0 {
            return Ok(false);
        }
        tx.commit()?;

        debug!(category_id = id, released, "category deleted");
        Ok(true)
    }

    /// Number of tasks filed under the category.
    pub fn task_count(&self, id: i64) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(COUNT_TASKS, params![id], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn validate_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation("category name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn validate_color(color: &str) -> Result<String, StoreError> {
    let color = color.trim();
    if !is_valid_color(color) {
        return Err(StoreError::Validation(format!("'{}' is not a #RRGGBB color", color)));
    }
    Ok(color.to_string())
}

fn name_conflict(err: rusqlite::Error, name: &str) -> StoreError {
    match StoreError::from(err) {
        StoreError::Conflict(_) => StoreError::Conflict(format!("category '{}' already exists", name)),
        other => other,
    }
}

fn select_category(conn: &Connection, id: i64) -> rusqlite::Result<Option<Category>> {
    conn.query_row(&format!("{} WHERE id = ?1", SELECT_CATEGORIES), params![id], category_from_row)
        .optional()
}

fn category_from_row(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
