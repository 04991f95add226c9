//! Database layer for doable.
//!
//! SQLite persistence for tasks and categories. A [`db::Db`] handle owns the
//! connection and brings the schema up to date when opened; the repositories
//! borrow it and wrap each write in its own transaction, which rolls back if
//! the operation bails out early.
//!
//! ## Usage
//!
//! ```rust
//! use doable::db::{categories::Categories, db::Db, tasks::Tasks};
//! use doable::libs::task::NewTask;
//!
//! let db = Db::open_in_memory()?;
//! let home = Categories::new(&db).create("Home", None)?;
//! let task = Tasks::new(&db).create(&NewTask {
//!     due_date: Some("2024-06-01".to_string()),
//!     category_id: Some(home.id),
//!     ..NewTask::new("Water the plants")
//! })?;
//! assert_eq!(task.category_id, Some(home.id));
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection handle and pragmas.
pub mod db;

/// Repository error type.
pub mod error;

/// Versioned schema migrations.
pub mod migrations;

/// Category CRUD.
pub mod categories;

/// Task CRUD, ordering and filters.
pub mod tasks;

pub use error::StoreError;
