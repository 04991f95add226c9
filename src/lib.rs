//! # Doable
//!
//! A command-line task manager: create, edit, complete, delete and categorize
//! tasks, and keep an eye on completion statistics.
//!
//! ## Features
//!
//! - **Tasks**: title, description, due date, priority and completion flag
//! - **Categories**: named, colored groups; deleting one keeps its tasks
//! - **Statistics**: completion rate, overdue count and per-priority counts
//! - **UI events**: typed JSON payloads for driving the app from another front end
//!
//! ## Usage
//!
//! ```rust,no_run
//! use doable::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
