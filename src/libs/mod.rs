//! Core library modules for doable.
//!
//! - **Domain**: [`task`] and [`category`] records, patches and the pure
//!   derivations ([`task::is_overdue`], [`task::priority_label`], [`stats`])
//! - **Infrastructure**: configuration, data directory, messaging
//! - **Presentation**: table rendering and typed UI events
//!
//! ## Usage
//!
//! ```rust
//! use doable::libs::task::{priority_label, Priority};
//!
//! assert_eq!(priority_label(3), "High");
//! assert_eq!(priority_label(42), "Medium");
//! assert!(Priority::try_from(42i64).is_err());
//! ```

pub mod category;
pub mod config;
pub mod data_storage;
pub mod event;
pub mod messages;
pub mod stats;
pub mod task;
pub mod view;
