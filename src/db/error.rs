use rusqlite::ffi;
use thiserror::Error;

/// Failures a repository operation can report.
///
/// Missing rows are not errors: lookups return `Option` and deletes return
/// whether a row existed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage unavailable: {0}")]
    Storage(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, detail) = &err {
            let detail = detail.clone().unwrap_or_else(|| failure.to_string());
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => return StoreError::Conflict(detail),
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return StoreError::Validation(format!("referenced row does not exist ({})", detail)),
                ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => return StoreError::Validation(detail),
                _ => {}
            }
        }
        StoreError::Storage(err)
    }
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
