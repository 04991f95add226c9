use super::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::msg_debug;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// An open SQLite connection with the schema migrated to the latest version.
///
/// Repositories borrow the handle for the duration of a call; the connection
/// closes when the `Db` is dropped.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database configured for this user.
    pub fn new() -> Result<Db> {
        let path = Config::read()?.database_path()?;
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        msg_debug!(format!("Opening database at {}", path.as_ref().display()));
        let conn = Connection::open(path)?;
        Self::prepare(conn)
    }

    pub fn open_in_memory() -> Result<Db> {
        Self::prepare(Connection::open_in_memory()?)
    }

    /// Opens the configured database without applying pending migrations.
    pub fn new_without_migrations() -> Result<Connection> {
        let path = Config::read()?.database_path()?;
        Self::open_without_migrations(path)
    }

    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path)?;
        configure(&conn)?;
        Ok(conn)
    }

    fn prepare(mut conn: Connection) -> Result<Db> {
        configure(&conn)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}

fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}
