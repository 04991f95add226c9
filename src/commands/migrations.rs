//! Read-only view of the schema version. Opening the database here never
//! applies migrations, so pending ones stay visible.

use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Compare the database schema version with the latest known one
    Status,
    /// List applied and pending migrations
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let conn = Db::new_without_migrations()?;
    let manager = MigrationManager::new();

    match args.command {
        MigrationsCommand::Status => handle_status(&conn, &manager),
        MigrationsCommand::History => handle_history(&conn, &manager),
    }
}

fn handle_status(conn: &Connection, manager: &MigrationManager) -> Result<()> {
    let current = get_db_version(conn)?;
    msg_print!(Message::DatabaseVersion(current, manager.latest_version()));

    if needs_migration(conn)? {
        msg_info!(Message::MigrationsFound(manager.pending_after(current).len()));
    } else {
        msg_info!(Message::DatabaseUpToDate);
    }
    Ok(())
}

fn handle_history(conn: &Connection, manager: &MigrationManager) -> Result<()> {
    let current = get_db_version(conn)?;
    let applied = manager.get_migration_history(conn)?;

    msg_print!(Message::MigrationHistory, true);
    View::migrations(&applied, &manager.pending_after(current))
}
