pub mod category;
pub mod event;
pub mod init;
pub mod migrations;
pub mod stats;
pub mod task;

use crate::db::StoreError;
use crate::{msg_error, msg_error_anyhow};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Create, list, edit, complete and delete tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage task categories")]
    Category(category::CategoryArgs),
    #[command(about = "Show completion statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Dispatch a UI event payload", arg_required_else_help = true)]
    Event(event::EventArgs),
    #[command(about = "Inspect the database schema version")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Event(args) => event::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Reports validation and conflict errors to the user; storage failures abort the command.
pub(crate) fn report(err: StoreError) -> Result<()> {
    match err {
        StoreError::Storage(_) => Err(msg_error_anyhow!(err)),
        _ => {
            msg_error!(err);
            Ok(())
        }
    }
}
