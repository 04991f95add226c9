use crate::{
    db::{db::Db, tasks::Tasks},
    libs::{messages::Message, stats::statistics, view::View},
    msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let db = Db::new()?;
    let tasks = Tasks::new(&db).list()?;
    let stats = statistics(&tasks, Local::now().naive_local());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    msg_print!(Message::StatisticsHeader, true);
    View::statistics(&stats)
}
