pub mod activity;
pub mod init;
pub mod report;
pub mod status;
pub mod track;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage activities")]
    Activity(activity::ActivityArgs),
    #[command(about = "Track time for an activity in the foreground")]
    Track(track::TrackArgs),
    #[command(about = "Show the current session status")]
    Status,
    #[command(about = "Prepare a daily report")]
    Report(report::ReportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Activity(args) => activity::cmd(args).await,
            Commands::Track(args) => track::cmd(args).await,
            Commands::Status => status::cmd().await,
            Commands::Report(args) => report::cmd(args).await,
        }
    }
}
