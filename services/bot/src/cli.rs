use crate::{check, server};
use clap::{Args, Parser, Subcommand};
use guildkeeper::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "guildkeeper",
    about = "Role pickers and staff recruitment for a Discord guild",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect the bot and start the ops HTTP server (default command)
    Run(ServeArgs),
    /// Load the configuration and report which roles and panels are enabled
    Check,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the ops HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the ops HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Run(ServeArgs::default()));

    match command {
        Command::Run(args) => server::run(args).await,
        Command::Check => check::run(),
    }
}
