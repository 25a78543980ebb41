use crate::commands::{run_allot, run_presets, run_rank, AllotArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use internship_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Internship Match",
    about = "Rank candidates and allot internship positions from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank a candidate CSV against one preset or custom position
    Rank(RankArgs),
    /// Allot a candidate CSV across several positions
    Allot(AllotArgs),
    /// List the built-in preset positions
    Presets,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Allot(args) => run_allot(args),
        Command::Presets => run_presets(),
    }
}
