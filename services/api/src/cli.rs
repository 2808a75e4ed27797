use crate::demo::{run_demo, run_score_report, DemoArgs, ScoreReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hotel_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hotel Audit Service",
    about = "Run and demonstrate the hotel audit service from the command line",
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
    /// Build a weighted score report from a field score sheet
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Walk a scripted audit from opening through submission
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Render the report for a CSV score sheet
    Report(ScoreReportArgs),
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
        Command::Score {
            command: ScoreCommand::Report(args),
        } => run_score_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
