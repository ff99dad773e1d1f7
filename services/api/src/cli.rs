use crate::commands::{run_calculate, run_dashboard, run_profiles, CalculateArgs, DashboardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use staffing_ratios::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Staffing Ratios",
    about = "Check eldercare staffing ratios against CAM, Order 2680/2024 and municipal rules",
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
    /// List regulation profiles and the staff categories each one collects
    Profiles,
    /// Evaluate weekly staffing hours and print the compliance report
    Calculate(CalculateArgs),
    /// Summarise contract costs per center from a contracts JSON export
    Dashboard(DashboardArgs),
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
        Command::Profiles => run_profiles(),
        Command::Calculate(args) => run_calculate(args),
        Command::Dashboard(args) => run_dashboard(args),
    }
}
