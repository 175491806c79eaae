use crate::commands::{
    run_eligibility, run_schedule, run_triage, EligibilityArgs, ScheduleArgs, TriageArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hpv_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HPV Tracker",
    about = "Screen, schedule and triage HPV vaccinations from the command line or over HTTP",
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
    /// Screen a person against the configured program
    Eligibility(EligibilityArgs),
    /// Show schedule progress, the next due dose and its reminders
    Schedule(ScheduleArgs),
    /// Classify self-reported symptoms into a visit urgency
    Triage(TriageArgs),
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
        Command::Eligibility(args) => run_eligibility(args),
        Command::Schedule(args) => run_schedule(args),
        Command::Triage(args) => run_triage(args),
    }
}
