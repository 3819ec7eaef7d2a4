use crate::pipeline::{print_policy, run_evaluation, run_triage};
use claim_triage::config::{parse_workers, AppConfig};
use claim_triage::error::AppError;
use claim_triage::telemetry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "claim-triage",
    about = "Score, prioritise and route insurance claims, and evaluate the results against gold labels",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess a claim-record CSV and write predictions (plus an evaluation report with --gold)
    Run(RunArgs),
    /// Evaluate an existing predictions file against gold labels
    Evaluate(EvaluateArgs),
    /// Print the effective triage policy as JSON
    Policy(PolicyArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// Claim-record CSV, one row per claim
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Directory receiving predictions.csv and eval_report.md
    #[arg(long)]
    pub(crate) outdir: PathBuf,
    /// Gold-label CSV; when given, the run is evaluated
    #[arg(long)]
    pub(crate) gold: Option<PathBuf>,
    /// Triage policy JSON overriding TRIAGE_POLICY_PATH
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Assessment worker threads overriding TRIAGE_WORKERS
    #[arg(long, value_parser = parse_worker_arg)]
    pub(crate) workers: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Predictions CSV written by a previous run
    #[arg(long)]
    pub(crate) predictions: PathBuf,
    /// Gold-label CSV with case_id, expected_priority, expected_action
    #[arg(long)]
    pub(crate) gold: PathBuf,
    /// Directory receiving eval_report.md
    #[arg(long)]
    pub(crate) outdir: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PolicyArgs {
    /// Triage policy JSON overriding TRIAGE_POLICY_PATH
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

fn parse_worker_arg(value: &str) -> Result<usize, String> {
    parse_workers(value).map_err(|err| err.to_string())
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    match &cli.command {
        Command::Run(args) => {
            if let Some(policy) = &args.policy {
                config.triage.policy_path = Some(policy.clone());
            }
            if let Some(workers) = args.workers {
                config.triage.workers = Some(workers);
            }
        }
        Command::Policy(args) => {
            if let Some(policy) = &args.policy {
                config.triage.policy_path = Some(policy.clone());
            }
        }
        Command::Evaluate(_) => {}
    }

    telemetry::init(&config.telemetry)?;
    debug!(environment = config.environment.label(), "configuration loaded");

    match cli.command {
        Command::Run(args) => run_triage(args, &config),
        Command::Evaluate(args) => run_evaluation(args),
        Command::Policy(_) => print_policy(&config),
    }
}
