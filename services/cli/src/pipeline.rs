use crate::cli::{EvaluateArgs, RunArgs};
use claim_triage::config::AppConfig;
use claim_triage::error::AppError;
use claim_triage::evaluation::{EvaluationHarness, EvaluationResult};
use claim_triage::triage::{
    AssessmentAssembler, AssessmentBatch, ClaimRecordImporter, Priority, PredictionWriter,
    RiskEngine,
};
use std::path::Path;
use tracing::info;

pub(crate) fn run_triage(args: RunArgs, config: &AppConfig) -> Result<(), AppError> {
    let RunArgs {
        input,
        outdir,
        gold,
        ..
    } = args;

    let policy = config.triage.load_policy()?;
    let engine = RiskEngine::new(policy);
    let assembler = match config.triage.workers {
        Some(workers) => AssessmentAssembler::with_workers(engine, workers)?,
        None => AssessmentAssembler::new(engine),
    };

    let imported = ClaimRecordImporter::from_path(&input)?;
    let batch = assembler.assemble(&imported.records)?;
    let predictions_path = PredictionWriter::write_to_dir(&outdir, &batch.assessments)?;

    println!("Claim triage run");
    render_batch_summary(&batch, imported.dropped_rows);
    println!("- Predictions: {}", predictions_path.display());

    if let Some(gold) = gold {
        // Evaluation reads the written snapshot, never the in-memory batch.
        evaluate_and_render(&predictions_path, &gold, &outdir)?;
    }

    Ok(())
}

pub(crate) fn run_evaluation(args: EvaluateArgs) -> Result<(), AppError> {
    evaluate_and_render(&args.predictions, &args.gold, &args.outdir)
}

pub(crate) fn print_policy(config: &AppConfig) -> Result<(), AppError> {
    println!("{}", effective_policy_json(config)?);
    Ok(())
}

/// The policy as the engine will apply it, after file overrides merge over defaults.
fn effective_policy_json(config: &AppConfig) -> Result<String, AppError> {
    let engine = RiskEngine::new(config.triage.load_policy()?);
    Ok(serde_json::to_string_pretty(engine.policy())?)
}

fn evaluate_and_render(predictions: &Path, gold: &Path, outdir: &Path) -> Result<(), AppError> {
    let (result, report_path) = EvaluationHarness::run(predictions, gold, outdir)?;
    info!(path = %report_path.display(), "evaluation finished");

    println!("\nEvaluation");
    render_evaluation_summary(&result);
    println!("- Report: {}", report_path.display());
    Ok(())
}

fn render_batch_summary(batch: &AssessmentBatch, dropped_rows: usize) {
    println!(
        "- {} claims assessed ({} rows without case_id dropped, {} fields scored with fallback weights)",
        batch.len(),
        dropped_rows,
        batch.fallback_count
    );
    let mix: Vec<String> = Priority::ordered()
        .into_iter()
        .map(|priority| format!("{priority} {}", batch.count(priority)))
        .collect();
    println!("- Priority mix: {}", mix.join(" | "));
}

fn render_evaluation_summary(result: &EvaluationResult) {
    println!(
        "- Evaluated {} cases ({} rows excluded from the join)",
        result.dataset_size,
        result.coverage.excluded()
    );
    println!(
        "- Priority accuracy {:.2} | macro F1 {:.2} | action accuracy {:.2}",
        result.priority_accuracy, result.priority_macro_f1, result.action_accuracy
    );
    println!(
        "- {} failures, {} detailed in the report",
        result.failure_count,
        result.failure_cases.len()
    );
}
