use super::{EvaluationError, EvaluationResult};
use crate::triage::domain::Priority;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EVAL_REPORT_FILE: &str = "eval_report.md";

pub(super) fn write_report<P: AsRef<Path>>(
    outdir: P,
    result: &EvaluationResult,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf, EvaluationError> {
    let path = outdir.as_ref().join(EVAL_REPORT_FILE);
    let write = || -> std::io::Result<()> {
        std::fs::create_dir_all(outdir.as_ref())?;
        std::fs::write(&path, render_report(result, generated_at))
    };
    write().map_err(|source| EvaluationError::Report {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "evaluation report written");
    Ok(path)
}

/// Renders the markdown evaluation report.
pub fn render_report(result: &EvaluationResult, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_sections(&mut out, result, generated_at);
    out
}

fn write_sections(
    out: &mut String,
    result: &EvaluationResult,
    generated_at: DateTime<Utc>,
) -> std::fmt::Result {
    writeln!(out, "# Evaluation Report\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let coverage = &result.coverage;
    writeln!(out, "## Dataset")?;
    writeln!(out, "- Total evaluated cases: {}", result.dataset_size)?;
    if coverage.rejected_gold_rows > 0 {
        writeln!(
            out,
            "- Accuracy and F1 exclude {} gold rows with an invalid expected priority",
            coverage.rejected_gold_rows
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Join Coverage")?;
    writeln!(
        out,
        "- Predictions without gold label: {}",
        coverage.predictions_without_gold
    )?;
    writeln!(
        out,
        "- Gold labels without prediction: {}",
        coverage.gold_without_prediction
    )?;
    writeln!(
        out,
        "- Rejected gold rows (invalid priority): {}",
        coverage.rejected_gold_rows
    )?;
    writeln!(
        out,
        "- Duplicate gold rows ignored: {}\n",
        coverage.duplicate_gold_rows
    )?;

    writeln!(out, "## Priority Metrics")?;
    writeln!(out, "- Accuracy: {:.2}", result.priority_accuracy)?;
    writeln!(out, "- Macro F1: {:.2}\n", result.priority_macro_f1)?;

    writeln!(out, "## Per-Class Metrics")?;
    writeln!(out, "| Priority | Precision | Recall | F1 | Support |")?;
    writeln!(out, "|:--|--:|--:|--:|--:|")?;
    for class in &result.per_class {
        writeln!(
            out,
            "| {} | {:.2} | {:.2} | {:.2} | {} |",
            class.priority, class.precision, class.recall, class.f1, class.support
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Action Metrics")?;
    writeln!(out, "- Action accuracy: {:.2}\n", result.action_accuracy)?;

    writeln!(out, "## Priority Confusion Matrix")?;
    write!(out, "| |")?;
    for predicted in Priority::ordered() {
        write!(out, " Pred_{predicted} |")?;
    }
    writeln!(out)?;
    writeln!(out, "|:--|--:|--:|--:|--:|")?;
    for actual in Priority::ordered() {
        write!(out, "| Actual_{actual} |")?;
        for predicted in Priority::ordered() {
            write!(out, " {} |", result.confusion.get(actual, predicted))?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    writeln!(out, "## Representative Failure Cases\n")?;
    writeln!(
        out,
        "Showing {} of {} failures, highest risk score first.\n",
        result.failure_cases.len(),
        result.failure_count
    )?;
    for case in &result.failure_cases {
        writeln!(out, "### Case {}", case.case_id)?;
        writeln!(out, "- Gold priority: {}", case.gold_priority)?;
        writeln!(out, "- Predicted priority: {}", case.predicted_priority)?;
        writeln!(out, "- Gold action: {}", case.gold_action)?;
        writeln!(out, "- Predicted action: {}", case.predicted_action)?;
        writeln!(out, "- Risk score: {:.2}", case.risk_score)?;
        writeln!(out, "- Confidence: {}", case.confidence)?;
        writeln!(out, "- Rationale: {}", case.rationale)?;
        writeln!(out, "- Commentary: {}\n", case.kind.commentary())?;
    }

    Ok(())
}
