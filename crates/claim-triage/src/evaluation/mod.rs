//! Offline evaluation of persisted predictions against human gold labels.
//!
//! The harness only ever reads a complete predictions snapshot, joins it to
//! the gold labels on `case_id` and derives priority/action metrics plus a
//! markdown report. Rows present on one side only are excluded and counted.

mod gold;
mod metrics;
mod report;

pub use gold::{GoldLabel, GoldLabels};
pub use metrics::{ClassMetrics, ConfusionMatrix};
pub use report::{render_report, EVAL_REPORT_FILE};

use crate::triage::domain::{Priority, RecommendedAction};
use crate::triage::output::{read_predictions_from_path, PredictionFileError, PredictionRow};
use metrics::ratio;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Failure cases rendered in detail in the report.
pub const FAILURE_SAMPLE_SIZE: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("failed to read evaluation input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid gold label CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to load predictions: {0}")]
    Predictions(#[from] PredictionFileError),
    #[error("gold labels are missing required columns: {}", .missing.join(", "))]
    IncompleteInputs { missing: Vec<String> },
    #[error("no overlapping case_id between {predictions} predictions and {gold} gold labels")]
    NoOverlap { predictions: usize, gold: usize },
    #[error("failed to write evaluation report to {path}: {source}")]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// How many rows the inner join left out, per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinCoverage {
    pub predictions_without_gold: usize,
    pub gold_without_prediction: usize,
    pub rejected_gold_rows: usize,
    pub duplicate_gold_rows: usize,
}

impl JoinCoverage {
    pub fn excluded(&self) -> usize {
        self.predictions_without_gold
            + self.gold_without_prediction
            + self.rejected_gold_rows
            + self.duplicate_gold_rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Predicted a more urgent band than the gold label.
    Overestimated,
    Underestimated,
    /// Priority agreed, action did not.
    ActionOnly,
}

impl FailureKind {
    fn classify(gold: Priority, predicted: Priority) -> Self {
        match predicted.cmp(&gold) {
            Ordering::Less => Self::Overestimated,
            Ordering::Greater => Self::Underestimated,
            Ordering::Equal => Self::ActionOnly,
        }
    }

    pub const fn commentary(self) -> &'static str {
        match self {
            Self::Overestimated => {
                "The engine over-estimated urgency; strong core or operational signals outweighed the context the reviewer relied on."
            }
            Self::Underestimated => {
                "The engine under-estimated urgency; the input signals were limited, ambiguous or conflicting."
            }
            Self::ActionOnly => {
                "Priority matched but the action cascade picked a different rule for this band."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureCase {
    pub case_id: String,
    pub gold_priority: Priority,
    pub predicted_priority: Priority,
    pub gold_action: String,
    pub predicted_action: RecommendedAction,
    pub risk_score: f64,
    pub confidence: u8,
    pub rationale: String,
    pub kind: FailureKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Rows surviving the inner join.
    pub dataset_size: usize,
    pub priority_accuracy: f64,
    pub priority_macro_f1: f64,
    pub per_class: Vec<ClassMetrics>,
    pub confusion: ConfusionMatrix,
    pub action_accuracy: f64,
    pub failure_count: usize,
    /// Highest-scoring failures, at most [`FAILURE_SAMPLE_SIZE`].
    pub failure_cases: Vec<FailureCase>,
    pub coverage: JoinCoverage,
}

pub struct EvaluationHarness;

impl EvaluationHarness {
    /// Reads `predictions` and `gold`, evaluates, and writes `eval_report.md` under `outdir`.
    pub fn run<P, G, O>(
        predictions: P,
        gold: G,
        outdir: O,
    ) -> Result<(EvaluationResult, PathBuf), EvaluationError>
    where
        P: AsRef<Path>,
        G: AsRef<Path>,
        O: AsRef<Path>,
    {
        info!(
            predictions = %predictions.as_ref().display(),
            gold = %gold.as_ref().display(),
            "starting evaluation"
        );
        let predictions = read_predictions_from_path(predictions)?;
        let gold = GoldLabels::from_path(gold)?;
        let result = Self::evaluate(&predictions, &gold)?;
        let path = report::write_report(outdir, &result, chrono::Utc::now())?;
        Ok((result, path))
    }

    pub fn evaluate(
        predictions: &[PredictionRow],
        gold: &GoldLabels,
    ) -> Result<EvaluationResult, EvaluationError> {
        let by_case: HashMap<&str, &GoldLabel> = gold
            .labels
            .iter()
            .map(|label| (label.case_id.as_str(), label))
            .collect();

        let joined: Vec<(&PredictionRow, &GoldLabel)> = predictions
            .iter()
            .filter_map(|row| by_case.get(row.case_id.as_str()).map(|label| (row, *label)))
            .collect();

        let predicted_ids: HashSet<&str> =
            predictions.iter().map(|row| row.case_id.as_str()).collect();
        let coverage = JoinCoverage {
            predictions_without_gold: predictions.len() - joined.len(),
            gold_without_prediction: gold
                .labels
                .iter()
                .filter(|label| !predicted_ids.contains(label.case_id.as_str()))
                .count(),
            rejected_gold_rows: gold.rejected_rows,
            duplicate_gold_rows: gold.duplicate_rows,
        };

        info!(
            predictions = predictions.len(),
            gold = gold.labels.len(),
            joined = joined.len(),
            excluded = coverage.excluded(),
            "joined predictions with gold labels"
        );
        if joined.is_empty() {
            return Err(EvaluationError::NoOverlap {
                predictions: predictions.len(),
                gold: gold.labels.len(),
            });
        }
        if coverage.excluded() > 0 {
            warn!(
                predictions_without_gold = coverage.predictions_without_gold,
                gold_without_prediction = coverage.gold_without_prediction,
                rejected_gold_rows = coverage.rejected_gold_rows,
                duplicate_gold_rows = coverage.duplicate_gold_rows,
                "rows excluded from evaluation"
            );
        }

        let mut confusion = ConfusionMatrix::default();
        let mut action_matches = 0;
        let mut failures = Vec::new();
        for (row, label) in &joined {
            confusion.record(label.gold_priority, row.priority);
            let action_matches_gold = row.recommended_action.label() == label.gold_action.trim();
            if action_matches_gold {
                action_matches += 1;
            }
            if row.priority != label.gold_priority || !action_matches_gold {
                failures.push(FailureCase {
                    case_id: row.case_id.clone(),
                    gold_priority: label.gold_priority,
                    predicted_priority: row.priority,
                    gold_action: label.gold_action.clone(),
                    predicted_action: row.recommended_action,
                    risk_score: row.risk_score,
                    confidence: row.confidence,
                    rationale: row.rationale.clone(),
                    kind: FailureKind::classify(label.gold_priority, row.priority),
                });
            }
        }

        let failure_count = failures.len();
        // Stable sort keeps join order among equal scores.
        failures.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
        failures.truncate(FAILURE_SAMPLE_SIZE);

        let result = EvaluationResult {
            dataset_size: joined.len(),
            priority_accuracy: ratio(confusion.correct(), joined.len()),
            priority_macro_f1: confusion.macro_f1(),
            per_class: confusion.per_class(),
            confusion,
            action_accuracy: ratio(action_matches, joined.len()),
            failure_count,
            failure_cases: failures,
            coverage,
        };

        info!(
            accuracy = result.priority_accuracy,
            macro_f1 = result.priority_macro_f1,
            action_accuracy = result.action_accuracy,
            failures = result.failure_count,
            "evaluation metrics computed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests;
