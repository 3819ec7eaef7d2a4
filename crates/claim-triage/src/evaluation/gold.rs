use super::EvaluationError;
use crate::triage::domain::Priority;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["case_id", "expected_priority", "expected_action"];

/// Human-assigned expectation for one case, used only for offline evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldLabel {
    pub case_id: String,
    pub gold_priority: Priority,
    pub gold_action: String,
}

#[derive(Debug, Clone, Default)]
pub struct GoldLabels {
    pub labels: Vec<GoldLabel>,
    /// Rows whose expected priority is not one of P0..P3.
    pub rejected_rows: usize,
    /// Later rows repeating an already seen `case_id`.
    pub duplicate_rows: usize,
}

#[derive(Debug, Deserialize)]
struct GoldRow {
    case_id: String,
    #[serde(rename = "expected_priority")]
    gold_priority: String,
    #[serde(rename = "expected_action")]
    gold_action: String,
}

impl GoldLabels {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EvaluationError> {
        let file = std::fs::File::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "loading gold labels");
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EvaluationError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|header| header == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EvaluationError::IncompleteInputs { missing });
        }

        let mut gold = GoldLabels::default();
        let mut seen = HashSet::new();
        for row in csv_reader.deserialize::<GoldRow>() {
            let row = row?;
            let gold_priority = match row.gold_priority.parse::<Priority>() {
                Ok(priority) => priority,
                Err(err) => {
                    warn!(case_id = %row.case_id, raw = %err.raw, "gold label has unknown priority");
                    gold.rejected_rows += 1;
                    continue;
                }
            };

            if !seen.insert(row.case_id.clone()) {
                warn!(case_id = %row.case_id, "duplicate gold label ignored");
                gold.duplicate_rows += 1;
                continue;
            }

            gold.labels.push(GoldLabel {
                case_id: row.case_id,
                gold_priority,
                gold_action: row.gold_action,
            });
        }

        Ok(gold)
    }
}
