use super::domain::{Priority, RecommendedAction};
use super::engine::RiskAssessment;
use serde::{Deserialize, Serialize, Serializer};
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

pub const PREDICTIONS_FILE: &str = "predictions.csv";

#[derive(Debug, thiserror::Error)]
pub enum PredictionFileError {
    #[error("failed to access predictions file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid predictions CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode signal digest for case {case_id}: {source}")]
    Digest {
        case_id: String,
        source: serde_json::Error,
    },
}

/// One row of the persisted predictions table, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub case_id: String,
    pub priority: Priority,
    #[serde(serialize_with = "two_decimals")]
    pub risk_score: f64,
    pub recommended_action: RecommendedAction,
    pub extracted_signals: String,
    pub confidence: u8,
    pub rationale: String,
}

impl PredictionRow {
    pub fn from_assessment(assessment: &RiskAssessment) -> Result<Self, PredictionFileError> {
        let extracted_signals =
            assessment
                .extracted_signals
                .to_json()
                .map_err(|source| PredictionFileError::Digest {
                    case_id: assessment.case_id.clone(),
                    source,
                })?;

        Ok(Self {
            case_id: assessment.case_id.clone(),
            priority: assessment.priority,
            risk_score: assessment.risk_score,
            recommended_action: assessment.recommended_action,
            extracted_signals,
            confidence: assessment.confidence,
            rationale: assessment.rationale.clone(),
        })
    }
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

pub struct PredictionWriter;

impl PredictionWriter {
    /// Writes `predictions.csv` under `outdir`, creating the directory if needed.
    pub fn write_to_dir<P: AsRef<Path>>(
        outdir: P,
        assessments: &[RiskAssessment],
    ) -> Result<std::path::PathBuf, PredictionFileError> {
        std::fs::create_dir_all(outdir.as_ref())?;
        let path = outdir.as_ref().join(PREDICTIONS_FILE);
        let file = std::fs::File::create(&path)?;
        Self::write(file, assessments)?;
        info!(path = %path.display(), rows = assessments.len(), "predictions written");
        Ok(path)
    }

    pub fn write<W: Write>(
        writer: W,
        assessments: &[RiskAssessment],
    ) -> Result<(), PredictionFileError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for assessment in assessments {
            csv_writer.serialize(PredictionRow::from_assessment(assessment)?)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

pub fn read_predictions_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PredictionRow>, PredictionFileError> {
    let file = std::fs::File::open(path)?;
    read_predictions(file)
}

pub fn read_predictions<R: Read>(reader: R) -> Result<Vec<PredictionRow>, PredictionFileError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<PredictionRow>() {
        rows.push(row?);
    }
    Ok(rows)
}
