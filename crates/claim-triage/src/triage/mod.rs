//! Deterministic claim triage: record import, risk scoring, prioritization,
//! action selection, confidence estimation, and the persisted predictions table.
//!
//! Every assessment is a pure function of one [`ClaimRecord`] and the shared,
//! read-only [`TriagePolicy`], so batches are assessed in parallel.

pub mod assembler;
pub mod domain;
pub mod engine;
pub mod ingest;
pub mod output;

#[cfg(test)]
mod tests;

pub use assembler::{AssemblyError, AssessmentAssembler, AssessmentBatch};
pub use domain::{
    ClaimRecord, ClaimValueBand, ClientSegment, HistoricalOutcome, Jurisdiction, MalformedField,
    Priority, RecommendedAction, RiskSignal, RiskSignals, ServiceLine, TriState,
    UnrecognizedValue,
};
pub use engine::{
    ConfidencePolicy, PolicyError, PriorityThresholds, RiskAssessment, RiskEngine, RiskPriors,
    ScoreBreakdown, SignalDigest, TriagePolicy,
};
pub use ingest::{ClaimRecordImporter, ImportError, ImportedClaims};
pub use output::{
    read_predictions, read_predictions_from_path, PredictionFileError, PredictionRow,
    PredictionWriter, PREDICTIONS_FILE,
};
