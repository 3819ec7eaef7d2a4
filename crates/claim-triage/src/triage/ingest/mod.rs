mod normalizer;
mod parser;

use super::domain::ClaimRecord;
use parser::{ClaimTable, ParsedRow};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub use parser::required_columns as required_claim_columns;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read claim records: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid claim record CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("claim records are missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("claim record input is empty: nothing to assess")]
    Empty,
}

/// Records decoded from a claim table plus the data-quality counters of the import.
#[derive(Debug, Clone)]
pub struct ImportedClaims {
    pub records: Vec<ClaimRecord>,
    /// Rows dropped because they carried no `case_id`.
    pub dropped_rows: usize,
}

impl ImportedClaims {
    /// Total fields that fell back to their `Unknown` equivalent.
    pub fn anomaly_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.malformed_fields.len())
            .sum()
    }
}

pub struct ClaimRecordImporter;

impl ClaimRecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportedClaims, ImportError> {
        let file = std::fs::File::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "loading claim records");
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportedClaims, ImportError> {
        let (table, missing) = ClaimTable::open(reader)?;
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        let mut dropped_rows = 0;
        for row in table.rows() {
            match row? {
                ParsedRow::Record(record) => records.push(record),
                ParsedRow::MissingCaseId => dropped_rows += 1,
            }
        }

        if dropped_rows > 0 {
            warn!(dropped_rows, "dropped claim rows without case_id");
        }

        if records.is_empty() {
            return Err(ImportError::Empty);
        }

        let imported = ImportedClaims {
            records,
            dropped_rows,
        };
        info!(
            rows = imported.records.len(),
            dropped_rows,
            anomalies = imported.anomaly_count(),
            "claim records loaded"
        );
        Ok(imported)
    }
}
