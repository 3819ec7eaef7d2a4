#![allow(dead_code)]

use claim_triage::triage::ingest::required_claim_columns;
use std::path::{Path, PathBuf};

fn default_cell(column: &str) -> &'static str {
    match column {
        "client_segment" => "SMB",
        "jurisdiction" => "UK",
        "service_line" => "Advisory",
        "claim_value_band" => "<50k",
        "attachments_present" => "Yes",
        "historical_outcome" => "Accepted",
        "risk_summary" => "Routine claim with complete documentation.",
        _ => "No",
    }
}

/// One claim row: `case_id` plus overrides, every other column at its quiet default.
pub struct ClaimRow {
    pub case_id: String,
    pub overrides: Vec<(&'static str, String)>,
}

impl ClaimRow {
    pub fn quiet(case_id: &str) -> Self {
        Self {
            case_id: case_id.to_string(),
            overrides: Vec::new(),
        }
    }

    /// Enterprise/US/Legal/>1m with every signal raised.
    pub fn critical(case_id: &str) -> Self {
        let mut row = Self::quiet(case_id)
            .with("client_segment", "Enterprise")
            .with("jurisdiction", "US")
            .with("service_line", "Legal")
            .with("claim_value_band", ">1m")
            .with("risk_summary", "Regulator inquiry into suspected arson.");
        for column in required_claim_columns() {
            if is_signal(column) {
                row = row.with(column, "Yes");
            }
        }
        row
    }

    pub fn with(mut self, column: &'static str, value: &str) -> Self {
        self.overrides.retain(|(name, _)| *name != column);
        self.overrides.push((column, value.to_string()));
        self
    }

    fn cell(&self, column: &str) -> String {
        if column == "case_id" {
            return self.case_id.clone();
        }
        self.overrides
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| default_cell(column).to_string())
    }
}

fn is_signal(column: &str) -> bool {
    !matches!(
        column,
        "case_id"
            | "client_segment"
            | "jurisdiction"
            | "service_line"
            | "claim_value_band"
            | "attachments_present"
            | "historical_outcome"
            | "risk_summary"
    )
}

pub fn claims_csv(rows: &[ClaimRow]) -> String {
    let columns = required_claim_columns();
    let mut out = columns.join(",");
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| format!("\"{}\"", row.cell(column).replace('"', "\"\"")))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture file");
    path
}
