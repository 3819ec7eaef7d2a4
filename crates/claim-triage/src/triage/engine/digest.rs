use super::super::domain::{ClaimRecord, TriState};
use serde::{Deserialize, Serialize};

/// Compact explainability summary persisted alongside each assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDigest {
    pub jurisdiction: String,
    pub service_line: String,
    pub claim_value_band: String,
    pub core_risks: CoreRiskDigest,
    pub operational_flags: OperationalFlagDigest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreRiskDigest {
    pub severe_legal_or_regulatory_risk: TriState,
    pub potential_fraud: TriState,
    pub legal_disputes: TriState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalFlagDigest {
    pub has_regulator_involvement: TriState,
    pub has_cross_border_elements: TriState,
    pub has_time_sensitivity: TriState,
    pub has_missing_documentation: TriState,
}

impl SignalDigest {
    pub fn from_record(record: &ClaimRecord) -> Self {
        let signals = &record.signals;
        Self {
            jurisdiction: record.jurisdiction.label().to_string(),
            service_line: record.service_line.label().to_string(),
            claim_value_band: record.claim_value_band.label().to_string(),
            core_risks: CoreRiskDigest {
                severe_legal_or_regulatory_risk: signals.severe_legal_or_regulatory_risk,
                potential_fraud: signals.potential_fraud,
                legal_disputes: signals.legal_disputes,
            },
            operational_flags: OperationalFlagDigest {
                has_regulator_involvement: signals.has_regulator_involvement,
                has_cross_border_elements: signals.has_cross_border_elements,
                has_time_sensitivity: signals.has_time_sensitivity,
                has_missing_documentation: signals.has_missing_documentation,
            },
        }
    }

    /// Embedded JSON text for the `extracted_signals` column.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
