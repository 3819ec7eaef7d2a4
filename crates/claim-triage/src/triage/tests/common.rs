use crate::triage::domain::{
    ClaimRecord, ClaimValueBand, ClientSegment, HistoricalOutcome, Jurisdiction, RiskSignal,
    RiskSignals, ServiceLine, TriState,
};
use crate::triage::engine::{RiskEngine, TriagePolicy};

pub(super) fn engine() -> RiskEngine {
    RiskEngine::new(TriagePolicy::default())
}

/// Low-exposure claim with every signal a definite "No".
pub(super) fn quiet_claim(case_id: &str) -> ClaimRecord {
    ClaimRecord {
        case_id: case_id.to_string(),
        client_segment: ClientSegment::Smb,
        jurisdiction: Jurisdiction::Uk,
        service_line: ServiceLine::Advisory,
        claim_value_band: ClaimValueBand::Under50k,
        attachments_present: true,
        historical_outcome: HistoricalOutcome::Accepted,
        signals: RiskSignals::uniform(TriState::No),
        risk_summary: "Routine water damage with full documentation.".to_string(),
        malformed_fields: Vec::new(),
    }
}

/// Maximum-exposure claim with every signal raised.
pub(super) fn critical_claim(case_id: &str) -> ClaimRecord {
    ClaimRecord {
        client_segment: ClientSegment::Enterprise,
        jurisdiction: Jurisdiction::Us,
        service_line: ServiceLine::Legal,
        claim_value_band: ClaimValueBand::Over1m,
        signals: RiskSignals::uniform(TriState::Yes),
        risk_summary: "Regulator inquiry into suspected arson across borders.".to_string(),
        ..quiet_claim(case_id)
    }
}

/// Mid-range exposure that lands in P2 with only severe legal risk raised,
/// and in P1 once a second core signal is added.
pub(super) fn moderate_claim(case_id: &str) -> ClaimRecord {
    let mut record = ClaimRecord {
        service_line: ServiceLine::Insurance,
        claim_value_band: ClaimValueBand::From50kTo250k,
        ..quiet_claim(case_id)
    };
    record.signals.severe_legal_or_regulatory_risk = TriState::Yes;
    record
}

pub(super) fn with_signal(
    mut record: ClaimRecord,
    signal: RiskSignal,
    value: TriState,
) -> ClaimRecord {
    record.signals.set(signal, value);
    record
}
