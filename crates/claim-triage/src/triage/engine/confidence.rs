use super::super::domain::{ClaimRecord, HistoricalOutcome, RiskSignal, TriState};
use super::config::ConfidencePolicy;

/// Integer confidence in the recommendation, depending only on the record.
///
/// Uncertainty signals lower confidence whenever they are not a definite `No`,
/// whichever direction they point.
pub(crate) fn estimate_confidence(record: &ClaimRecord, policy: &ConfidencePolicy) -> u8 {
    let mut deduction: u32 = 0;

    for signal in &policy.uncertainty_signals {
        if record.signal(*signal) != TriState::No {
            deduction += u32::from(policy.uncertainty_deduction);
        }
    }

    if record.signals.has_missing_documentation.is_yes() {
        deduction += u32::from(policy.missing_documentation_deduction);
    }

    if !record.attachments_present {
        deduction += u32::from(policy.missing_attachments_deduction);
    }

    if policy.extended_deductions {
        if record.signal(RiskSignal::RequiredConditionsNotMet) != TriState::No {
            deduction += u32::from(policy.required_conditions_deduction);
        }
        if record.historical_outcome == HistoricalOutcome::Unknown {
            deduction += u32::from(policy.unknown_outcome_deduction);
        }
    }

    let confidence = u32::from(policy.base).saturating_sub(deduction);
    confidence.max(u32::from(policy.floor)).min(100) as u8
}
