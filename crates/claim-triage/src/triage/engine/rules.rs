use super::super::domain::{ClaimRecord, RiskSignal, TriState};
use super::config::RiskPriors;
use super::ScoreBreakdown;
use std::collections::BTreeMap;

pub(crate) fn score_claim(record: &ClaimRecord, priors: &RiskPriors) -> (ScoreBreakdown, f64) {
    let core_severity = weighted_signals(record, priors, &priors.core_signal_weights);
    let operational_urgency = weighted_signals(record, priors, &priors.operational_signal_weights);

    let jurisdiction = priors.jurisdiction.weight(record.jurisdiction);
    let multiplier = priors.service_line.multiplier(record.service_line);
    let contextual_complexity = (jurisdiction * multiplier).min(priors.contextual_cap)
        + priors.client_segment.weight(record.client_segment) * priors.client_segment_scale;

    let financial_amplifier =
        priors.claim_value_band.weight(record.claim_value_band) * priors.claim_value_scale;

    // Only explicit missingness is penalised; a definite "No" costs nothing.
    let unknown_count = priors
        .uncertainty_signals
        .iter()
        .filter(|signal| record.signal(**signal) == TriState::Unknown)
        .count();
    let uncertainty_penalty = unknown_count as f64 * priors.uncertainty_penalty;

    let raw = core_severity + operational_urgency + contextual_complexity + financial_amplifier
        - uncertainty_penalty;

    let breakdown = ScoreBreakdown {
        core_severity,
        operational_urgency,
        contextual_complexity,
        financial_amplifier,
        uncertainty_penalty,
        raw,
    };

    (breakdown, round_score(raw))
}

fn weighted_signals(
    record: &ClaimRecord,
    priors: &RiskPriors,
    weights: &BTreeMap<RiskSignal, f64>,
) -> f64 {
    weights
        .iter()
        .map(|(signal, weight)| weight * priors.tri_state.weight(record.signal(*signal)))
        .sum()
}

/// Clamps to [0, 1] and rounds to two decimals.
pub(crate) fn round_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    (raw.clamp(0.0, 1.0) * 100.0).round() / 100.0
}
