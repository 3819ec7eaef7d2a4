mod confidence;
mod config;
mod digest;
mod policy;
mod rules;

pub use config::{
    ClaimValueWeights, ClientSegmentWeights, ConfidencePolicy, JurisdictionWeights, PolicyError,
    PriorityThresholds, RiskPriors, ServiceLineMultipliers, TriStateWeights, TriagePolicy,
};
pub use digest::{CoreRiskDigest, OperationalFlagDigest, SignalDigest};

use super::domain::{ClaimRecord, Priority, RecommendedAction};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless decision engine applying one immutable policy to claim records.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    policy: TriagePolicy,
}

impl RiskEngine {
    pub fn new(policy: TriagePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TriagePolicy {
        &self.policy
    }

    pub fn risk_score(&self, record: &ClaimRecord) -> f64 {
        rules::score_claim(record, &self.policy.priors).1
    }

    pub fn score_breakdown(&self, record: &ClaimRecord) -> ScoreBreakdown {
        rules::score_claim(record, &self.policy.priors).0
    }

    pub fn priority_for(&self, risk_score: f64) -> Priority {
        policy::classify_priority(risk_score, &self.policy.thresholds)
    }

    pub fn recommend_action(&self, record: &ClaimRecord, priority: Priority) -> RecommendedAction {
        policy::recommend_action(record, priority).action
    }

    pub fn confidence(&self, record: &ClaimRecord) -> u8 {
        confidence::estimate_confidence(record, &self.policy.confidence)
    }

    pub fn assess(&self, record: &ClaimRecord) -> RiskAssessment {
        let (breakdown, risk_score) = rules::score_claim(record, &self.policy.priors);
        let priority = self.priority_for(risk_score);
        let rule = policy::recommend_action(record, priority);
        let confidence = self.confidence(record);

        debug!(
            case_id = %record.case_id,
            risk_score,
            %priority,
            rule = rule.name,
            confidence,
            "claim assessed"
        );

        RiskAssessment {
            case_id: record.case_id.clone(),
            risk_score,
            priority,
            recommended_action: rule.action,
            confidence,
            extracted_signals: SignalDigest::from_record(record),
            rationale: record.risk_summary.clone(),
            breakdown,
            fallback_fields: record.malformed_fields.len(),
        }
    }
}

/// The five additive terms behind a risk score, kept for audits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub core_severity: f64,
    pub operational_urgency: f64,
    pub contextual_complexity: f64,
    pub financial_amplifier: f64,
    pub uncertainty_penalty: f64,
    /// Sum of the terms before clamping and rounding.
    pub raw: f64,
}

/// Engine output for a single claim. Created once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub case_id: String,
    pub risk_score: f64,
    pub priority: Priority,
    pub recommended_action: RecommendedAction,
    pub confidence: u8,
    pub extracted_signals: SignalDigest,
    pub rationale: String,
    pub breakdown: ScoreBreakdown,
    /// Number of fields scored with their `Unknown` fallback.
    pub fallback_fields: usize,
}
