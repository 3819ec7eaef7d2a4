use super::super::domain::{ClaimRecord, HistoricalOutcome, Priority, RecommendedAction};
use super::config::PriorityThresholds;

pub(crate) fn classify_priority(risk_score: f64, thresholds: &PriorityThresholds) -> Priority {
    if risk_score >= thresholds.p0 {
        Priority::P0
    } else if risk_score >= thresholds.p1 {
        Priority::P1
    } else if risk_score >= thresholds.p2 {
        Priority::P2
    } else {
        Priority::P3
    }
}

/// One step of a tier's cascade. The last rule of every tier always applies.
pub(crate) struct ActionRule {
    pub(crate) name: &'static str,
    pub(crate) applies: fn(&ClaimRecord) -> bool,
    pub(crate) action: RecommendedAction,
}

const P0_RULES: &[ActionRule] = &[
    ActionRule {
        name: "fraud indicators on critical claim",
        applies: fraud_indicated,
        action: RecommendedAction::EscalateForInvestigation,
    },
    ActionRule {
        name: "critical claim",
        applies: always,
        action: RecommendedAction::ImmediateEscalation,
    },
];

const P1_RULES: &[ActionRule] = &[
    ActionRule {
        name: "active legal dispute",
        applies: |record| record.signals.legal_disputes.is_yes(),
        action: RecommendedAction::RouteToLegalReview,
    },
    ActionRule {
        name: "coverage ambiguity",
        applies: |record| {
            record.signals.policy_interpretation_issues.is_yes()
                || record.signals.coverage_terms_unclear.is_yes()
        },
        action: RecommendedAction::EscalateForCoverageReview,
    },
    ActionRule {
        name: "elevated risk",
        applies: always,
        action: RecommendedAction::EscalateForInvestigation,
    },
];

const P2_RULES: &[ActionRule] = &[
    ActionRule {
        name: "missing documentation",
        applies: |record| record.signals.has_missing_documentation.is_yes(),
        action: RecommendedAction::RequestFurtherInformation,
    },
    ActionRule {
        name: "moderate risk",
        applies: always,
        action: RecommendedAction::ProceedWithStandardHandling,
    },
];

const P3_RULES: &[ActionRule] = &[
    ActionRule {
        name: "invalid or fraudulent claim",
        applies: |record| record.signals.claim_invalid_or_fraudulent.is_yes(),
        action: RecommendedAction::RejectClaim,
    },
    ActionRule {
        name: "thin evidence",
        applies: |record| {
            !record.attachments_present
                || matches!(
                    record.historical_outcome,
                    HistoricalOutcome::Unknown | HistoricalOutcome::Rejected
                )
        },
        action: RecommendedAction::RequestFurtherInformation,
    },
    ActionRule {
        name: "low risk",
        applies: always,
        action: RecommendedAction::ProceedWithStandardHandling,
    },
];

fn always(_: &ClaimRecord) -> bool {
    true
}

fn fraud_indicated(record: &ClaimRecord) -> bool {
    record.signals.potential_fraud.is_yes() || record.signals.mentions_fraud_or_arson.is_yes()
}

pub(crate) fn rules_for(priority: Priority) -> &'static [ActionRule] {
    match priority {
        Priority::P0 => P0_RULES,
        Priority::P1 => P1_RULES,
        Priority::P2 => P2_RULES,
        Priority::P3 => P3_RULES,
    }
}

/// First matching rule of the priority's tier.
pub(crate) fn recommend_action(record: &ClaimRecord, priority: Priority) -> &'static ActionRule {
    let rules = rules_for(priority);
    rules
        .iter()
        .find(|rule| (rule.applies)(record))
        .unwrap_or(&rules[rules.len() - 1])
}
