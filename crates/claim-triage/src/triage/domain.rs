use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a cell does not spell any declared value of its enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value '{raw}'")]
pub struct UnrecognizedValue {
    pub raw: String,
}

impl UnrecognizedValue {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
        }
    }
}

fn folded(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Risk indicator with explicit missingness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    Yes,
    No,
    #[default]
    Unknown,
}

impl TriState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl FromStr for TriState {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match folded(raw).as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "unknown" | "no data available" => Ok(Self::Unknown),
            _ => Err(UnrecognizedValue::new(raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientSegment {
    #[serde(rename = "SMB")]
    Smb,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    Enterprise,
    #[default]
    Unknown,
}

impl ClientSegment {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smb => "SMB",
            Self::MidMarket => "Mid-Market",
            Self::Enterprise => "Enterprise",
            Self::Unknown => "Unknown",
        }
    }
}

impl FromStr for ClientSegment {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match folded(raw).as_str() {
            "smb" => Ok(Self::Smb),
            "mid-market" => Ok(Self::MidMarket),
            "enterprise" => Ok(Self::Enterprise),
            "unknown" | "no data available" => Ok(Self::Unknown),
            _ => Err(UnrecognizedValue::new(raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "EU")]
    Eu,
    Other,
    #[default]
    Unknown,
}

impl Jurisdiction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uk => "UK",
            Self::Us => "US",
            Self::Eu => "EU",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

impl FromStr for Jurisdiction {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match folded(raw).as_str() {
            "uk" => Ok(Self::Uk),
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            "other" => Ok(Self::Other),
            "unknown" | "no data available" => Ok(Self::Unknown),
            _ => Err(UnrecognizedValue::new(raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceLine {
    Legal,
    Insurance,
    Advisory,
    #[default]
    Unknown,
}

impl ServiceLine {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Legal => "Legal",
            Self::Insurance => "Insurance",
            Self::Advisory => "Advisory",
            Self::Unknown => "Unknown",
        }
    }
}

impl FromStr for ServiceLine {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match folded(raw).as_str() {
            "legal" => Ok(Self::Legal),
            "insurance" => Ok(Self::Insurance),
            "advisory" => Ok(Self::Advisory),
            "unknown" | "no data available" => Ok(Self::Unknown),
            _ => Err(UnrecognizedValue::new(raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimValueBand {
    #[serde(rename = "<50k")]
    Under50k,
    #[serde(rename = "50k-250k")]
    From50kTo250k,
    #[serde(rename = "250k-1m")]
    From250kTo1m,
    #[serde(rename = ">1m")]
    Over1m,
    #[default]
    Unknown,
}

impl ClaimValueBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under50k => "<50k",
            Self::From50kTo250k => "50k-250k",
            Self::From250kTo1m => "250k-1m",
            Self::Over1m => ">1m",
            Self::Unknown => "Unknown",
        }
    }
}

impl FromStr for ClaimValueBand {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match folded(raw).as_str() {
            "<50k" => Ok(Self::Under50k),
            "50k-250k" => Ok(Self::From50kTo250k),
            "250k-1m" => Ok(Self::From250kTo1m),
            ">1m" => Ok(Self::Over1m),
            "unknown" | "no data available" => Ok(Self::Unknown),
            _ => Err(UnrecognizedValue::new(raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoricalOutcome {
    Settled,
    Accepted,
    Rejected,
    Escalated,
    #[default]
    Unknown,
}

impl HistoricalOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Settled => "Settled",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Escalated => "Escalated",
            Self::Unknown => "Unknown",
        }
    }
}

impl FromStr for HistoricalOutcome {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match folded(raw).as_str() {
            "settled" => Ok(Self::Settled),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "escalated" => Ok(Self::Escalated),
            "unknown" | "no data available" => Ok(Self::Unknown),
            _ => Err(UnrecognizedValue::new(raw)),
        }
    }
}

/// Parses the `attachments_present` flag, which upstream exports as either
/// Yes/No or a boolean.
pub fn parse_attachments_flag(raw: &str) -> Result<bool, UnrecognizedValue> {
    match folded(raw).as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(UnrecognizedValue::new(raw)),
    }
}

/// Every extracted risk signal carried by a claim record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignal {
    SevereLegalOrRegulatoryRisk,
    BusinessCriticalImpact,
    PotentialFraud,
    ConflictingInformation,
    ComplexIncidentDetails,
    PolicyInterpretationIssues,
    LegalDisputes,
    JurisdictionalComplexity,
    CoverageTermsUnclear,
    ExclusionsMayApply,
    NewOrUnusualClaimType,
    UnclearIncidentDescription,
    ClaimInvalidOrFraudulent,
    RequiredConditionsNotMet,
    HasRegulatorInvolvement,
    HasCrossBorderElements,
    HasTimeSensitivity,
    HasMissingDocumentation,
    MentionsFraudOrArson,
}

impl RiskSignal {
    pub const ALL: [Self; 19] = [
        Self::SevereLegalOrRegulatoryRisk,
        Self::BusinessCriticalImpact,
        Self::PotentialFraud,
        Self::ConflictingInformation,
        Self::ComplexIncidentDetails,
        Self::PolicyInterpretationIssues,
        Self::LegalDisputes,
        Self::JurisdictionalComplexity,
        Self::CoverageTermsUnclear,
        Self::ExclusionsMayApply,
        Self::NewOrUnusualClaimType,
        Self::UnclearIncidentDescription,
        Self::ClaimInvalidOrFraudulent,
        Self::RequiredConditionsNotMet,
        Self::HasRegulatorInvolvement,
        Self::HasCrossBorderElements,
        Self::HasTimeSensitivity,
        Self::HasMissingDocumentation,
        Self::MentionsFraudOrArson,
    ];

    /// Column name used by the extraction service and the record table.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::SevereLegalOrRegulatoryRisk => "severe_legal_or_regulatory_risk",
            Self::BusinessCriticalImpact => "business_critical_impact",
            Self::PotentialFraud => "potential_fraud",
            Self::ConflictingInformation => "conflicting_information",
            Self::ComplexIncidentDetails => "complex_incident_details",
            Self::PolicyInterpretationIssues => "policy_interpretation_issues",
            Self::LegalDisputes => "legal_disputes",
            Self::JurisdictionalComplexity => "jurisdictional_complexity",
            Self::CoverageTermsUnclear => "coverage_terms_unclear",
            Self::ExclusionsMayApply => "exclusions_may_apply",
            Self::NewOrUnusualClaimType => "new_or_unusual_claim_type",
            Self::UnclearIncidentDescription => "unclear_incident_description",
            Self::ClaimInvalidOrFraudulent => "claim_invalid_or_fraudulent",
            Self::RequiredConditionsNotMet => "required_conditions_not_met",
            Self::HasRegulatorInvolvement => "has_regulator_involvement",
            Self::HasCrossBorderElements => "has_cross_border_elements",
            Self::HasTimeSensitivity => "has_time_sensitivity",
            Self::HasMissingDocumentation => "has_missing_documentation",
            Self::MentionsFraudOrArson => "mentions_fraud_or_arson",
        }
    }
}

impl fmt::Display for RiskSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Tri-state values for every [`RiskSignal`], as produced by the extraction service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSignals {
    pub severe_legal_or_regulatory_risk: TriState,
    pub business_critical_impact: TriState,
    pub potential_fraud: TriState,
    pub conflicting_information: TriState,
    pub complex_incident_details: TriState,
    pub policy_interpretation_issues: TriState,
    pub legal_disputes: TriState,
    pub jurisdictional_complexity: TriState,
    pub coverage_terms_unclear: TriState,
    pub exclusions_may_apply: TriState,
    pub new_or_unusual_claim_type: TriState,
    pub unclear_incident_description: TriState,
    pub claim_invalid_or_fraudulent: TriState,
    pub required_conditions_not_met: TriState,
    pub has_regulator_involvement: TriState,
    pub has_cross_border_elements: TriState,
    pub has_time_sensitivity: TriState,
    pub has_missing_documentation: TriState,
    pub mentions_fraud_or_arson: TriState,
}

impl RiskSignals {
    /// Every signal set to the same value.
    pub fn uniform(value: TriState) -> Self {
        let mut signals = Self::default();
        for signal in RiskSignal::ALL {
            signals.set(signal, value);
        }
        signals
    }

    pub fn get(&self, signal: RiskSignal) -> TriState {
        *self.slot(signal)
    }

    pub fn set(&mut self, signal: RiskSignal, value: TriState) {
        *self.slot_mut(signal) = value;
    }

    fn slot(&self, signal: RiskSignal) -> &TriState {
        match signal {
            RiskSignal::SevereLegalOrRegulatoryRisk => &self.severe_legal_or_regulatory_risk,
            RiskSignal::BusinessCriticalImpact => &self.business_critical_impact,
            RiskSignal::PotentialFraud => &self.potential_fraud,
            RiskSignal::ConflictingInformation => &self.conflicting_information,
            RiskSignal::ComplexIncidentDetails => &self.complex_incident_details,
            RiskSignal::PolicyInterpretationIssues => &self.policy_interpretation_issues,
            RiskSignal::LegalDisputes => &self.legal_disputes,
            RiskSignal::JurisdictionalComplexity => &self.jurisdictional_complexity,
            RiskSignal::CoverageTermsUnclear => &self.coverage_terms_unclear,
            RiskSignal::ExclusionsMayApply => &self.exclusions_may_apply,
            RiskSignal::NewOrUnusualClaimType => &self.new_or_unusual_claim_type,
            RiskSignal::UnclearIncidentDescription => &self.unclear_incident_description,
            RiskSignal::ClaimInvalidOrFraudulent => &self.claim_invalid_or_fraudulent,
            RiskSignal::RequiredConditionsNotMet => &self.required_conditions_not_met,
            RiskSignal::HasRegulatorInvolvement => &self.has_regulator_involvement,
            RiskSignal::HasCrossBorderElements => &self.has_cross_border_elements,
            RiskSignal::HasTimeSensitivity => &self.has_time_sensitivity,
            RiskSignal::HasMissingDocumentation => &self.has_missing_documentation,
            RiskSignal::MentionsFraudOrArson => &self.mentions_fraud_or_arson,
        }
    }

    fn slot_mut(&mut self, signal: RiskSignal) -> &mut TriState {
        match signal {
            RiskSignal::SevereLegalOrRegulatoryRisk => &mut self.severe_legal_or_regulatory_risk,
            RiskSignal::BusinessCriticalImpact => &mut self.business_critical_impact,
            RiskSignal::PotentialFraud => &mut self.potential_fraud,
            RiskSignal::ConflictingInformation => &mut self.conflicting_information,
            RiskSignal::ComplexIncidentDetails => &mut self.complex_incident_details,
            RiskSignal::PolicyInterpretationIssues => &mut self.policy_interpretation_issues,
            RiskSignal::LegalDisputes => &mut self.legal_disputes,
            RiskSignal::JurisdictionalComplexity => &mut self.jurisdictional_complexity,
            RiskSignal::CoverageTermsUnclear => &mut self.coverage_terms_unclear,
            RiskSignal::ExclusionsMayApply => &mut self.exclusions_may_apply,
            RiskSignal::NewOrUnusualClaimType => &mut self.new_or_unusual_claim_type,
            RiskSignal::UnclearIncidentDescription => &mut self.unclear_incident_description,
            RiskSignal::ClaimInvalidOrFraudulent => &mut self.claim_invalid_or_fraudulent,
            RiskSignal::RequiredConditionsNotMet => &mut self.required_conditions_not_met,
            RiskSignal::HasRegulatorInvolvement => &mut self.has_regulator_involvement,
            RiskSignal::HasCrossBorderElements => &mut self.has_cross_border_elements,
            RiskSignal::HasTimeSensitivity => &mut self.has_time_sensitivity,
            RiskSignal::HasMissingDocumentation => &mut self.has_missing_documentation,
            RiskSignal::MentionsFraudOrArson => &mut self.mentions_fraud_or_arson,
        }
    }
}

/// A field whose raw value fell outside its enumeration and was scored as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedField {
    pub field: &'static str,
    pub raw: String,
}

/// Structured claim with extracted risk signals. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRecord {
    pub case_id: String,
    pub client_segment: ClientSegment,
    pub jurisdiction: Jurisdiction,
    pub service_line: ServiceLine,
    pub claim_value_band: ClaimValueBand,
    pub attachments_present: bool,
    pub historical_outcome: HistoricalOutcome,
    pub signals: RiskSignals,
    pub risk_summary: String,
    /// Fields that were substituted with their `Unknown` equivalent on import.
    #[serde(skip)]
    pub malformed_fields: Vec<MalformedField>,
}

impl ClaimRecord {
    pub fn signal(&self, signal: RiskSignal) -> TriState {
        self.signals.get(signal)
    }
}

/// Ordinal urgency band; `P0` sorts first and is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub const fn ordered() -> [Self; 4] {
        [Self::P0, Self::P1, Self::P2, Self::P3]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = UnrecognizedValue;

    /// Exact label match after trimming; `p1` is not a priority.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "P0" => Ok(Self::P0),
            "P1" => Ok(Self::P1),
            "P2" => Ok(Self::P2),
            "P3" => Ok(Self::P3),
            _ => Err(UnrecognizedValue::new(raw)),
        }
    }
}

/// Closed vocabulary of handling actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "Immediate escalation")]
    ImmediateEscalation,
    #[serde(rename = "Escalate for investigation")]
    EscalateForInvestigation,
    #[serde(rename = "Route to legal review")]
    RouteToLegalReview,
    #[serde(rename = "Escalate for coverage review")]
    EscalateForCoverageReview,
    #[serde(rename = "Request further information")]
    RequestFurtherInformation,
    #[serde(rename = "Proceed with standard handling")]
    ProceedWithStandardHandling,
    #[serde(rename = "Reject claim")]
    RejectClaim,
}

impl RecommendedAction {
    pub const ALL: [Self; 7] = [
        Self::ImmediateEscalation,
        Self::EscalateForInvestigation,
        Self::RouteToLegalReview,
        Self::EscalateForCoverageReview,
        Self::RequestFurtherInformation,
        Self::ProceedWithStandardHandling,
        Self::RejectClaim,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ImmediateEscalation => "Immediate escalation",
            Self::EscalateForInvestigation => "Escalate for investigation",
            Self::RouteToLegalReview => "Route to legal review",
            Self::EscalateForCoverageReview => "Escalate for coverage review",
            Self::RequestFurtherInformation => "Request further information",
            Self::ProceedWithStandardHandling => "Proceed with standard handling",
            Self::RejectClaim => "Reject claim",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecommendedAction {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnrecognizedValue::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tri_state_accepts_upstream_missing_spelling() {
        assert_eq!("No data available".parse::<TriState>(), Ok(TriState::Unknown));
        assert_eq!(" yes ".parse::<TriState>(), Ok(TriState::Yes));
        assert!("maybe".parse::<TriState>().is_err());
    }

    #[test]
    fn categorical_fields_accept_no_data_available() {
        assert_eq!(
            "No data Available".parse::<Jurisdiction>(),
            Ok(Jurisdiction::Unknown)
        );
        assert_eq!(
            "mid-market".parse::<ClientSegment>(),
            Ok(ClientSegment::MidMarket)
        );
        assert_eq!(">1M".parse::<ClaimValueBand>(), Ok(ClaimValueBand::Over1m));
    }

    #[test]
    fn attachments_flag_accepts_booleans() {
        assert_eq!(parse_attachments_flag("True"), Ok(true));
        assert_eq!(parse_attachments_flag("No"), Ok(false));
        assert!(parse_attachments_flag("sometimes").is_err());
    }

    #[test]
    fn signals_round_trip_through_accessors() {
        let mut signals = RiskSignals::uniform(TriState::No);
        signals.set(RiskSignal::LegalDisputes, TriState::Yes);
        assert_eq!(signals.get(RiskSignal::LegalDisputes), TriState::Yes);
        assert_eq!(signals.legal_disputes, TriState::Yes);
        assert_eq!(signals.get(RiskSignal::PotentialFraud), TriState::No);
    }

    #[test]
    fn actions_parse_from_labels() {
        for action in RecommendedAction::ALL {
            assert_eq!(action.label().parse::<RecommendedAction>(), Ok(action));
        }
        assert!("Do nothing".parse::<RecommendedAction>().is_err());
    }

    #[test]
    fn priority_orders_by_urgency() {
        assert!(Priority::P0 < Priority::P1);
        assert!(Priority::P2 < Priority::P3);
        assert_eq!(" P2 ".parse::<Priority>(), Ok(Priority::P2));
        assert!("p2".parse::<Priority>().is_err());
    }
}
