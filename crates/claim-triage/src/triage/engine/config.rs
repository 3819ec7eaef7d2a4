use super::super::domain::{
    ClaimValueBand, ClientSegment, Jurisdiction, RiskSignal, ServiceLine, TriState,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Complete calibration for the decision engine. Every section falls back to
/// its default when omitted from a policy file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriagePolicy {
    pub priors: RiskPriors,
    pub thresholds: PriorityThresholds,
    pub confidence: ConfidencePolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read triage policy {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("triage policy {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid triage policy: {0}")]
    Invalid(String),
}

impl TriagePolicy {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy: Self = serde_json::from_str(&raw).map_err(|source| PolicyError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let t = &self.thresholds;
        if !(t.p0 > t.p1 && t.p1 > t.p2) {
            return Err(PolicyError::Invalid(format!(
                "priority thresholds must strictly descend (p0 {:.2}, p1 {:.2}, p2 {:.2})",
                t.p0, t.p1, t.p2
            )));
        }

        let core = &self.priors.core_signal_weights;
        let operational = &self.priors.operational_signal_weights;
        let missing: Vec<&str> = default_core_weights()
            .into_keys()
            .filter(|signal| !core.contains_key(signal))
            .chain(
                default_operational_weights()
                    .into_keys()
                    .filter(|signal| !operational.contains_key(signal)),
            )
            .map(RiskSignal::field_name)
            .collect();
        if !missing.is_empty() {
            return Err(PolicyError::Invalid(format!(
                "signal weights missing for {}",
                missing.join(", ")
            )));
        }

        let weights = self
            .priors
            .core_signal_weights
            .values()
            .chain(self.priors.operational_signal_weights.values());
        if weights.copied().any(|weight| !weight.is_finite() || weight < 0.0) {
            return Err(PolicyError::Invalid(
                "signal weights must be finite and non-negative".to_string(),
            ));
        }

        if self.confidence.floor > self.confidence.base || self.confidence.base > 100 {
            return Err(PolicyError::Invalid(format!(
                "confidence floor {} must not exceed base {} (max 100)",
                self.confidence.floor, self.confidence.base
            )));
        }

        Ok(())
    }
}

/// Numeric priors for every enumerated claim attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPriors {
    pub tri_state: TriStateWeights,
    pub client_segment: ClientSegmentWeights,
    pub jurisdiction: JurisdictionWeights,
    pub service_line: ServiceLineMultipliers,
    pub claim_value_band: ClaimValueWeights,
    /// Entries named in a policy file replace the matching default weight only.
    #[serde(deserialize_with = "core_weights_over_defaults")]
    pub core_signal_weights: BTreeMap<RiskSignal, f64>,
    #[serde(deserialize_with = "operational_weights_over_defaults")]
    pub operational_signal_weights: BTreeMap<RiskSignal, f64>,
    /// Signals penalised when explicitly `Unknown`; they carry no positive weight.
    pub uncertainty_signals: Vec<RiskSignal>,
    pub contextual_cap: f64,
    pub client_segment_scale: f64,
    pub claim_value_scale: f64,
    pub uncertainty_penalty: f64,
}

impl Default for RiskPriors {
    fn default() -> Self {
        Self {
            tri_state: TriStateWeights::default(),
            client_segment: ClientSegmentWeights::default(),
            jurisdiction: JurisdictionWeights::default(),
            service_line: ServiceLineMultipliers::default(),
            claim_value_band: ClaimValueWeights::default(),
            core_signal_weights: default_core_weights(),
            operational_signal_weights: default_operational_weights(),
            uncertainty_signals: vec![
                RiskSignal::ConflictingInformation,
                RiskSignal::UnclearIncidentDescription,
                RiskSignal::CoverageTermsUnclear,
                RiskSignal::PolicyInterpretationIssues,
                RiskSignal::RequiredConditionsNotMet,
            ],
            contextual_cap: 0.50,
            client_segment_scale: 0.15,
            claim_value_scale: 0.20,
            uncertainty_penalty: 0.03,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriStateWeights {
    pub yes: f64,
    pub no: f64,
    pub unknown: f64,
}

impl Default for TriStateWeights {
    fn default() -> Self {
        Self {
            yes: 1.0,
            no: 0.0,
            unknown: 0.25,
        }
    }
}

impl TriStateWeights {
    pub fn weight(&self, value: TriState) -> f64 {
        match value {
            TriState::Yes => self.yes,
            TriState::No => self.no,
            TriState::Unknown => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSegmentWeights {
    pub smb: f64,
    pub mid_market: f64,
    pub enterprise: f64,
    pub unknown: f64,
}

impl Default for ClientSegmentWeights {
    fn default() -> Self {
        Self {
            smb: 0.15,
            mid_market: 0.30,
            enterprise: 0.45,
            unknown: 0.25,
        }
    }
}

impl ClientSegmentWeights {
    pub fn weight(&self, segment: ClientSegment) -> f64 {
        match segment {
            ClientSegment::Smb => self.smb,
            ClientSegment::MidMarket => self.mid_market,
            ClientSegment::Enterprise => self.enterprise,
            ClientSegment::Unknown => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JurisdictionWeights {
    pub uk: f64,
    pub eu: f64,
    pub us: f64,
    pub other: f64,
    pub unknown: f64,
}

impl Default for JurisdictionWeights {
    fn default() -> Self {
        Self {
            uk: 0.20,
            eu: 0.30,
            us: 0.45,
            other: 0.25,
            unknown: 0.25,
        }
    }
}

impl JurisdictionWeights {
    pub fn weight(&self, jurisdiction: Jurisdiction) -> f64 {
        match jurisdiction {
            Jurisdiction::Uk => self.uk,
            Jurisdiction::Eu => self.eu,
            Jurisdiction::Us => self.us,
            Jurisdiction::Other => self.other,
            Jurisdiction::Unknown => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLineMultipliers {
    pub legal: f64,
    pub insurance: f64,
    pub advisory: f64,
    pub unknown: f64,
}

impl Default for ServiceLineMultipliers {
    fn default() -> Self {
        Self {
            legal: 1.30,
            insurance: 1.00,
            advisory: 0.85,
            unknown: 1.00,
        }
    }
}

impl ServiceLineMultipliers {
    pub fn multiplier(&self, line: ServiceLine) -> f64 {
        match line {
            ServiceLine::Legal => self.legal,
            ServiceLine::Insurance => self.insurance,
            ServiceLine::Advisory => self.advisory,
            ServiceLine::Unknown => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimValueWeights {
    pub under_50k: f64,
    pub from_50k_to_250k: f64,
    pub from_250k_to_1m: f64,
    pub over_1m: f64,
    pub unknown: f64,
}

impl Default for ClaimValueWeights {
    fn default() -> Self {
        Self {
            under_50k: 0.10,
            from_50k_to_250k: 0.30,
            from_250k_to_1m: 0.60,
            over_1m: 0.90,
            unknown: 0.30,
        }
    }
}

impl ClaimValueWeights {
    pub fn weight(&self, band: ClaimValueBand) -> f64 {
        match band {
            ClaimValueBand::Under50k => self.under_50k,
            ClaimValueBand::From50kTo250k => self.from_50k_to_250k,
            ClaimValueBand::From250kTo1m => self.from_250k_to_1m,
            ClaimValueBand::Over1m => self.over_1m,
            ClaimValueBand::Unknown => self.unknown,
        }
    }
}

/// Inclusive lower bounds for each priority band, evaluated high to low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityThresholds {
    pub p0: f64,
    pub p1: f64,
    pub p2: f64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            p0: 0.81,
            p1: 0.63,
            p2: 0.40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    pub base: u8,
    pub floor: u8,
    /// Signals that lower confidence whenever they are not a definite `No`.
    pub uncertainty_signals: Vec<RiskSignal>,
    pub uncertainty_deduction: u8,
    pub missing_documentation_deduction: u8,
    pub missing_attachments_deduction: u8,
    /// Also deduct for unmet required conditions and an unknown historical outcome.
    pub extended_deductions: bool,
    pub required_conditions_deduction: u8,
    pub unknown_outcome_deduction: u8,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            base: 90,
            floor: 30,
            uncertainty_signals: vec![
                RiskSignal::ConflictingInformation,
                RiskSignal::UnclearIncidentDescription,
                RiskSignal::CoverageTermsUnclear,
                RiskSignal::PolicyInterpretationIssues,
            ],
            uncertainty_deduction: 10,
            missing_documentation_deduction: 15,
            missing_attachments_deduction: 15,
            extended_deductions: false,
            required_conditions_deduction: 10,
            unknown_outcome_deduction: 10,
        }
    }
}

fn default_core_weights() -> BTreeMap<RiskSignal, f64> {
    BTreeMap::from([
        (RiskSignal::SevereLegalOrRegulatoryRisk, 0.22),
        (RiskSignal::LegalDisputes, 0.18),
        (RiskSignal::PotentialFraud, 0.18),
        (RiskSignal::ClaimInvalidOrFraudulent, 0.22),
    ])
}

fn default_operational_weights() -> BTreeMap<RiskSignal, f64> {
    BTreeMap::from([
        (RiskSignal::HasRegulatorInvolvement, 0.12),
        (RiskSignal::HasCrossBorderElements, 0.10),
        (RiskSignal::HasTimeSensitivity, 0.10),
        (RiskSignal::HasMissingDocumentation, 0.08),
        (RiskSignal::MentionsFraudOrArson, 0.12),
    ])
}

fn core_weights_over_defaults<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<RiskSignal, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut weights = default_core_weights();
    weights.extend(BTreeMap::<RiskSignal, f64>::deserialize(deserializer)?);
    Ok(weights)
}

fn operational_weights_over_defaults<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<RiskSignal, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut weights = default_operational_weights();
    weights.extend(BTreeMap::<RiskSignal, f64>::deserialize(deserializer)?);
    Ok(weights)
}
