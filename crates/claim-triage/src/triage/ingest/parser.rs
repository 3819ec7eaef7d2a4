use super::super::domain::{
    parse_attachments_flag, ClaimRecord, ClaimValueBand, ClientSegment, HistoricalOutcome,
    Jurisdiction, RiskSignal, RiskSignals, ServiceLine, TriState,
};
use super::normalizer::{normalize_cell, parse_enumerated};
use std::collections::HashMap;
use std::io::Read;

pub(crate) const CASE_ID: &str = "case_id";
pub(crate) const RISK_SUMMARY: &str = "risk_summary";

const CATEGORICAL_COLUMNS: [&str; 6] = [
    "client_segment",
    "jurisdiction",
    "service_line",
    "claim_value_band",
    "attachments_present",
    "historical_outcome",
];

/// Every column a claim table must declare, in schema order.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![CASE_ID];
    columns.extend(CATEGORICAL_COLUMNS);
    columns.extend(RiskSignal::ALL.iter().map(|signal| signal.field_name()));
    columns.push(RISK_SUMMARY);
    columns
}

pub(crate) enum ParsedRow {
    Record(ClaimRecord),
    MissingCaseId,
}

pub(crate) struct ClaimTable<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ClaimTable<R> {
    /// Opens the table and returns the required columns absent from its header.
    pub(crate) fn open(reader: R) -> Result<(Self, Vec<String>), csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|header| normalize_cell(header).to_string())
            .collect();
        let missing = required_columns()
            .into_iter()
            .filter(|column| !headers.iter().any(|header| header == column))
            .map(str::to_string)
            .collect();
        reader.set_headers(csv::StringRecord::from(headers));
        Ok((Self { reader }, missing))
    }

    pub(crate) fn rows(self) -> impl Iterator<Item = Result<ParsedRow, csv::Error>> {
        self.reader
            .into_deserialize::<HashMap<String, String>>()
            .map(|row| row.map(|cells| parse_row(&cells)))
    }
}

fn parse_row(cells: &HashMap<String, String>) -> ParsedRow {
    let cell = |name: &str| cells.get(name).map(String::as_str);

    let case_id = cell(CASE_ID).map(normalize_cell).unwrap_or_default();
    if case_id.is_empty() {
        return ParsedRow::MissingCaseId;
    }

    let mut malformed = Vec::new();
    let client_segment: ClientSegment = parse_enumerated(
        case_id,
        "client_segment",
        cell("client_segment"),
        Default::default(),
        str::parse,
        &mut malformed,
    );
    let jurisdiction: Jurisdiction = parse_enumerated(
        case_id,
        "jurisdiction",
        cell("jurisdiction"),
        Default::default(),
        str::parse,
        &mut malformed,
    );
    let service_line: ServiceLine = parse_enumerated(
        case_id,
        "service_line",
        cell("service_line"),
        Default::default(),
        str::parse,
        &mut malformed,
    );
    let claim_value_band: ClaimValueBand = parse_enumerated(
        case_id,
        "claim_value_band",
        cell("claim_value_band"),
        Default::default(),
        str::parse,
        &mut malformed,
    );
    let attachments_present: bool = parse_enumerated(
        case_id,
        "attachments_present",
        cell("attachments_present"),
        false,
        parse_attachments_flag,
        &mut malformed,
    );
    let historical_outcome: HistoricalOutcome = parse_enumerated(
        case_id,
        "historical_outcome",
        cell("historical_outcome"),
        Default::default(),
        str::parse,
        &mut malformed,
    );

    let mut signals = RiskSignals::default();
    for signal in RiskSignal::ALL {
        let value: TriState = parse_enumerated(
            case_id,
            signal.field_name(),
            cell(signal.field_name()),
            TriState::Unknown,
            str::parse,
            &mut malformed,
        );
        signals.set(signal, value);
    }

    ParsedRow::Record(ClaimRecord {
        case_id: case_id.to_string(),
        client_segment,
        jurisdiction,
        service_line,
        claim_value_band,
        attachments_present,
        historical_outcome,
        signals,
        risk_summary: cell(RISK_SUMMARY)
            .map(normalize_cell)
            .unwrap_or_default()
            .to_string(),
        malformed_fields: malformed,
    })
}
