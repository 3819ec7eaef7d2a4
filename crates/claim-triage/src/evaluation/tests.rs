use super::*;
use chrono::{TimeZone, Utc};
use std::io::Cursor;

fn prediction(case_id: &str, priority: Priority, risk_score: f64) -> PredictionRow {
    PredictionRow {
        case_id: case_id.to_string(),
        priority,
        risk_score,
        recommended_action: RecommendedAction::ProceedWithStandardHandling,
        extracted_signals: "{}".to_string(),
        confidence: 90,
        rationale: format!("summary for {case_id}"),
    }
}

fn label(case_id: &str, priority: Priority, action: &str) -> GoldLabel {
    GoldLabel {
        case_id: case_id.to_string(),
        gold_priority: priority,
        gold_action: action.to_string(),
    }
}

fn gold(labels: Vec<GoldLabel>) -> GoldLabels {
    GoldLabels {
        labels,
        ..GoldLabels::default()
    }
}

const STANDARD: &str = "Proceed with standard handling";

#[test]
fn gold_loader_renames_and_validates_columns() {
    let csv = "case_id,expected_priority,expected_action,notes\n\
               C-1,P1,Route to legal review,x\n\
               C-2,urgent,Reject claim,y\n\
               C-1,P3,Reject claim,z\n";

    let loaded = GoldLabels::from_reader(Cursor::new(csv)).expect("gold");

    assert_eq!(
        loaded.labels,
        vec![label("C-1", Priority::P1, "Route to legal review")]
    );
    assert_eq!(loaded.rejected_rows, 1);
    assert_eq!(loaded.duplicate_rows, 1);
}

#[test]
fn gold_priority_and_action_both_match_exactly() {
    let csv = "case_id,expected_priority,expected_action\n\
               C-1,p1,Proceed with standard handling\n\
               C-2,P3,proceed with standard handling\n";
    let loaded = GoldLabels::from_reader(Cursor::new(csv)).expect("gold");
    assert_eq!(loaded.rejected_rows, 1);

    let predictions = vec![
        prediction("C-1", Priority::P1, 0.7),
        prediction("C-2", Priority::P3, 0.2),
    ];
    let result = EvaluationHarness::evaluate(&predictions, &loaded).expect("evaluate");

    assert_eq!(result.dataset_size, 1);
    assert_eq!(result.priority_accuracy, 1.0);
    assert_eq!(result.action_accuracy, 0.0);
    assert_eq!(result.failure_cases[0].kind, FailureKind::ActionOnly);
}

#[test]
fn gold_loader_reports_missing_columns() {
    let csv = "case_id,expected_priority\nC-1,P0\n";
    match GoldLabels::from_reader(Cursor::new(csv)) {
        Err(EvaluationError::IncompleteInputs { missing }) => {
            assert_eq!(missing, vec!["expected_action".to_string()]);
        }
        other => panic!("expected incomplete inputs, got {other:?}"),
    }
}

#[test]
fn accuracy_counts_exact_priority_matches() {
    let predictions: Vec<_> = (0..10)
        .map(|i| prediction(&format!("C-{i}"), Priority::P2, 0.5))
        .collect();
    let mut labels: Vec<_> = (0..10)
        .map(|i| label(&format!("C-{i}"), Priority::P2, STANDARD))
        .collect();
    labels[3].gold_priority = Priority::P0;
    labels[7].gold_priority = Priority::P3;

    let result = EvaluationHarness::evaluate(&predictions, &gold(labels)).expect("evaluate");

    assert_eq!(result.dataset_size, 10);
    assert!((result.priority_accuracy - 0.8).abs() < 1e-12);
    assert_eq!(result.action_accuracy, 1.0);
    assert_eq!(result.confusion.get(Priority::P0, Priority::P2), 1);
    assert_eq!(result.confusion.get(Priority::P3, Priority::P2), 1);
    assert_eq!(result.confusion.get(Priority::P2, Priority::P2), 8);
    assert_eq!(result.failure_count, 2);
    assert_eq!(result.failure_cases[0].kind, FailureKind::Underestimated);
    assert_eq!(result.failure_cases[1].kind, FailureKind::Overestimated);
}

#[test]
fn failures_are_sorted_by_score_with_stable_ties_and_capped() {
    let predictions: Vec<_> = (0..14)
        .map(|i| {
            let score = if i < 4 { 0.90 } else { 0.10 + i as f64 / 100.0 };
            prediction(&format!("C-{i}"), Priority::P3, score)
        })
        .collect();
    let labels: Vec<_> = (0..14)
        .map(|i| label(&format!("C-{i}"), Priority::P3, "Reject claim"))
        .collect();

    let result = EvaluationHarness::evaluate(&predictions, &gold(labels)).expect("evaluate");

    assert_eq!(result.failure_count, 14);
    assert_eq!(result.failure_cases.len(), FAILURE_SAMPLE_SIZE);
    let ids: Vec<_> = result
        .failure_cases
        .iter()
        .map(|case| case.case_id.as_str())
        .collect();
    assert_eq!(&ids[..5], &["C-0", "C-1", "C-2", "C-3", "C-13"]);
    assert!(result
        .failure_cases
        .iter()
        .all(|case| case.kind == FailureKind::ActionOnly));
}

#[test]
fn unmatched_rows_are_excluded_and_counted() {
    let predictions = vec![
        prediction("C-1", Priority::P1, 0.7),
        prediction("C-2", Priority::P3, 0.2),
    ];
    let mut labels = gold(vec![
        label("C-1", Priority::P1, STANDARD),
        label("C-99", Priority::P0, STANDARD),
    ]);
    labels.rejected_rows = 1;

    let result = EvaluationHarness::evaluate(&predictions, &labels).expect("evaluate");

    assert_eq!(result.dataset_size, 1);
    assert_eq!(result.priority_accuracy, 1.0);
    assert_eq!(result.coverage.predictions_without_gold, 1);
    assert_eq!(result.coverage.gold_without_prediction, 1);
    assert_eq!(result.coverage.rejected_gold_rows, 1);
    assert_eq!(result.coverage.excluded(), 3);
}

#[test]
fn disjoint_inputs_are_fatal() {
    let predictions = vec![prediction("C-1", Priority::P1, 0.7)];
    let labels = gold(vec![label("C-2", Priority::P1, STANDARD)]);

    match EvaluationHarness::evaluate(&predictions, &labels) {
        Err(EvaluationError::NoOverlap { predictions, gold }) => {
            assert_eq!((predictions, gold), (1, 1));
        }
        other => panic!("expected no overlap, got {other:?}"),
    }
}

#[test]
fn report_lists_sections_in_order() {
    let predictions = vec![
        prediction("C-1", Priority::P1, 0.7),
        prediction("C-2", Priority::P3, 0.2),
    ];
    let labels = gold(vec![
        label("C-1", Priority::P0, STANDARD),
        label("C-2", Priority::P3, STANDARD),
    ]);
    let result = EvaluationHarness::evaluate(&predictions, &labels).expect("evaluate");
    let generated_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let report = render_report(&result, generated_at);

    let headings = [
        "# Evaluation Report",
        "_Generated 2024-03-01 12:00:00 UTC_",
        "## Dataset",
        "## Join Coverage",
        "## Priority Metrics",
        "## Per-Class Metrics",
        "## Action Metrics",
        "## Priority Confusion Matrix",
        "## Representative Failure Cases",
    ];
    let mut cursor = 0;
    for heading in headings {
        let offset = report[cursor..]
            .find(heading)
            .unwrap_or_else(|| panic!("missing {heading}"));
        cursor += offset + heading.len();
    }

    assert!(report.contains("- Accuracy: 0.50"));
    assert!(report.contains("| | Pred_P0 | Pred_P1 | Pred_P2 | Pred_P3 |"));
    assert!(report.contains("| Actual_P0 | 0 | 1 | 0 | 0 |"));
    assert!(report.contains("### Case C-1"));
    assert!(report.contains("- Risk score: 0.70"));
    assert!(report.contains(FailureKind::Underestimated.commentary()));
    assert!(!report.contains("### Case C-2"));
    assert!(!report.contains("invalid expected priority"));
}

#[test]
fn report_notes_rejected_gold_rows_in_dataset_section() {
    let predictions = vec![prediction("C-1", Priority::P3, 0.2)];
    let mut labels = gold(vec![label("C-1", Priority::P3, STANDARD)]);
    labels.rejected_rows = 2;
    let result = EvaluationHarness::evaluate(&predictions, &labels).expect("evaluate");
    let generated_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let report = render_report(&result, generated_at);

    let dataset = report
        .split("## Join Coverage")
        .next()
        .expect("dataset section");
    assert!(dataset
        .contains("- Accuracy and F1 exclude 2 gold rows with an invalid expected priority"));
}
