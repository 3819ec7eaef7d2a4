mod common;

use claim_triage::evaluation::{EvaluationError, EvaluationHarness, EVAL_REPORT_FILE};
use claim_triage::triage::{
    read_predictions_from_path, AssessmentAssembler, ClaimRecordImporter, PredictionRow,
    PredictionWriter, Priority, RiskEngine,
};
use common::{claims_csv, write_file, ClaimRow};
use std::path::{Path, PathBuf};

/// Runs ten claims through the engine and returns the predictions path.
fn predict_ten(dir: &Path) -> PathBuf {
    let rows: Vec<_> = (0..10)
        .map(|i| {
            let case_id = format!("E-{i}");
            match i % 3 {
                0 => ClaimRow::critical(&case_id),
                1 => ClaimRow::quiet(&case_id),
                _ => ClaimRow::quiet(&case_id)
                    .with("service_line", "Insurance")
                    .with("claim_value_band", "50k-250k")
                    .with("severe_legal_or_regulatory_risk", "Yes"),
            }
        })
        .collect();
    let input = write_file(dir, "claims.csv", &claims_csv(&rows));

    let imported = ClaimRecordImporter::from_path(input).expect("import");
    let batch = AssessmentAssembler::new(RiskEngine::default())
        .assemble(&imported.records)
        .expect("assemble");
    PredictionWriter::write_to_dir(dir, &batch.assessments).expect("write predictions")
}

fn other_priority(priority: Priority) -> Priority {
    if priority == Priority::P0 {
        Priority::P3
    } else {
        Priority::P0
    }
}

fn gold_csv<'a>(rows: impl IntoIterator<Item = (&'a str, Priority, &'a str)>) -> String {
    let mut out = String::from("case_id,expected_priority,expected_action\n");
    for (case_id, priority, action) in rows {
        out.push_str(&format!("{case_id},{priority},{action}\n"));
    }
    out
}

fn agreeing_gold(predictions: &[PredictionRow]) -> Vec<(&str, Priority, &str)> {
    predictions
        .iter()
        .map(|row| {
            (
                row.case_id.as_str(),
                row.priority,
                row.recommended_action.label(),
            )
        })
        .collect()
}

#[test]
fn eight_of_ten_priority_matches_score_eighty_percent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let predictions_path = predict_ten(dir.path());
    let predictions = read_predictions_from_path(&predictions_path).expect("read predictions");

    let mut gold = agreeing_gold(&predictions);
    for index in [2, 7] {
        gold[index].1 = other_priority(gold[index].1);
    }
    let gold_path = write_file(dir.path(), "gold.csv", &gold_csv(gold.clone()));

    let (result, report_path) =
        EvaluationHarness::run(&predictions_path, &gold_path, dir.path()).expect("evaluate");

    assert_eq!(result.dataset_size, 10);
    assert!((result.priority_accuracy - 0.8).abs() < 1e-12);
    assert_eq!(result.action_accuracy, 1.0);
    assert_eq!(result.failure_count, 2);
    for index in [2, 7] {
        let predicted = predictions[index].priority;
        assert_eq!(result.confusion.get(gold[index].1, predicted), 1);
    }

    let failing: Vec<_> = result
        .failure_cases
        .iter()
        .map(|case| case.case_id.as_str())
        .collect();
    assert_eq!(failing.len(), 2);
    assert!(failing.contains(&"E-2") && failing.contains(&"E-7"));
    assert!(result.failure_cases[0].risk_score >= result.failure_cases[1].risk_score);

    assert_eq!(report_path, dir.path().join(EVAL_REPORT_FILE));
    let report = std::fs::read_to_string(report_path).expect("report");
    assert!(report.contains("- Total evaluated cases: 10"));
    assert!(report.contains("- Accuracy: 0.80"));
    assert!(report.contains("### Case E-2"));
    assert!(report.contains("### Case E-7"));
}

#[test]
fn unmatched_case_ids_are_excluded_and_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let predictions_path = predict_ten(dir.path());
    let predictions = read_predictions_from_path(&predictions_path).expect("read predictions");

    let mut gold = agreeing_gold(&predictions);
    gold.remove(4);
    gold.push(("G-404", Priority::P1, "Route to legal review"));
    let mut csv = gold_csv(gold);
    csv.push_str("G-500,urgent,Reject claim\n");
    let gold_path = write_file(dir.path(), "gold.csv", &csv);

    let (result, report_path) =
        EvaluationHarness::run(&predictions_path, &gold_path, dir.path()).expect("evaluate");

    assert_eq!(result.dataset_size, 9);
    assert_eq!(result.priority_accuracy, 1.0);
    assert_eq!(result.failure_count, 0);
    assert_eq!(result.coverage.predictions_without_gold, 1);
    assert_eq!(result.coverage.gold_without_prediction, 1);
    assert_eq!(result.coverage.rejected_gold_rows, 1);

    let report = std::fs::read_to_string(report_path).expect("report");
    assert!(report.contains("## Join Coverage"));
    assert!(report.contains("- Predictions without gold label: 1"));
    assert!(report.contains("- Gold labels without prediction: 1"));
    assert!(report.contains("- Rejected gold rows (invalid priority): 1"));
}

#[test]
fn incomplete_gold_file_fails_without_touching_predictions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let predictions_path = predict_ten(dir.path());
    let before = std::fs::read_to_string(&predictions_path).expect("predictions");
    let gold_path = write_file(dir.path(), "gold.csv", "case_id,expected_priority\nE-1,P3\n");

    match EvaluationHarness::run(&predictions_path, &gold_path, dir.path()) {
        Err(EvaluationError::IncompleteInputs { missing }) => {
            assert_eq!(missing, vec!["expected_action".to_string()]);
        }
        other => panic!("expected incomplete inputs, got {other:?}"),
    }

    assert!(!dir.path().join(EVAL_REPORT_FILE).exists());
    let after = std::fs::read_to_string(&predictions_path).expect("predictions");
    assert_eq!(before, after);
}

#[test]
fn disjoint_gold_labels_are_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let predictions_path = predict_ten(dir.path());
    let gold_path = write_file(
        dir.path(),
        "gold.csv",
        &gold_csv([("Z-1", Priority::P2, "Reject claim")]),
    );

    let result = EvaluationHarness::run(&predictions_path, &gold_path, dir.path());
    assert!(matches!(
        result,
        Err(EvaluationError::NoOverlap {
            predictions: 10,
            gold: 1
        })
    ));
}
