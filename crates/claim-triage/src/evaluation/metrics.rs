//! Classification metrics over the fixed P0..P3 label set.

use crate::triage::domain::Priority;
use serde::Serialize;

/// Rows are actual (gold) priority, columns are predicted priority, both P0..P3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    counts: [[usize; 4]; 4],
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: Priority, predicted: Priority) {
        self.counts[actual.index()][predicted.index()] += 1;
    }

    pub fn get(&self, actual: Priority, predicted: Priority) -> usize {
        self.counts[actual.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        Priority::ordered()
            .into_iter()
            .map(|priority| self.get(priority, priority))
            .sum()
    }

    fn actual_count(&self, priority: Priority) -> usize {
        self.counts[priority.index()].iter().sum()
    }

    fn predicted_count(&self, priority: Priority) -> usize {
        self.counts.iter().map(|row| row[priority.index()]).sum()
    }

    /// Precision, recall and F1 for one class. Empty denominators yield 0.
    pub fn class_metrics(&self, priority: Priority) -> ClassMetrics {
        let true_positives = self.get(priority, priority);
        let predicted = self.predicted_count(priority);
        let support = self.actual_count(priority);

        let precision = ratio(true_positives, predicted);
        let recall = ratio(true_positives, support);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        ClassMetrics {
            priority,
            precision,
            recall,
            f1,
            support,
        }
    }

    pub fn per_class(&self) -> Vec<ClassMetrics> {
        Priority::ordered()
            .into_iter()
            .map(|priority| self.class_metrics(priority))
            .collect()
    }

    /// Unweighted mean of per-class F1; absent classes contribute zero.
    pub fn macro_f1(&self) -> f64 {
        let classes = self.per_class();
        classes.iter().map(|class| class.f1).sum::<f64>() / classes.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub priority: Priority,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
