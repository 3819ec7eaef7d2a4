use super::domain::{ClaimRecord, Priority};
use super::engine::{RiskAssessment, RiskEngine};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("no claim records to assess")]
    EmptyInput,
    #[error("failed to start assessment worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Fans claim records out to the engine and collects one assessment per record.
pub struct AssessmentAssembler {
    engine: RiskEngine,
    pool: Option<rayon::ThreadPool>,
}

impl AssessmentAssembler {
    /// Runs on the global rayon pool.
    pub fn new(engine: RiskEngine) -> Self {
        Self { engine, pool: None }
    }

    pub fn with_workers(engine: RiskEngine, workers: usize) -> Result<Self, AssemblyError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("triage-worker-{index}"))
            .build()?;
        Ok(Self {
            engine,
            pool: Some(pool),
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool
            .as_ref()
            .map(rayon::ThreadPool::current_num_threads)
            .unwrap_or_else(rayon::current_num_threads)
    }

    /// Assesses every record; output order follows input order.
    pub fn assemble(&self, records: &[ClaimRecord]) -> Result<AssessmentBatch, AssemblyError> {
        if records.is_empty() {
            return Err(AssemblyError::EmptyInput);
        }

        info!(
            rows = records.len(),
            workers = self.worker_count(),
            "assessing claim records"
        );

        let run = || -> Vec<RiskAssessment> {
            records
                .par_iter()
                .map(|record| self.engine.assess(record))
                .collect()
        };
        let assessments = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let batch = AssessmentBatch::new(assessments);
        if batch.fallback_count > 0 {
            warn!(
                fallback_fields = batch.fallback_count,
                "claims scored with fallback weights for unrecognized values"
            );
        }
        info!(
            rows = batch.assessments.len(),
            p0 = batch.count(Priority::P0),
            p1 = batch.count(Priority::P1),
            p2 = batch.count(Priority::P2),
            p3 = batch.count(Priority::P3),
            "claim assessment complete"
        );

        Ok(batch)
    }
}

/// Assessments for one run plus batch-level counters.
#[derive(Debug, Clone)]
pub struct AssessmentBatch {
    pub assessments: Vec<RiskAssessment>,
    /// Fields across the batch scored with their `Unknown` fallback.
    pub fallback_count: usize,
    pub priority_counts: BTreeMap<Priority, usize>,
}

impl AssessmentBatch {
    fn new(assessments: Vec<RiskAssessment>) -> Self {
        let mut priority_counts: BTreeMap<Priority, usize> =
            Priority::ordered().into_iter().map(|p| (p, 0)).collect();
        let mut fallback_count = 0;
        for assessment in &assessments {
            *priority_counts.entry(assessment.priority).or_insert(0) += 1;
            fallback_count += assessment.fallback_fields;
        }

        Self {
            assessments,
            fallback_count,
            priority_counts,
        }
    }

    pub fn count(&self, priority: Priority) -> usize {
        self.priority_counts.get(&priority).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}
