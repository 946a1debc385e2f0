use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use stockcast_core::EntityRef;

use crate::job::ForecastJob;
use crate::result::ForecastError;

/// Result of one job in a batch.
#[derive(Debug)]
pub struct JobOutcome<T> {
    pub entity: EntityRef,
    pub result: Result<T, ForecastError>,
}

impl<T> JobOutcome<T> {
    pub fn ok(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }
}

/// Runs forecasting jobs in-process.
///
/// Jobs share no mutable state, so a batch is spread across the rayon pool
/// without locking. A failing job is logged and reported in its outcome; it
/// never affects the others.
#[derive(Debug, Copy, Clone, Default)]
pub struct LocalScheduler;

impl LocalScheduler {
    pub fn new() -> Self {
        Self
    }

    pub fn run<J: ForecastJob>(&self, job: &J) -> JobOutcome<J::Output> {
        let entity = job.entity();
        let result = job.run();
        if let Err(e) = &result {
            warn!(entity = %entity, error = %e, "forecast job failed");
        }
        JobOutcome { entity, result }
    }

    /// Runs every job; outcomes come back in input order.
    pub fn run_all<J: ForecastJob>(&self, jobs: &[J]) -> Vec<JobOutcome<J::Output>> {
        let started = Instant::now();
        info!(jobs = jobs.len(), "forecast batch started");

        let outcomes: Vec<_> = jobs.par_iter().map(|job| self.run(job)).collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            jobs = jobs.len(),
            failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "forecast batch finished"
        );
        outcomes
    }

    /// Like [`LocalScheduler::run_all`], dropping failed jobs.
    pub fn collect_ok<J: ForecastJob>(&self, jobs: &[J]) -> Vec<J::Output> {
        self.run_all(jobs)
            .into_iter()
            .filter_map(|o| o.result.ok())
            .collect()
    }
}
