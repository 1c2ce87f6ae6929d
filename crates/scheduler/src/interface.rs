//! The producer-facing facade: `submit` / `pending` / `process`, wiring
//! together a [`JobQueue`] and a [`JobQueueProcessor`] under one
//! configuration.

use crate::job::{OptionJob, OptionJobResult};
use crate::processor::{BatchReport, JobQueueProcessor};
use crate::queue::JobQueue;
use pricer_core::errors::Error;
use pricer_engine::EngineConfig;

/// Owns a job queue and its worker pool; the thing an external polling
/// loop holds onto.
pub struct Scheduler {
    queue: JobQueue,
    processor: JobQueueProcessor,
    config: EngineConfig,
}

impl Scheduler {
    /// Builds a scheduler with an empty queue and a worker pool sized
    /// per `config.worker_threads`.
    pub fn new(config: EngineConfig) -> Result<Self, Error> {
        let processor = JobQueueProcessor::new(&config)?;
        Ok(Scheduler {
            queue: JobQueue::new(),
            processor,
            config,
        })
    }

    /// Submits a job, replacing any existing job with the same
    /// identity.
    pub fn submit(&self, job: OptionJob) {
        self.queue.add_or_replace(job);
    }

    /// Number of jobs currently queued.
    pub fn pending(&self) -> usize {
        self.queue.size()
    }

    /// Drains the queue and prices every job in parallel, invoking
    /// `callback` once for each job that priced successfully. A job that
    /// fails to price is skipped silently, reported only through the
    /// returned [`BatchReport`] and an aggregated log line.
    pub fn process<F>(&self, callback: F) -> BatchReport
    where
        F: Fn(OptionJobResult) + Send + Sync,
    {
        self.processor.run_batch(&self.queue, &self.config, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_engine::OptionKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn submit_pending_and_process_round_trip() {
        let scheduler = Scheduler::new(EngineConfig::default()).unwrap();
        assert_eq!(scheduler.pending(), 0);

        scheduler.submit(
            OptionJob::new(
                "AAPL",
                OptionKind::AmericanCall,
                150.0,
                0.25,
                150.0,
                12.0,
                0.05,
                0.2,
                0.0,
            )
            .unwrap(),
        );
        scheduler.submit(
            OptionJob::new(
                "AAPL",
                OptionKind::AmericanCall,
                150.0,
                0.25,
                150.0,
                12.0,
                0.05,
                0.2,
                0.0,
            )
            .unwrap(),
        );
        scheduler.submit(
            OptionJob::new(
                "GOOG",
                OptionKind::AmericanPut,
                140.0,
                0.5,
                135.0,
                7.5,
                0.04,
                0.22,
                0.0,
            )
            .unwrap(),
        );
        assert_eq!(scheduler.pending(), 2);

        let seen = AtomicUsize::new(0);
        let report = scheduler.process(|_result| {
            seen.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(report.total, 2);
        assert_eq!(seen.load(Ordering::Relaxed), 2);
        assert_eq!(scheduler.pending(), 0);
    }
}
