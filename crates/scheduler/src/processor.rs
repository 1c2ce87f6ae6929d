//! The worker pool that drains a batch of jobs in parallel and streams
//! results back through a caller-supplied callback.

use crate::job::{JobIdentity, OptionJobResult};
use crate::queue::JobQueue;
use pricer_core::errors::Error;
use pricer_engine::EngineConfig;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Summary of one batch run: how many jobs were priced, how many were
/// skipped (and why), and whether the callback itself ever failed.
#[derive(Debug)]
pub struct BatchReport {
    /// Number of jobs submitted to this batch.
    pub total: usize,
    /// Number of jobs priced successfully.
    pub succeeded: usize,
    /// Jobs that failed to price, with the error each one hit.
    pub skipped: Vec<(JobIdentity, Error)>,
    /// The first callback failure encountered, if any.
    pub callback_error: Option<Error>,
}

/// A parallel worker pool that drains a batch of [`OptionJob`]s.
pub struct JobQueueProcessor {
    pool: rayon::ThreadPool,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "callback panicked with a non-string payload".to_string()
    }
}

impl JobQueueProcessor {
    /// Builds a worker pool sized by `config.worker_threads`, or by
    /// rayon's default (available parallelism) when unset.
    pub fn new(config: &EngineConfig) -> Result<Self, Error> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = config.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::Runtime(format!("failed to build worker pool: {e}")))?;
        Ok(JobQueueProcessor { pool })
    }

    /// Drains `queue` and prices every job it held in parallel, invoking
    /// `callback` once for each job that priced successfully. A job that
    /// fails to price is silently skipped — recorded in the returned
    /// report and covered by the aggregated `warn!` below, but never
    /// delivered to `callback`. Calls into `callback` are serialized
    /// against each other so the caller never has to synchronize itself;
    /// a panic inside `callback` is caught, logged, and does not stop the
    /// rest of the batch from being priced.
    ///
    /// Returns only after every drained job has either produced a
    /// result or been marked skipped. Jobs submitted to `queue` after
    /// this call starts draining it are left for the next batch.
    pub fn run_batch<F>(&self, queue: &JobQueue, config: &EngineConfig, callback: F) -> BatchReport
    where
        F: Fn(OptionJobResult) + Send + Sync,
    {
        let jobs = queue.drain();
        let total = jobs.len();
        let started = Instant::now();
        let succeeded = AtomicUsize::new(0);
        let skipped: Mutex<Vec<(JobIdentity, Error)>> = Mutex::new(Vec::new());
        let callback_error: Mutex<Option<Error>> = Mutex::new(None);
        let callback_lock = Mutex::new(());

        self.pool.install(|| {
            jobs.into_par_iter().for_each(|job| {
                let identity = job.identity();
                debug!(ticker = identity.ticker(), "pricing job");

                let result = match pricer_engine::orchestrator::solve(&job.to_request(), config) {
                    Ok(price) => {
                        succeeded.fetch_add(1, Ordering::Relaxed);
                        Some(OptionJobResult {
                            identity: identity.clone(),
                            spot: job.spot(),
                            current_option_price: job.current_option_price(),
                            fair_value: price,
                        })
                    }
                    Err(e) => {
                        warn!(ticker = identity.ticker(), error = %e, "job skipped");
                        skipped.lock().unwrap().push((identity.clone(), e));
                        None
                    }
                };

                let Some(result) = result else { return };

                let _guard = callback_lock.lock().unwrap();
                if let Err(panic) = catch_unwind(AssertUnwindSafe(|| callback(result))) {
                    let panic_text = panic_message(panic.as_ref());
                    error!(
                        ticker = identity.ticker(),
                        panic_message = panic_text.as_str(),
                        "callback panicked"
                    );
                    let mut guard = callback_error.lock().unwrap();
                    if guard.is_none() {
                        *guard = Some(Error::CallbackFailure(panic_text));
                    }
                }
            });
        });

        let skipped = skipped.into_inner().unwrap();
        if !skipped.is_empty() {
            warn!(
                skipped = skipped.len(),
                total, "batch completed with skipped jobs"
            );
        }
        info!(
            total,
            succeeded = succeeded.load(Ordering::Relaxed),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch completed"
        );

        BatchReport {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            skipped,
            callback_error: callback_error.into_inner().unwrap(),
        }
    }
}
