//! Engine-wide configuration.

use pricer_core::{Real, Size};

/// Grid-sizing and runtime knobs for the orchestrator.
///
/// The `Default` impl matches the grid-sizing heuristics used when a
/// job doesn't override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Upper bound on the number of price-grid intervals, `J`.
    pub max_grid_points: Size,
    /// Lower bound on the number of time-grid intervals, `N`.
    pub min_time_steps: Size,
    /// Trading days per year, used to convert a day count to years.
    pub trading_days_per_year: Real,
    /// Worker threads for batch execution; `None` means "use available
    /// parallelism".
    pub worker_threads: Option<Size>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_grid_points: 10_000,
            min_time_steps: 20,
            trading_days_per_year: 252.0,
            worker_threads: None,
        }
    }
}
