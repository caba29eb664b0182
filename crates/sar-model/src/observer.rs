//! Progress reporting for long-running model computations.

use sar_core::{EpochMs, LpiId};

/// Callbacks invoked by [`StraightLineModel::run`][crate::StraightLineModel::run].
///
/// Every method defaults to a no-op.  The model never inspects anything a
/// sink does, so implementations may forward to a UI, a log, or nowhere.
///
/// ```rust,ignore
/// struct Percent { total: usize }
///
/// impl ProgressSink for Percent {
///     fn on_step(&mut self, _t: EpochMs, active: usize) {
///         println!("{:.0}% done", 100.0 * (1.0 - active as f64 / self.total as f64));
///     }
/// }
/// ```
pub trait ProgressSink {
    /// Before the first step.
    fn on_start(&mut self, _lpi_id: LpiId, _paths: usize) {}

    /// After every simulation step.  `active` counts paths not yet finished.
    fn on_step(&mut self, _t: EpochMs, _active: usize) {}

    /// A human-readable status line.
    fn status(&mut self, _message: &str) {}

    /// After the output series has been assembled.
    fn on_finish(&mut self, _lpi_id: LpiId, _distributions: usize) {}
}

/// Discards everything.
pub struct NoopProgress;

impl ProgressSink for NoopProgress {}

/// Forwards status lines and start / finish events to the `log` facade.
#[derive(Default)]
pub struct LogProgress {
    steps: u64,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl ProgressSink for LogProgress {
    fn on_start(&mut self, lpi_id: LpiId, paths: usize) {
        log::info!("{lpi_id}: simulating {paths} sample paths");
    }

    fn on_step(&mut self, t: EpochMs, active: usize) {
        self.steps += 1;
        log::trace!("step at {t}: {active} paths active");
    }

    fn status(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn on_finish(&mut self, lpi_id: LpiId, distributions: usize) {
        log::info!("{lpi_id}: {distributions} hourly distributions after {} steps", self.steps);
    }
}
