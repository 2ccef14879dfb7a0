//! Single-trial detection rate over many draws.

use crate::detection::{Detector, ProbeId};
use crate::source::{EntropyError, EntropySource};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tally of single-trial outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionRate {
    /// Trials run.
    pub trials: u64,
    /// Trials where some probe matched.
    pub positive: u64,
    /// Matches per probe.
    pub by_probe: BTreeMap<ProbeId, u64>,
    /// True if the run stopped before the requested count.
    pub interrupted: bool,
}

impl DetectionRate {
    /// Records one trial.
    pub fn record(&mut self, probe: Option<ProbeId>) {
        self.trials += 1;
        if let Some(id) = probe {
            self.positive += 1;
            *self.by_probe.entry(id).or_insert(0) += 1;
        }
    }

    /// Fraction of positive trials; 0 when nothing ran.
    pub fn fraction(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.positive as f64 / self.trials as f64
    }

    /// Trials with no match.
    pub fn negative(&self) -> u64 {
        self.trials - self.positive
    }
}

/// Runs up to `runs` single trials against `source`.
///
/// Checks `stop` between trials and returns the partial tally, marked
/// interrupted, once it is set. Entropy failures abort the run.
pub fn measure<S: EntropySource + ?Sized>(
    detector: &Detector,
    source: &mut S,
    runs: u64,
    stop: &AtomicBool,
) -> Result<DetectionRate, EntropyError> {
    let mut rate = DetectionRate::default();

    for run in 0..runs {
        if stop.load(Ordering::Relaxed) {
            rate.interrupted = true;
            tracing::warn!(completed = run, requested = runs, "Simulation interrupted");
            break;
        }
        let index = u32::try_from(run).unwrap_or(u32::MAX);
        let outcome = detector.run_trial(source, index)?;
        rate.record(outcome.probe);
    }

    tracing::info!(
        source = source.name(),
        trials = rate.trials,
        positive = rate.positive,
        "Simulation finished"
    );
    Ok(rate)
}
