//! Trial and multi-trial check orchestration.

use super::buffer::EntropyBuffer;
use super::config::DetectorConfig;
use super::probe::{ProbeMatch, PROBES};
use super::report::{Report, TrialOutcome};
use crate::source::{EntropyError, EntropySource};

/// Runs every probe over `buffer` and returns the first that matches,
/// with the generator state it recovered.
///
/// A pure function of the buffer: the same words always give the same
/// answer.
pub fn analyze(buffer: &EntropyBuffer) -> Option<ProbeMatch> {
    PROBES.iter().find_map(|probe| {
        probe.recover(buffer).map(|state| ProbeMatch {
            probe: probe.id(),
            state,
        })
    })
}

/// Fingerprints srandom output in an entropy source.
///
/// Holds configuration only; no state survives from one trial to the
/// next.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Creates a detector with the given configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Draws one buffer and analyses it.
    pub fn run_trial<S: EntropySource + ?Sized>(
        &self,
        source: &mut S,
        index: u32,
    ) -> Result<TrialOutcome, EntropyError> {
        let buffer = EntropyBuffer::draw(source).map_err(|e| {
            tracing::warn!(source = source.name(), trial = index, error = %e, "Entropy draw failed");
            e
        })?;
        let found = analyze(&buffer);

        tracing::debug!(
            source = source.name(),
            trial = index,
            probe = ?found.map(|m| m.probe),
            "Trial finished"
        );
        Ok(TrialOutcome {
            index,
            probe: found.map(|m| m.probe),
            state: found.map(|m| m.state),
        })
    }

    /// Runs the configured number of trials, each on a fresh draw.
    ///
    /// Every trial runs even after a negative one, so each check consumes
    /// the same amount of entropy. The report marks detection only when
    /// all trials are positive.
    pub fn check<S: EntropySource + ?Sized>(&self, source: &mut S) -> Result<Report, EntropyError> {
        let trials = (0..self.config.trials)
            .map(|index| self.run_trial(source, index))
            .collect::<Result<Vec<_>, _>>()?;

        let report = Report::new(source.name(), trials);
        tracing::info!(
            source = %report.source,
            positive = report.positive_trials(),
            trials = report.trials.len(),
            detected = report.detected,
            "Check finished"
        );
        Ok(report)
    }

    /// Returns true if `source` looks like srandom.
    pub fn detect<S: EntropySource + ?Sized>(&self, source: &mut S) -> Result<bool, EntropyError> {
        Ok(self.check(source)?.detected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::buffer::RAW_WORDS;
    use crate::detection::probe::ProbeId;
    use crate::simulation::{Layout, SrandomSource};
    use crate::source::{ReplaySource, RngSource};

    #[test]
    fn test_sound_source_not_detected() {
        let detector = Detector::default();
        let mut source = RngSource::chacha(2024);

        for _ in 0..50 {
            assert!(!detector.detect(&mut source).unwrap());
        }
    }

    #[test]
    fn test_os_source_not_detected() {
        let detector = Detector::default();
        assert!(!detector.detect(&mut RngSource::os()).unwrap());
    }

    #[test]
    fn test_srandom_norm_detected() {
        let detector = Detector::default();
        let mut source = SrandomSource::from_seed(Layout::Norm, 11);

        let report = detector.check(&mut source).unwrap();
        assert!(report.detected);
        assert_eq!(report.trials.len(), 4);
        assert!(report.trials.iter().all(|t| matches!(
            t.probe,
            Some(ProbeId::PooledEven | ProbeId::PooledOdd)
        )));
    }

    #[test]
    fn test_srandom_uhs_detected() {
        let detector = Detector::default();
        let mut source = SrandomSource::from_seed(Layout::Uhs, 12);

        let report = detector.check(&mut source).unwrap();
        assert!(report.detected);
        assert!(report.trials.iter().all(|t| matches!(
            t.probe,
            Some(ProbeId::DirectEven | ProbeId::DirectOdd)
        )));
    }

    #[test]
    fn test_replayed_check_is_deterministic() {
        // two srandom reads followed by two sound ones
        let mut words = vec![0u32; RAW_WORDS * 4];
        let mut suspect = SrandomSource::from_seed(Layout::Norm, 5);
        let mut sound = RngSource::chacha(5);
        for (i, chunk) in words.chunks_mut(RAW_WORDS).enumerate() {
            if i < 2 {
                suspect.fill(chunk).unwrap();
            } else {
                sound.fill(chunk).unwrap();
            }
        }

        let detector = Detector::default();
        let first = detector.check(&mut ReplaySource::new(words.clone())).unwrap();
        let second = detector.check(&mut ReplaySource::new(words)).unwrap();

        assert_eq!(first.trials, second.trials);
        assert_eq!(first.detected, second.detected);
        assert!(!first.detected);
        assert_eq!(first.positive_trials(), 2);
    }

    #[test]
    fn test_entropy_failure_propagates() {
        let detector = Detector::default();
        let mut source = ReplaySource::new(vec![0; RAW_WORDS * 3]);

        assert!(matches!(
            detector.check(&mut source),
            Err(EntropyError::Exhausted { .. })
        ));
    }

    #[test]
    fn test_single_trial_config() {
        let detector = Detector::new(DetectorConfig::with_trials(1));
        let mut source = SrandomSource::from_seed(Layout::Norm, 3);

        let report = detector.check(&mut source).unwrap();
        assert_eq!(report.trials.len(), 1);
        assert!(report.detected);
    }
}
