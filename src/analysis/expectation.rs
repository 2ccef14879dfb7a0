//! Expected detection behaviour for sources of known kind.

use super::rate::DetectionRate;

/// What a source is known to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// srandom output; every trial should be positive.
    Suspect,
    /// A sound generator; no trial should be positive.
    Sound,
}

impl Expectation {
    /// Checks a measured rate against the expectation.
    pub fn check(self, rate: &DetectionRate) -> Result<(), ExpectationViolation> {
        match self {
            Expectation::Suspect if rate.negative() > 0 => Err(ExpectationViolation::Missed {
                missed: rate.negative(),
                trials: rate.trials,
            }),
            Expectation::Sound if rate.positive > 0 => {
                Err(ExpectationViolation::FalsePositive {
                    positive: rate.positive,
                    trials: rate.trials,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Ways a measured rate can disagree with its expectation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpectationViolation {
    /// A suspect source produced negative trials.
    #[error("suspect source missed in {missed} of {trials} trials")]
    Missed {
        /// Negative trials.
        missed: u64,
        /// Trials run.
        trials: u64,
    },

    /// A sound source produced positive trials.
    #[error("sound source flagged in {positive} of {trials} trials")]
    FalsePositive {
        /// Positive trials.
        positive: u64,
        /// Trials run.
        trials: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ProbeId;

    fn rate(outcomes: &[Option<ProbeId>]) -> DetectionRate {
        let mut rate = DetectionRate::default();
        for &outcome in outcomes {
            rate.record(outcome);
        }
        rate
    }

    #[test]
    fn test_suspect_requires_every_trial() {
        let all = rate(&[Some(ProbeId::PooledEven), Some(ProbeId::PooledOdd)]);
        assert!(Expectation::Suspect.check(&all).is_ok());

        let one_missed = rate(&[Some(ProbeId::PooledEven), None]);
        assert_eq!(
            Expectation::Suspect.check(&one_missed),
            Err(ExpectationViolation::Missed { missed: 1, trials: 2 })
        );
    }

    #[test]
    fn test_sound_rejects_any_positive() {
        assert!(Expectation::Sound.check(&rate(&[None, None])).is_ok());
        assert!(matches!(
            Expectation::Sound.check(&rate(&[None, Some(ProbeId::DirectOdd)])),
            Err(ExpectationViolation::FalsePositive { positive: 1, .. })
        ));
    }
}
