//! Trial outcomes and the combined report.

use super::probe::ProbeId;
use crate::splitmix::GeneratorState;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialOutcome {
    /// Zero-based trial number within the check.
    pub index: u32,
    /// First probe that matched, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeId>,
    /// Generator state the matching probe recovered, as of the end of the
    /// trial's draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<GeneratorState>,
}

impl TrialOutcome {
    /// Returns true if a probe matched.
    pub fn is_positive(&self) -> bool {
        self.probe.is_some()
    }
}

/// Combined result of a multi-trial check.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// When the check finished.
    pub checked_at: DateTime<Utc>,
    /// Label of the entropy source.
    pub source: String,
    /// True only if every trial was positive.
    pub detected: bool,
    /// Per-trial outcomes, in order.
    pub trials: Vec<TrialOutcome>,
}

impl Report {
    /// Builds a report; detection requires at least one trial and no
    /// negative ones.
    pub fn new(source: impl Into<String>, trials: Vec<TrialOutcome>) -> Self {
        let detected = !trials.is_empty() && trials.iter().all(TrialOutcome::is_positive);
        Self {
            checked_at: Utc::now(),
            source: source.into(),
            detected,
            trials,
        }
    }

    /// Number of positive trials.
    pub fn positive_trials(&self) -> usize {
        self.trials.iter().filter(|t| t.is_positive()).count()
    }

    /// One-line human verdict.
    pub fn verdict_line(&self) -> &'static str {
        if self.detected {
            "BAD: srandom PRNG detected"
        } else {
            "GOOD: srandom PRNG *NOT* detected"
        }
    }

    /// Renders the report as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(index: u32, probe: Option<ProbeId>) -> TrialOutcome {
        TrialOutcome {
            index,
            probe,
            state: None,
        }
    }

    #[test]
    fn test_all_positive_is_detected() {
        let report = Report::new(
            "test",
            vec![
                outcome(0, Some(ProbeId::PooledEven)),
                outcome(1, Some(ProbeId::PooledOdd)),
            ],
        );
        assert!(report.detected);
        assert_eq!(report.positive_trials(), 2);
        assert_eq!(report.verdict_line(), "BAD: srandom PRNG detected");
    }

    #[test]
    fn test_one_negative_is_not_detected() {
        let report = Report::new(
            "test",
            vec![outcome(0, Some(ProbeId::DirectEven)), outcome(1, None)],
        );
        assert!(!report.detected);
        assert_eq!(report.positive_trials(), 1);
    }

    #[test]
    fn test_no_trials_is_not_detected() {
        assert!(!Report::new("test", Vec::new()).detected);
    }

    #[test]
    fn test_toml_rendering() {
        let report = Report::new(
            "os",
            vec![outcome(0, None), outcome(1, Some(ProbeId::DirectOdd))],
        );
        let text = report.to_toml().unwrap();

        assert!(text.contains("source = \"os\""));
        assert!(text.contains("detected = false"));
        assert!(text.contains("probe = \"direct-odd\""));
        assert!(!text.contains("state ="));
    }

    #[test]
    fn test_toml_includes_recovered_state() {
        let report = Report::new(
            "srandom-uhs",
            vec![TrialOutcome {
                index: 0,
                probe: Some(ProbeId::DirectEven),
                state: Some(GeneratorState::from(0x0123_4567_89ab_cdefu64)),
            }],
        );
        let text = report.to_toml().unwrap();

        assert!(text.contains("state = \"0x0123456789abcdef\""));
    }
}
