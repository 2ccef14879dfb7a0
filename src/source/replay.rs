//! Replay of a recorded word buffer.

use super::{EntropyError, EntropySource};

/// Hands out a fixed sequence of words, then fails.
///
/// Lets a check be repeated over exactly the same input.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    words: Vec<u32>,
    position: usize,
}

impl ReplaySource {
    /// Creates a replay of `words`.
    pub fn new(words: Vec<u32>) -> Self {
        Self { words, position: 0 }
    }

    /// Returns the number of words not yet handed out.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.position
    }
}

impl EntropySource for ReplaySource {
    fn fill(&mut self, words: &mut [u32]) -> Result<(), EntropyError> {
        let available = self.remaining();
        if words.len() > available {
            return Err(EntropyError::Exhausted {
                requested: words.len(),
                available,
            });
        }

        let end = self.position + words.len();
        words.copy_from_slice(&self.words[self.position..end]);
        self.position = end;
        Ok(())
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut source = ReplaySource::new(vec![1, 2, 3, 4, 5]);
        let mut words = [0u32; 2];

        source.fill(&mut words).unwrap();
        assert_eq!(words, [1, 2]);
        source.fill(&mut words).unwrap();
        assert_eq!(words, [3, 4]);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_short_replay_fails_without_consuming() {
        let mut source = ReplaySource::new(vec![1, 2, 3]);
        let mut words = [0u32; 4];

        assert_eq!(
            source.fill(&mut words),
            Err(EntropyError::Exhausted {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(source.remaining(), 3);
    }
}
