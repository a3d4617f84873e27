//! Selection among interchangeable phrasings

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks which of `len` phrasings to use; `len` is always at least 1
pub trait PhraseChooser {
    fn choose(&mut self, len: usize) -> usize;
}

/// Uniform random choice
#[derive(Debug)]
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl PhraseChooser for RandomChooser {
    fn choose(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Always the same phrasing (clamped to the last one)
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedChooser(pub usize);

impl PhraseChooser for FixedChooser {
    fn choose(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Cycles through a scripted list of indices
#[derive(Clone, Debug)]
pub struct SequenceChooser {
    picks: Vec<usize>,
    cursor: usize,
}

impl SequenceChooser {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }
}

impl PhraseChooser for SequenceChooser {
    fn choose(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick.min(len.saturating_sub(1))
    }
}
