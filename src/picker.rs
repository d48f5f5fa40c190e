use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Order in which words are drawn from the vocabulary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Selection {
    Sequential,
    #[default]
    Random,
}

impl Selection {
    pub fn toggled(self) -> Self {
        match self {
            Selection::Sequential => Selection::Random,
            Selection::Random => Selection::Sequential,
        }
    }
}

/// Strategy for choosing word indices. `len` is always at least 1.
pub trait WordPicker: Send {
    /// Index of the first word of a round
    fn first(&mut self, len: usize) -> usize;
    /// Index of the word that follows `current`
    fn next(&mut self, current: usize, len: usize) -> usize;
}

/// Walks the vocabulary in order and wraps
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialPicker;

impl WordPicker for SequentialPicker {
    fn first(&mut self, _len: usize) -> usize {
        0
    }

    fn next(&mut self, current: usize, len: usize) -> usize {
        (current + 1) % len
    }
}

/// Uniform choice that never repeats the current word when there is another one
#[derive(Debug, Clone)]
pub struct RandomPicker<R: Rng = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> WordPicker for RandomPicker<R> {
    fn first(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn next(&mut self, current: usize, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        // draw from the other len - 1 slots, skipping over `current`
        let pick = self.rng.gen_range(0..len - 1);
        if pick >= current {
            pick + 1
        } else {
            pick
        }
    }
}

pub fn picker_for(selection: Selection) -> Box<dyn WordPicker> {
    match selection {
        Selection::Sequential => Box::new(SequentialPicker),
        Selection::Random => Box::new(RandomPicker::from_entropy()),
    }
}
