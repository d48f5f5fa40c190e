use std::time::Duration;

use crate::picker::Selection;
use crate::policy::Policy;

pub const DEFAULT_ROUND_SECS: u32 = 30;
pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub round_secs: u32,
    pub advance_delay: Duration,
    pub policy: Policy,
    pub selection: Selection,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_secs: DEFAULT_ROUND_SECS,
            advance_delay: Duration::from_millis(DEFAULT_ADVANCE_DELAY_MS),
            policy: Policy::default(),
            selection: Selection::default(),
        }
    }
}

/// Coarse lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Active,
    Over,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub phase: Phase,
    pub current_word_index: usize,
    /// Validated input; a prefix of the current word unless the policy stores wrong chars
    pub input: String,
    pub score: u32,
    pub mistakes: u32,
    pub remaining_secs: u32,
    /// Bumped on start, reset and every word advance
    pub generation: u64,
}

impl Session {
    pub fn new(round_secs: u32) -> Self {
        Self {
            phase: Phase::Idle,
            current_word_index: 0,
            input: String::new(),
            score: 0,
            mistakes: 0,
            remaining_secs: round_secs,
            generation: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
}
