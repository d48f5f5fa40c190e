use std::time::{Duration, Instant};

use log::{debug, info};

use crate::picker::{picker_for, WordPicker};
use crate::policy::{apply_keystroke, is_complete, Keystroke, Tally};
use crate::render::{statuses, CharStatus};
use crate::schedule::Schedule;
use crate::session::{Phase, Session, SessionConfig};
use crate::util::accuracy;
use crate::vocabulary::Vocabulary;

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// A round of the game: the session record plus the timers that drive it
pub struct Game {
    vocabulary: Vocabulary,
    config: SessionConfig,
    picker: Box<dyn WordPicker>,
    session: Session,
    schedule: Schedule,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("vocabulary", &self.vocabulary.name())
            .field("config", &self.config)
            .field("session", &self.session)
            .field("schedule", &self.schedule)
            .finish()
    }
}

impl Game {
    pub fn new(vocabulary: Vocabulary, config: SessionConfig, picker: Box<dyn WordPicker>) -> Self {
        Self {
            session: Session::new(config.round_secs),
            vocabulary,
            config,
            picker,
            schedule: Schedule::default(),
        }
    }

    /// Builds the picker from `config.selection`
    pub fn with_config(vocabulary: Vocabulary, config: SessionConfig) -> Self {
        let picker = picker_for(config.selection);
        Self::new(vocabulary, config, picker)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn current_word(&self) -> &str {
        self.vocabulary.word(self.session.current_word_index)
    }

    pub fn statuses(&self) -> Vec<CharStatus> {
        statuses(self.current_word(), &self.session.input)
    }

    /// Only defined when the policy keeps a mistake counter
    pub fn accuracy(&self) -> Option<u32> {
        self.config
            .policy
            .counts_mistakes()
            .then(|| accuracy(self.session.score, self.session.mistakes))
    }

    pub fn is_advance_pending(&self) -> bool {
        self.schedule.has_pending_advance()
    }

    pub fn is_countdown_armed(&self) -> bool {
        self.schedule.is_countdown_armed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.schedule.next_deadline()
    }

    /// Swaps settings between rounds. Refused unless idle.
    pub fn reconfigure(&mut self, config: SessionConfig, picker: Box<dyn WordPicker>) -> bool {
        if self.session.phase != Phase::Idle {
            return false;
        }
        self.config = config;
        self.picker = picker;
        self.session = Session {
            generation: self.session.generation,
            ..Session::new(config.round_secs)
        };
        true
    }

    /// Begins a round from Idle or Over. A running round is left alone.
    pub fn start(&mut self, now: Instant) {
        if self.session.is_active() {
            debug!("start ignored: round already active");
            return;
        }

        self.schedule.cancel_all();
        let generation = self.session.generation.wrapping_add(1);
        self.session = Session {
            phase: Phase::Active,
            current_word_index: self.picker.first(self.vocabulary.len()),
            generation,
            ..Session::new(self.config.round_secs)
        };
        self.schedule.arm_countdown(now, COUNTDOWN_PERIOD);

        info!(
            "round started: {} words from '{}', policy {}, {}s",
            self.vocabulary.len(),
            self.vocabulary.name(),
            self.config.policy,
            self.config.round_secs
        );
    }

    pub fn restart(&mut self, now: Instant) {
        if self.session.phase == Phase::Over {
            self.start(now);
        }
    }

    /// Back to Idle from any phase with counters cleared
    pub fn reset(&mut self) {
        self.schedule.cancel_all();
        self.session = Session {
            generation: self.session.generation.wrapping_add(1),
            ..Session::new(self.config.round_secs)
        };
        info!("reset to idle");
    }

    /// One second of the countdown
    pub fn tick(&mut self) {
        if !self.session.is_active() {
            return;
        }

        self.session.remaining_secs = self.session.remaining_secs.saturating_sub(1);
        if self.session.remaining_secs == 0 {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.schedule.cancel_all();
        self.session.phase = Phase::Over;
        info!(
            "round over: score {}, mistakes {}",
            self.session.score, self.session.mistakes
        );
    }

    fn accepts_input(&self) -> bool {
        self.session.is_active() && !self.schedule.has_pending_advance()
    }

    /// Feeds a keystroke to the validator. `None` when input is not being taken.
    pub fn keystroke(&mut self, key: Keystroke, now: Instant) -> Option<Tally> {
        if !self.accepts_input() {
            return None;
        }

        let word = self.vocabulary.word(self.session.current_word_index);
        let tally = apply_keystroke(self.config.policy, word, &mut self.session.input, &key);
        if self.config.policy.counts_mistakes() {
            self.session.mistakes += tally.rejected;
        }
        debug!("{key:?} on '{word}' -> {tally:?}");

        if is_complete(word, &self.session.input) {
            self.complete(now);
        }

        Some(tally)
    }

    pub fn backspace(&mut self) {
        if self.accepts_input() {
            self.session.input.pop();
        }
    }

    /// Enter key. Only the lenient policy needs it: the trimmed buffer is compared to the word.
    pub fn submit(&mut self, now: Instant) {
        if !self.accepts_input() || !self.config.policy.stores_wrong_chars() {
            return;
        }
        if self.session.input.trim() == self.current_word() {
            self.complete(now);
        }
    }

    fn complete(&mut self, now: Instant) {
        let generation = self.session.generation;
        if self
            .schedule
            .defer_advance(now, self.config.advance_delay, generation)
        {
            self.session.score += 1;
            debug!("word '{}' complete, score {}", self.current_word(), self.session.score);
        }
    }

    /// Applies every timer that has come due by `now`.
    pub fn poll(&mut self, now: Instant) {
        for _ in 0..self.schedule.due_ticks(now) {
            self.tick();
            if !self.session.is_active() {
                return;
            }
        }

        if let Some(pending) = self.schedule.take_due_advance(now) {
            if pending.generation != self.session.generation || !self.session.is_active() {
                debug!("dropping stale advance for generation {}", pending.generation);
                return;
            }
            self.session.current_word_index = self
                .picker
                .next(self.session.current_word_index, self.vocabulary.len());
            self.session.input.clear();
            self.session.generation = self.session.generation.wrapping_add(1);
        }
    }
}
