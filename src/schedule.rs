//! Deadline-based timers owned by a game.
//!
//! Nothing here runs on its own: the event loop polls with the current
//! [`Instant`] and the game applies whatever has come due. Cancelling is
//! dropping the slot, so a disarmed timer can never fire late.

use std::time::{Duration, Instant};

/// Recurring task that comes due once per `period`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    period: Duration,
    next_due: Instant,
}

impl Countdown {
    pub fn arm(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of whole periods elapsed since the last call, advancing the deadline.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while self.next_due <= now {
            self.next_due += self.period;
            due += 1;
        }
        due
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// Deferred "show the next word" action, tagged with the session generation it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub due: Instant,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct Schedule {
    countdown: Option<Countdown>,
    advance: Option<PendingAdvance>,
}

impl Schedule {
    pub fn arm_countdown(&mut self, now: Instant, period: Duration) {
        self.countdown = Some(Countdown::arm(now, period));
    }

    pub fn is_countdown_armed(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        self.countdown.as_mut().map_or(0, |c| c.take_due(now))
    }

    /// Fills the advance slot. Returns false, leaving the slot untouched, if it is already taken.
    pub fn defer_advance(&mut self, now: Instant, delay: Duration, generation: u64) -> bool {
        if self.advance.is_some() {
            return false;
        }
        self.advance = Some(PendingAdvance {
            due: now + delay,
            generation,
        });
        true
    }

    pub fn has_pending_advance(&self) -> bool {
        self.advance.is_some()
    }

    /// Empties the slot if its deadline has passed and hands back what was in it.
    pub fn take_due_advance(&mut self, now: Instant) -> Option<PendingAdvance> {
        match self.advance {
            Some(pending) if pending.due <= now => self.advance.take(),
            _ => None,
        }
    }

    pub fn cancel_all(&mut self) {
        self.countdown = None;
        self.advance = None;
    }

    /// Earliest instant at which polling would change something
    pub fn next_deadline(&self) -> Option<Instant> {
        let countdown = self.countdown.map(|c| c.next_due());
        let advance = self.advance.map(|a| a.due);
        match (countdown, advance) {
            (Some(c), Some(a)) => Some(c.min(a)),
            (c, a) => c.or(a),
        }
    }
}
