use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    /// Bracketed paste: text committed in one piece
    Paste(String),
    Resize,
    Tick,
    /// The event source is gone; nothing more will arrive
    Closed,
}

/// Source of terminal events (keyboard, paste, resize)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Events delivered over an mpsc channel, either by the crossterm reader
/// thread or by hand in tests
pub struct ChannelEventSource {
    rx: Receiver<GameEvent>,
}

impl ChannelEventSource {
    pub fn from_receiver(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }

    /// Spawns a thread forwarding crossterm events. When reading fails the
    /// thread exits and drops the sender, which the runner reports as `Closed`.
    pub fn crossterm() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => GameEvent::Key(key),
                Ok(CtEvent::Paste(text)) => GameEvent::Paste(text),
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("terminal event reader stopped: {e}");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl GameEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: GameEventSource> {
    event_source: E,
    tick_interval: Duration,
}

impl<E: GameEventSource> Runner<E> {
    pub fn new(event_source: E, tick_interval: Duration) -> Self {
        Self {
            event_source,
            tick_interval,
        }
    }

    /// Next event, `Tick` after one tick interval of silence, `Closed` once the source is gone
    pub fn step(&self) -> GameEvent {
        self.wait(self.tick_interval)
    }

    /// Like [`Runner::step`], but gives up no later than `deadline` so a timer
    /// due before the next regular tick is not applied late.
    pub fn step_until(&self, deadline: Option<Instant>, now: Instant) -> GameEvent {
        let timeout = deadline
            .map(|d| d.saturating_duration_since(now).min(self.tick_interval))
            .unwrap_or(self.tick_interval);
        self.wait(timeout)
    }

    fn wait(&self, timeout: Duration) -> GameEvent {
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => GameEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => GameEvent::Closed,
        }
    }
}
