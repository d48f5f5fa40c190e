use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};

use crate::config::{Config, ConfigStore};
use crate::game::Game;
use crate::picker::picker_for;
use crate::policy::Keystroke;
use crate::runtime::GameEvent;
use crate::session::Phase;

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    pub game: Game,
    pub config: Config,
    store: Option<Box<dyn ConfigStore>>,
}

impl App {
    pub fn new(game: Game, config: Config) -> Self {
        Self {
            game,
            config,
            store: None,
        }
    }

    /// Settings changed from the menu are written through `store`
    pub fn with_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn handle_event(&mut self, event: GameEvent, now: Instant) -> Control {
        let control = match event {
            GameEvent::Key(key) => self.handle_key(key, now),
            GameEvent::Paste(text) => {
                self.game.keystroke(Keystroke::Composed(text), now);
                Control::Continue
            }
            GameEvent::Resize | GameEvent::Tick => Control::Continue,
            GameEvent::Closed => {
                warn!("event source closed, quitting");
                return Control::Quit;
            }
        };
        // timers are deadline based, so polling after every event is safe
        self.game.poll(now);
        control
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }
        if key.code == KeyCode::Esc {
            return Control::Quit;
        }

        match self.game.phase() {
            Phase::Idle => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.game.start(now),
                KeyCode::Char('p') => self.cycle_policy(),
                KeyCode::Char('o') => self.toggle_order(),
                KeyCode::Char('q') => return Control::Quit,
                _ => {}
            },
            Phase::Active => match key.code {
                KeyCode::Char(c) => {
                    self.game.keystroke(Keystroke::Char(c), now);
                }
                KeyCode::Backspace => self.game.backspace(),
                KeyCode::Enter => self.game.submit(now),
                _ => {}
            },
            Phase::Over => match key.code {
                KeyCode::Char('r') => self.game.restart(now),
                KeyCode::Char('m') => self.game.reset(),
                KeyCode::Char('q') => return Control::Quit,
                _ => {}
            },
        }

        Control::Continue
    }

    pub fn cycle_policy(&mut self) {
        self.config.policy = self.config.policy.cycled();
        self.apply_settings();
    }

    pub fn toggle_order(&mut self) {
        self.config.selection = self.config.selection.toggled();
        self.apply_settings();
    }

    fn apply_settings(&mut self) {
        let session_config = match self.config.session_config() {
            Ok(sc) => sc,
            Err(e) => {
                warn!("keeping previous settings: {e}");
                return;
            }
        };
        if !self
            .game
            .reconfigure(session_config, picker_for(session_config.selection))
        {
            return;
        }
        info!(
            "settings changed: policy {}, order {}",
            self.config.policy, self.config.selection
        );

        if let Some(ref store) = self.store {
            if let Err(e) = store.save(&self.config) {
                warn!("could not save config: {e}");
            }
        }
    }
}
