// Library surface for the binary, headless tests and reuse.
// Terminal setup and CLI parsing stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod game;
pub mod picker;
pub mod policy;
pub mod render;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod ui;
pub mod util;
pub mod vocabulary;

pub use error::GameError;

/// Interval between UI ticks; the game countdown itself is deadline based.
pub const TICK_RATE_MS: u64 = 100;
