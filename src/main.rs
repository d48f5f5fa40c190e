use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::{
    error::Error,
    fs::{self, File},
    io::{self, stdin},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use pykeys::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::Game,
    picker::Selection,
    policy::Policy,
    runtime::{ChannelEventSource, GameEventSource, Runner},
    vocabulary::BuiltinVocabulary,
    TICK_RATE_MS,
};

/// keyword typing drill: type the word before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type programming keywords one at a time against a countdown. Flags override the saved settings for this run; --save keeps them."
)]
pub struct Cli {
    /// built-in word list
    #[clap(long, value_enum)]
    vocabulary: Option<BuiltinVocabulary>,

    /// json word list ({"name": ..., "words": [...]}) used instead of a built-in one
    #[clap(long)]
    words_file: Option<PathBuf>,

    /// how wrong keystrokes are treated
    #[clap(long, value_enum)]
    policy: Option<Policy>,

    /// order in which words are drawn
    #[clap(long, value_enum)]
    order: Option<Selection>,

    /// length of a round in seconds
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// pause before the next word once one is completed
    #[clap(long)]
    delay_ms: Option<u64>,

    /// persist the given flags as the new defaults
    #[clap(long)]
    save: bool,

    /// log at debug level
    #[clap(long)]
    verbose: bool,
}

impl Cli {
    /// Overlay the flags that were given on top of the saved config
    fn apply(&self, config: &mut Config) {
        if let Some(v) = self.vocabulary {
            config.vocabulary = v;
            config.words_file = None;
        }
        if let Some(ref path) = self.words_file {
            config.words_file = Some(path.clone());
        }
        if let Some(p) = self.policy {
            config.policy = p;
        }
        if let Some(o) = self.order {
            config.selection = o;
        }
        if let Some(s) = self.seconds {
            config.round_secs = s;
        }
        if let Some(d) = self.delay_ms {
            config.advance_delay_ms = d;
        }
    }
}

/// Creates the log file, along with its directory if missing
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

fn init_logging(verbose: bool) {
    let path = AppDirs::log_path();
    let log_file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            // raw mode is not on yet, so stderr is still readable
            eprintln!("pykeys: logging disabled, cannot open {}: {e}", path.display());
            return;
        }
    };

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Err(e) = WriteLogger::init(level, log_config, log_file) {
        eprintln!("pykeys: logging disabled: {e}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply(&mut config);
    if cli.save {
        store.save(&config)?;
    }

    // fail before touching the terminal
    let vocabulary = config.load_vocabulary()?;
    let game = Game::with_config(vocabulary, config.session_config()?);
    let mut app = App::new(game, config).with_store(Box::new(store));
    log::info!("pykeys starting with {:?}", app.config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        ChannelEventSource::crossterm(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: GameEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let event = runner.step_until(app.game.next_deadline(), Instant::now());
        if app.handle_event(event, Instant::now()) == Control::Quit {
            break;
        }
    }

    log::info!("pykeys exiting");
    Ok(())
}
