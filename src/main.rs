mod app;
mod characters;
mod config;
mod difficulty;
mod error;
mod event;
mod input;
mod physics;
mod scores;
mod session;
mod ui;

use std::fs::{self, File};
use std::io::{self, Stdout};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use config::{Cli, Config};
use error::StartupError;
use event::{Event, EventHandler, Ticker};
use input::HeldKeys;
use scores::{ScoreRepository, SqliteScores};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dodgeball: {e}");
            ExitCode::FAILURE
        }
    }
}

fn create_parent_dir(path: &Path) -> Result<(), StartupError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| StartupError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn init_logging(config: &Config) -> Result<(), StartupError> {
    // The terminal belongs to the UI, so logs go to a file
    let path = config.log_path();
    create_parent_dir(&path)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| StartupError::LogFile {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| StartupError::Logger(e.to_string()))
}

fn run(cli: Cli) -> Result<(), StartupError> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    config.validate()?;
    init_logging(&config)?;

    let db_path = config.database_path();
    create_parent_dir(&db_path)?;
    let store = SqliteScores::new(db_path);
    store.ensure_store()?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        tick_ms = config.tick_ms,
        arena = %format!("{}x{}", config.arena_width, config.arena_height),
        seed = ?cli.seed,
        store = %store.path().display(),
        "starting"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Without release events, keys are held for a fixed window after each press
    let held = HeldKeys::new((!enhanced).then(|| config.hold_ticks()));
    info!(key_releases = enhanced, "input ready");
    let mut app = App::new(Box::new(store), config.rules(), rng, held);

    let result = run_loop(&mut terminal, &mut app, config.tick());

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    info!("bye");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<(), StartupError> {
    let events = EventHandler::new(tick);
    let mut ticker = Ticker::new(tick);

    loop {
        for ev in events.drain() {
            match ev {
                Event::Key(key) => app.on_key(key),
                Event::FocusLost => app.on_focus_lost(),
            }
            if app.should_quit {
                return Ok(());
            }
        }

        app.on_tick(ticker.period());
        terminal.draw(|frame| ui::render(frame, app))?;
        ticker.wait();
    }
}
