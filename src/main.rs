use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use term_desk::drivers::console::ConsoleDriver;
use term_desk::prefs::{Preferences, PrefsStore};
use term_desk::session::{Session, run};
use term_desk::tracing_sub;

#[derive(Debug, Parser)]
#[command(name = "term-desk", version, about = "A desktop shell simulation for terminal emulators")]
struct Cli {
    /// Skip the boot animation and go straight to login.
    #[arg(long)]
    skip_boot: bool,

    /// Start in dark mode regardless of saved preferences.
    #[arg(long)]
    dark: bool,

    /// Preferences file to use instead of the platform default.
    #[arg(long, value_name = "FILE")]
    prefs_file: Option<PathBuf>,

    /// Log file; defaults to term-desk.log in the temp directory.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("term-desk.log"));
    tracing_sub::init_to_file(&log_path)?;

    let store = match cli.prefs_file {
        Some(path) => Some(PrefsStore::at(path)),
        None => match PrefsStore::default_location() {
            Ok(store) => Some(store),
            Err(err) => {
                tracing::warn!(%err, "preferences unavailable, running without persistence");
                None
            }
        },
    };
    let mut prefs = match &store {
        Some(store) => store.load().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load preferences, using defaults");
            Preferences::default()
        }),
        None => Preferences::default(),
    };
    if cli.dark {
        prefs.dark_mode = true;
    }

    let mut session = Session::new(store, prefs, cli.skip_boot);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    let mut driver = ConsoleDriver::new();

    let result = run(&mut terminal, &mut driver, &mut session);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}
