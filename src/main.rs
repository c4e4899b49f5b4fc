use bramble::app::{App, AppAction};
use bramble::character::save::SaveManager;
use bramble::ui::{self, key_input, terminal_surface::TerminalSurface};
use bramble::utils::build_info::version_line;
use bramble::utils::logging::init_logging;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Bramble - a small terminal RPG
#[derive(Parser, Debug)]
#[command(name = "bramble", about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Save file to use instead of the one in the data directory
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Directory for bramble.log
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Show version information
    #[arg(short = 'v', long)]
    version: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", version_line());
        return Ok(());
    }

    let (_log_path, _log_guard) = init_logging(cli.log_dir.as_deref())?;
    let saves = match cli.save {
        Some(path) => SaveManager::at(path),
        None => SaveManager::new().map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?,
    };
    let mut app = App::new(saves);
    tracing::info!(save = %app.save_path().display(), "starting bramble");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "bramble exited with an error");
    }
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key_input(key.code), &mut rng) {
            AppAction::None => {}
            AppAction::Quit => {
                tracing::info!("player quit");
                return Ok(());
            }
            AppAction::StartBattle(encounter) => {
                let mut surface = TerminalSurface::new(terminal);
                app.run_encounter(&encounter, &mut surface, &mut rng);
                // Drop keys pressed during the last round
                while event::poll(Duration::from_millis(0))? {
                    event::read()?;
                }
            }
        }
    }
}
