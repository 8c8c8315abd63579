mod backend;
mod config;
mod error;
mod logging;
mod remote;
mod task;
mod task_board;
mod ui;
mod wordle;
mod wordle_ui;
mod words;

#[cfg(test)]
mod test_support;

use backend::LocalBackend;
use clap::{Parser, Subcommand};
use config::{Config, TaskSource};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use remote::RemoteBackend;
use std::{
    io::{self, Stdout},
    path::PathBuf,
};
use task_board::TaskBoard;
use wordle::{Game, Word};

#[derive(Parser)]
#[command(name = "taskle", version, about = "Terminal task list and word game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the task list (local unless an API URL is configured)
    Tasks {
        /// Base URL of the task API, e.g. http://localhost:8000
        #[arg(long)]
        remote: Option<String>,
        /// JSON file for local tasks
        #[arg(long, conflicts_with = "remote")]
        file: Option<PathBuf>,
    },
    /// Play a round of the five-letter word game
    Wordle {
        /// Use this secret instead of a random one
        #[arg(long)]
        word: Option<String>,
        /// Accept any five letters as a guess
        #[arg(long)]
        no_dictionary: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config()?;
    let log_path = config
        .log
        .file
        .clone()
        .unwrap_or_else(config::default_log_path);
    logging::init(&log_path)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    match cli.command {
        Commands::Tasks { remote, file } => run_tasks(&config, remote, file),
        Commands::Wordle {
            word,
            no_dictionary,
        } => run_wordle(&config, word, no_dictionary),
    }
}

fn run_tasks(
    config: &Config,
    remote: Option<String>,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, source) = match config.tasks.source(remote, file) {
        TaskSource::Remote(url) => {
            tracing::info!(%url, "using remote task API");
            let mut board = TaskBoard::new(RemoteBackend::new(&url, config.tasks.timeout()));
            return with_terminal(|terminal| ui::run_app(terminal, &mut board, &url));
        }
        TaskSource::File(path) => {
            let source = path.display().to_string();
            (LocalBackend::with_file(path)?, source)
        }
        TaskSource::Memory => (LocalBackend::new(), "in memory".to_string()),
    };
    tracing::info!(%source, "using local tasks");
    let mut board = TaskBoard::new(backend);
    with_terminal(|terminal| ui::run_app(terminal, &mut board, &source))
}

fn run_wordle(
    config: &Config,
    word: Option<String>,
    no_dictionary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let words = if word.is_some() && no_dictionary {
        Vec::new()
    } else {
        words::load_words(&config.wordle.word_list_url, config.wordle.timeout())
    };

    let secret: Word = match word {
        Some(w) => w.parse()?,
        None => words::pick_random(&words)?,
    };
    tracing::debug!(%secret, "secret word chosen");

    let mut game = Game::new(secret);
    if !no_dictionary {
        game = game.with_dictionary(words);
    }
    with_terminal(|terminal| wordle_ui::run_game(terminal, &mut game))
}

/// Runs `app` inside the alternate screen and always restores the terminal.
fn with_terminal<F>(app: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()>,
{
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "terminal loop failed");
        eprintln!("{:?}", err);
    }
    Ok(())
}
