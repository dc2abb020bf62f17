mod app;
mod export;
mod render;
mod store;
mod suggest;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use suggest::{BuiltinTopics, WordSource};
use wordsearch_core::{
    validate_words, Generator, Session, MAX_GRID_SIZE, MAX_WORD_COUNT, MIN_GRID_SIZE,
    MIN_WORD_COUNT,
};

/// Interactive word-search puzzles in the terminal
#[derive(Parser)]
#[command(name = "wordsearch", version, about)]
struct Opts {
    /// Grid size (10-25)
    #[arg(long, default_value_t = 15)]
    size: usize,

    /// File with one word per line
    #[arg(long, value_name = "FILE")]
    words: Option<PathBuf>,

    /// Built-in topic to draw words from when no word file is given
    #[arg(long, default_value = "Animals")]
    topic: String,

    /// How many words to place (4-15)
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Load a saved puzzle instead of generating one
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Color theme (dark, light, high-contrast)
    #[arg(long)]
    theme: Option<String>,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let opts = Opts::parse();

    let session = match build_session(&opts) {
        Ok(session) => session,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    };

    let config = store::load_config();
    let theme_name = opts.theme.clone().unwrap_or(config.theme);
    let count = opts.count.clamp(MIN_WORD_COUNT, MAX_WORD_COUNT);
    let mut app = App::new(session, theme_name, count);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// Build the starting session from the command line: a saved puzzle, a word
/// file, or a built-in topic
fn build_session(opts: &Opts) -> Result<Session, String> {
    if let Some(path) = &opts.load {
        let puzzle = store::load_puzzle(path).map_err(|e| e.to_string())?;
        return Ok(Session::new(puzzle));
    }

    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&opts.size) {
        return Err(format!(
            "grid size must be between {} and {}",
            MIN_GRID_SIZE, MAX_GRID_SIZE
        ));
    }

    let count = opts.count.clamp(MIN_WORD_COUNT, MAX_WORD_COUNT);
    let words = match &opts.words {
        Some(file) => {
            let text = fs::read_to_string(file)
                .map_err(|e| format!("could not read {}: {}", file.display(), e))?;
            validate_words(text.lines(), MAX_WORD_COUNT)
        }
        None => BuiltinTopics
            .fetch(&opts.topic, count)
            .map_err(|e| e.to_string())?,
    };

    if words.len() < MIN_WORD_COUNT {
        return Err(format!(
            "need at least {} valid words (2-15 letters each), got {}",
            MIN_WORD_COUNT,
            words.len()
        ));
    }

    let mut generator = match opts.seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    };
    let puzzle = generator
        .generate_with_retries(opts.size, &words)
        .map_err(|e| {
            format!(
                "generation failed: {} (try fewer or shorter words, or a larger grid)",
                e
            )
        })?;

    Ok(Session::new(puzzle))
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout so timers and the suggestion worker
        // keep getting polled
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => {
                    match app.handle_mouse(mouse) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                _ => {}
            }
        }

        // Tick timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
