mod app;
mod game;
mod i18n;
mod render;
mod stats;
mod storage;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use i18n::Language;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use storage::Storage;
use sudoku_engine::Difficulty;
use theme::Theme;

#[derive(Parser)]
#[command(name = "sudoku", about = "Sudoku in the terminal", version)]
struct Args {
    /// Start a game at this difficulty, skipping the menu
    /// (easy, medium, hard, expert)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Seed for the puzzle generator; same seed, same puzzle
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for statistics and saved games
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// UI language (en, pl, no, es)
    #[arg(short, long, default_value = "en", value_parser = parse_language)]
    language: Language,

    /// Color theme (dark, light)
    #[arg(long, default_value = "dark", value_parser = parse_theme)]
    theme: Theme,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_code(s).ok_or_else(|| format!("unknown language '{s}' (en, pl, no, es)"))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    match s.to_ascii_lowercase().as_str() {
        "dark" => Ok(Theme::dark()),
        "light" => Ok(Theme::light()),
        _ => Err(format!("unknown theme '{s}' (dark, light)")),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let storage = Storage::new(args.data_dir.unwrap_or_else(Storage::default_dir));
    let mut app = App::new(storage, args.language, args.theme, args.seed);
    if let Some(difficulty) = args.difficulty {
        app.start_game_immediately(difficulty);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    match app.handle_key(key) {
                        AppAction::Continue => {}
                        AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => match app.handle_mouse(mouse) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                },
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
