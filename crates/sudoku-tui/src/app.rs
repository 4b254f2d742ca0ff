use crate::game::Game;
use crate::i18n::{Language, TextKey};
use crate::render;
use crate::stats::GameStats;
use crate::storage::Storage;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use sudoku_engine::{Difficulty, Position};

/// Result of handling an input event
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Main menu
    Menu,
    /// Difficulty picker for a new game
    DifficultySelect,
    /// Normal gameplay
    Playing,
    /// Per-difficulty statistics
    Stats,
    /// Post-completion screen
    Win,
}

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Continue,
    NewGame,
    Statistics,
    Exit,
}

/// The main application state
pub struct App {
    pub screen: Screen,
    /// Current game, present on the Playing and Win screens.
    pub game: Option<Game>,
    /// Currently selected cell
    pub cursor: Position,
    /// When set, digit keys toggle notes instead of placing values
    pub notes_mode: bool,
    pub language: Language,
    pub theme: Theme,
    pub stats: GameStats,
    storage: Storage,
    /// Message to display
    pub message: Option<String>,
    /// Message timer, in ticks
    message_timer: u32,
    /// Selected menu / difficulty entry
    pub menu_selection: usize,
    /// Whether the last completed game set a new best time
    pub win_new_record: bool,
    /// Top-left corner of the grid as last rendered, for mouse hit-testing
    pub grid_origin: (u16, u16),
    /// Seed for the next generated puzzle, consumed on first use
    seed: Option<u64>,
}

impl App {
    pub fn new(storage: Storage, language: Language, theme: Theme, seed: Option<u64>) -> Self {
        let stats = storage.load_stats();
        Self {
            screen: Screen::Menu,
            game: None,
            cursor: Position::new(4, 4),
            notes_mode: false,
            language,
            theme,
            stats,
            storage,
            message: None,
            message_timer: 0,
            menu_selection: 0,
            win_new_record: false,
            grid_origin: (0, 0),
            seed,
        }
    }

    /// Menu entries currently available. Continue only appears when there
    /// is something to resume.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut items = Vec::with_capacity(4);
        if self.storage.has_saved_game() {
            items.push(MenuItem::Continue);
        }
        items.push(MenuItem::NewGame);
        items.push(MenuItem::Statistics);
        items.push(MenuItem::Exit);
        items
    }

    /// Update the message timer (called every poll tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::DifficultySelect => self.handle_difficulty_key(key),
            Screen::Playing => self.handle_game_key(key),
            Screen::Stats => self.handle_stats_key(key),
            Screen::Win => self.handle_win_key(key),
        }
    }

    /// Handle a mouse event. Only cell selection during play reacts.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> AppAction {
        if self.screen != Screen::Playing {
            return AppAction::Continue;
        }
        let paused = self.game.as_ref().map_or(false, Game::is_paused);
        if paused {
            return AppAction::Continue;
        }
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let (gx, gy) = self.grid_origin;
            if let Some(pos) = render::cell_at(gx, gy, event.column, event.row) {
                self.cursor = pos;
            }
        }
        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        let items = self.menu_items();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up => {
                self.menu_selection = if self.menu_selection == 0 {
                    items.len() - 1
                } else {
                    self.menu_selection - 1
                };
            }
            KeyCode::Down => {
                self.menu_selection = (self.menu_selection + 1) % items.len();
            }
            KeyCode::Char('l') => {
                self.language = self.language.next();
            }
            KeyCode::Enter => match items[self.menu_selection.min(items.len() - 1)] {
                MenuItem::Continue => self.resume_saved_game(),
                MenuItem::NewGame => {
                    self.screen = Screen::DifficultySelect;
                    self.menu_selection = 0;
                }
                MenuItem::Statistics => {
                    self.screen = Screen::Stats;
                }
                MenuItem::Exit => return AppAction::Quit,
            },
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_difficulty_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Menu;
                self.menu_selection = 0;
            }
            KeyCode::Up => {
                let count = Difficulty::ALL.len();
                self.menu_selection = (self.menu_selection + count - 1) % count;
            }
            KeyCode::Down => {
                self.menu_selection = (self.menu_selection + 1) % Difficulty::ALL.len();
            }
            KeyCode::Enter => {
                let difficulty = Difficulty::ALL[self.menu_selection.min(3)];
                self.start_game(difficulty);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        let Some(game) = self.game.as_mut() else {
            self.screen = Screen::Menu;
            return AppAction::Continue;
        };

        // While paused only unpausing and leaving are live.
        if game.is_paused() {
            match key.code {
                KeyCode::Char(' ') => game.toggle_pause(),
                KeyCode::Esc => self.leave_game(),
                _ => {}
            }
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),

            KeyCode::Char(c @ '1'..='9') => {
                let digit = c.to_digit(10).unwrap() as u8;
                if self.notes_mode {
                    let _ = game.toggle_note(self.cursor, digit);
                } else {
                    let _ = game.place(self.cursor, digit);
                    if game.is_completed() {
                        self.finish_game();
                    }
                }
            }

            KeyCode::Char('0') | KeyCode::Delete | KeyCode::Backspace => {
                let _ = game.clear(self.cursor);
            }

            KeyCode::Tab => {
                self.notes_mode = !self.notes_mode;
            }

            KeyCode::Char(' ') => game.toggle_pause(),

            KeyCode::Char('u') => {
                game.undo();
            }

            KeyCode::Esc => self.leave_game(),

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_stats_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Menu;
                self.menu_selection = 0;
            }
            KeyCode::Char('r') => {
                self.stats = GameStats::default();
                self.storage.reset_stats();
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                self.game = None;
                self.screen = Screen::Menu;
                self.menu_selection = 0;
            }
            KeyCode::Char('q') => return AppAction::Quit,
            _ => {}
        }
        AppAction::Continue
    }

    /// Moves the cursor, wrapping at the grid edges.
    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let row = (self.cursor.row as isize + dr).rem_euclid(9) as usize;
        let col = (self.cursor.col as isize + dc).rem_euclid(9) as usize;
        self.cursor = Position::new(row, col);
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        match Game::new(difficulty, self.seed.take()) {
            Ok(game) => {
                self.game = Some(game);
                self.cursor = Position::new(4, 4);
                self.notes_mode = false;
                self.storage.clear_game();
                self.screen = Screen::Playing;
            }
            Err(err) => {
                self.show_message(err.to_string());
                self.screen = Screen::Menu;
            }
        }
    }

    /// Enters a game directly, bypassing the menu. Used by the
    /// `--difficulty` command line flag.
    pub fn start_game_immediately(&mut self, difficulty: Difficulty) {
        self.start_game(difficulty);
    }

    fn resume_saved_game(&mut self) {
        match self.storage.load_game() {
            Some(saved) => {
                self.game = Some(Game::from_saved(saved));
                self.cursor = Position::new(4, 4);
                self.notes_mode = false;
                self.screen = Screen::Playing;
            }
            None => {
                self.show_message(self.language.text(TextKey::NewGame));
                self.menu_selection = 0;
            }
        }
    }

    /// Saves the game in progress and returns to the menu.
    fn leave_game(&mut self) {
        if let Some(game) = self.game.take() {
            if !game.is_completed() {
                let _ = self.storage.save_game(&game.to_saved());
            }
        }
        self.screen = Screen::Menu;
        self.menu_selection = 0;
    }

    /// Records the completed game and moves to the win screen.
    fn finish_game(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let secs = game.elapsed().as_secs();
        self.win_new_record = self.stats.record_completed(game.difficulty(), secs);
        let _ = self.storage.save_stats(&self.stats);
        self.storage.clear_game();
        self.screen = Screen::Win;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app() -> App {
        // Storage pointed at a directory that is never created; these
        // tests exercise pure state transitions only.
        let storage = Storage::new(PathBuf::from("/nonexistent/sudoku-tui-app-tests"));
        App::new(storage, Language::English, Theme::dark(), Some(1))
    }

    #[test]
    fn cursor_wraps_at_grid_edges() {
        let mut app = app();

        app.cursor = Position::new(0, 0);
        app.move_cursor(-1, 0);
        assert_eq!(app.cursor, Position::new(8, 0));
        app.move_cursor(0, -1);
        assert_eq!(app.cursor, Position::new(8, 8));
        app.move_cursor(1, 0);
        assert_eq!(app.cursor, Position::new(0, 8));
        app.move_cursor(0, 1);
        assert_eq!(app.cursor, Position::new(0, 0));
    }

    #[test]
    fn menu_hides_continue_without_a_save() {
        let app = app();
        assert_eq!(
            app.menu_items(),
            vec![MenuItem::NewGame, MenuItem::Statistics, MenuItem::Exit]
        );
    }

    #[test]
    fn starting_a_game_consumes_the_seed() {
        let mut app = app();
        app.start_game_immediately(Difficulty::Easy);
        assert_eq!(app.screen, Screen::Playing);
        let first = app.game.as_ref().unwrap().board().to_line();

        // The seed is used once; a second game is freshly randomized.
        app.start_game_immediately(Difficulty::Easy);
        assert_eq!(
            app.game.as_ref().unwrap().board().given_count(),
            Difficulty::Easy.clue_count()
        );
        let _ = first;
    }

    #[test]
    fn messages_expire_after_their_timer() {
        let mut app = app();
        app.show_message("hello");
        assert!(app.message.is_some());
        for _ in 0..30 {
            app.tick();
        }
        assert!(app.message.is_none());
    }
}
