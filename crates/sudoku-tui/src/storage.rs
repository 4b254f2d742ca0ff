use crate::game::SavedGame;
use crate::stats::GameStats;
use std::fs;
use std::io;
use std::path::PathBuf;

/// File-backed persistence for statistics and the saved game.
///
/// The data directory is injected so callers (and tests) control where
/// state lands. Corrupt or missing files fall back to defaults; nothing
/// here is fatal to startup.
pub struct Storage {
    base_dir: PathBuf,
}

impl Storage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Platform data directory, e.g. `~/.local/share/sudoku-tui`.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku-tui")
    }

    fn stats_path(&self) -> PathBuf {
        self.base_dir.join("sudoku_stats.json")
    }

    fn save_path(&self) -> PathBuf {
        self.base_dir.join("sudoku_save.json")
    }

    pub fn load_stats(&self) -> GameStats {
        match fs::read_to_string(self.stats_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => GameStats::default(),
        }
    }

    pub fn save_stats(&self, stats: &GameStats) -> io::Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(self.stats_path(), json)
    }

    pub fn reset_stats(&self) {
        let _ = fs::remove_file(self.stats_path());
    }

    pub fn load_game(&self) -> Option<SavedGame> {
        let json = fs::read_to_string(self.save_path()).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn save_game(&self, saved: &SavedGame) -> io::Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let json = serde_json::to_string(saved)?;
        fs::write(self.save_path(), json)
    }

    pub fn clear_game(&self) {
        let _ = fs::remove_file(self.save_path());
    }

    pub fn has_saved_game(&self) -> bool {
        self.save_path().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use sudoku_engine::{Board, Difficulty};

    static DIR_ID: AtomicU32 = AtomicU32::new(0);

    /// Unique scratch directory per test; removed on drop.
    struct Scratch(Storage);

    impl Scratch {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!(
                "sudoku-tui-test-{}-{}",
                std::process::id(),
                DIR_ID.fetch_add(1, Ordering::Relaxed)
            ));
            Scratch(Storage::new(dir))
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0.base_dir);
        }
    }

    fn sample_save() -> SavedGame {
        SavedGame {
            board: Board::new(),
            history: Vec::new(),
            difficulty: Difficulty::Hard,
            elapsed_secs: 37,
        }
    }

    #[test]
    fn stats_round_trip_and_reset() {
        let scratch = Scratch::new();
        let storage = &scratch.0;

        let mut stats = GameStats::default();
        stats.record_completed(Difficulty::Easy, 120);
        storage.save_stats(&stats).unwrap();
        assert_eq!(storage.load_stats(), stats);

        storage.reset_stats();
        assert_eq!(storage.load_stats(), GameStats::default());
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let scratch = Scratch::new();
        assert_eq!(scratch.0.load_stats(), GameStats::default());
        assert!(scratch.0.load_game().is_none());
        assert!(!scratch.0.has_saved_game());
    }

    #[test]
    fn corrupt_files_fall_back_to_defaults() {
        let scratch = Scratch::new();
        let storage = &scratch.0;
        fs::create_dir_all(&storage.base_dir).unwrap();
        fs::write(storage.stats_path(), "not json {").unwrap();
        fs::write(storage.save_path(), "also not json").unwrap();

        assert_eq!(storage.load_stats(), GameStats::default());
        assert!(storage.load_game().is_none());
    }

    #[test]
    fn saved_game_round_trip_and_clear() {
        let scratch = Scratch::new();
        let storage = &scratch.0;

        storage.save_game(&sample_save()).unwrap();
        assert!(storage.has_saved_game());
        let loaded = storage.load_game().unwrap();
        assert_eq!(loaded.difficulty, Difficulty::Hard);
        assert_eq!(loaded.elapsed_secs, 37);

        storage.clear_game();
        assert!(!storage.has_saved_game());
        assert!(storage.load_game().is_none());
    }
}
