use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use sudoku_engine::Difficulty;

/// Aggregates for one difficulty level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    /// Completed games at this level.
    pub completed: usize,
    /// Fastest completion, seconds.
    pub best_time_secs: Option<u64>,
    /// Sum of completion times, seconds. The average is derived.
    pub total_time_secs: u64,
}

impl DifficultyStats {
    pub fn avg_time_secs(&self) -> Option<u64> {
        if self.completed > 0 {
            Some(self.total_time_secs / self.completed as u64)
        } else {
            None
        }
    }
}

/// Per-difficulty statistics, persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub by_difficulty: HashMap<Difficulty, DifficultyStats>,
}

impl GameStats {
    /// Records a completed game. Returns `true` when the time sets a new
    /// best for the difficulty.
    pub fn record_completed(&mut self, difficulty: Difficulty, time_secs: u64) -> bool {
        let stats = self.by_difficulty.entry(difficulty).or_default();
        stats.completed += 1;
        stats.total_time_secs += time_secs;
        let new_record = stats.best_time_secs.map_or(true, |best| time_secs < best);
        if new_record {
            stats.best_time_secs = Some(time_secs);
        }
        new_record
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> DifficultyStats {
        self.by_difficulty
            .get(&difficulty)
            .copied()
            .unwrap_or_default()
    }
}

/// Formats seconds as MM:SS, or H:MM:SS past an hour.
pub fn format_time(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_updates_count_best_and_average() {
        let mut stats = GameStats::default();

        assert!(stats.record_completed(Difficulty::Easy, 300));
        assert!(!stats.record_completed(Difficulty::Easy, 420));
        assert!(stats.record_completed(Difficulty::Easy, 180));

        let easy = stats.for_difficulty(Difficulty::Easy);
        assert_eq!(easy.completed, 3);
        assert_eq!(easy.best_time_secs, Some(180));
        assert_eq!(easy.avg_time_secs(), Some(300));
    }

    #[test]
    fn difficulties_are_tracked_independently() {
        let mut stats = GameStats::default();
        stats.record_completed(Difficulty::Easy, 100);
        stats.record_completed(Difficulty::Expert, 900);

        assert_eq!(stats.for_difficulty(Difficulty::Easy).completed, 1);
        assert_eq!(stats.for_difficulty(Difficulty::Expert).completed, 1);
        assert_eq!(stats.for_difficulty(Difficulty::Hard), DifficultyStats::default());
    }

    #[test]
    fn untouched_difficulty_has_no_times() {
        let stats = GameStats::default();
        let hard = stats.for_difficulty(Difficulty::Hard);
        assert_eq!(hard.best_time_secs, None);
        assert_eq!(hard.avg_time_secs(), None);
    }

    #[test]
    fn stats_survive_json_round_trip() {
        let mut stats = GameStats::default();
        stats.record_completed(Difficulty::Medium, 240);

        let json = serde_json::to_string(&stats).unwrap();
        let restored: GameStats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stats);
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3600), "1:00:00");
        assert_eq!(format_time(3725), "1:02:05");
    }
}
