//! Localized UI strings for the four supported languages.
//!
//! The engine never sees any of this; only the rendering layer asks for
//! text. Tables are embedded so there is nothing to load at runtime.

use sudoku_engine::Difficulty;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Polish,
    Norwegian,
    Spanish,
}

/// Keys for every piece of translatable UI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Title,
    Continue,
    NewGame,
    Statistics,
    Exit,
    ChooseDifficulty,
    Time,
    DifficultyLabel,
    NotesMode,
    On,
    Off,
    Notes,
    Paused,
    GameControls,
    MenuControls,
    BestTime,
    AvgTime,
    GamesCompleted,
    StatsControls,
    WinCongrats,
    WinSolved,
    WinNewRecord,
    WinReturn,
}

impl Language {
    /// Cycles to the next language in a fixed order.
    pub fn next(self) -> Language {
        match self {
            Language::Polish => Language::English,
            Language::English => Language::Norwegian,
            Language::Norwegian => Language::Spanish,
            Language::Spanish => Language::Polish,
        }
    }

    /// Short code used on the command line and in the menu footer.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Polish => "pl",
            Language::Norwegian => "no",
            Language::Spanish => "es",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Language::English),
            "pl" => Some(Language::Polish),
            "no" => Some(Language::Norwegian),
            "es" => Some(Language::Spanish),
            _ => None,
        }
    }

    pub fn text(self, key: TextKey) -> &'static str {
        match self {
            Language::English => english(key),
            Language::Polish => polish(key),
            Language::Norwegian => norwegian(key),
            Language::Spanish => spanish(key),
        }
    }

    pub fn difficulty_name(self, difficulty: Difficulty) -> &'static str {
        match (self, difficulty) {
            (Language::English, Difficulty::Easy) => "Easy",
            (Language::English, Difficulty::Medium) => "Medium",
            (Language::English, Difficulty::Hard) => "Hard",
            (Language::English, Difficulty::Expert) => "Expert",
            (Language::Polish, Difficulty::Easy) => "Łatwy",
            (Language::Polish, Difficulty::Medium) => "Średni",
            (Language::Polish, Difficulty::Hard) => "Trudny",
            (Language::Polish, Difficulty::Expert) => "Ekspert",
            (Language::Norwegian, Difficulty::Easy) => "Lett",
            (Language::Norwegian, Difficulty::Medium) => "Middels",
            (Language::Norwegian, Difficulty::Hard) => "Vanskelig",
            (Language::Norwegian, Difficulty::Expert) => "Ekspert",
            (Language::Spanish, Difficulty::Easy) => "Fácil",
            (Language::Spanish, Difficulty::Medium) => "Medio",
            (Language::Spanish, Difficulty::Hard) => "Difícil",
            (Language::Spanish, Difficulty::Expert) => "Experto",
        }
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "SUDOKU",
        TextKey::Continue => "Continue",
        TextKey::NewGame => "New game",
        TextKey::Statistics => "Statistics",
        TextKey::Exit => "Exit",
        TextKey::ChooseDifficulty => "Choose difficulty",
        TextKey::Time => "Time",
        TextKey::DifficultyLabel => "Difficulty",
        TextKey::NotesMode => "Notes mode",
        TextKey::On => "on",
        TextKey::Off => "off",
        TextKey::Notes => "Notes",
        TextKey::Paused => "PAUSED",
        TextKey::GameControls => {
            "arrows move  1-9 fill  tab notes  space pause  u undo  backspace erase  esc menu"
        }
        TextKey::MenuControls => "up/down select  enter confirm  l language  q quit",
        TextKey::BestTime => "Best time",
        TextKey::AvgTime => "Average time",
        TextKey::GamesCompleted => "Completed",
        TextKey::StatsControls => "r reset statistics  esc back",
        TextKey::WinCongrats => "Congratulations!",
        TextKey::WinSolved => "Puzzle solved",
        TextKey::WinNewRecord => "New record!",
        TextKey::WinReturn => "Press enter to return to the menu",
    }
}

fn polish(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "SUDOKU",
        TextKey::Continue => "Kontynuuj",
        TextKey::NewGame => "Nowa gra",
        TextKey::Statistics => "Statystyki",
        TextKey::Exit => "Wyjście",
        TextKey::ChooseDifficulty => "Wybierz poziom trudności",
        TextKey::Time => "Czas",
        TextKey::DifficultyLabel => "Poziom",
        TextKey::NotesMode => "Tryb notatek",
        TextKey::On => "wł.",
        TextKey::Off => "wył.",
        TextKey::Notes => "Notatki",
        TextKey::Paused => "PAUZA",
        TextKey::GameControls => {
            "strzałki ruch  1-9 wpisz  tab notatki  spacja pauza  u cofnij  backspace usuń  esc menu"
        }
        TextKey::MenuControls => "góra/dół wybór  enter zatwierdź  l język  q wyjście",
        TextKey::BestTime => "Najlepszy czas",
        TextKey::AvgTime => "Średni czas",
        TextKey::GamesCompleted => "Ukończone",
        TextKey::StatsControls => "r wyzeruj statystyki  esc powrót",
        TextKey::WinCongrats => "Gratulacje!",
        TextKey::WinSolved => "Sudoku ukończone",
        TextKey::WinNewRecord => "Nowy rekord!",
        TextKey::WinReturn => "Naciśnij enter, aby wrócić do menu",
    }
}

fn norwegian(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "SUDOKU",
        TextKey::Continue => "Fortsett",
        TextKey::NewGame => "Nytt spill",
        TextKey::Statistics => "Statistikk",
        TextKey::Exit => "Avslutt",
        TextKey::ChooseDifficulty => "Velg vanskelighetsgrad",
        TextKey::Time => "Tid",
        TextKey::DifficultyLabel => "Nivå",
        TextKey::NotesMode => "Notatmodus",
        TextKey::On => "på",
        TextKey::Off => "av",
        TextKey::Notes => "Notater",
        TextKey::Paused => "PAUSE",
        TextKey::GameControls => {
            "piler flytt  1-9 fyll  tab notater  mellomrom pause  u angre  backspace slett  esc meny"
        }
        TextKey::MenuControls => "opp/ned velg  enter bekreft  l språk  q avslutt",
        TextKey::BestTime => "Beste tid",
        TextKey::AvgTime => "Gjennomsnittstid",
        TextKey::GamesCompleted => "Fullført",
        TextKey::StatsControls => "r nullstill statistikk  esc tilbake",
        TextKey::WinCongrats => "Gratulerer!",
        TextKey::WinSolved => "Sudoku løst",
        TextKey::WinNewRecord => "Ny rekord!",
        TextKey::WinReturn => "Trykk enter for å gå tilbake til menyen",
    }
}

fn spanish(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "SUDOKU",
        TextKey::Continue => "Continuar",
        TextKey::NewGame => "Nueva partida",
        TextKey::Statistics => "Estadísticas",
        TextKey::Exit => "Salir",
        TextKey::ChooseDifficulty => "Elige la dificultad",
        TextKey::Time => "Tiempo",
        TextKey::DifficultyLabel => "Dificultad",
        TextKey::NotesMode => "Modo notas",
        TextKey::On => "sí",
        TextKey::Off => "no",
        TextKey::Notes => "Notas",
        TextKey::Paused => "PAUSA",
        TextKey::GameControls => {
            "flechas mover  1-9 rellenar  tab notas  espacio pausa  u deshacer  backspace borrar  esc menú"
        }
        TextKey::MenuControls => "arriba/abajo elegir  enter confirmar  l idioma  q salir",
        TextKey::BestTime => "Mejor tiempo",
        TextKey::AvgTime => "Tiempo medio",
        TextKey::GamesCompleted => "Completadas",
        TextKey::StatsControls => "r reiniciar estadísticas  esc volver",
        TextKey::WinCongrats => "¡Felicidades!",
        TextKey::WinSolved => "Sudoku resuelto",
        TextKey::WinNewRecord => "¡Nuevo récord!",
        TextKey::WinReturn => "Pulsa enter para volver al menú",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LANGUAGES: [Language; 4] = [
        Language::English,
        Language::Polish,
        Language::Norwegian,
        Language::Spanish,
    ];

    const ALL_KEYS: [TextKey; 23] = [
        TextKey::Title,
        TextKey::Continue,
        TextKey::NewGame,
        TextKey::Statistics,
        TextKey::Exit,
        TextKey::ChooseDifficulty,
        TextKey::Time,
        TextKey::DifficultyLabel,
        TextKey::NotesMode,
        TextKey::On,
        TextKey::Off,
        TextKey::Notes,
        TextKey::Paused,
        TextKey::GameControls,
        TextKey::MenuControls,
        TextKey::BestTime,
        TextKey::AvgTime,
        TextKey::GamesCompleted,
        TextKey::StatsControls,
        TextKey::WinCongrats,
        TextKey::WinSolved,
        TextKey::WinNewRecord,
        TextKey::WinReturn,
    ];

    #[test]
    fn every_language_covers_every_key() {
        for language in ALL_LANGUAGES {
            for key in ALL_KEYS {
                assert!(
                    !language.text(key).is_empty(),
                    "{:?} missing text for {:?}",
                    language,
                    key
                );
            }
            for difficulty in Difficulty::ALL {
                assert!(!language.difficulty_name(difficulty).is_empty());
            }
        }
    }

    #[test]
    fn cycling_visits_all_languages() {
        let mut language = Language::Polish;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(language);
            language = language.next();
        }
        assert_eq!(language, Language::Polish);
        for expected in ALL_LANGUAGES {
            assert!(seen.contains(&expected));
        }
    }

    #[test]
    fn codes_round_trip() {
        for language in ALL_LANGUAGES {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code("fr"), None);
    }
}
