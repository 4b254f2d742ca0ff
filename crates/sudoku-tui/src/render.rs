use crate::app::{App, MenuItem, Screen};
use crate::i18n::TextKey;
use crate::stats::format_time;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use sudoku_engine::{Difficulty, Position};

// Grid footprint: 9 cells of 3 chars plus 10 border columns, and 9 cell
// rows interleaved with 10 separator rows.
const GRID_WIDTH: u16 = 37;
const GRID_HEIGHT: u16 = 19;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, Clear(ClearType::All))?;

    match app.screen {
        Screen::Menu => render_menu_screen(stdout, app, term_width, term_height)?,
        Screen::DifficultySelect => {
            render_difficulty_screen(stdout, app, term_width, term_height)?
        }
        Screen::Playing => render_game_screen(stdout, app, term_width, term_height)?,
        Screen::Stats => render_stats_screen(stdout, app, term_width, term_height)?,
        Screen::Win => render_win_screen(stdout, app, term_width, term_height)?,
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Maps a terminal coordinate to the cell under it, given the grid's
/// rendered origin. Border rows and columns map to nothing.
pub fn cell_at(grid_x: u16, grid_y: u16, x: u16, y: u16) -> Option<Position> {
    if x <= grid_x || y <= grid_y {
        return None;
    }
    let dx = (x - grid_x - 1) as usize;
    let dy = (y - grid_y - 1) as usize;
    if dy % 2 != 0 || dx % 4 == 3 {
        return None;
    }
    let row = dy / 2;
    let col = dx / 4;
    if row < 9 && col < 9 {
        Some(Position::new(row, col))
    } else {
        None
    }
}

fn render_menu_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let lang = app.language;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let title = lang.text(TextKey::Title);
    let title_x = term_width.saturating_sub(title.len() as u16) / 2;
    let start_y = term_height.saturating_sub(10) / 2;
    execute!(
        stdout,
        MoveTo(title_x, start_y),
        SetForegroundColor(theme.key),
        Print(title)
    )?;

    let items = app.menu_items();
    for (i, item) in items.iter().enumerate() {
        let label = match item {
            MenuItem::Continue => lang.text(TextKey::Continue),
            MenuItem::NewGame => lang.text(TextKey::NewGame),
            MenuItem::Statistics => lang.text(TextKey::Statistics),
            MenuItem::Exit => lang.text(TextKey::Exit),
        };
        let selected = i == app.menu_selection.min(items.len() - 1);
        let (fg, bg) = if selected {
            (theme.bg, theme.key)
        } else {
            (theme.fg, theme.bg)
        };
        let x = term_width.saturating_sub(24) / 2;
        execute!(
            stdout,
            MoveTo(x, start_y + 2 + i as u16),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(format!(" {:^22} ", label))
        )?;
    }

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let footer = format!("{}  [{}]", lang.text(TextKey::MenuControls), lang.code());
    let footer_x = term_width.saturating_sub(footer.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(footer_x, term_height.saturating_sub(2)),
        SetForegroundColor(theme.info),
        Print(footer)
    )?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_difficulty_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let lang = app.language;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let title = lang.text(TextKey::ChooseDifficulty);
    let title_x = term_width.saturating_sub(title.chars().count() as u16) / 2;
    let start_y = term_height.saturating_sub(8) / 2;
    execute!(
        stdout,
        MoveTo(title_x, start_y),
        SetForegroundColor(theme.fg),
        Print(title)
    )?;

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let label = format!(
            "{}  ({})",
            lang.difficulty_name(*difficulty),
            difficulty.clue_count()
        );
        let selected = i == app.menu_selection;
        let (fg, bg) = if selected {
            (theme.bg, theme.key)
        } else {
            (theme.fg, theme.bg)
        };
        let x = term_width.saturating_sub(24) / 2;
        execute!(
            stdout,
            MoveTo(x, start_y + 2 + i as u16),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(format!(" {:^22} ", label))
        )?;
    }

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    // Center the grid horizontally, leave room for the info panel.
    let total_width = GRID_WIDTH + 25;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > GRID_HEIGHT + 4 { 2 } else { 1 };
    app.grid_origin = (start_x, start_y);

    render_grid(stdout, app, start_x, start_y)?;

    let info_x = start_x + GRID_WIDTH + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + GRID_HEIGHT + 1;
    execute!(
        stdout,
        MoveTo(start_x, controls_y),
        SetForegroundColor(app.theme.info),
        SetBackgroundColor(app.theme.bg),
        Print(app.language.text(TextKey::GameControls))
    )?;

    if let Some(msg) = app.message.clone() {
        render_message(stdout, app, &msg, term_width)?;
    }

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let paused = app.game.as_ref().map_or(false, |g| g.is_paused());

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.box_border),
        Print("+===+===+===+===+===+===+===+===+===+")
    )?;

    for row in 0..9 {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..9 {
            let border_color = if col % 3 == 0 {
                theme.box_border
            } else {
                theme.border
            };
            execute!(stdout, SetForegroundColor(border_color), Print("|"))?;

            if paused {
                execute!(stdout, SetBackgroundColor(theme.bg), Print("   "))?;
            } else {
                render_cell(stdout, app, Position::new(row, col))?;
            }
        }
        execute!(
            stdout,
            SetForegroundColor(theme.box_border),
            SetBackgroundColor(theme.bg),
            Print("|")
        )?;

        let sep = if row == 8 || (row + 1) % 3 == 0 {
            "+===+===+===+===+===+===+===+===+===+"
        } else {
            "+---+---+---+---+---+---+---+---+---+"
        };
        let sep_color = if row == 8 || (row + 1) % 3 == 0 {
            theme.box_border
        } else {
            theme.border
        };
        execute!(
            stdout,
            MoveTo(x, cell_y + 1),
            SetForegroundColor(sep_color),
            Print(sep)
        )?;
    }

    if paused {
        let label = app.language.text(TextKey::Paused);
        let label_x = x + (GRID_WIDTH.saturating_sub(label.chars().count() as u16)) / 2;
        execute!(
            stdout,
            MoveTo(label_x, y + GRID_HEIGHT / 2),
            SetForegroundColor(theme.key),
            Print(label)
        )?;
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let Some(game) = app.game.as_ref() else {
        return Ok(());
    };
    let board = game.board();
    let cell = board.cell(pos);
    let is_cursor = pos == app.cursor;
    let is_highlighted = pos.row == app.cursor.row
        || pos.col == app.cursor.col
        || pos.box_index() == app.cursor.box_index();
    let cursor_value = board.value(app.cursor);
    let has_same_value = cursor_value.is_some() && cell.value() == cursor_value;

    let bg = if is_cursor {
        theme.selected_bg
    } else if has_same_value {
        theme.same_value_bg
    } else if is_highlighted {
        theme.highlight_bg
    } else {
        theme.bg
    };

    let fg = if board.has_conflict(pos) {
        theme.error
    } else if cell.is_given() {
        theme.given
    } else if cell.is_filled() {
        theme.filled
    } else {
        theme.note
    };

    execute!(stdout, SetBackgroundColor(bg), SetForegroundColor(fg))?;

    // Cell content is always 3 chars wide.
    match cell.value() {
        Some(value) => execute!(stdout, Print(format!(" {} ", value)))?,
        None => {
            let notes = cell.notes();
            match notes.len() {
                0 => execute!(stdout, Print(" . "))?,
                1 => {
                    let digit = notes.iter().next().unwrap_or(0);
                    execute!(stdout, Print(format!(" {} ", digit)))?;
                }
                _ => execute!(stdout, Print(" * "))?,
            }
        }
    }

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let lang = app.language;
    let Some(game) = app.game.as_ref() else {
        return Ok(());
    };

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print(format!("=== {} ===", lang.text(TextKey::Title)))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!(
            "{}: {}",
            lang.text(TextKey::Time),
            format_time(game.elapsed().as_secs())
        ))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!(
            "{}: {}",
            lang.text(TextKey::DifficultyLabel),
            lang.difficulty_name(game.difficulty())
        ))
    )?;

    let mode = if app.notes_mode {
        lang.text(TextKey::On)
    } else {
        lang.text(TextKey::Off)
    };
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print(format!("{}: {}", lang.text(TextKey::NotesMode), mode))
    )?;

    // Digits already placed nine times are dimmed.
    let completed = game.board().completed_digits();
    execute!(stdout, MoveTo(x, y + 8))?;
    for (i, done) in completed.iter().enumerate() {
        let color = if *done { theme.border } else { theme.success };
        execute!(
            stdout,
            SetForegroundColor(color),
            Print(format!("{} ", i + 1))
        )?;
    }

    let cell = game.board().cell(app.cursor);
    if cell.is_empty() && !cell.notes().is_empty() {
        let notes: Vec<String> = cell.notes().iter().map(|d| d.to_string()).collect();
        execute!(
            stdout,
            MoveTo(x, y + 10),
            SetForegroundColor(theme.note),
            Print(format!("{}: {}", lang.text(TextKey::Notes), notes.join(" ")))
        )?;
    }

    Ok(())
}

fn render_stats_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let lang = app.language;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let title = format!("=== {} ===", lang.text(TextKey::Statistics));
    let title_x = term_width.saturating_sub(title.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.key),
        Print(title)
    )?;

    let col_x = 4u16;
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let ds = app.stats.for_difficulty(*difficulty);
        let y = 3 + i as u16 * 4;

        execute!(
            stdout,
            MoveTo(col_x, y),
            SetForegroundColor(theme.fg),
            Print(lang.difficulty_name(*difficulty))
        )?;
        execute!(
            stdout,
            MoveTo(col_x + 2, y + 1),
            SetForegroundColor(theme.info),
            Print(format!(
                "{}: {}",
                lang.text(TextKey::GamesCompleted),
                ds.completed
            ))
        )?;

        let best = ds
            .best_time_secs
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        let avg = ds
            .avg_time_secs()
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        execute!(
            stdout,
            MoveTo(col_x + 2, y + 2),
            SetForegroundColor(theme.info),
            Print(format!(
                "{}: {}  {}: {}",
                lang.text(TextKey::BestTime),
                best,
                lang.text(TextKey::AvgTime),
                avg
            ))
        )?;
    }

    execute!(
        stdout,
        MoveTo(col_x, term_height.saturating_sub(2)),
        SetForegroundColor(theme.info),
        Print(lang.text(TextKey::StatsControls))
    )?;

    Ok(())
}

fn render_win_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let lang = app.language;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let center = |s: &str| term_width.saturating_sub(s.chars().count() as u16) / 2;
    let start_y = term_height.saturating_sub(10) / 2;

    let congrats = lang.text(TextKey::WinCongrats);
    execute!(
        stdout,
        MoveTo(center(congrats), start_y),
        SetForegroundColor(theme.success),
        Print(congrats)
    )?;

    let solved = lang.text(TextKey::WinSolved);
    execute!(
        stdout,
        MoveTo(center(solved), start_y + 2),
        SetForegroundColor(theme.fg),
        Print(solved)
    )?;

    if let Some(game) = app.game.as_ref() {
        let line = format!(
            "{}: {}   {}: {}",
            lang.text(TextKey::DifficultyLabel),
            lang.difficulty_name(game.difficulty()),
            lang.text(TextKey::Time),
            format_time(game.elapsed().as_secs())
        );
        execute!(
            stdout,
            MoveTo(center(&line), start_y + 4),
            SetForegroundColor(theme.info),
            Print(line.clone())
        )?;
    }

    if app.win_new_record {
        let record = lang.text(TextKey::WinNewRecord);
        execute!(
            stdout,
            MoveTo(center(record), start_y + 6),
            SetForegroundColor(theme.key),
            Print(record)
        )?;
    }

    let prompt = lang.text(TextKey::WinReturn);
    execute!(
        stdout,
        MoveTo(center(prompt), start_y + 8),
        SetForegroundColor(theme.info),
        Print(prompt)
    )?;

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded)
    )?;
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_hits_land_on_the_right_cell() {
        // Grid at (5, 2): cell (row, col) starts at x = 6 + col*4, y = 3 + row*2.
        assert_eq!(cell_at(5, 2, 6, 3), Some(Position::new(0, 0)));
        assert_eq!(cell_at(5, 2, 8, 3), Some(Position::new(0, 0)));
        assert_eq!(cell_at(5, 2, 10, 3), Some(Position::new(0, 1)));
        assert_eq!(cell_at(5, 2, 38, 19), Some(Position::new(8, 8)));
    }

    #[test]
    fn borders_and_outside_miss() {
        assert_eq!(cell_at(5, 2, 5, 3), None, "left border column");
        assert_eq!(cell_at(5, 2, 9, 3), None, "inner border column");
        assert_eq!(cell_at(5, 2, 6, 2), None, "top border row");
        assert_eq!(cell_at(5, 2, 6, 4), None, "separator row");
        assert_eq!(cell_at(5, 2, 60, 40), None, "beyond the grid");
        assert_eq!(cell_at(5, 2, 1, 1), None, "before the origin");
    }
}
