use crate::app::{App, MenuState, ScreenState};
use crate::suggest::BuiltinTopics;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use wordsearch_core::{Position, MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Terminal columns per grid cell ("X " pairs)
pub const CELL_WIDTH: u16 = 2;
/// Terminal rows per grid cell
pub const CELL_HEIGHT: u16 = 1;

/// Width of the word-bank panel, shared with the mouse mapping
pub const WORD_PANEL_WIDTH: u16 = 24;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, Clear(ClearType::All))?;

    render_game_screen(stdout, app, term_width, term_height)?;

    if let Some(msg) = app.message.clone() {
        render_message(stdout, app, &msg, term_width)?;
    }

    if app.menu != MenuState::None {
        render_menu(stdout, app, term_width, term_height)?;
    }

    if app.screen_state == ScreenState::Solved {
        render_solved_banner(stdout, app, term_width, term_height)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let size = app.session.grid().size() as u16;

    // Bordered grid: "| " + size cells of 2 chars + "|"
    let grid_width = 2 + size * CELL_WIDTH + 1;
    let grid_height = size * CELL_HEIGHT + 2;

    let total_width = grid_width + 3 + WORD_PANEL_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 8 { 2 } else { 1 };

    // Record where cell (0,0) and the word bank land so mouse events can
    // be mapped back
    app.grid_left = start_x + 2;
    app.grid_top = start_y + 1;
    let panel_x = start_x + grid_width + 3;
    app.panel_left = panel_x;
    app.panel_top = start_y + 2;

    render_grid(stdout, app, start_x, start_y)?;
    render_word_panel(stdout, app, panel_x, start_y)?;

    let controls_y = start_y + grid_height + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.session.grid();
    let size = grid.size();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let horizontal: String = format!("+{}+", "-".repeat(size * CELL_WIDTH as usize + 1));
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.border),
        Print(&horizontal)
    )?;

    for row in 0..size {
        let cell_y = y + 1 + row as u16 * CELL_HEIGHT;
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("| ")
        )?;

        for col in 0..size {
            render_cell(stdout, app, Position::new(row, col))?;
        }

        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 1 + size as u16 * CELL_HEIGHT),
        SetForegroundColor(theme.border),
        Print(&horizontal)
    )?;

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let letter = session.grid().get(pos).unwrap_or(' ');

    // Overlay precedence, decided here at render time: the live drag sits
    // on top, hints override found, found overrides the background
    let (bg, fg) = if session.is_drag_cell(pos) {
        (theme.drag_bg, theme.overlay_fg)
    } else if session.is_hint_cell(pos) {
        (theme.hint_bg, theme.overlay_fg)
    } else if session.is_found_cell(pos) {
        (theme.found_bg, theme.overlay_fg)
    } else {
        (theme.bg, theme.letter)
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(letter),
        SetBackgroundColor(theme.bg),
        Print(" ")
    )?;

    Ok(())
}

fn render_word_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== WORDS ===")
    )?;

    for (i, word) in session.words().iter().enumerate() {
        let row_y = y + 2 + i as u16;
        let marker = if i == app.word_cursor { "> " } else { "  " };
        execute!(
            stdout,
            MoveTo(x, row_y),
            SetForegroundColor(theme.key),
            Print(marker)
        )?;

        if session.is_word_found(word) {
            execute!(
                stdout,
                SetForegroundColor(theme.success),
                SetAttribute(Attribute::CrossedOut),
                Print(word),
                SetAttribute(Attribute::NotCrossedOut)
            )?;
        } else {
            execute!(stdout, SetForegroundColor(theme.fg), Print(word))?;
        }
    }

    let info_y = y + 3 + session.words().len() as u16;
    execute!(
        stdout,
        MoveTo(x, info_y),
        SetForegroundColor(theme.info),
        Print(format!(
            "Found: {}/{}",
            session.found_count(),
            session.words().len()
        )),
        MoveTo(x, info_y + 1),
        Print(format!(
            "Grid: {0} x {0}   Theme: {1}",
            session.grid().size(),
            app.theme_name()
        ))
    )?;

    let mut status_y = info_y + 2;
    if app.unsaved_changes {
        execute!(
            stdout,
            MoveTo(x, status_y),
            SetForegroundColor(theme.info),
            Print("(unsaved)")
        )?;
        status_y += 1;
    }
    if app.is_fetching() {
        execute!(
            stdout,
            MoveTo(x, status_y),
            SetForegroundColor(theme.info),
            Print("Fetching words...")
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("drag", "Select word"),
        ("j/k", "Choose word"),
        ("h", "Hint"),
        ("c", "Clear hints"),
        ("n", "New puzzle"),
        ("w", "Topic words"),
        ("t", "Theme"),
        ("S/L", "Save/Load"),
        ("e", "Export"),
        ("q", "Quit"),
    ];

    // Display in columns of 2 rows
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 2;
        let row = i % 2;
        let cx = x + (col as u16) * 18;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>4}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

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
    let x = term_width.saturating_sub(padded.len() as u16) / 2;
    let bg = if app.message_is_error {
        theme.error
    } else {
        theme.drag_bg
    };

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.overlay_fg),
        SetBackgroundColor(bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_menu(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let (title, items): (&str, Vec<String>) = match app.menu {
        MenuState::NewPuzzle => (
            "New puzzle - grid size",
            (MIN_GRID_SIZE..=MAX_GRID_SIZE)
                .map(|s| format!("{0} x {0}", s))
                .collect(),
        ),
        MenuState::Topic => (
            "Topic words",
            BuiltinTopics::names().iter().map(|n| n.to_string()).collect(),
        ),
        MenuState::Theme => (
            "Theme",
            vec![
                "Dark".to_string(),
                "Light".to_string(),
                "High contrast".to_string(),
            ],
        ),
        MenuState::None => return Ok(()),
    };

    let menu_width: u16 = items
        .iter()
        .map(|i| i.len())
        .max()
        .unwrap_or(0)
        .max(title.len()) as u16
        + 6;
    let menu_height = items.len() as u16 + 4;
    let x = term_width.saturating_sub(menu_width) / 2;
    let y = term_height.saturating_sub(menu_height) / 2;

    let horizontal: String = format!("+{}+", "-".repeat(menu_width as usize - 2));
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(&horizontal),
        MoveTo(x, y + 1),
        Print(format!("|{:^1$}|", "", menu_width as usize - 2))
    )?;
    execute!(
        stdout,
        MoveTo(x + 3, y + 1),
        SetForegroundColor(theme.key),
        Print(title)
    )?;

    for (i, item) in items.iter().enumerate() {
        let row_y = y + 2 + i as u16;
        execute!(
            stdout,
            MoveTo(x, row_y),
            SetForegroundColor(theme.border),
            Print(format!("|{:^1$}|", "", menu_width as usize - 2))
        )?;
        if i == app.menu_selection {
            execute!(
                stdout,
                MoveTo(x + 2, row_y),
                SetBackgroundColor(theme.drag_bg),
                SetForegroundColor(theme.overlay_fg),
                Print(format!(" {:<1$} ", item, menu_width as usize - 6)),
                SetBackgroundColor(theme.bg)
            )?;
        } else {
            execute!(
                stdout,
                MoveTo(x + 3, row_y),
                SetForegroundColor(theme.fg),
                Print(item)
            )?;
        }
    }

    execute!(
        stdout,
        MoveTo(x, y + 2 + items.len() as u16),
        SetForegroundColor(theme.info),
        Print(format!("|{:^1$}|", "j/k + Enter, Esc", menu_width as usize - 2)),
        MoveTo(x, y + 3 + items.len() as u16),
        SetForegroundColor(theme.border),
        Print(&horizontal)
    )?;

    Ok(())
}

fn render_solved_banner(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let lines = [
        "                                ",
        "       ALL WORDS FOUND!         ",
        "                                ",
        "  n: new puzzle   Enter: again  ",
        "  Esc: view grid  q: quit       ",
        "                                ",
    ];

    let width = lines[0].len() as u16;
    let x = term_width.saturating_sub(width) / 2;
    let y = term_height.saturating_sub(lines.len() as u16) / 2;

    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16),
            SetBackgroundColor(theme.found_bg),
            SetForegroundColor(theme.overlay_fg),
            Print(line)
        )?;
    }
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    Ok(())
}
