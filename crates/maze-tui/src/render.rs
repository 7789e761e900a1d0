use crate::app::{App, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use maze_engine::{Cell, Maze, Position, Session};
use std::collections::HashSet;
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Comparison => {
            render_comparison_screen(stdout, app, term_width, term_height)?
        }
        ScreenState::Playing => match &app.session {
            Some(session) => render_game_screen(stdout, app, session, term_width, term_height)?,
            None => render_empty_screen(stdout, app, term_width)?,
        },
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Columns reserved beside the grid for the gap and the info panel
const INFO_PANEL_WIDTH: u16 = 28;

/// Columns per maze cell: two when the grid plus info panel fit the
/// terminal (roughly square cells), one otherwise.
fn grid_cell_width(maze_cols: usize, term_width: u16) -> u16 {
    let wide = maze_cols as u16 * 2 + INFO_PANEL_WIDTH;
    if term_width >= wide {
        2
    } else {
        1
    }
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let maze = session.maze();

    let cell_width = grid_cell_width(maze.cols(), term_width);
    let grid_width = maze.cols() as u16 * cell_width;
    let grid_height = maze.rows() as u16;

    let total_width = grid_width + INFO_PANEL_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 8 { 2 } else { 1 };

    render_grid(stdout, app, session, start_x, start_y, cell_width)?;

    let info_x = start_x + grid_width + 3;
    render_info_panel(stdout, app, session, info_x, start_y)?;

    let controls_y = start_y + grid_height.max(10) + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    Ok(())
}

/// Paint the maze in layers: base cells, the player's trail, solver
/// overlays, the start/goal anchors, then the player marker on top.
fn render_grid(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
    cell_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let maze = session.maze();
    let pad = if cell_width == 2 { "  " } else { " " };

    let trail: HashSet<Position> = session.recorded_path().iter().copied().collect();
    let (explored, path): (HashSet<Position>, HashSet<Position>) = match &app.sweep {
        Some(sweep) => (
            sweep.explored_cells().iter().copied().collect(),
            sweep.path_cells().iter().copied().collect(),
        ),
        None => (HashSet::new(), HashSet::new()),
    };
    let hint: HashSet<Position> = match &app.hint {
        Some(hint) => hint.cells().iter().copied().collect(),
        None => HashSet::new(),
    };

    for row in 0..maze.rows() {
        execute!(stdout, MoveTo(x, y + row as u16))?;
        for col in 0..maze.cols() {
            let pos = Position::new(row, col);
            let bg = cell_color(app, session, maze, pos, &trail, &explored, &path, &hint);
            execute!(stdout, SetBackgroundColor(bg), Print(pad))?;
        }
    }

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cell_color(
    app: &App,
    session: &Session,
    maze: &Maze,
    pos: Position,
    trail: &HashSet<Position>,
    explored: &HashSet<Position>,
    path: &HashSet<Position>,
    hint: &HashSet<Position>,
) -> Color {
    let theme = &app.theme;

    // Later layers win.
    if pos == session.player() {
        return theme.player;
    }
    if pos == maze.goal() {
        return theme.goal;
    }
    if pos == maze.start() {
        return theme.start;
    }
    if hint.contains(&pos) {
        return theme.hint;
    }
    if path.contains(&pos) {
        return theme.path;
    }
    if explored.contains(&pos) {
        return theme.explored;
    }
    if trail.contains(&pos) {
        return theme.trail;
    }
    match maze.cell(pos) {
        Cell::Wall => theme.wall,
        Cell::Open => theme.open,
    }
}

fn render_info_panel(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let maze = session.maze();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== MAZE ===")
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Size: {:>11}", format!("{}x{}", maze.rows(), maze.cols())))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print(format!("Time: {:>11}", session.elapsed_string()))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!("Steps: {:>10}", session.user_steps()))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print("Algorithm: "),
        SetForegroundColor(theme.key),
        Print(format!("{:>6}", format!("{}", app.algorithm)))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 7),
        SetForegroundColor(theme.info),
        Print(format!("Solver: {:>9}", app.backend_name()))
    )?;

    let best_str = match session.best_path_length() {
        Some(len) => len.to_string(),
        None => "-".to_string(),
    };
    execute!(
        stdout,
        MoveTo(x, y + 9),
        SetForegroundColor(theme.info),
        Print(format!("Best path: {:>6}", best_str))
    )?;

    if let Some(score) = app.score {
        execute!(
            stdout,
            MoveTo(x, y + 10),
            SetForegroundColor(theme.success),
            Print(format!("Score: {:>10.1}", score))
        )?;
    }

    if !session.is_active() {
        execute!(
            stdout,
            MoveTo(x, y + 12),
            SetForegroundColor(theme.success),
            Print("Solved! r=again")
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("wasd/Arrows", "Move"),
        ("h", "Hint"),
        ("Enter", "Solve"),
        ("Tab", "Algorithm"),
        ("c", "Compare"),
        ("g", "New maze"),
        ("1/2/3", "Size"),
        ("r", "Reset"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in columns of 5
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 5;
        let row = i % 5;
        let cx = x + (col as u16) * 24;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
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

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.bg),
        SetBackgroundColor(theme.key),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_empty_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let lines = [
        "No maze loaded.",
        "",
        "g  Request a maze from the solver service",
        "q  Quit",
    ];

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    for (i, line) in lines.iter().enumerate() {
        let x = term_width.saturating_sub(line.len() as u16) / 2;
        execute!(
            stdout,
            MoveTo(x, 4 + i as u16),
            SetForegroundColor(theme.fg),
            Print(line)
        )?;
    }

    Ok(())
}

// ==================== Comparison Screen ====================

fn render_comparison_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let title = "=== ALGORITHM COMPARISON ===";
    let title_x = term_width.saturating_sub(title.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.key),
        Print(title)
    )?;

    let Some(records) = &app.comparison else {
        return Ok(());
    };

    let header_y = 3;
    execute!(
        stdout,
        MoveTo(4, header_y),
        SetForegroundColor(theme.fg),
        Print(format!(
            "{:>6} {:>10} {:>9} {:>6}",
            "Algo", "Time (ms)", "Explored", "Path"
        ))
    )?;
    execute!(
        stdout,
        MoveTo(4, header_y + 1),
        SetForegroundColor(theme.info),
        Print("-".repeat(60))
    )?;

    // Bars are scaled against the slowest run.
    let max_ms = records
        .iter()
        .map(|r| r.elapsed_ms)
        .fold(0.0_f64, f64::max);
    let bar_width = (term_width.saturating_sub(42)).min(40) as f64;

    let fastest = records
        .iter()
        .filter(|r| r.path_length > 0)
        .map(|r| r.elapsed_ms)
        .fold(f64::INFINITY, f64::min);

    for (i, record) in records.iter().enumerate() {
        let y = header_y + 2 + i as u16;
        let color = if record.path_length == 0 {
            theme.error
        } else if (record.elapsed_ms - fastest).abs() < f64::EPSILON {
            theme.success
        } else {
            theme.fg
        };

        execute!(
            stdout,
            MoveTo(4, y),
            SetForegroundColor(color),
            Print(format!(
                "{:>6} {:>10.2} {:>9} {:>6}  ",
                format!("{}", record.algorithm),
                record.elapsed_ms,
                record.steps_explored,
                record.path_length
            ))
        )?;

        let len = if max_ms > 0.0 {
            ((record.elapsed_ms / max_ms) * bar_width).round() as usize
        } else {
            0
        };
        execute!(
            stdout,
            SetForegroundColor(theme.path),
            Print("#".repeat(len.max(1)))
        )?;
    }

    let nav_y = term_height.saturating_sub(2);
    execute!(
        stdout,
        MoveTo(4, nav_y),
        SetForegroundColor(theme.key),
        Print("Esc/q/c"),
        SetForegroundColor(theme.info),
        Print(" Back to the maze")
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_width_is_two_when_the_grid_fits() {
        // 35 columns at 2 wide plus the panel is 98; a 120-column
        // terminal has room to spare.
        assert_eq!(grid_cell_width(35, 120), 2);
        assert_eq!(grid_cell_width(15, 80), 2);
    }

    #[test]
    fn test_cell_width_falls_back_on_narrow_terminals() {
        // The 40x50 preset needs 100 grid columns plus the panel; an
        // 80-column terminal drops to one column per cell.
        assert_eq!(grid_cell_width(50, 80), 1);
        assert_eq!(grid_cell_width(50, 127), 1);
        assert_eq!(grid_cell_width(50, 128), 2);
    }
}
