use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{Theme, GLYPH_CELL, GLYPH_FOOD};
use crate::game::{GameStatus, Snapshot};
use crate::grid::{Cell, Grid};
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns per board cell; keeps cells roughly square.
const CELL_WIDTH: u16 = 2;

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let board_area = render_hud(frame, area, snapshot, hud_info);
    let play_area = centered_board(board_area, snapshot.grid);

    let theme = hud_info.theme;
    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_board(frame, inner, snapshot.grid, theme);
    render_food(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);

    match snapshot.status {
        GameStatus::Ready => render_start_menu(frame, play_area, snapshot.best_score, theme),
        GameStatus::Paused => render_pause_menu(frame, play_area, snapshot.pause_reason, theme),
        GameStatus::Over => render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            snapshot.best_score,
            snapshot.new_best,
            snapshot.collision,
            theme,
        ),
        GameStatus::Running => {}
    }
}

fn centered_board(area: Rect, grid: Grid) -> Rect {
    let width = grid.size().saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid.size().saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn render_board(frame: &mut Frame<'_>, inner: Rect, grid: Grid, theme: &Theme) {
    let size = i32::from(grid.size());
    let buffer = frame.buffer_mut();

    for y in 0..size {
        for x in 0..size {
            let cell = Cell::new(x, y);
            let Some((column, row)) = logical_to_terminal(inner, grid, cell) else {
                continue;
            };

            let color = if (x + y) % 2 == 0 {
                theme.board_dark
            } else {
                theme.board_light
            };
            buffer.set_string(column, row, GLYPH_CELL, Style::new().fg(color));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let Some(food) = snapshot.food else {
        return;
    };
    let Some((column, row)) = logical_to_terminal(inner, snapshot.grid, food) else {
        return;
    };

    let background = if (food.x + food.y) % 2 == 0 {
        theme.board_dark
    } else {
        theme.board_light
    };
    let buffer = frame.buffer_mut();
    buffer.set_string(column, row, "  ", Style::new().bg(background));
    buffer.set_string(column, row, GLYPH_FOOD, Style::new().fg(theme.food).bg(background));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let head = snapshot.snake.head();
    let buffer = frame.buffer_mut();

    for segment in snapshot.snake.segments() {
        let Some((column, row)) = logical_to_terminal(inner, snapshot.grid, *segment) else {
            continue;
        };

        let style = if *segment == head {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };
        buffer.set_string(column, row, GLYPH_CELL, style);
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, cell: Cell) -> Option<(u16, u16)> {
    if !grid.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let column = inner.x.saturating_add(x_offset);
    let row = inner.y.saturating_add(y_offset);
    if column.saturating_add(CELL_WIDTH) > inner.right() || row >= inner.bottom() {
        return None;
    }

    Some((column, row))
}
