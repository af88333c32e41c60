use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Theme;
use crate::game::{CollisionKind, PauseReason};

/// Start screen: title, best score and how to begin.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, best_score: u32, theme: &Theme) {
    let lines = vec![
        Line::from(format!("Best: {best_score}")),
        Line::from(""),
        Line::from("[Enter] or an arrow to start"),
        Line::from("Arrows/WASD or drag to steer"),
        Line::from("[Q] Quit").style(Style::default().fg(theme.menu_footer)),
    ];
    render_panel(frame, centered_popup(area, 80, 50), "SNAKE", lines, theme);
}

pub fn render_pause_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    reason: Option<PauseReason>,
    theme: &Theme,
) {
    let mut lines = Vec::with_capacity(4);
    if reason == Some(PauseReason::FocusLost) {
        lines.push(Line::from("Window lost focus"));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("[Space]/[Enter] Resume"));
    lines.push(Line::from("[R] Restart  [Q] Quit").style(Style::default().fg(theme.menu_footer)));

    render_panel(frame, centered_popup(area, 70, 40), "PAUSED", lines, theme);
}

/// Game-over screen with the collision cause and final score.
///
/// `new_best` is set when this game beat the best score it started with.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    best_score: u32,
    new_best: bool,
    collision: Option<CollisionKind>,
    theme: &Theme,
) {
    let cause = match collision {
        Some(CollisionKind::Wall) => "Ran into the wall",
        Some(CollisionKind::SelfCollision) => "Bit its own tail",
        None => "",
    };

    let mut lines = vec![
        Line::from(cause),
        Line::from(""),
        Line::from(format!("Score {score}   Best {}", best_score.max(score))),
    ];
    if new_best {
        lines.push(
            Line::from("New best score!")
                .style(Style::default().fg(theme.menu_title).add_modifier(Modifier::BOLD)),
        );
    }
    lines.push(Line::from(""));
    lines.push(
        Line::from("[Enter] Play again  [Q] Quit").style(Style::default().fg(theme.menu_footer)),
    );

    render_panel(frame, centered_popup(area, 80, 50), "GAME OVER", lines, theme);
}

fn render_panel(
    frame: &mut Frame<'_>,
    popup: Rect,
    title: &str,
    lines: Vec<Line<'_>>,
    theme: &Theme,
) {
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(Line::from(format!(" {title} ")).centered())
        .title_style(Style::default().fg(theme.menu_title).add_modifier(Modifier::BOLD));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    // Vertically center the text inside the border.
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let [text_area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(inner);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
