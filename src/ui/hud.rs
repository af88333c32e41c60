use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::Snapshot;

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub ticks_per_second: f64,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD and returns the remaining area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(snapshot, info, usize::from(status_area.width)))
            .alignment(Alignment::Center),
        status_area,
    );

    play_area
}

/// Builds `Score | Best | Length | Speed`, dropping trailing fields that do
/// not fit in `max_width` columns.
fn status_line(snapshot: &Snapshot<'_>, info: &HudInfo<'_>, max_width: usize) -> Line<'static> {
    let fields = [
        ("Score", snapshot.score.to_string()),
        ("Best", snapshot.best_score.max(snapshot.score).to_string()),
        ("Length", snapshot.snake.len().to_string()),
        ("Speed", format!("{:.0}/s", info.ticks_per_second)),
    ];

    let separator = "  ";
    let mut spans = Vec::new();
    let mut used = 0;

    for (label, value) in fields {
        let label = format!("{label} ");
        let gap = if spans.is_empty() { 0 } else { separator.width() };
        let needed = gap + label.width() + value.width();
        if used + needed > max_width {
            break;
        }

        if !spans.is_empty() {
            spans.push(Span::raw(separator));
        }
        spans.push(Span::styled(label, Style::new().fg(info.theme.hud_label)));
        spans.push(Span::styled(
            value,
            Style::new()
                .fg(info.theme.hud_value)
                .add_modifier(Modifier::BOLD),
        ));
        used += needed;
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{status_line, HudInfo};
    use crate::config::{GameConfig, THEME};
    use crate::game::GameSession;

    fn plain(line: &ratatui::text::Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn status_line_lists_all_fields_when_wide() {
        let session = GameSession::new_with_seed(GameConfig::default(), 120, 1)
            .expect("valid config");
        let info = HudInfo {
            ticks_per_second: 9.0,
            theme: &THEME,
        };

        let text = plain(&status_line(&session.snapshot(), &info, 80));

        assert_eq!(text, "Score 0  Best 120  Length 3  Speed 9/s");
    }

    #[test]
    fn status_line_drops_fields_that_do_not_fit() {
        let session = GameSession::new_with_seed(GameConfig::default(), 120, 1)
            .expect("valid config");
        let info = HudInfo {
            ticks_per_second: 9.0,
            theme: &THEME,
        };

        let text = plain(&status_line(&session.snapshot(), &info, 18));

        assert_eq!(text, "Score 0  Best 120");
    }
}
