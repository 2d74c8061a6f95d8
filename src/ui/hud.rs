use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::Snapshot;

const HUD_SEPARATOR: &str = "  ";

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    theme: &Theme,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let fields = hud_fields(snapshot);
    frame.render_widget(
        Paragraph::new(hud_line(&fields, usize::from(hud_area.width), theme))
            .alignment(Alignment::Center),
        hud_area,
    );

    play_area
}

fn hud_fields(snapshot: &Snapshot<'_>) -> [(&'static str, String); 4] {
    [
        ("Score", snapshot.score.to_string()),
        ("Level", snapshot.level.to_string()),
        ("Speed", format!("{}ms", snapshot.speed_ms)),
        ("Hi", snapshot.high_score.to_string()),
    ]
}

/// Builds the HUD line, dropping trailing fields that do not fit `width`.
fn hud_line(fields: &[(&'static str, String)], width: usize, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    let mut used = 0;

    for (label, value) in fields {
        let separator = if spans.is_empty() { "" } else { HUD_SEPARATOR };
        let needed = separator.width() + label.width() + 1 + value.width();
        if used + needed > width {
            break;
        }
        used += needed;

        if !separator.is_empty() {
            spans.push(Span::raw(separator));
        }
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(theme.hud_label),
        ));
        spans.push(Span::styled(
            value.clone(),
            Style::default()
                .fg(theme.hud_value)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}
