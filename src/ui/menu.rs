use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::DeathReason;
use crate::session::GameOverInfo;

pub const UNLOCK_MESSAGE: &str = "🌀 Lobes unlocked! Edge portals now teleport you.";

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    info: GameOverInfo,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {}", info.final_score)),
        Line::from(format!("High Score: {}", info.high_score)),
        Line::from(death_reason_text(info.cause)),
        Line::from(if info.new_high_score {
            "New high score!"
        } else {
            ""
        }),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws a one-line notification near the top of the board.
pub fn render_popup(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    let banner = banner_rect(area, message, 1);
    frame.render_widget(Clear, banner);
    frame.render_widget(
        Paragraph::new(Line::from(message))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.popup).add_modifier(Modifier::BOLD)),
        banner,
    );
}

/// Draws the lobe unlock notice below the popup row.
pub fn render_unlock_message(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let banner = banner_rect(area, UNLOCK_MESSAGE, 3);
    frame.render_widget(Clear, banner);
    frame.render_widget(
        Paragraph::new(Line::from(UNLOCK_MESSAGE))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.lobe).add_modifier(Modifier::BOLD)),
        banner,
    );
}

fn death_reason_text(cause: DeathReason) -> &'static str {
    match cause {
        DeathReason::OutOfBounds => "Cause: left the grid",
        DeathReason::SelfCollision => "Cause: hit yourself",
        DeathReason::WallCollision => "Cause: hit a wall",
    }
}

/// One-row rect sized to `message`, centered horizontally at `row_offset`.
fn banner_rect(area: Rect, message: &str, row_offset: u16) -> Rect {
    let text_width = u16::try_from(message.width()).unwrap_or(u16::MAX);
    let width = text_width.saturating_add(2).min(area.width);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + row_offset.min(area.height.saturating_sub(1)),
        width,
        height: area.height.min(1),
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
