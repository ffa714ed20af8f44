//! Render functions for the TUI.
//!
//! Lays out the dashboard top to bottom: header, search box, result cards,
//! footer, status bar.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use super::{cards, header, status};

/// Accent colour for titles and links (#1a73e8).
pub(super) const ACCENT: Color = Color::Rgb(26, 115, 232);
/// Secondary text such as dates (#70757a).
pub(super) const MUTED: Color = Color::Rgb(112, 117, 122);

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 16;

const FOOTER: &str = "© 2025 AI News Dashboard";

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // EDGE-001: Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, app, chunks[0]);
    header::render_search_box(f, app, chunks[1]);
    cards::render(f, app, chunks[2]);

    let footer = Paragraph::new(FOOTER)
        .style(Style::default().fg(MUTED))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);

    status::render(f, app, chunks[4]);
}
