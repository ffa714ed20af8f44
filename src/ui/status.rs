use crate::app::{App, ResultsState};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // EDGE-001: Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Use Cow to avoid allocations for static strings and borrowed status messages
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.search_mode {
        Cow::Borrowed("Type a query | ENTER search | ESC cancel")
    } else if app.results == ResultsState::Loaded {
        Cow::Owned(format!(
            "{}/{}  [j/k]move [o]pen [/]search [r]efresh [q]uit",
            app.selected + 1,
            app.entries.len()
        ))
    } else {
        Cow::Borrowed("[/]search [r]efresh [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
