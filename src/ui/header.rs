use crate::app::App;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::render::{ACCENT, MUTED};

const TITLE: &str = "📰 AI ニュース収集ダッシュボード";

/// Render the dashboard header with the active query.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let query = strip_control_chars(&app.query);
    let subtitle = format!("「{}」に関する最新ニュースを一覧表示します", query);

    let text = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_to_width(&subtitle, width).into_owned(),
            Style::default().fg(MUTED),
        )),
    ];

    let header = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Render the search box; highlighted with a cursor while editing.
pub fn render_search_box(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(3) as usize;
    let (text, border_style) = if app.search_mode {
        (
            format!("{}_", app.search_input),
            Style::default().fg(ACCENT),
        )
    } else {
        (app.search_input.clone(), Style::default())
    };

    // Keep the tail (where the cursor is) visible for long input.
    let shown = tail_to_width(&text, width);

    let search = Paragraph::new(shown).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" 🔍 キーワード "),
    );
    f.render_widget(search, area);
}

fn tail_to_width(s: &str, width: usize) -> &str {
    let mut start = s.len();
    let mut used = 0;
    for (idx, c) in s.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("hello", 10), "hello");
        assert_eq!(tail_to_width("hello", 3), "llo");
        assert_eq!(tail_to_width("人工知能", 5), "知能");
        assert_eq!(tail_to_width("abc", 0), "");
    }
}
