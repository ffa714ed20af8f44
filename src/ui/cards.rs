use crate::app::{App, ResultsState};
use crate::feed::FeedEntry;
use crate::util::{strip_control_chars, truncate_to_width, wrap_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::render::{ACCENT, MUTED};

pub(super) const LOADING_TEXT: &str = "情報を取得しています...";
pub(super) const NO_RESULTS_TEXT: &str =
    "ニュースが見つかりませんでした。別のキーワードで試してみてください。";
const READ_MORE: &str = "元記事を詳しく読む ➜";
const SPINNER: [&str; super::loop_runner::SPINNER_FRAMES] =
    ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Summary lines shown per card.
const SUMMARY_LINES: usize = 2;
/// Columns taken by the block borders and the highlight symbol.
const CARD_CHROME_WIDTH: u16 = 4;

/// Render the results area: cards, spinner, or the "no results" notice.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    match app.results {
        ResultsState::Idle => {
            let hint = Paragraph::new("Press / to search")
                .style(Style::default().fg(MUTED))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(hint, area);
        }
        ResultsState::Loading => {
            let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
            let loading = Paragraph::new(format!("{} {}", spinner, LOADING_TEXT))
                .style(Style::default().fg(ACCENT))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(loading, area);
        }
        ResultsState::NoResults => {
            let warning = Paragraph::new(format!("⚠ {}", NO_RESULTS_TEXT))
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true })
                .block(block.border_style(Style::default().fg(Color::Yellow)));
            f.render_widget(warning, area);
        }
        ResultsState::Loaded => render_cards(f, app, area, block),
    }
}

fn render_cards(f: &mut Frame, app: &App, area: Rect, block: Block<'_>) {
    let width = area.width.saturating_sub(CARD_CHROME_WIDTH) as usize;

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| ListItem::new(card_lines(entry, width)))
        .collect();

    let title = format!(" {} 件のニュース ", app.entries.len());
    let list = List::new(items)
        .block(block.title(title).border_style(Style::default().fg(ACCENT)))
        .highlight_style(Style::default().bg(Color::Rgb(30, 38, 52)))
        .highlight_symbol("▌ ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// Lines making up one card: title, date, summary, link hint, spacer.
pub(super) fn card_lines(entry: &FeedEntry, width: usize) -> Vec<Line<'static>> {
    let title = strip_control_chars(&entry.title);
    let date = strip_control_chars(&entry.published_display);
    let summary = strip_control_chars(&entry.summary);

    let mut lines = Vec::with_capacity(SUMMARY_LINES + 4);
    lines.push(Line::from(Span::styled(
        truncate_to_width(&title, width).into_owned(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        truncate_to_width(&format!("📅 更新日時: {}", date), width).into_owned(),
        Style::default().fg(MUTED),
    )));
    // Newlines inside a summary would break the card layout.
    let summary = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    for line in wrap_to_width(&summary, width, SUMMARY_LINES) {
        lines.push(Line::from(line.into_owned()));
    }
    lines.push(Line::from(Span::styled(
        READ_MORE,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines
}
