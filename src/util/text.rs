use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Number of terminal columns `s` occupies (CJK and emoji count as 2).
///
/// ```
/// use newsdash::util::display_width;
///
/// assert_eq!(display_width("Hello"), 5);
/// assert_eq!(display_width("速報"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates `s` to at most `max_width` columns, appending "..." when cut.
///
/// Widths of 3 or less have no room for the ellipsis and return the longest
/// prefix that fits. Borrows when nothing is cut.
///
/// ```
/// use newsdash::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("生成AIの最新動向", 9), "生成AI...");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(take_columns(s, max_width).to_string());
    }
    let head = take_columns(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", head, ELLIPSIS))
}

/// Splits `s` into at most `max_lines` lines of `width` columns.
///
/// Breaks on character boundaries (CJK text has no spaces to break on); the
/// last line is truncated with an ellipsis when text remains.
pub fn wrap_to_width(s: &str, width: usize, max_lines: usize) -> Vec<Cow<'_, str>> {
    let mut lines = Vec::new();
    if width == 0 || max_lines == 0 {
        return lines;
    }

    let mut rest = s.trim();
    while !rest.is_empty() {
        if lines.len() + 1 == max_lines {
            lines.push(truncate_to_width(rest, width));
            break;
        }
        let head = take_columns(rest, width);
        if head.is_empty() {
            // A single character wider than the line; emit it alone.
            let end = rest.chars().next().map_or(rest.len(), char::len_utf8);
            lines.push(Cow::Borrowed(&rest[..end]));
            rest = &rest[end..];
        } else {
            lines.push(Cow::Borrowed(head));
            rest = &rest[head.len()..];
        }
        rest = rest.trim_start();
    }
    lines
}

/// Longest prefix of `s` that fits in `width` columns.
fn take_columns(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// SEC-001: Removes terminal control characters and ANSI escape sequences.
///
/// Feed titles and summaries are provider-controlled, so they are cleaned
/// before reaching the terminal. CSI (`ESC [ ... final`) and OSC
/// (`ESC ] ... BEL` or `ESC ] ... ESC \`) sequences are dropped whole; other
/// C0 controls, DEL and C1 controls (U+0080..=U+009F, which include the
/// single-character CSI U+009B) are dropped individually. Tab, LF and CR are
/// kept.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    fn is_stripped(c: char) -> bool {
        (c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r'))
            || c == '\u{7f}'
            || ('\u{80}'..='\u{9f}').contains(&c)
    }

    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameters and intermediates run until a final byte 0x40..=0x7e.
                for c in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\u{07}' {
                        break;
                    }
                    if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    Cow::Owned(out)
}
