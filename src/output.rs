//! Non-interactive output for `--print` and `--json`.

use std::io::Write;

use anyhow::Result;

use crate::feed::FetchOutcome;
use crate::util::strip_control_chars;

const NO_RESULTS: &str = "ニュースが見つかりませんでした。別のキーワードで試してみてください。";

/// Writes the outcome as plain-text cards.
pub fn write_cards<W: Write>(out: &mut W, query: &str, outcome: &FetchOutcome) -> Result<()> {
    writeln!(out, "「{}」に関する最新ニュース", strip_control_chars(query))?;
    writeln!(out)?;

    match outcome {
        FetchOutcome::NoResults => writeln!(out, "{}", NO_RESULTS)?,
        FetchOutcome::Entries(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                writeln!(out, "{:>2}. {}", i + 1, strip_control_chars(&entry.title))?;
                writeln!(out, "    📅 更新日時: {}", strip_control_chars(&entry.published_display))?;
                writeln!(out, "    {}", strip_control_chars(entry.summary.trim()))?;
                writeln!(out, "    {}", entry.link)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Writes the entries as a JSON array (empty array for no results).
pub fn write_json<W: Write>(out: &mut W, outcome: &FetchOutcome) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcome.entries())?;
    writeln!(out)?;
    Ok(())
}
