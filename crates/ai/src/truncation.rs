//! Output budget enforcement.
//!
//! Every rendered tool output is held to [`CHARACTER_LIMIT`] characters
//! (Unicode scalar values, not bytes). Degradation is graceful:
//! - A list of independent records is halved and re-rendered, with a notice
//!   saying how many records are shown.
//! - Anything else is cut at the budget, with a fixed notice appended.
//! - Structured (JSON) output is never sliced; records are dropped until the
//!   document fits so it stays parseable.
//!
//! The budget bounds the body. Notices are appended after the check, so a
//! degraded output may exceed the budget by the notice length.

use serde::Serialize;

use crate::render::format::group_thousands;
use crate::tools::constants::CHARACTER_LIMIT;

/// A rendered output after the budget has been applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Truncated {
    pub text: String,
    pub was_truncated: bool,
}

impl Truncated {
    pub fn unchanged(text: String) -> Self {
        Self {
            text,
            was_truncated: false,
        }
    }
}

/// Truncation metadata merged into a structured envelope.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonTruncation {
    pub truncated: bool,
    pub total_count: usize,
    pub message: String,
}

/// Whether `text` is within the character budget.
pub fn fits(text: &str) -> bool {
    text.chars().count() <= CHARACTER_LIMIT
}

/// Notice appended when a record list was halved.
pub fn records_notice(shown: usize, total: usize) -> String {
    format!(
        "\n\n⚠️ Response truncated: Showing {shown} of {total} items\n\n\
         The full response exceeds the {} character limit.\n\n\
         To get more specific results:\n\
         - Request fewer items\n\
         - Use filters to narrow down results\n\
         - Request data in multiple smaller queries",
        group_thousands(&CHARACTER_LIMIT.to_string())
    )
}

/// Notice appended when text was cut at the budget.
pub fn text_notice() -> String {
    format!(
        "\n\n⚠️ Response truncated at {} characters\n\n\
         The full response was too large. Try using filters to get more specific data.",
        group_thousands(&CHARACTER_LIMIT.to_string())
    )
}

/// Apply the budget to a non-decomposable rendering.
pub fn fit_text(text: String) -> Truncated {
    fit_text_with(text, &text_notice())
}

/// [`fit_text`] with a caller-supplied notice.
pub fn fit_text_with(text: String, notice: &str) -> Truncated {
    if fits(&text) {
        return Truncated::unchanged(text);
    }
    let mut cut = take_chars(&text, CHARACTER_LIMIT);
    cut.push_str(notice);
    Truncated {
        text: cut,
        was_truncated: true,
    }
}

/// Apply the budget to a rendering of independent records.
///
/// Renders everything first; if that is over budget, renders the first half
/// (at least one record) and appends a notice. A halved body that is still
/// over budget is also cut, so the body always respects the limit.
pub fn fit_records<T, F>(records: &[T], render: F) -> Truncated
where
    F: Fn(&[T]) -> String,
{
    let full = render(records);
    if fits(&full) {
        return Truncated::unchanged(full);
    }
    if records.len() < 2 {
        return fit_text(full);
    }

    let shown = (records.len() / 2).max(1);
    let body = render(&records[..shown]);
    let mut text = if fits(&body) {
        body
    } else {
        take_chars(&body, CHARACTER_LIMIT)
    };
    text.push_str(&records_notice(shown, records.len()));

    Truncated {
        text,
        was_truncated: true,
    }
}

/// Apply the budget to a structured envelope built around `records`.
///
/// `serialize` receives the records to include and, when records were
/// dropped, the metadata to merge into the envelope. Records are halved until
/// the document fits or only `min_kept` remain.
pub fn fit_json_records<T, F>(
    records: &[T],
    min_kept: usize,
    serialize: F,
) -> Result<Truncated, serde_json::Error>
where
    F: Fn(&[T], Option<JsonTruncation>) -> Result<String, serde_json::Error>,
{
    let full = serialize(records, None)?;
    let total = records.len();
    let floor = min_kept.max(1);
    if fits(&full) || total <= floor {
        return Ok(Truncated::unchanged(full));
    }

    let mut kept = (total / 2).max(floor);
    loop {
        let note = JsonTruncation {
            truncated: true,
            total_count: total,
            message: format!(
                "Showing {kept} of {total} results. Add more specific filters or request fewer items."
            ),
        };
        let text = serialize(&records[..kept], Some(note))?;
        if fits(&text) || kept <= floor {
            return Ok(Truncated {
                text,
                was_truncated: true,
            });
        }
        kept = (kept / 2).max(floor);
    }
}

fn take_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
