//! Minimal markdown-emphasis to markup conversion, and the way back to plain text.
//!
//! Generated menus use `**bold**` and `*italic*` and nothing else worth rendering, so this is a
//! two-rule substitution rather than a markdown parser. Bold is rewritten first so that its
//! asterisks are gone before the italic rule runs.

use crate::constants::BREAK_MARKER;
use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern should be valid"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("italic pattern should be valid"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("break pattern should be valid"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern should be valid"));

/// Converts `**text**` to `<strong>text</strong>` and `*text*` to `<em>text</em>`.
///
/// Unpaired asterisks are left as they are.
pub fn emphasis_to_markup(line: &str) -> String {
    let bold = BOLD.replace_all(line, "<strong>${1}</strong>");
    ITALIC.replace_all(&bold, "<em>${1}</em>").into_owned()
}

/// Appends one display line and its break marker to a fragment.
pub(crate) fn push_line(fragment: &mut String, line: &str) {
    fragment.push_str(&emphasis_to_markup(line));
    fragment.push_str(BREAK_MARKER);
}

/// Turns a rendered meal fragment back into plain text.
///
/// Break markers become newlines and every other tag is dropped, which is the form the dish
/// line parser expects when a meal is opened for editing.
pub fn fragment_to_plain_text(fragment: &str) -> String {
    let with_newlines = LINE_BREAK.replace_all(fragment, "\n");
    let stripped = TAG.replace_all(&with_newlines, "");
    stripped
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}
