//! Whitespace cleanup for free-text report cells.
//!
//! Analytics exports copied through spreadsheets pick up no-break and
//! figure spaces; they would otherwise defeat the source/medium split.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Space variants rewritten to an ASCII space before collapsing.
const SPACE_VARIANTS: [char; 3] = [
    '\u{00A0}', // no-break space
    '\u{2007}', // figure space
    '\u{202F}', // narrow no-break space
];

/// Replace space variants, collapse whitespace runs to one space, trim.
///
/// ```
/// use revflow::transform::normalize_space;
///
/// assert_eq!(normalize_space("\u{00A0}google \u{202F}/\t cpc "), "google / cpc");
/// ```
pub fn normalize_space(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if SPACE_VARIANTS.contains(&c) { ' ' } else { c })
        .collect();

    WHITESPACE_RUN.replace_all(&replaced, " ").trim().to_string()
}
