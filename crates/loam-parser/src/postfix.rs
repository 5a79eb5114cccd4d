//! Fix-ups applied to the fully assembled org document

use regex::Regex;
use std::sync::LazyLock;

static TABLE_CAPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\*+ )\|(.*)$").expect("table caption regex"));

/// A heading whose text starts with `|` is a table that sat on a list item.
///
/// Org cannot put a table on a heading line, so the heading gets a literal
/// `table` label and the row moves to the next line.
pub fn split_table_captions(text: &str) -> String {
    TABLE_CAPTION.replace_all(text, "${1}table \n|${2}").into_owned()
}
