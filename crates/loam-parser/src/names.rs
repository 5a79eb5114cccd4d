//! Page-name normalization and journal date handling

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Replaces `/` in namespaced page names (`project/alpha` -> `project___alpha`)
pub const NAMESPACE_SEPARATOR: &str = "___";

static EMPHASIS_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*`~]").expect("emphasis chars regex"));

static ILLEGAL_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"|?*]"#).expect("illegal filename chars regex"));

static UNDERSCORE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})_(\d{2})_(\d{2})").expect("underscore date regex"));

/// Normalize a raw link target into the flat name used for files and registry keys.
///
/// Strips emphasis markup, flattens namespace separators, drops characters
/// that are illegal in file names and trims. Underscores are preserved.
/// Normalizing an already normalized name returns it unchanged.
pub fn normalize_page_name(raw: &str) -> String {
    let name = EMPHASIS_CHARS.replace_all(raw, "");
    let name = name.replace(['/', '\\'], NAMESPACE_SEPARATOR);
    let name = ILLEGAL_FILENAME_CHARS.replace_all(&name, "");
    name.trim().to_string()
}

/// Rewrite every `YYYY_MM_DD` token to `YYYY-MM-DD`.
///
/// Journal files are named with underscores; org-roam dailies use dashes.
pub fn dashify_dates(text: &str) -> Cow<'_, str> {
    UNDERSCORE_DATE.replace_all(text, "${1}-${2}-${3}")
}
