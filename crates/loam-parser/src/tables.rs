//! Pipe table normalization

use crate::rewriter::{RewriteContext, RewriteStage};
use regex::Regex;
use std::sync::LazyLock;

static TABLE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|.*\|$").expect("table row regex"));

static SEPARATOR_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[-\s|:]+\|$").expect("table separator regex"));

/// Re-render pipe tables with trimmed cells and uniform `| a | b |` spacing.
///
/// A markdown separator row (`|---|:--:|`) directly under a row is replaced
/// by a single org rule line as wide as that row.
pub fn convert_tables(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let stripped = line.trim();

        if !TABLE_ROW.is_match(stripped) {
            out.push(line.to_string());
            i += 1;
            continue;
        }

        out.push(render_row(stripped));

        let separator_follows = lines
            .get(i + 1)
            .is_some_and(|next| SEPARATOR_ROW.is_match(next.trim()));
        if separator_follows {
            let width = stripped.chars().count().saturating_sub(2);
            out.push(format!("|{}|", "-".repeat(width)));
            i += 1;
        }
        i += 1;
    }

    out.join("\n")
}

fn render_row(stripped: &str) -> String {
    let inner = &stripped[1..stripped.len() - 1];
    let cells: Vec<&str> = inner.split('|').map(str::trim).collect();
    format!("| {} |", cells.join(" | "))
}

/// Pipe tables
pub struct Tables;

impl RewriteStage for Tables {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains('|')
    }

    fn apply(&self, text: &str, _cx: &mut RewriteContext<'_>) -> String {
        convert_tables(text)
    }
}
