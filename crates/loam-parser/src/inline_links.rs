//! Standard markdown links and asset references
//!
//! `[label](url)` becomes org's `[[url][label]]`. The result is held behind
//! the verbatim shield right away: the wikilink stage later in the pipeline
//! matches `[[...]]` greedily and must never see a converted standard link.

use crate::rewriter::{RewriteContext, RewriteStage};
use crate::shield::Shield;
use regex::Regex;
use std::sync::LazyLock;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+?)\]\(([^)]+?)\)").expect("markdown link regex"));

static ASSET_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\]\((?:\.\./)?assets/([^)]+?)\)").expect("asset reference regex")
});

/// Canonical prefix for asset references. Converted documents live one
/// folder below the output root, next to the copied `assets` folder.
pub const ASSET_PREFIX: &str = "../assets/";

/// Point every `](assets/...)` and `](../assets/...)` reference at the
/// canonical `../assets/` location.
pub fn canonicalize_asset_paths(text: &str) -> String {
    ASSET_REFERENCE
        .replace_all(text, |caps: &regex::Captures| format!("]({ASSET_PREFIX}{})", &caps[1]))
        .into_owned()
}

/// Rewrite `[label](url)` links as org links.
///
/// A link whose opening bracket directly follows another `[` is skipped
/// (that bracket belongs to a wikilink). An image marker `!` in front of
/// the link is dropped: org renders a file link to an image inline.
pub fn convert_markdown_links(text: &str, verbatim: &mut Shield) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = MARKDOWN_LINK.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else { break };
        let start = whole.start();

        if text[..start].ends_with('[') {
            pos = start + 1;
            continue;
        }

        let link_start = if text[copied..start].ends_with('!') {
            start - 1
        } else {
            start
        };
        out.push_str(&text[copied..link_start]);
        out.push_str(&verbatim.hold(format!("[[{}][{}]]", &caps[2], &caps[1])));

        copied = whole.end();
        pos = whole.end();
    }

    out.push_str(&text[copied..]);
    out
}

/// Standard markdown links
pub struct MarkdownLinks;

impl RewriteStage for MarkdownLinks {
    fn name(&self) -> &'static str {
        "markdown-links"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains("](")
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        convert_markdown_links(text, &mut cx.verbatim)
    }
}
