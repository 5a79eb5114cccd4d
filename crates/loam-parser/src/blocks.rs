//! Block-level rewrites: fenced code, headings, horizontal rules, quotes
//!
//! Code fences run first and are held verbatim, so nothing later in the
//! pipeline (headings, emphasis, link resolution) reaches into a code body.
//! Heading markers are held too: the `*` characters org uses for headings
//! would otherwise look like emphasis delimiters to the inline stage.

use crate::rewriter::{RewriteContext, RewriteStage};
use crate::shield::Shield;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]+(.+)$").expect("heading regex"));

static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---+$").expect("horizontal rule regex"));

const FENCE: &str = "```";

/// Rewrite ```` ```lang ```` fences as `#+BEGIN_SRC lang` / `#+END_SRC` blocks.
///
/// Fences may be indented (code inside an outline item); the opening
/// indentation is removed from every body line. An unterminated fence is
/// left as-is.
pub fn convert_code_fences(text: &str, shield: &mut Shield) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let opening = fence_open(line);
        let closing = opening.and_then(|_| (i + 1..lines.len()).find(|&j| lines[j].trim() == FENCE));

        match (opening, closing) {
            (Some((indent, lang)), Some(close)) => {
                let mut block = if lang.is_empty() {
                    String::from("#+BEGIN_SRC\n")
                } else {
                    format!("#+BEGIN_SRC {lang}\n")
                };
                for body_line in &lines[i + 1..close] {
                    block.push_str(body_line.strip_prefix(indent).unwrap_or(body_line));
                    block.push('\n');
                }
                block.push_str("#+END_SRC");

                out.push(shield.hold(block));
                i = close + 1;
            }
            _ => {
                out.push(line.to_string());
                i += 1;
            }
        }
    }

    out.join("\n")
}

/// Returns (indentation, language) for a fence-opening line
fn fence_open(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - trimmed.len()];
    let lang = trimmed.strip_prefix(FENCE)?.trim_end();

    lang.chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '+')
        .then_some((indent, lang))
}

/// `#` through `######` headings become `*` through `******`
pub fn convert_headings(text: &str, shield: &mut Shield) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| {
            let marker = shield.hold("*".repeat(caps[1].len()));
            format!("{marker} {}", &caps[2])
        })
        .into_owned()
}

/// Any line of three or more dashes becomes the canonical five-dash rule
pub fn convert_horizontal_rules(text: &str) -> String {
    HORIZONTAL_RULE.replace_all(text, "-----").into_owned()
}

/// Collapse consecutive `>` lines into one `#+BEGIN_QUOTE` block
pub fn convert_quotes(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        if !starts_quote(lines[i]) {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        }

        out.push("#+BEGIN_QUOTE".to_string());
        while i < lines.len() && lines[i].starts_with('>') {
            out.push(strip_quote_marker(lines[i]).to_string());
            i += 1;
        }
        out.push("#+END_QUOTE".to_string());
    }

    out.join("\n")
}

fn starts_quote(line: &str) -> bool {
    line.starts_with('>') && !strip_quote_marker(line).trim().is_empty()
}

fn strip_quote_marker(line: &str) -> &str {
    let rest = line.trim_start_matches('>');
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Fenced code blocks, held verbatim until the end of the pipeline
pub struct CodeFences;

impl RewriteStage for CodeFences {
    fn name(&self) -> &'static str {
        "code-fences"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains(FENCE)
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        convert_code_fences(text, &mut cx.verbatim)
    }
}

/// Markdown headings
pub struct Headings;

impl RewriteStage for Headings {
    fn name(&self) -> &'static str {
        "headings"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains('#')
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        convert_headings(text, &mut cx.verbatim)
    }
}

/// Horizontal rules
pub struct HorizontalRules;

impl RewriteStage for HorizontalRules {
    fn name(&self) -> &'static str {
        "horizontal-rules"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains("---")
    }

    fn apply(&self, text: &str, _cx: &mut RewriteContext<'_>) -> String {
        convert_horizontal_rules(text)
    }
}

/// Block quotes
pub struct BlockQuotes;

impl RewriteStage for BlockQuotes {
    fn name(&self) -> &'static str {
        "block-quotes"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains('>')
    }

    fn apply(&self, text: &str, _cx: &mut RewriteContext<'_>) -> String {
        convert_quotes(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fences(text: &str) -> String {
        let mut shield = Shield::new("test");
        let converted = convert_code_fences(text, &mut shield);
        shield.release(&converted)
    }

    fn headings(text: &str) -> String {
        let mut shield = Shield::new("test");
        let converted = convert_headings(text, &mut shield);
        shield.release(&converted)
    }

    #[test]
    fn test_fence_with_language() {
        let text = "before\n```rust\nfn main() {}\n```\nafter";
        assert_eq!(
            fences(text),
            "before\n#+BEGIN_SRC rust\nfn main() {}\n#+END_SRC\nafter"
        );
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(fences("```\nplain\n```"), "#+BEGIN_SRC\nplain\n#+END_SRC");
    }

    #[test]
    fn test_empty_fence() {
        assert_eq!(fences("```sh\n```"), "#+BEGIN_SRC sh\n#+END_SRC");
    }

    #[test]
    fn test_indented_fence_body_is_dedented() {
        let text = "- item\n  ```python\n  if x:\n      pass\n  ```";
        assert_eq!(
            fences(text),
            "- item\n#+BEGIN_SRC python\nif x:\n    pass\n#+END_SRC"
        );
    }

    #[test]
    fn test_unterminated_fence_is_untouched() {
        let text = "```rust\nlet x = 1;";
        assert_eq!(fences(text), text);
    }

    #[test]
    fn test_fence_body_is_hidden_from_later_stages() {
        let mut shield = Shield::new("test");
        let converted = convert_code_fences("```md\n# not a heading\n**x**\n```", &mut shield);
        assert!(!converted.contains('#'));
        assert!(!converted.contains("**"));
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(headings("# One"), "* One");
        assert_eq!(headings("### Three"), "*** Three");
        assert_eq!(headings("###### Six"), "****** Six");
    }

    #[test]
    fn test_non_headings_are_untouched() {
        assert_eq!(headings("#tag at start"), "#tag at start");
        assert_eq!(headings("####### seven"), "####### seven");
        assert_eq!(headings("text # not heading"), "text # not heading");
    }

    #[test]
    fn test_heading_markers_are_shielded() {
        let mut shield = Shield::new("test");
        let converted = convert_headings("## Title", &mut shield);
        assert!(!converted.contains('*'));
        assert!(converted.ends_with(" Title"));
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(convert_horizontal_rules("a\n---\nb"), "a\n-----\nb");
        assert_eq!(convert_horizontal_rules("--------"), "-----");
        assert_eq!(convert_horizontal_rules("-- two"), "-- two");
        assert_eq!(convert_horizontal_rules("--- text"), "--- text");
    }

    #[test]
    fn test_quote_block_collapses_lines() {
        let text = "intro\n> first line\n> second line\noutro";
        assert_eq!(
            convert_quotes(text),
            "intro\n#+BEGIN_QUOTE\nfirst line\nsecond line\n#+END_QUOTE\noutro"
        );
    }

    #[test]
    fn test_quote_markers_without_space() {
        assert_eq!(
            convert_quotes(">tight\n>> nested"),
            "#+BEGIN_QUOTE\ntight\nnested\n#+END_QUOTE"
        );
    }

    #[test]
    fn test_inline_angle_brackets_are_not_quotes() {
        assert_eq!(convert_quotes("a > b"), "a > b");
        assert_eq!(convert_quotes(">"), ">");
    }
}
