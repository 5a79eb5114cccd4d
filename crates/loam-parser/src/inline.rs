//! Inline emphasis and code spans
//!
//! Markdown and org disagree on almost every inline delimiter, and the
//! source delimiters overlap (`*` is both italic and half of bold). Each
//! construct is first rewritten to a placeholder token family, then one final
//! pass swaps the families for org delimiters:
//!
//! | source | token | org |
//! |---|---|---|
//! | `` `code` `` | held verbatim | `=code=` |
//! | `**b**`, `__b__` | bold | `*b*` |
//! | `*i*`, `_i_` | italic | `/i/` |
//! | `~~s~~` | strike | `+s+` |
//!
//! Code spans are held behind the shared verbatim shield so their contents
//! survive every later stage untouched.

use crate::rewriter::{RewriteContext, RewriteStage};
use crate::shield::Shield;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use uuid::Uuid;

static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+?)`").expect("code span regex"));

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(.+?)\*\*").expect("bold stars regex"));

static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)__(.+?)__").expect("bold underscores regex"));

static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\]]+?\]\]").expect("wikilink regex"));

static STRIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~\n]+?)~~").expect("strikethrough regex"));

/// One placeholder token per emphasis family, unique per rewrite
struct EmphasisTokens {
    bold: String,
    italic: String,
    strike: String,
}

impl EmphasisTokens {
    fn new() -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        let token = |family: &str| format!("\u{E002}{family}{}\u{E003}", &tag[..8]);
        Self {
            bold: token("BOLD"),
            italic: token("ITALIC"),
            strike: token("STRIKE"),
        }
    }

    fn finalize(&self, text: &str) -> String {
        text.replace(&self.bold, "*")
            .replace(&self.italic, "/")
            .replace(&self.strike, "+")
    }
}

/// Rewrite code spans, bold, italic and strikethrough to org markup.
///
/// `[[...]]` link bodies are left alone so the name resolved later is the
/// same one reference discovery saw.
pub fn convert_emphasis(text: &str, verbatim: &mut Shield) -> String {
    let tokens = EmphasisTokens::new();
    let mut links = Shield::new("wikilink");

    // Links first, so a code span inside a link body stays part of the name
    let text = WIKILINK
        .replace_all(text, |caps: &Captures| links.hold(&caps[0]))
        .into_owned();
    let text = CODE_SPAN
        .replace_all(&text, |caps: &Captures| {
            verbatim.hold(format!("={}=", links.release(&caps[1])))
        })
        .into_owned();

    let text = wrap_matches(&BOLD_STARS, &text, &tokens.bold);
    let text = wrap_matches(&BOLD_UNDERSCORES, &text, &tokens.bold);

    // `*i*`: neither delimiter may touch another star (bold remnants)
    let text = replace_delimited(
        &text,
        b'*',
        &tokens.italic,
        |bytes, open| open.checked_sub(1).map_or(true, |prev| bytes[prev] != b'*'),
        |bytes, close| bytes.get(close + 1) != Some(&b'*'),
    );

    // `_i_`: never inside a word
    let text = replace_delimited(
        &text,
        b'_',
        &tokens.italic,
        |bytes, open| open.checked_sub(1).map_or(true, |prev| !is_word_byte(bytes[prev])),
        |bytes, close| bytes.get(close + 1).map_or(true, |next| !is_word_byte(*next)),
    );

    let text = wrap_matches(&STRIKE, &text, &tokens.strike);

    links.release(&tokens.finalize(&text))
}

/// Replace each match of `re` with its first group wrapped in `token`
fn wrap_matches(re: &Regex, text: &str, token: &str) -> String {
    re.replace_all(text, |caps: &Captures| format!("{token}{}{token}", &caps[1]))
        .into_owned()
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Replace `delim body delim` spans, subject to boundary guards.
///
/// Mirrors a lazy `D(.+?)D` match with a lookbehind on the opening delimiter
/// and a lookahead on the closing one: for each admissible opening delimiter
/// the nearest admissible closing delimiter wins, the body is never empty and
/// may span lines. Scanning resumes after the closing delimiter.
fn replace_delimited(
    text: &str,
    delim: u8,
    token: &str,
    opens: impl Fn(&[u8], usize) -> bool,
    closes: impl Fn(&[u8], usize) -> bool,
) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != delim || !opens(bytes, i) {
            i += 1;
            continue;
        }

        let body_start = i + 1;
        let close = (body_start + 1..bytes.len()).find(|&j| bytes[j] == delim && closes(bytes, j));
        match close {
            Some(close) => {
                out.push_str(&text[copied..i]);
                out.push_str(token);
                out.push_str(&text[body_start..close]);
                out.push_str(token);
                copied = close + 1;
                i = close + 1;
            }
            None => i += 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Code spans and emphasis
pub struct Emphasis;

impl RewriteStage for Emphasis {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains(['`', '*', '_', '~'])
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        convert_emphasis(text, &mut cx.verbatim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emphasis(text: &str) -> String {
        let mut shield = Shield::new("test");
        let converted = convert_emphasis(text, &mut shield);
        shield.release(&converted)
    }

    #[test]
    fn test_bold() {
        assert_eq!(emphasis("a **bold** word"), "a *bold* word");
        assert_eq!(emphasis("a __bold__ word"), "a *bold* word");
    }

    #[test]
    fn test_italic() {
        assert_eq!(emphasis("an *italic* word"), "an /italic/ word");
        assert_eq!(emphasis("an _italic_ word"), "an /italic/ word");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(emphasis("~~gone~~ now"), "+gone+ now");
        assert_eq!(emphasis("~~not\nacross~~"), "~~not\nacross~~");
    }

    #[test]
    fn test_nested_bold_and_italic() {
        let out = emphasis("**bold *and italic* text**");
        assert_eq!(out, "*bold /and italic/ text*");
        assert!(!out.contains('\u{E002}'));
    }

    #[test]
    fn test_bold_spans_lines() {
        assert_eq!(emphasis("**two\nlines**"), "*two\nlines*");
    }

    #[test]
    fn test_underscores_inside_words_are_not_italic() {
        assert_eq!(emphasis("snake_case_name"), "snake_case_name");
        assert_eq!(emphasis("file_name and _real_"), "file_name and /real/");
    }

    #[test]
    fn test_code_span_contents_are_immune() {
        assert_eq!(emphasis("run `a*b*c` now"), "run =a*b*c= now");
        assert_eq!(emphasis("`__init__`"), "=__init__=");
    }

    #[test]
    fn test_code_span_does_not_cross_lines() {
        assert_eq!(emphasis("`open\nclose`"), "`open\nclose`");
    }

    #[test]
    fn test_lone_asterisk_is_untouched() {
        assert_eq!(emphasis("5 * 3 = 15"), "5 * 3 = 15");
    }

    #[test]
    fn test_italic_guard_against_bold_remnants() {
        assert_eq!(emphasis("***x*"), "/*/x*");
    }

    #[test]
    fn test_link_names_are_not_emphasis() {
        assert_eq!(
            emphasis("[[my _x_ page]] and _y_ [[**Bold**]]"),
            "[[my _x_ page]] and /y/ [[**Bold**]]"
        );
    }

    #[test]
    fn test_code_span_inside_link_stays_in_link() {
        assert_eq!(emphasis("see [[my `x` page]] `y`"), "see [[my `x` page]] =y=");
    }

    #[test]
    fn test_link_inside_code_span_is_code() {
        let out = emphasis("`[[not a link]]`");
        assert_eq!(out, "=[[not a link]]=");
        assert!(!out.contains(['\u{E000}', '\u{E001}']));
    }

    #[test]
    fn test_no_placeholder_leaks() {
        let out = emphasis("**a** _b_ *c* ~~d~~ `e` __f__");
        assert_eq!(out, "*a* /b/ /c/ +d+ =e= *f*");
        assert!(!out.contains(['\u{E000}', '\u{E001}', '\u{E002}', '\u{E003}']));
    }
}
