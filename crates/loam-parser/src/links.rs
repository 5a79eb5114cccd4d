//! Reference discovery
//!
//! Finds every page a document points at, before any rewriting happens.
//! Link syntax in outliner notes is loose, so discovery runs a battery of
//! overlapping patterns rather than one precise grammar:
//! - plain `[[page]]`
//! - aliased `[[page|alias]]` (only the page half is a reference)
//! - annotated `[[page]](info)`
//! - embeds `{{embed [[page]]}}` and `{{embed ((block))}}`
//! - boundary-anchored variants of the plain form, for links at line
//!   starts and ends or between whitespace
//!
//! The same link is usually found by several patterns; results are a set.

use crate::names::normalize_page_name;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// What a captured reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReferenceKind {
    Page,
    Block,
}

/// A discovered reference, already normalized
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reference {
    /// Normalized page name
    Page(String),
    /// Raw block token
    Block(String),
}

struct ReferencePattern {
    name: &'static str,
    regex: Regex,
    kind: ReferenceKind,
}

impl ReferencePattern {
    fn new(name: &'static str, pattern: &str, kind: ReferenceKind) -> Self {
        let regex = Regex::new(&format!("(?im){pattern}"))
            .unwrap_or_else(|e| panic!("reference pattern {name} failed to compile: {e}"));
        Self { name, regex, kind }
    }
}

static REFERENCE_PATTERNS: LazyLock<Vec<ReferencePattern>> = LazyLock::new(|| {
    use ReferenceKind::{Block, Page};
    vec![
        ReferencePattern::new("plain", r"\[\[([^\]]+?)\]\]", Page),
        ReferencePattern::new("aliased", r"\[\[([^\]|]+?)\|[^\]]*?\]\]", Page),
        ReferencePattern::new("annotated", r"\[\[([^\]]+?)\]\]\([^)]*?\)", Page),
        ReferencePattern::new("embed-page", r"\{\{embed\s+\[\[([^\]]+?)\]\]\}\}", Page),
        ReferencePattern::new("embed-block", r"\{\{embed\s+\(\(([^)]+?)\)\)\}\}", Block),
        ReferencePattern::new("word-boundary", r"(?:^|\s)\[\[([^\]]+?)\]\](?:\s|$)", Page),
        ReferencePattern::new("space-delimited", r"\s\[\[([^\]]+?)\]\]\s", Page),
        ReferencePattern::new("line-start", r"^\[\[([^\]]+?)\]\]", Page),
        ReferencePattern::new("line-end", r"\[\[([^\]]+?)\]\]$", Page),
        ReferencePattern::new("after-newline", r"\n\[\[([^\]]+?)\]\]", Page),
        ReferencePattern::new("before-newline", r"\[\[([^\]]+?)\]\]\n", Page),
    ]
});

/// The page part of a wikilink body: `page` or `page|alias`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Raw page name, trimmed but not normalized
    pub name: String,
    pub alias: Option<String>,
}

impl LinkTarget {
    /// Split a wikilink body on its first `|`
    pub fn parse(inner: &str) -> Self {
        match inner.split_once('|') {
            Some((name, alias)) => Self {
                name: name.trim().to_string(),
                alias: Some(alias.trim().to_string()),
            },
            None => Self {
                name: inner.trim().to_string(),
                alias: None,
            },
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize_page_name(&self.name)
    }
}

/// Run the whole pattern battery over `content`.
///
/// Page captures are split on `|` and normalized; names that normalize to
/// nothing are dropped. Block captures are kept verbatim.
pub fn collect_references(content: &str) -> BTreeSet<Reference> {
    let mut references = BTreeSet::new();

    for pattern in REFERENCE_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(content) {
            let Some(raw) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };

            let reference = match pattern.kind {
                ReferenceKind::Page => {
                    let name = LinkTarget::parse(raw).normalized_name();
                    if name.is_empty() {
                        continue;
                    }
                    Reference::Page(name)
                }
                ReferenceKind::Block => Reference::Block(raw.trim().to_string()),
            };

            if references.insert(reference.clone()) {
                tracing::trace!(pattern = pattern.name, ?reference, "found reference");
            }
        }
    }

    references
}
