//! Reference resolution: embeds, wikilinks and block references
//!
//! These stages turn names and block tokens into org-roam identifier links.
//! Identifiers come from a [`LinkResolver`]; the resolver may mint a new
//! identifier for a name it has never seen, so every link resolves even when
//! its target page does not exist yet.
//!
//! Embeds run first: once `[[page]]` has become `[[id:...][page]]` the embed
//! wrapper can no longer be recognized. Every emitted link is held behind
//! the verbatim shield so the following stages cannot re-match it.

use crate::links::LinkTarget;
use crate::names::normalize_page_name;
use crate::rewriter::{RewriteContext, RewriteStage};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+?)\]\]").expect("wikilink regex"));

static BLOCK_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\(([^)]+?)\)\)").expect("block reference regex"));

static EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{embed\s+([^}]+?)\}\}").expect("embed regex"));

/// Source of identifiers for link targets.
///
/// Both lookups must be stable: the same key always yields the same
/// identifier within a run.
pub trait LinkResolver {
    /// Identifier of the page with this (already normalized) name
    fn page_id(&mut self, name: &str) -> String;

    /// Identifier of the block behind a `((token))` reference
    fn block_id(&mut self, token: &str) -> String;
}

/// `{{embed [[page]]}}` and `{{embed ((block))}}` become `#+INCLUDE:` lines.
/// Embeds of anything else are left as written.
pub fn convert_embeds(text: &str, cx: &mut RewriteContext<'_>) -> String {
    EMBED
        .replace_all(text, |caps: &Captures| {
            let inner = &caps[1];

            if let Some(page) = WIKILINK.captures(inner) {
                let name = LinkTarget::parse(&page[1]).normalized_name();
                if !name.is_empty() {
                    cx.resolver.page_id(&name);
                    let include = format!("#+INCLUDE: \"{name}.{}\"", cx.target_extension);
                    return cx.verbatim.hold(include);
                }
            }

            if let Some(block) = BLOCK_REF.captures(inner) {
                let id = cx.resolver.block_id(&block[1]);
                return cx.verbatim.hold(format!("#+INCLUDE: \"[[id:{id}]]\""));
            }

            caps[0].to_string()
        })
        .into_owned()
}

/// `[[name]]` and `[[name|alias]]` become `[[id:<id>][<display>]]`.
///
/// The display text is the alias when present, else the normalized name.
/// Links whose name normalizes to nothing are left as written.
pub fn convert_wikilinks(text: &str, cx: &mut RewriteContext<'_>) -> String {
    WIKILINK
        .replace_all(text, |caps: &Captures| {
            let target = LinkTarget::parse(&caps[1]);
            let name = normalize_page_name(&target.name);
            if name.is_empty() {
                return caps[0].to_string();
            }

            let id = cx.resolver.page_id(&name);
            let display = target.alias.unwrap_or(name);
            cx.verbatim.hold(format!("[[id:{id}][{display}]]"))
        })
        .into_owned()
}

/// `((token))` becomes `[[id:<id>]]`
pub fn convert_block_refs(text: &str, cx: &mut RewriteContext<'_>) -> String {
    BLOCK_REF
        .replace_all(text, |caps: &Captures| {
            let id = cx.resolver.block_id(&caps[1]);
            cx.verbatim.hold(format!("[[id:{id}]]"))
        })
        .into_owned()
}

/// Page and block embeds
pub struct Embeds;

impl RewriteStage for Embeds {
    fn name(&self) -> &'static str {
        "embeds"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains("{{")
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        convert_embeds(text, cx)
    }
}

/// Double-bracket page links
pub struct Wikilinks;

impl RewriteStage for Wikilinks {
    fn name(&self) -> &'static str {
        "wikilinks"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains("[[")
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        convert_wikilinks(text, cx)
    }
}

/// Block references
pub struct BlockRefs;

impl RewriteStage for BlockRefs {
    fn name(&self) -> &'static str {
        "block-refs"
    }

    fn can_handle(&self, text: &str) -> bool {
        text.contains("((")
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        convert_block_refs(text, cx)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::LinkResolver;
    use std::collections::HashMap;

    /// Deterministic resolver: `page-N` / `block-N` in first-seen order
    #[derive(Debug, Default)]
    pub struct CountingResolver {
        pub pages: HashMap<String, String>,
        pub blocks: HashMap<String, String>,
    }

    impl LinkResolver for CountingResolver {
        fn page_id(&mut self, name: &str) -> String {
            let next = format!("page-{}", self.pages.len() + 1);
            self.pages.entry(name.to_string()).or_insert(next).clone()
        }

        fn block_id(&mut self, token: &str) -> String {
            let next = format!("block-{}", self.blocks.len() + 1);
            self.blocks.entry(token.to_string()).or_insert(next).clone()
        }
    }
}
