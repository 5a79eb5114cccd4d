//! Markup rewrite pipeline
//!
//! Markdown becomes org through a fixed sequence of text-to-text stages.
//! The order is load-bearing: each stage either hides its output from the
//! stages after it (via a [`Shield`]) or relies on an earlier stage having
//! already removed syntax that would confuse it.
//!
//! ```text
//! protect-existing   typed links and org heading lines already present
//! code-fences        held verbatim
//! headings           markers held verbatim
//! horizontal-rules
//! block-quotes
//! emphasis           code spans held verbatim
//! markdown-links     held verbatim
//! tables
//! release-lines      org heading lines come back before outline/linking
//! list-outline
//! embeds             ┐
//! wikilinks          ├ identifiers from the LinkResolver, held verbatim
//! block-refs         ┘
//! release-verbatim
//! ```

use crate::blocks::{BlockQuotes, CodeFences, Headings, HorizontalRules};
use crate::inline::Emphasis;
use crate::inline_links::MarkdownLinks;
use crate::outline::ListOutline;
use crate::resolve::{BlockRefs, Embeds, LinkResolver, Wikilinks};
use crate::shield::Shield;
use crate::tables::Tables;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

static TYPED_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[id:[^\]]+\](?:\[[^\]]+\])?\]").expect("typed link regex")
});

static ORG_HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*+[ \t]+.*$").expect("org heading line regex"));

/// Mutable state threaded through one document's rewrite
pub struct RewriteContext<'a> {
    /// Spans that stay hidden until the very last stage
    pub verbatim: Shield,
    /// Whole lines hidden only until outline conversion
    pub lines: Shield,
    pub resolver: &'a mut dyn LinkResolver,
    /// Extension used in `#+INCLUDE:` targets
    pub target_extension: &'a str,
}

impl<'a> RewriteContext<'a> {
    pub fn new(resolver: &'a mut dyn LinkResolver, target_extension: &'a str) -> Self {
        Self {
            verbatim: Shield::new("verbatim"),
            lines: Shield::new("lines"),
            resolver,
            target_extension,
        }
    }
}

/// One step of the rewrite pipeline
pub trait RewriteStage: Send + Sync {
    /// Stage name, used in trace output
    fn name(&self) -> &'static str;

    /// Cheap pre-check; a stage that cannot match anything is skipped
    fn can_handle(&self, _text: &str) -> bool {
        true
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String;
}

/// Hide syntax that is already org: typed `[[id:...]]` links for the whole
/// rewrite, heading lines until outline conversion.
pub struct ProtectExisting;

impl RewriteStage for ProtectExisting {
    fn name(&self) -> &'static str {
        "protect-existing"
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        let text = TYPED_LINK
            .replace_all(text, |caps: &Captures| cx.verbatim.hold(&caps[0]))
            .into_owned();
        ORG_HEADING_LINE
            .replace_all(&text, |caps: &Captures| cx.lines.hold(&caps[0]))
            .into_owned()
    }
}

/// Bring back protected heading lines so their links still resolve
pub struct ReleaseLines;

impl RewriteStage for ReleaseLines {
    fn name(&self) -> &'static str {
        "release-lines"
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        cx.lines.release(text)
    }
}

/// Restore everything held verbatim.
///
/// Heading lines protected inside a code fence only come back out here, so
/// the line shield is released a second time.
pub struct ReleaseVerbatim;

impl RewriteStage for ReleaseVerbatim {
    fn name(&self) -> &'static str {
        "release-verbatim"
    }

    fn apply(&self, text: &str, cx: &mut RewriteContext<'_>) -> String {
        cx.lines.release(&cx.verbatim.release(text))
    }
}

/// The standard stage order
pub fn default_stages() -> Vec<Box<dyn RewriteStage>> {
    vec![
        Box::new(ProtectExisting),
        Box::new(CodeFences),
        Box::new(Headings),
        Box::new(HorizontalRules),
        Box::new(BlockQuotes),
        Box::new(Emphasis),
        Box::new(MarkdownLinks),
        Box::new(Tables),
        Box::new(ReleaseLines),
        Box::new(ListOutline),
        Box::new(Embeds),
        Box::new(Wikilinks),
        Box::new(BlockRefs),
        Box::new(ReleaseVerbatim),
    ]
}

/// Rewrites one document body from outliner markdown to org
pub struct MarkupRewriter {
    stages: Vec<Box<dyn RewriteStage>>,
    target_extension: String,
}

impl MarkupRewriter {
    pub fn new(target_extension: impl Into<String>) -> Self {
        Self {
            stages: default_stages(),
            target_extension: target_extension.into(),
        }
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `text`
    pub fn rewrite(&self, text: &str, resolver: &mut dyn LinkResolver) -> String {
        let mut cx = RewriteContext::new(resolver, &self.target_extension);
        let mut text = text.replace("\r\n", "\n");

        for stage in &self.stages {
            if stage.can_handle(&text) {
                text = stage.apply(&text, &mut cx);
                trace!(stage = stage.name(), "applied rewrite stage");
            }
        }

        text
    }
}

impl Default for MarkupRewriter {
    fn default() -> Self {
        Self::new("org")
    }
}
