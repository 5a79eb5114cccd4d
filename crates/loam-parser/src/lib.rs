//! Loam Markup Parser
//!
//! Text-level half of the outliner-markdown to org-roam migration.
//! This crate provides:
//! - Page-name normalization shared by every pass
//! - Front-matter and inline `key:: value` property extraction
//! - The reference pattern battery used to discover linked pages
//! - An ordered rewrite pipeline turning markdown into org markup
//!
//! Nothing here touches the filesystem. Identifier lookups go through the
//! [`LinkResolver`] trait, which the run context in `loam-core` implements.

pub mod blocks;
pub mod error;
pub mod frontmatter;
pub mod inline;
pub mod inline_links;
pub mod links;
pub mod names;
pub mod outline;
pub mod postfix;
pub mod resolve;
pub mod rewriter;
pub mod shield;
pub mod tables;
pub mod types;

// Re-export main types for convenience
pub use error::ParserError;
pub use frontmatter::{extract_properties, PropertyExtraction};
pub use inline_links::canonicalize_asset_paths;
pub use links::{collect_references, LinkTarget, Reference};
pub use names::{dashify_dates, normalize_page_name, NAMESPACE_SEPARATOR};
pub use outline::{OutlineNode, MAX_OUTLINE_DEPTH};
pub use postfix::split_table_captions;
pub use resolve::LinkResolver;
pub use rewriter::{MarkupRewriter, RewriteContext, RewriteStage};
pub use shield::Shield;
pub use types::{Properties, PropertyValue, TaskState};
