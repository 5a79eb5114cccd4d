//! Run-wide conversion state
//!
//! One [`ConversionContext`] is threaded through every pass of a run. It
//! owns the identifier registry, the set of names that exist in the source
//! corpus, the names still waiting for a stub, the title map and the running
//! report.

use crate::registry::{IdKind, IdRegistry};
use loam_parser::LinkResolver;
use std::collections::{BTreeSet, HashMap};
use tracing::{error, warn};
use uuid::Uuid;

/// Counts and recorded problems of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub files_processed: usize,
    pub stubs_created: usize,
    pub assets_copied: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl RunReport {
    /// Record and log a recoverable problem
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.warnings.push(message);
    }

    /// Record and log a failed item
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{message}");
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Mutable state shared by the scan, collect, stub and convert passes
#[derive(Debug, Default)]
pub struct ConversionContext {
    pub registry: IdRegistry,
    /// Names present in the source corpus; fixed once scanning is done
    known: BTreeSet<String>,
    /// Referenced names with no document yet
    pending: BTreeSet<String>,
    /// Best known title per name
    titles: HashMap<String, String>,
    pub report: RunReport,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document found in the source corpus
    pub fn register_known(&mut self, name: &str, title: impl Into<String>) -> Uuid {
        self.known.insert(name.to_string());
        self.titles.insert(name.to_string(), title.into());
        self.registry.get_or_create(name, IdKind::Document)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn known_names(&self) -> &BTreeSet<String> {
        &self.known
    }

    /// Scanner-derived title for a name
    pub fn title_for(&self, name: &str) -> Option<&str> {
        self.titles.get(name).map(String::as_str)
    }

    /// Queue `name` for a stub unless it exists in the corpus.
    ///
    /// Returns true when the name was newly queued.
    pub fn mark_pending(&mut self, name: &str) -> bool {
        if self.known.contains(name) {
            return false;
        }
        self.pending.insert(name.to_string())
    }

    pub fn pending_names(&self) -> &BTreeSet<String> {
        &self.pending
    }

    /// Hand every pending name to the caller and start a fresh set
    pub fn take_pending(&mut self) -> BTreeSet<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn document_id(&mut self, name: &str) -> Uuid {
        self.registry.get_or_create(name, IdKind::Document)
    }

    pub fn block_id(&mut self, token: &str) -> Uuid {
        self.registry.get_or_create(token, IdKind::Block)
    }
}

impl LinkResolver for ConversionContext {
    /// Names first seen here get an identifier on the spot and are queued
    /// for the late stub sweep.
    fn page_id(&mut self, name: &str) -> String {
        if !self.registry.contains(name, IdKind::Document) && self.mark_pending(name) {
            self.report
                .warn(format!("Found new reference to '{name}' during conversion"));
        }
        self.document_id(name).to_string()
    }

    fn block_id(&mut self, token: &str) -> String {
        ConversionContext::block_id(self, token).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_are_never_pending() {
        let mut cx = ConversionContext::new();
        cx.register_known("Existing", "Existing Page");

        assert!(!cx.mark_pending("Existing"));
        assert!(cx.mark_pending("Missing"));
        assert!(!cx.mark_pending("Missing"));
        assert_eq!(cx.pending_names().len(), 1);
        assert_eq!(cx.title_for("Existing"), Some("Existing Page"));
    }

    #[test]
    fn test_take_pending_drains() {
        let mut cx = ConversionContext::new();
        cx.mark_pending("b");
        cx.mark_pending("a");

        let drained: Vec<_> = cx.take_pending().into_iter().collect();
        assert_eq!(drained, vec!["a", "b"]);
        assert!(cx.pending_names().is_empty());
    }

    #[test]
    fn test_resolver_reuses_scanned_identifier() {
        let mut cx = ConversionContext::new();
        let id = cx.register_known("Home", "Home");

        assert_eq!(cx.page_id("Home"), id.to_string());
        assert!(cx.pending_names().is_empty());
        assert!(cx.report.warnings.is_empty());
    }

    #[test]
    fn test_resolver_queues_late_references() {
        let mut cx = ConversionContext::new();
        let first = cx.page_id("Surprise");
        let second = cx.page_id("Surprise");

        assert_eq!(first, second);
        assert!(cx.pending_names().contains("Surprise"));
        assert_eq!(cx.report.warnings.len(), 1);
    }

    #[test]
    fn test_resolver_block_ids_are_stable() {
        let mut cx = ConversionContext::new();
        let first = LinkResolver::block_id(&mut cx, "65ab-01");
        let second = LinkResolver::block_id(&mut cx, "65ab-01");
        assert_eq!(first, second);
        assert_eq!(cx.registry.len(IdKind::Block), 1);
    }
}
