//! Pass 2: find every referenced page that has no source document

use crate::config::MigrationConfig;
use crate::context::ConversionContext;
use crate::corpus::list_documents;
use loam_parser::{collect_references, normalize_page_name, Reference};
use tracing::{debug, info};

/// Queue a stub for every page name referenced anywhere but not known.
///
/// Block tokens referenced from embeds get their identifier here as well so
/// the whole corpus agrees on them before conversion starts. Like every
/// other captured reference they are also queued as page names.
pub fn collect_missing(config: &MigrationConfig, cx: &mut ConversionContext) {
    info!("=== PASS 2: Collecting missing page references ===");

    for document in list_documents(config) {
        let content = match document.read() {
            Ok(content) => content,
            Err(e) => {
                cx.report.error(format!(
                    "Error collecting references from {}: {e}",
                    document.path.display()
                ));
                continue;
            }
        };

        for reference in collect_references(&content) {
            match reference {
                Reference::Page(name) => {
                    if cx.mark_pending(&name) {
                        debug!(page = %name, source = %document.name, "found missing page reference");
                    }
                }
                Reference::Block(token) => {
                    cx.block_id(&token);
                    let name = normalize_page_name(&token);
                    if !name.is_empty() && cx.mark_pending(&name) {
                        debug!(block = %token, source = %document.name, "queued embedded block token");
                    }
                }
            }
        }
    }

    info!(missing = cx.pending_names().len(), "collection complete");
}
