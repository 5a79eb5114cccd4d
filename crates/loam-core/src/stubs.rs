//! Pass 3: placeholder documents for referenced pages with no source

use crate::config::MigrationConfig;
use crate::context::ConversionContext;
use chrono::Local;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;

/// Body of a stub document
pub fn render_stub(id: Uuid, name: &str, tag: &str, created: &str) -> String {
    format!(
        ":PROPERTIES:\n:ID: {id}\n:END:\n#+TITLE: {name}\n#+FILETAGS: :{tag}:\n\n\
         This page was automatically created during migration on {created}.\n"
    )
}

/// Output path of the stub for `name`
pub fn stub_path(config: &MigrationConfig, name: &str) -> PathBuf {
    config
        .output_folder(&config.stub_folder)
        .join(format!("{name}.{}", config.target_extension))
}

/// Write one stub per name. A failed write is recorded and skipped.
pub fn materialize_stubs(
    config: &MigrationConfig,
    cx: &mut ConversionContext,
    names: BTreeSet<String>,
) {
    let created = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    for name in names {
        let id = cx.document_id(&name);
        let path = stub_path(config, &name);
        let body = render_stub(id, &name, &config.stub_tag, &created);

        let written = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|()| std::fs::write(&path, body));

        match written {
            Ok(()) => {
                cx.report.stubs_created += 1;
                debug!(page = %name, path = %path.display(), "created stub page");
            }
            Err(e) => cx
                .report
                .error(format!("Error creating stub page for '{name}': {e}")),
        }
    }
}

/// Drain the pending set built by the collector into stub documents
pub fn create_stub_pages(config: &MigrationConfig, cx: &mut ConversionContext) {
    info!("=== PASS 3: Creating stub pages ===");
    let pending = cx.take_pending();
    let count = pending.len();
    materialize_stubs(config, cx, pending);
    info!(requested = count, created = cx.report.stubs_created, "stub creation complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::IdKind;

    #[test]
    fn test_stub_body_layout() {
        let id = Uuid::nil();
        let body = render_stub(id, "Project Alpha", "stub", "2024-01-15 09:30:00");
        assert_eq!(
            body,
            ":PROPERTIES:\n:ID: 00000000-0000-0000-0000-000000000000\n:END:\n\
             #+TITLE: Project Alpha\n#+FILETAGS: :stub:\n\n\
             This page was automatically created during migration on 2024-01-15 09:30:00.\n"
        );
    }

    #[test]
    fn test_stubs_are_written_with_registry_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = MigrationConfig::new(dir.path().join("src"), dir.path().join("out"));
        let mut cx = ConversionContext::new();
        cx.mark_pending("Project Alpha");
        cx.mark_pending("Beta");

        create_stub_pages(&config, &mut cx);

        assert_eq!(cx.report.stubs_created, 2);
        assert!(cx.pending_names().is_empty());

        let id = cx.registry.get("Project Alpha", IdKind::Document).unwrap();
        let written = std::fs::read_to_string(stub_path(&config, "Project Alpha")).unwrap();
        assert!(written.contains(&format!(":ID: {id}")));
        assert!(written.contains("#+TITLE: Project Alpha"));
    }

    #[test]
    fn test_failed_write_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the stub folder should be
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("pages"), "not a directory").unwrap();

        let config = MigrationConfig::new(dir.path().join("src"), &out);
        let mut cx = ConversionContext::new();
        materialize_stubs(&config, &mut cx, BTreeSet::from(["Lost".to_string()]));

        assert_eq!(cx.report.stubs_created, 0);
        assert_eq!(cx.report.errors.len(), 1);
        assert!(cx.registry.contains("Lost", IdKind::Document));
    }
}
