//! Migration orchestrator
//!
//! The passes run strictly in sequence, each over the whole corpus:
//!
//! 1. scan: known names, identifiers, titles
//! 2. collect: referenced names with no source document
//! 3. stubs: placeholder documents for those names
//! 4. convert: every source document, minting identifiers for any name the
//!    earlier passes missed
//! 5. late stubs: placeholders for the names minted in step 4
//! 6. assets: fresh copy of the assets tree

use crate::assembler::convert_documents;
use crate::assets::copy_assets;
use crate::collector::collect_missing;
use crate::config::MigrationConfig;
use crate::context::{ConversionContext, RunReport};
use crate::error::{MigrationError, MigrationResult};
use crate::scanner::scan_existing;
use crate::stubs::{create_stub_pages, materialize_stubs};
use tracing::info;

/// One full rebuild of the output tree from the source corpus
pub struct Migration {
    config: MigrationConfig,
}

impl Migration {
    pub fn new(config: MigrationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Run every pass. Problems with single documents, stubs or the asset
    /// copy end up in the returned report; only an invalid configuration or
    /// an output root that cannot be created is an `Err`.
    pub fn run(&self) -> MigrationResult<RunReport> {
        self.config.validate()?;
        info!(
            source = %self.config.source_root.display(),
            output = %self.config.output_root.display(),
            "starting migration"
        );

        self.create_output_structure()?;

        let mut cx = ConversionContext::new();
        scan_existing(&self.config, &mut cx);
        collect_missing(&self.config, &mut cx);
        create_stub_pages(&self.config, &mut cx);
        convert_documents(&self.config, &mut cx);
        self.create_late_stubs(&mut cx);

        match copy_assets(&self.config) {
            Ok(copied) => cx.report.assets_copied = copied,
            Err(e) => cx.report.error(format!("Error copying assets: {e}")),
        }

        info!(
            files = cx.report.files_processed,
            stubs = cx.report.stubs_created,
            assets = cx.report.assets_copied,
            warnings = cx.report.warnings.len(),
            errors = cx.report.errors.len(),
            "migration finished"
        );
        Ok(cx.report)
    }

    fn create_output_structure(&self) -> MigrationResult<()> {
        let folders = self
            .config
            .document_folders
            .iter()
            .chain(std::iter::once(&self.config.assets_folder));

        for folder in folders {
            let path = self.config.output_folder(folder);
            std::fs::create_dir_all(&path).map_err(|e| MigrationError::io(&path, e))?;
        }
        Ok(())
    }

    fn create_late_stubs(&self, cx: &mut ConversionContext) {
        let late = cx.take_pending();
        if late.is_empty() {
            return;
        }
        info!(count = late.len(), "=== Creating stub pages for late references ===");
        materialize_stubs(&self.config, cx, late);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = MigrationConfig::new(dir.path(), dir.path().join("out"));
        config.document_folders.clear();

        let err = Migration::new(config).run().unwrap_err();
        assert!(matches!(err, MigrationError::Config(_)));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_empty_source_still_builds_structure() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let report = Migration::new(MigrationConfig::new(dir.path(), &out))
            .run()
            .unwrap();

        assert_eq!(report, RunReport::default());
        for folder in ["pages", "journals", "assets"] {
            assert!(out.join(folder).is_dir(), "{folder} missing");
        }
    }
}
