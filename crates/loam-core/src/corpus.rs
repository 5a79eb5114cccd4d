//! Source corpus listing
//!
//! Document folders are flat: only files directly inside `pages/` and
//! `journals/` with the source extension are documents. Listing order is
//! sorted so every run visits documents in the same order.

use crate::config::MigrationConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One convertible source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Document folder it lives in (`pages`, `journals`, ...)
    pub folder: String,
    /// File stem; the document's name
    pub name: String,
    pub path: PathBuf,
}

impl SourceDocument {
    /// File contents with CRLF line endings read as LF
    pub fn read(&self) -> std::io::Result<String> {
        let content = std::fs::read_to_string(&self.path)?;
        if content.contains('\r') {
            Ok(content.replace("\r\n", "\n"))
        } else {
            Ok(content)
        }
    }
}

/// Every source document under the configured folders, folder by folder.
/// Missing folders are skipped.
pub fn list_documents(config: &MigrationConfig) -> Vec<SourceDocument> {
    let mut documents = Vec::new();

    for folder in &config.document_folders {
        let dir = config.source_folder(folder);
        if !dir.is_dir() {
            tracing::debug!(folder = %dir.display(), "document folder missing, skipping");
            continue;
        }

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || !has_extension(entry.path(), &config.source_extension)
            {
                continue;
            }
            let Some(name) = entry.path().file_stem().and_then(|stem| stem.to_str()) else {
                tracing::warn!(path = %entry.path().display(), "skipping file with non UTF-8 name");
                continue;
            };

            documents.push(SourceDocument {
                folder: folder.clone(),
                name: name.to_string(),
                path: entry.path().to_path_buf(),
            });
        }
    }

    documents
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension)
}
