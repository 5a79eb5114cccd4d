//! Pass 4: convert every source document
//!
//! Per document: split off properties, pick a title, rewrite the body,
//! prepend the org-roam header and write the result. A failure in one
//! document is recorded and the pass moves on to the next.

use crate::config::MigrationConfig;
use crate::context::ConversionContext;
use crate::corpus::{list_documents, SourceDocument};
use crate::error::{MigrationError, MigrationResult};
use loam_parser::{
    canonicalize_asset_paths, dashify_dates, extract_properties, split_table_captions,
    MarkupRewriter, Properties,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// A source document with its properties split off
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub properties: Properties,
    pub title: String,
    /// Markdown body with property lines removed
    pub body: String,
}

impl Document {
    /// Split `content` into properties and body and settle the title:
    /// explicit `title` property, then the scanned title, then the name.
    /// Property problems are recorded as warnings.
    pub fn parse(name: &str, content: &str, cx: &mut ConversionContext) -> Self {
        let extraction = extract_properties(content);
        for warning in extraction.warnings {
            cx.report.warn(format!("{name}: {warning}"));
        }

        let title = extraction
            .properties
            .title()
            .or_else(|| cx.title_for(name).map(str::to_string))
            .unwrap_or_else(|| name.to_string());

        Self {
            name: name.to_string(),
            properties: extraction.properties,
            title,
            body: extraction.body,
        }
    }
}

/// `:PROPERTIES:` drawer, title and optional filetags
pub fn render_header(id: Uuid, properties: &Properties, title: &str) -> String {
    let mut header = format!(":PROPERTIES:\n:ID: {id}\n");
    for (key, value) in properties.iter() {
        if key.eq_ignore_ascii_case("id") || key.eq_ignore_ascii_case("title") {
            continue;
        }
        header.push_str(&format!(":{}: {}\n", key.to_uppercase(), value.render()));
    }
    header.push_str(":END:\n");
    header.push_str(&format!("#+TITLE: {title}\n"));
    if let Some(tags) = properties.get("tags") {
        header.push_str(&format!("#+FILETAGS: {}\n", tags.render_filetags()));
    }
    header
}

/// Turns parsed documents into finished org text
pub struct DocumentAssembler {
    rewriter: MarkupRewriter,
}

impl DocumentAssembler {
    pub fn new(config: &MigrationConfig) -> Self {
        Self {
            rewriter: MarkupRewriter::new(config.target_extension.clone()),
        }
    }

    /// Full org text for one document
    pub fn assemble(&self, document: &Document, cx: &mut ConversionContext) -> String {
        let body = canonicalize_asset_paths(&document.body);
        let body = self.rewriter.rewrite(&body, cx);
        let id = cx.document_id(&document.name);

        let mut output = render_header(id, &document.properties, &document.title);
        output.push('\n');
        output.push_str(body.trim());
        output.push('\n');

        let output = split_table_captions(&output);
        dashify_dates(&output).into_owned()
    }
}

/// Output path for a source document; journal dates get dashes
pub fn output_path(config: &MigrationConfig, source: &SourceDocument) -> PathBuf {
    config
        .output_folder(&source.folder)
        .join(format!("{}.{}", dashify_dates(&source.name), config.target_extension))
}

fn convert_one(
    config: &MigrationConfig,
    assembler: &DocumentAssembler,
    source: &SourceDocument,
    cx: &mut ConversionContext,
) -> MigrationResult<PathBuf> {
    let content = source.read().map_err(|e| MigrationError::io(&source.path, e))?;
    let document = Document::parse(&source.name, &content, cx);
    let output = assembler.assemble(&document, cx);

    let path = output_path(config, source);
    write_file(&path, &output)?;
    Ok(path)
}

fn write_file(path: &Path, content: &str) -> MigrationResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MigrationError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| MigrationError::io(path, e))
}

/// Convert every source document into the output tree
pub fn convert_documents(config: &MigrationConfig, cx: &mut ConversionContext) {
    info!("=== PASS 4: Converting pages ===");
    let assembler = DocumentAssembler::new(config);

    for source in list_documents(config) {
        match convert_one(config, &assembler, &source, cx) {
            Ok(path) => {
                cx.report.files_processed += 1;
                debug!(page = %source.name, path = %path.display(), "converted page");
            }
            Err(e) => cx
                .report
                .error(format!("Error converting {}: {e}", source.path.display())),
        }
    }

    info!(converted = cx.report.files_processed, "conversion complete");
}
