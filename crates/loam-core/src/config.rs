//! Migration configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! source_root = "~/graphs/work"
//! output_root = "~/org/roam"
//! target_extension = "org"
//! stub_tag = "stub"
//! ```

use crate::error::{MigrationError, MigrationResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where to read from, where to write to, and how output files are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Root of the outliner graph
    pub source_root: PathBuf,
    /// Root of the org-roam tree to (re)build
    pub output_root: PathBuf,
    /// Folders holding convertible documents, relative to both roots
    pub document_folders: Vec<String>,
    /// Folder copied verbatim, relative to both roots
    pub assets_folder: String,
    /// Extension of source documents, without the dot
    pub source_extension: String,
    /// Extension of written documents, without the dot
    pub target_extension: String,
    /// Output folder that receives stub documents
    pub stub_folder: String,
    /// Tag carried by every stub document
    pub stub_tag: String,
    /// List individual warnings in the summary
    pub verbose: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            output_root: PathBuf::from("org-roam"),
            document_folders: vec!["pages".to_string(), "journals".to_string()],
            assets_folder: "assets".to_string(),
            source_extension: "md".to_string(),
            target_extension: "org".to_string(),
            stub_folder: "pages".to_string(),
            stub_tag: "stub".to_string(),
            verbose: false,
        }
    }
}

impl MigrationConfig {
    /// Default settings for the given roots
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> MigrationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MigrationError::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| MigrationError::config(format!("{}: {e}", path.display())))
    }

    /// Check the settings are usable before any file is touched
    pub fn validate(&self) -> MigrationResult<()> {
        if self.document_folders.is_empty() {
            return Err(MigrationError::config("document_folders must not be empty"));
        }
        if self.document_folders.iter().any(|folder| folder.trim().is_empty()) {
            return Err(MigrationError::config("document_folders contains an empty name"));
        }
        if !self.document_folders.contains(&self.stub_folder) {
            return Err(MigrationError::config(format!(
                "stub_folder {:?} is not one of the document folders",
                self.stub_folder
            )));
        }
        for (key, extension) in [
            ("source_extension", &self.source_extension),
            ("target_extension", &self.target_extension),
        ] {
            if extension.is_empty() {
                return Err(MigrationError::config(format!("{key} must not be empty")));
            }
            if extension.contains('.') {
                return Err(MigrationError::config(format!(
                    "{key} must be given without a dot (got {extension:?})"
                )));
            }
        }
        if self.stub_tag.trim().is_empty() {
            return Err(MigrationError::config("stub_tag must not be empty"));
        }
        Ok(())
    }

    /// Source folder for a document folder name
    pub fn source_folder(&self, folder: &str) -> PathBuf {
        self.source_root.join(folder)
    }

    /// Output folder for a document folder name
    pub fn output_folder(&self, folder: &str) -> PathBuf {
        self.output_root.join(folder)
    }

    /// Whether any configured document folder exists under the source root
    pub fn has_document_folders(&self) -> bool {
        self.document_folders
            .iter()
            .any(|folder| self.source_folder(folder).is_dir())
    }
}
