//! Source graph checks run before any output is written

use colored::Colorize;
use loam_core::MigrationConfig;
use std::io::IsTerminal;

/// What the source root looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCheck {
    /// Source root does not exist. The run cannot start.
    Missing,
    /// Root exists but has none of the document folders. The user decides.
    NoDocumentFolders,
    Ready,
}

pub fn check_source(config: &MigrationConfig) -> SourceCheck {
    if !config.source_root.is_dir() {
        SourceCheck::Missing
    } else if !config.has_document_folders() {
        SourceCheck::NoDocumentFolders
    } else {
        SourceCheck::Ready
    }
}

/// Ask whether to go on anyway. Default is no; without a terminal to ask
/// on, the answer is no.
pub fn confirm_continue(config: &MigrationConfig) -> bool {
    eprintln!(
        "{} {} contains none of: {}",
        "Warning:".yellow().bold(),
        config.source_root.display(),
        config.document_folders.join(", ")
    );

    if !std::io::stdin().is_terminal() {
        return false;
    }

    dialoguer::Confirm::new()
        .with_prompt("Continue anyway?")
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_states() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let missing = MigrationConfig::new(dir.path().join("nope"), &out);
        assert_eq!(check_source(&missing), SourceCheck::Missing);

        let bare = MigrationConfig::new(dir.path(), &out);
        assert_eq!(check_source(&bare), SourceCheck::NoDocumentFolders);

        std::fs::create_dir(dir.path().join("pages")).unwrap();
        assert_eq!(check_source(&bare), SourceCheck::Ready);
    }
}
