//! Asset tree copy
//!
//! The output `assets` folder is always rebuilt from scratch: whatever was
//! there is removed, then the source tree is copied file by file.

use crate::config::MigrationConfig;
use crate::error::{MigrationError, MigrationResult};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Replace the output assets folder with a copy of the source one.
///
/// Returns the number of files copied; a missing source folder copies
/// nothing.
pub fn copy_assets(config: &MigrationConfig) -> MigrationResult<usize> {
    info!("=== Copying assets ===");
    let source = config.source_folder(&config.assets_folder);
    let target = config.output_folder(&config.assets_folder);

    if !source.is_dir() {
        info!(folder = %source.display(), "no assets folder to copy");
        return Ok(0);
    }

    if target.exists() {
        std::fs::remove_dir_all(&target).map_err(|e| MigrationError::io(&target, e))?;
    }

    let copied = copy_tree(&source, &target)?;
    info!(files = copied, "assets copied");
    Ok(copied)
}

fn copy_tree(source: &Path, target: &Path) -> MigrationResult<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| MigrationError::AssetCopy {
            path: e.path().unwrap_or(source).to_path_buf(),
            message: e.to_string(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| MigrationError::AssetCopy {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            })?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&destination)
                .map_err(|e| MigrationError::io(&destination, e))?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &destination)
                .map_err(|e| MigrationError::io(&destination, e))?;
            copied += 1;
            debug!(asset = %relative.display(), "copied asset");
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_copies_nested_tree_and_replaces_old_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("graph");
        let output = dir.path().join("out");
        fs::create_dir_all(source.join("assets/img")).unwrap();
        fs::write(source.join("assets/a.pdf"), b"%PDF").unwrap();
        fs::write(source.join("assets/img/b.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir_all(output.join("assets")).unwrap();
        fs::write(output.join("assets/stale.txt"), "old").unwrap();

        let config = MigrationConfig::new(&source, &output);
        assert_eq!(copy_assets(&config).unwrap(), 2);

        assert_eq!(fs::read(output.join("assets/img/b.png")).unwrap(), vec![0u8, 1, 2]);
        assert!(output.join("assets/a.pdf").is_file());
        assert!(!output.join("assets/stale.txt").exists());
    }

    #[test]
    fn test_missing_assets_folder_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = MigrationConfig::new(dir.path(), dir.path().join("out"));
        assert_eq!(copy_assets(&config).unwrap(), 0);
    }
}
