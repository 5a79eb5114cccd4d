use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use loam_core::MigrationConfig;

/// Build the run configuration: config file (if given), then the
/// positional roots and flags on top.
pub fn load(cli: &Cli) -> Result<MigrationConfig> {
    let mut config = match &cli.config {
        Some(path) => MigrationConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => {
            if cli.source.is_none() || cli.output.is_none() {
                bail!("source and output directories are required (or pass --config)");
            }
            MigrationConfig::default()
        }
    };

    if let Some(source) = &cli.source {
        config.source_root = source.clone();
    }
    if let Some(output) = &cli.output {
        config.output_root = output.clone();
    }
    config.verbose |= cli.verbose;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_roots_are_required_without_config() {
        let cli = Cli::try_parse_from(["loam", "graph"]).unwrap();
        assert!(load(&cli).is_err());
    }

    #[test]
    fn test_positional_roots_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "source_root = \"from-file\"\noutput_root = \"out-file\"\nstub_tag = \"todo-page\""
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["loam", "-C", &path, "graph", "-v"]).unwrap();
        let config = load(&cli).unwrap();
        assert_eq!(config.source_root, PathBuf::from("graph"));
        assert_eq!(config.output_root, PathBuf::from("out-file"));
        assert_eq!(config.stub_tag, "todo-page");
        assert!(config.verbose);
    }
}
