use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "loam")]
#[command(about = "loam - migrate an outliner markdown graph to org-roam")]
#[command(version)]
pub struct Cli {
    /// Root of the source graph (contains pages/, journals/, assets/)
    pub source: Option<PathBuf>,

    /// Directory to write the org-roam tree into
    pub output: Option<PathBuf>,

    /// Enable verbose logging and list warnings in the summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path; positional arguments override its roots
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Continue without asking when the source has no document folders
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_roots_and_flags() {
        let cli = Cli::try_parse_from(["loam", "graph", "out", "-v", "--yes"]).unwrap();
        assert_eq!(cli.source, Some(PathBuf::from("graph")));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(cli.verbose && cli.yes);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_config_only() {
        let cli = Cli::try_parse_from(["loam", "-C", "loam.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("loam.toml")));
        assert_eq!(cli.source, None);
    }
}
