use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use loam_cli::interrupt::interrupted;
use loam_cli::logging::init_logging;
use loam_cli::summary::render_summary;
use loam_cli::validate::{check_source, confirm_continue, SourceCheck};
use loam_cli::{config, Cli};
use loam_core::Migration;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = config::load(&cli)?;
    init_logging(config.verbose);

    match check_source(&config) {
        SourceCheck::Missing => {
            error!(source = %config.source_root.display(), "source directory does not exist");
            eprintln!(
                "{} source directory {} does not exist",
                "Error:".red().bold(),
                config.source_root.display()
            );
            return Ok(ExitCode::FAILURE);
        }
        SourceCheck::NoDocumentFolders => {
            warn!(source = %config.source_root.display(), "no document folders found");
            if !cli.yes && !confirm_continue(&config) {
                info!("migration cancelled");
                return Ok(ExitCode::FAILURE);
            }
        }
        SourceCheck::Ready => {}
    }

    let migration = Migration::new(config.clone());
    let task = tokio::task::spawn_blocking(move || migration.run());

    tokio::select! {
        joined = task => {
            let report = joined.context("migration task panicked")??;
            print!("{}", render_summary(&report, &config, Local::now()));
            Ok(ExitCode::SUCCESS)
        }
        () = interrupted() => {
            warn!("migration interrupted by user");
            eprintln!("\n{}", "Migration interrupted by user".yellow());
            // The blocking pass cannot be cancelled; leave without waiting on it
            std::process::exit(1);
        }
    }
}
