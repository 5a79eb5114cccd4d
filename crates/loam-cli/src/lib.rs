//! `loam` command-line front end: argument parsing, logging setup, source
//! checks and the end-of-run summary. The migration itself lives in
//! `loam-core`.

pub mod cli;
pub mod config;
pub mod interrupt;
pub mod logging;
pub mod summary;
pub mod validate;

pub use cli::Cli;
