//! Loam Core
//!
//! Filesystem half of the outliner-markdown to org-roam migration:
//! configuration, the run-wide identifier registry and the passes that turn
//! a source graph into an org-roam tree.
//!
//! ```no_run
//! use loam_core::{Migration, MigrationConfig};
//!
//! let config = MigrationConfig::new("~/graph", "~/org-roam");
//! let report = Migration::new(config).run()?;
//! println!("{} pages converted", report.files_processed);
//! # Ok::<(), loam_core::MigrationError>(())
//! ```

pub mod assembler;
pub mod assets;
pub mod collector;
pub mod config;
pub mod context;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod scanner;
pub mod stubs;

// Re-export main types for convenience
pub use assembler::{render_header, Document, DocumentAssembler};
pub use config::MigrationConfig;
pub use context::{ConversionContext, RunReport};
pub use error::{MigrationError, MigrationResult};
pub use pipeline::Migration;
pub use registry::{IdKind, IdRegistry};
pub use stubs::render_stub;
