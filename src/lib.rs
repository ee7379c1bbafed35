//! apidrift - API surface drift detection tool
//!
//! This library provides the core functionality for detecting when the
//! public API surface of a Python source file has changed between two
//! versions, and for rendering the change-set into a report that flags
//! stale documentation.

pub mod cli;
pub mod diff;
pub mod extract;
pub mod repo;
pub mod report;

/// Re-export commonly used types
pub use diff::{diff, ChangeKind, ChangeRecord};
pub use extract::{ApiExtractor, ApiSurface, Declaration, ExtractError, Signature};
pub use repo::Repository;
pub use report::{ConsoleSink, Report, ReportSink};

/// Application-wide error type
pub use anyhow::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "apidrift";
