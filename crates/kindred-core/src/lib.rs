//! kindred-core - Plain-text genealogy charts, parsed
//!
//! Core library for kindred, turning line-oriented family chart text into a
//! [`kindred_model::FamilyData`] graph.
//!
//! # Example
//!
//! ```
//! let chart = "(1) 1 Ann (1950-)\n& Carol\n(2) 1 Bob (1975-)";
//!
//! let family = kindred_core::parse(chart).unwrap();
//! assert_eq!(family.len(), 2);
//!
//! let root = family.root().unwrap();
//! assert_eq!(root.name, "Ann");
//! assert_eq!(root.spouses[0].name, "Carol");
//! assert_eq!(root.spouses[0].children.len(), 1);
//! ```

pub mod diagnostics;
pub mod error;
pub mod parser;

// Re-export main types and functions
pub use diagnostics::{Diagnostic, DiagnosticKind, ParseReport, Severity};
pub use error::{ChartError, Result};
pub use parser::{parse, parse_with_report};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
