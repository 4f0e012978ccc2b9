//! kindred CLI - Command-line interface library
//!
//! This library provides the CLI functionality for kindred:
//! - Parse: Convert a chart file to a family graph (text or JSON)
//! - Check: Report parse diagnostics for a chart file
//! - Stats: Print summary statistics for a chart file
//!
//! # Binary Usage
//!
//! ```bash
//! # Dump the parsed graph as JSON
//! kindred parse family.txt --format json
//!
//! # Report skipped lines, merges, and unattached children
//! kindred check family.txt --strict
//!
//! # Quick summary
//! kindred stats family.txt
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{check_command, parse_command, stats_command};
pub use app::{run_cli, OutputFormat};
