//! Error types for the chart parser.

use thiserror::Error;

/// Result type for parse operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors that can abort a parse
///
/// The parser is total over its input: malformed lines degrade to
/// diagnostics, never to errors. The only fatal condition is a broken
/// internal invariant, which indicates a parser bug rather than bad input.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Parse state no longer matches the accumulated graph
    #[error("parser invariant broken at line {line}: {detail}")]
    Invariant { line: usize, detail: String },
}
