//! kindred-model - Family graph data types
//!
//! This crate provides the plain data types produced by the kindred chart
//! parser: individual [`Person`] records, their [`Spouse`] entries, and the
//! [`FamilyData`] graph that ties them together by identity string.
//!
//! The types carry no parsing logic; they are shared between the parser and
//! every downstream consumer (layout, search, UI state).

pub mod family;
pub mod person;
pub mod spouse;

// Re-export main types
pub use family::FamilyData;
pub use person::Person;
pub use spouse::Spouse;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
