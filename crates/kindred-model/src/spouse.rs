//! Spouse record definitions

use serde::{Deserialize, Serialize};

/// A marriage/partnership record, owned by exactly one [`Person`]
///
/// Spouses are never shared or deduplicated; two spouse lines with the same
/// name produce two records. Children are referenced by person identity,
/// in the order the parser attached them.
///
/// [`Person`]: crate::Person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spouse {
    /// Spouse display name
    pub name: String,

    /// Localized/alternate name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,

    /// Marriage date, kept as the source wrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,

    /// Divorce date, kept as the source wrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_date: Option<String>,

    /// Identities of children from this marriage, in attachment order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Spouse {
    /// Create a spouse with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            localized_name: None,
            marriage_date: None,
            divorce_date: None,
            children: Vec::new(),
        }
    }

    /// Attach a child identity, skipping duplicates
    pub fn add_child(&mut self, child_id: impl Into<String>) {
        let child_id = child_id.into();
        if !self.children.contains(&child_id) {
            self.children.push(child_id);
        }
    }
}
