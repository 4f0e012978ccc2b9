//! Person record definitions
//!
//! A [`Person`] is one individual in the chart. Its identity string is
//! assigned once by the parser and never changes; all cross-references
//! (parent, spouse children) use identity strings, never owned pointers.

use serde::{Deserialize, Serialize};

use crate::spouse::Spouse;

/// An individual in the family tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Stable identity, unique within one parse
    pub id: String,

    /// Generation number (root generation = 1)
    pub generation: u32,

    /// Original sibling index label as written in the source (e.g. "5a")
    pub index_label: String,

    /// Display name
    pub name: String,

    /// Localized/alternate name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,

    /// Aliases, in the order they appeared in the source
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// House/clan name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,

    /// Birth year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,

    /// Death year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,

    /// Memorial date, kept as the source wrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memorial_date: Option<String>,

    /// Religious name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religious_name: Option<String>,

    /// Marriages/partnerships, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouses: Vec<Spouse>,

    /// Identity of the parent person, if any (back-reference, not ownership)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Person {
    /// Create a person with the fields known at record time
    pub fn new(
        id: impl Into<String>,
        generation: u32,
        index_label: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            generation,
            index_label: index_label.into(),
            name: name.into(),
            localized_name: None,
            aliases: Vec::new(),
            house: None,
            birth_year: None,
            death_year: None,
            memorial_date: None,
            religious_name: None,
            spouses: Vec::new(),
            parent_id: None,
        }
    }

    /// Append an alias
    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.push(alias.into());
    }

    /// Append a spouse record
    pub fn add_spouse(&mut self, spouse: Spouse) {
        self.spouses.push(spouse);
    }

    /// The most recently added spouse, if any
    pub fn last_spouse_mut(&mut self) -> Option<&mut Spouse> {
        self.spouses.last_mut()
    }

    /// Check whether this person has any spouse recorded
    pub fn has_spouses(&self) -> bool {
        !self.spouses.is_empty()
    }
}
