//! Family graph container
//!
//! [`FamilyData`] is the complete parse result: every person keyed by
//! identity, plus the identity of the first generation-1 person (the root).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::person::Person;

/// The parsed family graph
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FamilyData {
    /// All persons, keyed by identity
    pub persons: HashMap<String, Person>,

    /// Identity of the first generation-1 person encountered, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
}

impl FamilyData {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a person by identity
    pub fn get(&self, id: &str) -> Option<&Person> {
        self.persons.get(id)
    }

    /// Look up a person mutably by identity
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Person> {
        self.persons.get_mut(id)
    }

    /// The root person, if a generation-1 record was seen and still resolves
    pub fn root(&self) -> Option<&Person> {
        self.root_id.as_deref().and_then(|id| self.persons.get(id))
    }

    /// Insert a person under its own identity
    pub fn insert(&mut self, person: Person) {
        self.persons.insert(person.id.clone(), person);
    }

    /// Number of persons in the graph
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Iterate over all persons in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// Identities from `id` up to the root, starting with `id` itself.
    ///
    /// Follows parent back-references. Unknown identities end the walk;
    /// a visited set guards against parent cycles in malformed input.
    pub fn ancestry_path(&self, id: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id.to_string());

        while let Some(cur) = current {
            if !seen.insert(cur.clone()) {
                break;
            }
            match self.persons.get(&cur) {
                Some(person) => {
                    path.push(cur);
                    current = person.parent_id.clone();
                }
                None => break,
            }
        }

        path
    }
}
