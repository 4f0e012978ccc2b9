//! Genealogy Chart Parser
//!
//! This module parses line-oriented family chart text into a
//! `kindred_model::FamilyData` graph.
//!
//! # Supported Syntax
//!
//! - Person record: `(2) 3a Maria Tan (1901-1980) zh 陈玛丽`
//!   (generation in parentheses, sibling index with optional
//!   disambiguation letter, name, optional year range, optional
//!   trailing localized-name annotation)
//! - Spouse record: `& Tan Ah Kow (1899-1960)`
//! - Metadata: `alias:`, `house:`, `zh:`, `memorial:`, `religious:`,
//!   `m:` (marriage date), `div:` (divorce date)
//! - Lines containing `====` are section dividers and are skipped
//! - A provenance stamp glued to the front of a line
//!   (`chart printed 1998(1) 1 Ann`) is stripped before classification
//!
//! The parser is lenient: lines matching none of these shapes contribute
//! nothing and are recorded in the [`ParseReport`].
//!
//! # Example
//!
//! ```
//! use kindred_core::parser;
//!
//! let input = "(1) 1 Ann (1950-)\n& Carol\n(2) 1 Bob (1975-)";
//!
//! let (family, report) = parser::parse_with_report(input).unwrap();
//! assert_eq!(family.len(), 2);
//! assert!(report.is_empty());
//! ```

use regex::Regex;

use kindred_model::{FamilyData, Person, Spouse};

use crate::diagnostics::ParseReport;
use crate::error::{ChartError, Result};

/// Identity component standing in for "no parent"
const ROOT_MARKER: &str = "r";

/// Literal marking a section-divider line
const SECTION_MARKER: &str = "====";

/// A classified chart line
#[derive(Debug, Clone, PartialEq)]
enum Record {
    /// A new-person record: generation, sibling index, free text
    Person {
        generation: u32,
        index: String,
        text: String,
    },
    /// A spouse record: free text after the `&` marker
    Spouse { text: String },
    /// A labeled metadata record
    Metadata { kind: MetadataKind, value: String },
    /// Anything else
    Ignored,
}

/// Which labeled metadata prefix matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataKind {
    Alias,
    House,
    Localized,
    Memorial,
    Religious,
    Marriage,
    Divorce,
}

impl MetadataKind {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "alias" => Some(MetadataKind::Alias),
            "house" => Some(MetadataKind::House),
            "zh" => Some(MetadataKind::Localized),
            "memorial" => Some(MetadataKind::Memorial),
            "religious" => Some(MetadataKind::Religious),
            "m" => Some(MetadataKind::Marriage),
            "div" => Some(MetadataKind::Divorce),
            _ => None,
        }
    }
}

/// Compiled line patterns, built once per parse
struct Patterns {
    provenance: Regex,
    person: Regex,
    spouse: Regex,
    metadata: Regex,
    year_range: Regex,
    parenthetical: Regex,
    localized_suffix: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            provenance: Regex::new(r"(?i)^.*?\bchart\s+(?:printed|updated|created)\s+\d{4}")
                .unwrap(),
            person: Regex::new(r"^\((\d+)\)\s*(\d+[a-z]?)\s+(.+)$").unwrap(),
            spouse: Regex::new(r"^&\s*(.+)$").unwrap(),
            // "memorial" before "m": alternation is first-match
            metadata: Regex::new(r"(?i)^(alias|house|zh|memorial|religious|div|m)\s*:\s*(.*)$")
                .unwrap(),
            year_range: Regex::new(
                r"\(\s*(?:(?:ca\.?|[<>])\s*)?(\d{4})?\s*-\s*(?:(?:ca\.?|[<>])\s*)?(\d{4})?\s*\)",
            )
            .unwrap(),
            parenthetical: Regex::new(r"\s*\([^)]*\)").unwrap(),
            localized_suffix: Regex::new(r"(?i)(?:^|\s)zh\s+(\S+)\s*$").unwrap(),
        }
    }

    /// Strip any provenance stamp and surrounding whitespace.
    ///
    /// Returns `None` for lines that contribute nothing structurally:
    /// blank lines and section dividers.
    fn normalize(&self, raw: &str) -> Option<String> {
        let rest = match self.provenance.find(raw) {
            Some(m) => &raw[m.end()..],
            None => raw,
        };
        let trimmed = rest.trim();
        if trimmed.is_empty() || trimmed.contains(SECTION_MARKER) {
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Classify a normalized line. Order matters: person, then spouse,
    /// then metadata; first match wins.
    fn classify(&self, line: &str) -> Record {
        if let Some(caps) = self.person.captures(line) {
            if let Ok(generation) = caps[1].parse::<u32>() {
                return Record::Person {
                    generation,
                    index: caps[2].to_string(),
                    text: caps[3].to_string(),
                };
            }
        }

        if let Some(caps) = self.spouse.captures(line) {
            return Record::Spouse {
                text: caps[1].to_string(),
            };
        }

        if let Some(caps) = self.metadata.captures(line) {
            if let Some(kind) = MetadataKind::from_label(&caps[1]) {
                return Record::Metadata {
                    kind,
                    value: caps[2].to_string(),
                };
            }
        }

        Record::Ignored
    }

    /// Pull an optional birth/death year pair out of a parenthesized range.
    ///
    /// Approximation markers (`<`, `>`, `ca`) are stripped before parsing;
    /// either side may be absent. Text without a dashed parenthetical
    /// yields both absent.
    fn extract_years(&self, text: &str) -> (Option<i32>, Option<i32>) {
        match self.year_range.captures(text) {
            Some(caps) => (
                caps.get(1).and_then(|m| m.as_str().parse().ok()),
                caps.get(2).and_then(|m| m.as_str().parse().ok()),
            ),
            None => (None, None),
        }
    }

    /// Produce a clean display name: all parentheticals removed, any
    /// trailing localized-name annotation removed, result trimmed.
    fn extract_name(&self, text: &str) -> String {
        let no_parens = self.parenthetical.replace_all(text, "");
        let cleaned = self.localized_suffix.replace(&no_parens, "");
        cleaned.trim().to_string()
    }

    /// The token of a trailing localized-name annotation, if present
    fn extract_localized(&self, text: &str) -> Option<String> {
        let no_parens = self.parenthetical.replace_all(text, "");
        self.localized_suffix
            .captures(&no_parens)
            .map(|caps| caps[1].to_string())
    }
}

/// Collapse whitespace and case for identity-merge comparison
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Sibling index with any trailing disambiguation letter stripped
fn base_index(index: &str) -> &str {
    index
        .strip_suffix(|c: char| c.is_ascii_lowercase())
        .unwrap_or(index)
}

/// Chart parser: a single forward pass over the lines
struct Parser {
    patterns: Patterns,
    /// Accumulated graph
    family: FamilyData,
    /// Identity of the most recently established person
    focus: Option<String>,
    /// Owner of the focus spouse. The focus spouse is always the last
    /// spouse appended to its owner; person records clear this.
    focus_spouse_owner: Option<String>,
    /// Open ancestors as (generation, identity), innermost last
    ancestry: Vec<(u32, String)>,
    /// Collected non-fatal events
    report: ParseReport,
    /// 1-indexed line currently being processed
    line_no: usize,
}

impl Parser {
    fn new() -> Self {
        Self {
            patterns: Patterns::new(),
            family: FamilyData::new(),
            focus: None,
            focus_spouse_owner: None,
            ancestry: Vec::new(),
            report: ParseReport::new(),
            line_no: 0,
        }
    }

    /// Parse the entire chart
    fn run(mut self, text: &str) -> Result<(FamilyData, ParseReport)> {
        // Normalize line endings
        let text = text.replace("\r\n", "\n");

        for (idx, line) in text.lines().enumerate() {
            self.line_no = idx + 1;
            self.process_line(line)?;
        }

        Ok((self.family, self.report))
    }

    /// Process a single raw line
    fn process_line(&mut self, raw: &str) -> Result<()> {
        let Some(line) = self.patterns.normalize(raw) else {
            return Ok(());
        };

        match self.patterns.classify(&line) {
            Record::Person {
                generation,
                index,
                text,
            } => self.process_person(generation, &index, &text),
            Record::Spouse { text } => self.process_spouse(&text),
            Record::Metadata { kind, value } => self.process_metadata(kind, &value),
            Record::Ignored => {
                self.report.skipped(self.line_no, "unrecognized line shape");
                Ok(())
            }
        }
    }

    /// Handle a new-person record: resolve its identity, create or merge,
    /// and attach it under its parent's most recent spouse.
    fn process_person(&mut self, generation: u32, index: &str, text: &str) -> Result<()> {
        // The nearest still-open ancestor with a strictly smaller
        // generation number is the parent.
        while matches!(self.ancestry.last(), Some((g, _)) if *g >= generation) {
            self.ancestry.pop();
        }
        let parent_id = self.ancestry.last().map(|(_, id)| id.clone());

        let canonical = format!(
            "{}-{}-{}",
            parent_id.as_deref().unwrap_or(ROOT_MARKER),
            generation,
            base_index(index)
        );

        let name = self.patterns.extract_name(text);
        let (birth_year, death_year) = self.patterns.extract_years(text);
        let localized_name = self.patterns.extract_localized(text);

        let (id, is_new) = self.resolve_identity(&canonical, &name);

        if is_new {
            if id != canonical {
                self.report.collision(
                    self.line_no,
                    format!("slot {} held by a different name, created {}", canonical, id),
                );
            }

            let mut person = Person::new(id.clone(), generation, index, name);
            person.birth_year = birth_year;
            person.death_year = death_year;
            person.localized_name = localized_name;
            person.parent_id = parent_id.clone();
            self.family.insert(person);

            // The first generation-1 person is the root, permanently
            if generation == 1 && self.family.root_id.is_none() {
                self.family.root_id = Some(id.clone());
            }

            if let Some(pid) = parent_id {
                let line = self.line_no;
                let parent = self.family.get_mut(&pid).ok_or_else(|| ChartError::Invariant {
                    line,
                    detail: format!("parent {} missing from graph", pid),
                })?;
                match parent.last_spouse_mut() {
                    Some(spouse) => spouse.add_child(id.clone()),
                    None => self.report.unattached(
                        self.line_no,
                        format!("{} has a parent with no recorded spouse", id),
                    ),
                }
            }
        } else {
            // Split record: the existing person is authoritative,
            // the new line only re-enters it as focus
            self.report
                .merged(self.line_no, format!("record merged into {}", id));
        }

        self.ancestry.push((generation, id.clone()));
        self.focus = Some(id);
        self.focus_spouse_owner = None;
        Ok(())
    }

    /// Resolve a canonical slot to a final identity.
    ///
    /// Probes the canonical id, then `_2`, `_3`, ... in order. The first
    /// free slot claims a new identity; an occupied slot with a matching
    /// normalized name is a merge. O(k) where k is the number of prior
    /// collisions in the slot; terminates because at most k slots are
    /// occupied.
    fn resolve_identity(&self, canonical: &str, name: &str) -> (String, bool) {
        let normalized = normalize_name(name);
        let mut candidate = canonical.to_string();
        let mut suffix = 2usize;

        loop {
            match self.family.get(&candidate) {
                None => return (candidate, true),
                Some(existing) if normalize_name(&existing.name) == normalized => {
                    return (candidate, false);
                }
                Some(_) => {
                    candidate = format!("{}_{}", canonical, suffix);
                    suffix += 1;
                }
            }
        }
    }

    /// Handle a spouse record: append to the focus person
    fn process_spouse(&mut self, text: &str) -> Result<()> {
        let Some(focus_id) = self.focus.clone() else {
            self.report
                .skipped(self.line_no, "spouse record before any person record");
            return Ok(());
        };

        let mut spouse = Spouse::new(self.patterns.extract_name(text));
        spouse.localized_name = self.patterns.extract_localized(text);

        let line = self.line_no;
        let person = self
            .family
            .get_mut(&focus_id)
            .ok_or_else(|| ChartError::Invariant {
                line,
                detail: format!("focus person {} missing from graph", focus_id),
            })?;
        person.add_spouse(spouse);
        self.focus_spouse_owner = Some(focus_id);
        Ok(())
    }

    /// Handle a metadata record: dispatch to the focus person or spouse
    fn process_metadata(&mut self, kind: MetadataKind, value: &str) -> Result<()> {
        let value = value.trim();
        // Empty values leave the field absent
        if value.is_empty() {
            return Ok(());
        }

        // Metadata before any person record is a silent no-op
        let Some(focus_id) = self.focus.clone() else {
            self.report
                .skipped(self.line_no, "metadata before any person record");
            return Ok(());
        };

        match kind {
            MetadataKind::Alias => {
                self.focus_person(&focus_id)?.add_alias(value);
            }
            MetadataKind::House => {
                self.focus_person(&focus_id)?.house = Some(value.to_string());
            }
            MetadataKind::Memorial => {
                self.focus_person(&focus_id)?.memorial_date = Some(value.to_string());
            }
            MetadataKind::Religious => {
                self.focus_person(&focus_id)?.religious_name = Some(value.to_string());
            }
            MetadataKind::Localized => match self.focus_spouse_owner.clone() {
                Some(owner) => self.focus_spouse(&owner)?.localized_name = Some(value.to_string()),
                None => self.focus_person(&focus_id)?.localized_name = Some(value.to_string()),
            },
            MetadataKind::Marriage => {
                // No active spouse: no effect
                if let Some(owner) = self.focus_spouse_owner.clone() {
                    self.focus_spouse(&owner)?.marriage_date = Some(value.to_string());
                }
            }
            MetadataKind::Divorce => {
                if let Some(owner) = self.focus_spouse_owner.clone() {
                    self.focus_spouse(&owner)?.divorce_date = Some(value.to_string());
                }
            }
        }
        Ok(())
    }

    fn focus_person(&mut self, id: &str) -> Result<&mut Person> {
        let line = self.line_no;
        self.family.get_mut(id).ok_or_else(|| ChartError::Invariant {
            line,
            detail: format!("focus person {} missing from graph", id),
        })
    }

    /// The focus spouse is the last spouse of its recorded owner
    fn focus_spouse(&mut self, owner: &str) -> Result<&mut Spouse> {
        let line = self.line_no;
        self.family
            .get_mut(owner)
            .and_then(|p| p.last_spouse_mut())
            .ok_or_else(|| ChartError::Invariant {
                line,
                detail: format!("focus spouse of {} missing from graph", owner),
            })
    }
}

/// Parse chart text into a family graph.
///
/// # Errors
///
/// The parser is lenient and does not fail on malformed input; unknown
/// constructs are skipped. An error indicates a broken parser invariant,
/// not a problem with the chart.
pub fn parse(text: &str) -> Result<FamilyData> {
    let (family, _) = parse_with_report(text)?;
    Ok(family)
}

/// Parse chart text, also returning the non-fatal diagnostics collected
/// along the way (skipped lines, merges, collisions, unattached children).
pub fn parse_with_report(text: &str) -> Result<(FamilyData, ParseReport)> {
    Parser::new().run(text)
}
