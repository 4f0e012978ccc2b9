//! Behavioral tests for the chart parser
//!
//! Each test encodes one guaranteed property of the parser: identity
//! stability, merge/collision resolution, root selection, and spouse/child
//! attachment order.

use kindred_core::diagnostics::DiagnosticKind;
use kindred_core::{parse, parse_with_report};
use kindred_model::{FamilyData, Person};

fn by_name<'a>(family: &'a FamilyData, name: &str) -> &'a Person {
    family
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("no person named {}", name))
}

/// Parsing the same text twice yields identical graphs
#[test]
fn test_parse_is_deterministic() {
    let input = "(1) 1 Ann (1950-)\n\
                 & Carol\n\
                 m: 1970\n\
                 (2) 1 Bob (1975-)\n\
                 alias: Bobby\n\
                 (2) 2 Cid\n\
                 (1) 2 Zoe";

    let first = parse(input).expect("parse should not error");
    let second = parse(input).expect("parse should not error");
    assert_eq!(first, second);
}

/// The root is the first generation-1 record and is never reassigned
#[test]
fn test_root_is_first_generation_one_record() {
    let input = "(1) 1 Ann\n(1) 2 Zoe\n(1) 3 Max";
    let family = parse(input).expect("parse should not error");

    assert_eq!(family.len(), 3);
    assert_eq!(family.root().map(|p| p.name.as_str()), Some("Ann"));
}

/// Split records ("5a"/"5b", same name, same parent) merge into one
/// person carrying the union of both lines' contributions
#[test]
fn test_split_records_merge() {
    let input = "(1) 1 Ann\n\
                 & Carol\n\
                 m: 1950\n\
                 (1) 1a Ann\n\
                 & Diane\n\
                 m: 1960\n\
                 house: Lim";

    let (family, report) = parse_with_report(input).expect("parse should not error");

    assert_eq!(family.len(), 1);
    let ann = family.root().expect("Ann should be root");
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.spouses.len(), 2);
    assert_eq!(ann.spouses[0].name, "Carol");
    assert_eq!(ann.spouses[0].marriage_date.as_deref(), Some("1950"));
    assert_eq!(ann.spouses[1].name, "Diane");
    assert_eq!(ann.spouses[1].marriage_date.as_deref(), Some("1960"));
    assert_eq!(ann.house.as_deref(), Some("Lim"));

    assert_eq!(report.count_of(DiagnosticKind::MergedRecord), 1);
}

/// Name comparison for merging ignores case and whitespace runs
#[test]
fn test_merge_name_comparison_is_lenient() {
    let input = "(1) 1 Ann  Smith\n(1) 1a ann smith";
    let family = parse(input).expect("parse should not error");

    assert_eq!(family.len(), 1);
    // The first line's spelling is authoritative
    assert_eq!(family.root().map(|p| p.name.as_str()), Some("Ann  Smith"));
}

/// Same slot, different names: two distinct persons via suffix probing
#[test]
fn test_slot_collision_creates_distinct_person() {
    let input = "(1) 1 Ann\n(1) 1a Mary";
    let (family, report) = parse_with_report(input).expect("parse should not error");

    assert_eq!(family.len(), 2);
    let ann = by_name(&family, "Ann");
    let mary = by_name(&family, "Mary");
    assert_ne!(ann.id, mary.id);
    assert_eq!(mary.id, format!("{}_2", ann.id));

    // Root stays with the first record
    assert_eq!(family.root_id.as_deref(), Some(ann.id.as_str()));
    assert_eq!(report.count_of(DiagnosticKind::CollisionSuffix), 1);
}

/// Repeated collisions keep probing upward
#[test]
fn test_triple_collision_probes_in_order() {
    let input = "(1) 1 Ann\n(1) 1a Mary\n(1) 1b Sue\n(1) 1 Mary";
    let family = parse(input).expect("parse should not error");

    // Ann, Mary, Sue are distinct; the fourth line merges into Mary
    assert_eq!(family.len(), 3);
    let ann = by_name(&family, "Ann");
    assert_eq!(by_name(&family, "Mary").id, format!("{}_2", ann.id));
    assert_eq!(by_name(&family, "Sue").id, format!("{}_3", ann.id));
}

/// A child lands in the children list of the parent's most recently
/// added spouse at the time the child is parsed
#[test]
fn test_child_attaches_to_most_recent_spouse() {
    let input = "(1) 1 Ann\n\
                 & Carol\n\
                 (2) 1 Bob\n\
                 (1) 1a Ann\n\
                 & Diane\n\
                 (2) 2 Eve";

    let family = parse(input).expect("parse should not error");

    let ann = family.root().expect("Ann should be root");
    assert_eq!(ann.spouses.len(), 2);

    let bob = by_name(&family, "Bob");
    let eve = by_name(&family, "Eve");
    assert_eq!(ann.spouses[0].children, vec![bob.id.clone()]);
    assert_eq!(ann.spouses[1].children, vec![eve.id.clone()]);
    assert_eq!(bob.parent_id.as_deref(), Some(ann.id.as_str()));
    assert_eq!(eve.parent_id.as_deref(), Some(ann.id.as_str()));
}

/// A child whose parent has no spouse exists in the graph but in no
/// children list
#[test]
fn test_spouseless_parent_leaves_child_unattached() {
    let input = "(1) 1 Ann\n(2) 1 Bob";
    let (family, report) = parse_with_report(input).expect("parse should not error");

    assert_eq!(family.len(), 2);
    let bob = by_name(&family, "Bob");
    assert!(family
        .iter()
        .flat_map(|p| p.spouses.iter())
        .all(|s| !s.children.contains(&bob.id)));
    assert_eq!(report.count_of(DiagnosticKind::UnattachedChild), 1);
}

/// Nesting follows generation numbers, not line adjacency
#[test]
fn test_ancestry_stack_nesting() {
    let input = "(1) 1 Ann\n\
                 & Al\n\
                 (2) 1 Bob\n\
                 & Betty\n\
                 (3) 1 Kim\n\
                 (2) 2 Cid\n\
                 (3) 1 Lea";

    let family = parse(input).expect("parse should not error");
    assert_eq!(family.len(), 5);

    let ann = by_name(&family, "Ann");
    let bob = by_name(&family, "Bob");
    let kim = by_name(&family, "Kim");
    let cid = by_name(&family, "Cid");
    let lea = by_name(&family, "Lea");

    assert_eq!(bob.parent_id.as_deref(), Some(ann.id.as_str()));
    assert_eq!(kim.parent_id.as_deref(), Some(bob.id.as_str()));
    // Cid pops Kim and Bob off the open-ancestor chain, back to Ann
    assert_eq!(cid.parent_id.as_deref(), Some(ann.id.as_str()));
    // Lea nests under Cid, not Bob
    assert_eq!(lea.parent_id.as_deref(), Some(cid.id.as_str()));

    assert_eq!(family.ancestry_path(&kim.id), vec![
        kim.id.clone(),
        bob.id.clone(),
        ann.id.clone()
    ]);
}

/// A merged record re-enters the existing person as focus without
/// overwriting any of its fields
#[test]
fn test_merge_does_not_overwrite_fields() {
    let input = "(1) 1 Ann (1920-1995)\n(1) 1a Ann (1800-1900)\nalias: Nan";
    let family = parse(input).expect("parse should not error");

    let ann = family.root().expect("Ann should be root");
    assert_eq!(ann.birth_year, Some(1920));
    assert_eq!(ann.death_year, Some(1995));
    // Metadata after the merge line still lands on the merged person
    assert_eq!(ann.aliases, vec!["Nan"]);
}

/// Same base index under different parents never collides
#[test]
fn test_same_index_under_different_parents() {
    let input = "(1) 1 Ann\n\
                 & Al\n\
                 (2) 1 Bob\n\
                 & Betty\n\
                 (3) 1 Kim\n\
                 (2) 2 Cid\n\
                 & Cora\n\
                 (3) 1 Kim";

    let family = parse(input).expect("parse should not error");

    // Two distinct Kims, one under Bob, one under Cid
    let kims: Vec<_> = family.iter().filter(|p| p.name == "Kim").collect();
    assert_eq!(kims.len(), 2);
    assert_ne!(kims[0].id, kims[1].id);
    assert_ne!(kims[0].parent_id, kims[1].parent_id);
}

/// Carriage-return line endings parse the same as bare newlines
#[test]
fn test_crlf_input() {
    let unix = parse("(1) 1 Ann\n& Carol\n(2) 1 Bob").expect("parse should not error");
    let dos = parse("(1) 1 Ann\r\n& Carol\r\n(2) 1 Bob").expect("parse should not error");
    assert_eq!(unix, dos);
}

/// Unrecognized lines and orphan records degrade to diagnostics
#[test]
fn test_lenient_noise_handling() {
    let input = "scanned from the 1998 reunion booklet\n\
                 & Orphan Spouse\n\
                 alias: Nobody\n\
                 ==== Generation 1 ====\n\
                 (1) 1 Ann";

    let (family, report) = parse_with_report(input).expect("parse should not error");

    assert_eq!(family.len(), 1);
    assert_eq!(family.root().map(|p| p.name.as_str()), Some("Ann"));
    // Prose, orphan spouse, orphan metadata; the divider is silent
    assert_eq!(report.count_of(DiagnosticKind::SkippedLine), 3);
}

/// A provenance stamp glued onto a person line is stripped
#[test]
fn test_provenance_prefix_on_data_line() {
    let input = "chart printed 1998(1) 1 Ann (1950-)\n& Carol";
    let family = parse(input).expect("parse should not error");

    let ann = family.root().expect("Ann should be root");
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.birth_year, Some(1950));
    assert_eq!(ann.spouses.len(), 1);
}

/// The whole graph serializes and restores through JSON unchanged
#[test]
fn test_family_json_round_trip() {
    let input = "(1) 1 Ann (1950-)\n& Carol\nm: 1970\n(2) 1 Bob zh 宝\nalias: Bobby";
    let family = parse(input).expect("parse should not error");

    let json = serde_json::to_string(&family).expect("serialize");
    let restored: FamilyData = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, family);
}
