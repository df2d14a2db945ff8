//! Registry behavior, assignment semantics, and deep-copy isolation.

use proptree::{Group, Node, Record, Sequence};
use serde_json::json;

use crate::helpers::Example;

#[test]
fn test_unknown_document_keys_are_ignored() {
    let mut example = Example::default();
    example
        .load(&json!({"A": 5, "Z": "not registered", "W": [1, 2]}))
        .unwrap();

    assert_eq!(example.a(), 5);
    // Unmatched registered children keep their in-memory value.
    assert_eq!(example.b(), "hi");
}

#[test]
fn test_loading_older_and_newer_documents() {
    // A document missing registered fields loads what it has; a document
    // with extra fields loads what matches. Both directions succeed.
    let mut example = Example::default();
    example.load(&json!({})).unwrap();
    assert_eq!(example.a(), 1);

    example.load(&json!({"B": "updated", "Future": true})).unwrap();
    assert_eq!(example.b(), "updated");
}

#[test]
fn test_replace_semantics_keep_latest_value() {
    let mut group = Group::new();
    group.add("A", 1_i64);
    let current = group.add("A", 2_i64);

    assert_eq!(group.len(), 1);
    assert_eq!(group.get(&current), Some(&2));
}

#[test]
fn test_stale_handle_after_remove_reads_none() {
    let mut group = Group::new();
    let field = group.add("A", 1_i64);
    group.remove("A");

    assert_eq!(group.get(&field), None);
    assert!(!group.set(&field, 2));
}

#[test]
fn test_record_assign_copies_values_not_structure() {
    let mut target = Example::default();
    let source = Example::with(42, "other");

    target.assign_from(&source).unwrap();
    assert_eq!(target.a(), 42);
    assert_eq!(target.b(), "other");
    // Assign copies values, never identity.
    assert_eq!(target.props.name(), Some("Example"));
}

#[test]
fn test_sequence_assign_is_positional_deep_clone() {
    let mut source = Sequence::<Example>::new("Items");
    source.push(Example::with(1, "one"));
    source.push(Example::with(2, "two"));

    let mut target = Sequence::<Example>::new("Items");
    target.push(Example::with(9, "stale"));
    target.assign_from(&source);

    assert_eq!(target.len(), 2);
    assert_eq!(target.get(0).unwrap().a(), 1);

    // Deep clone: mutating the target leaves the source untouched.
    target.get_mut(0).unwrap().set_a(100);
    assert_eq!(source.get(0).unwrap().a(), 1);
}

#[test]
fn test_clone_isolation_through_nested_sequence() {
    let mut original = Group::named("World");
    let items = original.add_sequence::<Example>("Items");
    original
        .sequence_mut(&items)
        .unwrap()
        .push(Example::with(7, "only"));

    let mut copy = original.clone();

    // Mutate the clone's element; the original must not see it.
    copy.sequence_mut(&items)
        .unwrap()
        .get_mut(0)
        .unwrap()
        .set_a(1000);
    assert_eq!(original.sequence(&items).unwrap().get(0).unwrap().a(), 7);

    // And the other way around.
    original
        .sequence_mut(&items)
        .unwrap()
        .get_mut(0)
        .unwrap()
        .set_a(-1);
    assert_eq!(copy.sequence(&items).unwrap().get(0).unwrap().a(), 1000);
}

#[test]
fn test_group_dyn_assign_requires_matching_child_types() {
    let mut ours = Group::named("G");
    ours.add("X", 1_i64);

    let mut theirs = Group::named("G");
    theirs.add("X", String::from("wrong type"));

    let err = ours.assign_from(&theirs).unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_saved_group_loads_into_identically_shaped_fresh_group() {
    let mut original = Group::named("Cfg");
    let a = original.add("A", 10_i64);
    let b = original.add("B", String::from("abc"));
    let doc = Node::save(&original).unwrap();

    let mut fresh = Group::named("Cfg");
    let fa = fresh.add("A", 0_i64);
    let fb = fresh.add_default::<String>("B");
    Node::load(&mut fresh, &doc).unwrap();

    assert_eq!(fresh.get(&fa), Some(&10));
    assert_eq!(fresh.get(&fb).map(String::as_str), Some("abc"));
    let _ = (a, b);
}
