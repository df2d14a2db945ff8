//! Save-then-load round-trips across all node variants.

use proptree::{FixedArray, Group, Node, Record, Scalar, Sequence};
use serde_json::json;

use crate::helpers::Example;

#[test]
fn test_scalar_roundtrip_preserves_value() {
    let mut original = Scalar::new("x", 0_i64);
    original.set(-37);

    let doc = original.save().unwrap();
    let mut restored = Scalar::new("x", 0_i64);
    restored.load(&doc).unwrap();
    assert_eq!(*restored.value(), -37);
}

#[test]
fn test_scalar_roundtrip_other_types() {
    let mut text = Scalar::new("s", String::new());
    text.set(String::from("héllo, wörld"));
    let doc = text.save().unwrap();
    let mut restored = Scalar::new("s", String::new());
    restored.load(&doc).unwrap();
    assert_eq!(restored.value(), "héllo, wörld");

    let mut flag = Scalar::new("b", false);
    flag.set(true);
    let mut restored = Scalar::new("b", false);
    restored.load(&flag.save().unwrap()).unwrap();
    assert!(*restored.value());

    let mut float = Scalar::new("f", 0.0_f64);
    float.set(2.5);
    let mut restored = Scalar::new("f", 0.0_f64);
    restored.load(&float.save().unwrap()).unwrap();
    assert_eq!(*restored.value(), 2.5);
}

#[test]
fn test_group_roundtrip_reproduces_fields() {
    let original = Example::with(1, "hi");
    let doc = original.save().unwrap();
    assert_eq!(doc, json!({"Example": {"A": 1, "B": "hi"}}));

    let mut restored = Example::default();
    restored.set_a(0);
    restored.load(&doc).unwrap();
    assert_eq!(restored.a(), 1);
    assert_eq!(restored.b(), "hi");
}

#[test]
fn test_sequence_roundtrip_preserves_order_and_values() {
    let mut seq = Sequence::<Example>::new("Items");
    seq.push(Example::with(10, "first"));
    seq.push(Example::with(20, "second"));
    seq.push(Example::with(30, "third"));

    let doc = seq.save().unwrap();
    assert_eq!(
        doc,
        json!({"Items": [
            {"A": 10, "B": "first"},
            {"A": 20, "B": "second"},
            {"A": 30, "B": "third"},
        ]})
    );

    let mut restored = Sequence::<Example>::new("Items");
    restored.load(&doc).unwrap();
    assert_eq!(restored.len(), 3);
    let values: Vec<(i64, String)> = restored
        .iter()
        .map(|e| (e.a(), e.b().to_string()))
        .collect();
    assert_eq!(
        values,
        vec![
            (10, "first".to_string()),
            (20, "second".to_string()),
            (30, "third".to_string()),
        ]
    );
}

#[test]
fn test_sequence_load_replaces_existing_elements() {
    let mut seq = Sequence::<Example>::new("Items");
    seq.push(Example::with(1, "old"));
    seq.push(Example::with(2, "old"));

    seq.load(&json!({"Items": [{"A": 9, "B": "new"}]})).unwrap();
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.get(0).unwrap().a(), 9);
}

#[test]
fn test_fixed_array_arity_enforcement() {
    let entry = json!({"A": 1, "B": "hi"});

    let mut arr = FixedArray::<Example, 3>::new("Arr");
    let err = arr
        .load(&json!([entry.clone(), entry.clone()]))
        .unwrap_err();
    assert!(err.is_arity_mismatch());

    arr.load(&json!([entry.clone(), entry.clone(), entry.clone()]))
        .unwrap();
    assert_eq!(arr.iter().count(), 3);

    let err = arr
        .load(&json!([
            entry.clone(),
            entry.clone(),
            entry.clone(),
            entry
        ]))
        .unwrap_err();
    assert!(err.is_arity_mismatch());
    // The failed load did not disturb the successfully loaded elements.
    assert_eq!(arr.iter().count(), 3);
}

#[test]
fn test_fixed_array_roundtrip() {
    let mut arr = FixedArray::<Example, 2>::new("Pair");
    arr.set(0, Example::with(5, "left"));
    arr.set(1, Example::with(6, "right"));

    let doc = arr.save().unwrap();
    let mut restored = FixedArray::<Example, 2>::new("Pair");
    restored.load(&doc).unwrap();
    assert_eq!(restored.get(0).unwrap().a(), 5);
    assert_eq!(restored.get(1).unwrap().b(), "right");
}

#[test]
fn test_nested_record_roundtrip() {
    use crate::helpers::Party;

    let mut party = Party::default();
    let leader = party.leader.clone();
    let members = party.members.clone();
    let banner = party.banner.clone();

    party
        .props
        .record_mut(&leader)
        .unwrap()
        .set_a(99);
    let seq = party.props.sequence_mut(&members).unwrap();
    seq.push(Example::with(1, "m1"));
    seq.push(Example::with(2, "m2"));
    party.props.set(&banner, String::from("dragon"));

    let doc = party.save().unwrap();
    assert_eq!(
        doc,
        json!({"Party": {
            "Example": {"A": 99, "B": "hi"},
            "Members": [{"A": 1, "B": "m1"}, {"A": 2, "B": "m2"}],
            "Banner": "dragon",
        }})
    );

    let mut restored = Party::default();
    restored.load(&doc).unwrap();
    assert_eq!(restored.props.record(&restored.leader).unwrap().a(), 99);
    assert_eq!(
        restored.props.sequence(&restored.members).unwrap().len(),
        2
    );
    assert_eq!(
        restored.props.get(&restored.banner).map(String::as_str),
        Some("dragon")
    );
}

#[test]
fn test_anonymous_root_group_flattens_children() {
    let mut root = Group::new();
    let volume = root.add("Volume", 7_i64);
    root.add_record(Example::default());

    let doc = Node::save(&root).unwrap();
    assert_eq!(doc, json!({"Volume": 7, "Example": {"A": 1, "B": "hi"}}));

    // Children of an anonymous group appear as top-level keys, so the same
    // flat document loads straight back.
    let mut fresh = Group::new();
    let volume2 = fresh.add("Volume", 0_i64);
    Node::load(&mut fresh, &doc).unwrap();
    assert_eq!(fresh.get(&volume2), Some(&7));
    let _ = volume;
}
