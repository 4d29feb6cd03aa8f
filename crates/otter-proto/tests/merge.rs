//! Merge integration tests

mod common;

use otter_proto::{ObjectBuilder, ObjectError, Tier, Value, ValueType, merge};

#[test]
fn test_merge_scenario() {
    common::init_tracing();
    let a = ObjectBuilder::new()
        .frozen("a", 1)
        .mutable("b", 2)
        .build()
        .unwrap();
    let b = ObjectBuilder::new()
        .mutable("b", 3)
        .mutable("c", 4)
        .build()
        .unwrap();

    let merged = merge(&a, &b).unwrap();
    assert_eq!(merged.get("a"), Ok(Value::Int(1)));
    assert_eq!(merged.get("b"), Ok(Value::Int(3)));
    assert_eq!(merged.get("c"), Ok(Value::Int(4)));
    assert_eq!(merged.tier_of("a"), Some(Tier::Frozen));
    assert_eq!(merged.tier_of("b"), Some(Tier::Mutable));
}

#[test]
fn test_merge_right_bias() {
    let a = ObjectBuilder::new()
        .frozen("only_a", "a")
        .frozen("both", "from a")
        .build()
        .unwrap();
    let b = ObjectBuilder::new()
        .mutable("both", "from b")
        .frozen("only_b", "b")
        .build()
        .unwrap();

    let merged = a.merged_with(&b).unwrap();
    for name in b.own_names() {
        assert_eq!(merged.get(name.as_str()), b.get(name.as_str()));
    }
    assert_eq!(merged.get("only_a"), a.get("only_a"));
    assert_eq!(merged.tier_of("both"), Some(Tier::Mutable));
}

#[test]
fn test_merge_tier_follows_winning_side() {
    let a = ObjectBuilder::new().mutable("x", 1).build().unwrap();
    let b = ObjectBuilder::new().frozen("x", 2).build().unwrap();

    let merged = merge(&a, &b).unwrap();
    assert_eq!(merged.tier_of("x"), Some(Tier::Frozen));
    assert_eq!(
        merged.set("x", 3),
        Err(ObjectError::ImmutableProperty("x".into()))
    );
}

#[test]
fn test_merge_copies_slots() {
    let a = ObjectBuilder::new()
        .mutable("n", 1)
        .mutable_unassigned("later", ValueType::Str)
        .build()
        .unwrap();
    let b = ObjectBuilder::new().build().unwrap();

    let merged = merge(&a, &b).unwrap();
    merged.set("n", 10).unwrap();
    assert_eq!(a.get("n"), Ok(Value::Int(1)));
    assert_eq!(
        merged.get("later"),
        Err(ObjectError::UnassignedAccess("later".into()))
    );
}

#[test]
fn test_merge_tag_from_right() {
    let a = ObjectBuilder::new().tag("Left").build().unwrap();
    let b = ObjectBuilder::new().tag("Right").build().unwrap();
    assert_eq!(merge(&a, &b).unwrap().tag().as_str(), "Right");
}

#[test]
fn test_merge_prototypes_deduplicated() {
    let p = ObjectBuilder::new().frozen("p", 1).build().unwrap();
    let q = ObjectBuilder::new().frozen("q", 1).build().unwrap();
    let a = ObjectBuilder::new().prototypes([&p, &q]).build().unwrap();
    let b = ObjectBuilder::new().prototypes([&q, &p]).build().unwrap();

    let merged = merge(&a, &b).unwrap();
    let protos: Vec<_> = merged.prototypes().iter().collect();
    assert_eq!(protos.len(), 2);
    assert!(protos[0].ptr_eq(&p));
    assert!(protos[1].ptr_eq(&q));
}

#[test]
fn test_merge_dynamic_stores() {
    let a = ObjectBuilder::new()
        .dynamic_entry("x", 1)
        .dynamic_entry("y", 1)
        .build()
        .unwrap();
    let b = ObjectBuilder::new().dynamic_entry("y", 2).build().unwrap();
    let none = ObjectBuilder::new().build().unwrap();

    let merged = merge(&a, &b).unwrap();
    assert_eq!(merged.get("x"), Ok(Value::Int(1)));
    assert_eq!(merged.get("y"), Ok(Value::Int(2)));

    assert!(merge(&a, &none).unwrap().has_dynamic());
    assert!(merge(&none, &b).unwrap().has_dynamic());
    assert!(!merge(&none, &none).unwrap().has_dynamic());
}

#[test]
fn test_merge_reports_tier_collision() {
    let a = ObjectBuilder::new().dynamic_entry("x", 1).build().unwrap();
    let b = ObjectBuilder::new().frozen("x", 2).build().unwrap();
    assert_eq!(
        merge(&a, &b).unwrap_err(),
        ObjectError::DuplicateProperty("x".into())
    );
}

#[test]
fn test_merge_signature_recomputed() {
    let a = ObjectBuilder::new().frozen("a", 1).build().unwrap();
    let b = ObjectBuilder::new().mutable("b", "s").build().unwrap();
    let merged = merge(&a, &b).unwrap();

    assert!(merged.conforms_to(&a));
    assert!(merged.conforms_to(&b));
}
