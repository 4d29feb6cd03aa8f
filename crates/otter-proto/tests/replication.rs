//! Template replication integration tests

mod common;

use otter_proto::{Interface, ObjectBuilder, ObjectError, Template, Value, ValueType};

fn no_overrides() -> std::iter::Empty<(&'static str, Value)> {
    std::iter::empty()
}

#[test]
fn test_replica_equivalent_but_distinct() {
    common::init_tracing();
    let parent = ObjectBuilder::new().frozen("kind", "shape").build().unwrap();
    let template = ObjectBuilder::new()
        .tag("Circle")
        .prototype(&parent)
        .frozen("sides", 0)
        .mutable("radius", 1.5)
        .dynamic_entry("note", "round")
        .build()
        .unwrap();

    let replica = template.replicate(no_overrides()).unwrap();

    for name in template.own_names() {
        assert_eq!(replica.get(name.as_str()), template.get(name.as_str()));
    }
    assert!(replica.same_type(&template));
    assert!(!replica.ptr_eq(&template));
    assert_eq!(replica.tag(), template.tag());

    replica.set("radius", 2.0).unwrap();
    assert_eq!(template.get("radius"), Ok(Value::Float(1.5)));

    replica.set("note", "changed").unwrap();
    assert_eq!(template.get("note"), Ok(Value::str("round")));
}

#[test]
fn test_replica_shares_prototypes() {
    let parent = ObjectBuilder::new().mutable("shared", 1).build().unwrap();
    let template = ObjectBuilder::new().prototype(&parent).build().unwrap();
    let replica = template.replicate(no_overrides()).unwrap();

    assert_eq!(replica.prototypes(), template.prototypes());
    parent.set("shared", 2).unwrap();
    assert_eq!(replica.get("shared"), Ok(Value::Int(2)));
}

#[test]
fn test_replica_keeps_signature() {
    let template = ObjectBuilder::new()
        .frozen("id", 1)
        .mutable("name", "x")
        .build()
        .unwrap();
    let replica = template
        .replicate([("id", Value::Int(2)), ("name", Value::str("y"))])
        .unwrap();

    assert_eq!(replica.signature(), template.signature());
    assert!(replica.implements(&Interface::of(&template)));
    assert_eq!(replica.get("id"), Ok(Value::Int(2)));
    assert_eq!(replica.get("name"), Ok(Value::str("y")));
}

#[test]
fn test_override_errors() {
    let parent = ObjectBuilder::new().frozen("inherited", 1).build().unwrap();
    let template = ObjectBuilder::new()
        .prototype(&parent)
        .frozen("f", 1.0)
        .mutable_typed("m", ValueType::Float, 1.0)
        .dynamic_entry("d", 1)
        .build()
        .unwrap();

    assert_eq!(
        template.replicate([("inherited", Value::Int(2))]).unwrap_err(),
        ObjectError::UnknownTemplateArgument("inherited".into())
    );
    assert_eq!(
        template.replicate([("d", Value::Int(2))]).unwrap_err(),
        ObjectError::UnknownTemplateArgument("d".into())
    );
    assert_eq!(
        template.replicate([("f", Value::Int(2))]).unwrap_err(),
        ObjectError::type_mismatch("f", ValueType::Float, ValueType::Int)
    );

    let widened = template.replicate([("m", Value::Int(2))]).unwrap();
    assert_eq!(widened.get("m"), Ok(Value::Float(2.0)));
}

#[test]
fn test_template_reuse() {
    let schema = ObjectBuilder::new()
        .tag("Counter")
        .mutable("count", 0)
        .build()
        .unwrap();
    let template = Template::new(schema);

    let counters: Vec<_> = (0..5)
        .map(|i| template.instantiate([("count", Value::Int(i))]).unwrap())
        .collect();

    assert_eq!(template.instances(), 5);
    for (i, counter) in counters.iter().enumerate() {
        assert_eq!(counter.get("count"), Ok(Value::Int(i as i64)));
        assert!(std::rc::Rc::ptr_eq(counter.shape(), template.schema().shape()));
    }
}
