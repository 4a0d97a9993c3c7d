//! Sequence validation: full traversal, index paths, transformation.

use conformal::{Conform, Def, Key, Value, ValueType};

#[test]
fn test_each_transforms_every_element() {
    let def = Def::each(Def::coercible(ValueType::Int).unwrap());
    let result = def.conform(&Value::seq([
        Value::from("10"),
        Value::Int(20),
        Value::Float(30.5),
    ]));
    assert_eq!(
        result.value(),
        &Value::seq([Value::Int(10), Value::Int(20), Value::Int(30)])
    );
}

#[test]
fn test_each_does_not_short_circuit() {
    let def = Def::each(Def::integer());
    let result = def.conform(&Value::seq([
        Value::from("a"),
        Value::Int(1),
        Value::from("b"),
        Value::Int(2),
        Value::Null,
    ]));

    let top = result.top_errors().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top.first().key, "each_failed");
    assert_eq!(top.first().args, vec!["3".to_string()]);

    let paths: Vec<String> = top
        .first()
        .nested
        .iter()
        .map(|e| e.path.to_string())
        .collect();
    assert_eq!(paths, vec!["/0", "/2", "/4"]);
}

#[test]
fn test_each_rejects_non_sequences() {
    let def = Def::each(Def::integer());
    for input in [
        Value::Null,
        Value::Int(1),
        Value::from("abc"),
        Value::map([]),
    ] {
        let result = def.conform(&input);
        assert!(result.failed());
        assert_eq!(result.errors()[0].key, "not_a_sequence");
    }
}

#[test]
fn test_each_of_records() {
    let item = Def::keys()
        .required(Key::sym("id"), Def::integer())
        .unwrap();
    let def = Def::each(item);

    let result = def.conform(&Value::seq([
        Value::map([(Key::sym("id"), Value::Int(1))]),
        Value::map([(Key::sym("id"), Value::from("2"))]),
    ]));

    let leaf = result
        .errors()
        .into_iter()
        .find(|e| e.key == "type_error")
        .unwrap()
        .clone();
    assert_eq!(leaf.path.to_string(), "/1/id");
}

#[test]
fn test_each_inside_each() {
    let def = Def::each(Def::each(Def::integer()));
    let result = def.conform(&Value::seq([
        Value::seq([Value::Int(1)]),
        Value::seq([Value::Int(2), Value::from("x")]),
    ]));

    let leaf = result
        .errors()
        .into_iter()
        .find(|e| e.key == "type_error")
        .unwrap()
        .clone();
    assert_eq!(leaf.path.to_string(), "/1/1");
}

#[test]
fn test_each_idempotent_on_output() {
    let def = Def::each(Def::coercible(ValueType::Float).unwrap());
    let first = def.conform(&Value::seq([Value::from("1"), Value::Int(2)]));
    assert!(first.passed());
    let second = def.conform(first.value());
    assert!(second.passed());
    assert_eq!(second.value(), first.value());
}
