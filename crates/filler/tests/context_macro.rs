use std::collections::BTreeMap;

use filler::{Value, context};

#[test]
fn empty_context() {
    let c = context! {};
    assert!(c.is_empty());
}

#[test]
fn scalar_values() {
    let c = context! { "n" => 42, "x" => 9.5_f64, "s" => "Alice", "b" => true };
    assert_eq!(c.len(), 4);
    assert_eq!(c["n"].as_int(), Some(42));
    assert_eq!(c["x"].as_float(), Some(9.5));
    assert_eq!(c["s"].as_str(), Some("Alice"));
    assert_eq!(c["b"], Value::Bool(true));
}

#[test]
fn owned_and_optional_values() {
    let name = String::from("Bob");
    let c = context! { "name" => name, "missing" => None::<i64>, "age" => Some(30) };
    assert_eq!(c["name"].as_str(), Some("Bob"));
    assert_eq!(c["missing"], Value::None);
    assert_eq!(c["age"], Value::Int(30));
}

#[test]
fn containers() {
    let mut scores = BTreeMap::new();
    scores.insert("a".to_string(), 1);
    let c = context! { "list" => vec!["x", "y"], "scores" => scores };
    assert_eq!(c["list"].as_list().map(<[Value]>::len), Some(2));
    assert_eq!(c["scores"].to_string(), "{'a': 1}");
}

#[test]
fn trailing_comma_and_computed_keys() {
    let key = "dynamic";
    let c = context! {
        key => 1,
        "b" => 2,
    };
    assert_eq!(c[key].as_int(), Some(1));
    assert_eq!(c["b"].as_int(), Some(2));
}
