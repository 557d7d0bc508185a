#[macro_use]
mod support;

use lazyrecord_core::{AttributeKey, Attributes, Symbol, UndeclaredAttributeError};
use serde_json::json;

const NAME: Symbol = Symbol::new("name");

#[test]
fn construct_keeps_declared_keys_and_drops_the_rest() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name"]);

    let person = Person::with_attributes(vec![("name", json!("a")), ("extra", json!(1))]);

    assert_eq!(person.as_json(), json!({ "name": "a" }));
    assert!(!person.is_dirty());
}

#[test]
fn construct_with_only_undeclared_keys_is_empty() {
    attribute_record!(Person);
    Person::set_declared_attributes(["key"]);

    let person = Person::with_attributes([("key2", "value")]);

    assert!(person.attributes().is_empty());
    assert!(!person.is_dirty());
}

#[test]
fn construct_normalizes_symbol_and_text_keys() {
    attribute_record!(Person);
    Person::set_declared_attributes([NAME]);

    let person = Person::with_attributes([(AttributeKey::from(NAME), json!("sym"))]);
    assert_eq!(person.read_attribute("name"), Some(&json!("sym")));

    let person = Person::with_attributes([(String::from("name"), json!("text"))]);
    assert_eq!(person.read_attribute(NAME), Some(&json!("text")));
}

#[test]
fn construct_on_undeclared_type_keeps_nothing() {
    attribute_record!(Person);

    let person = Person::with_attributes([("name", "a")]);

    assert!(Person::declared_attributes().is_empty());
    assert!(person.attributes().is_empty());
}

#[test]
fn blank_record_is_clean_and_empty() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name"]);

    let person = Person::blank();

    assert!(person.attributes().is_empty());
    assert!(!person.dirty());
    assert_eq!(person.as_json(), json!({}));
}

#[test]
fn write_returns_value_and_marks_dirty() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name"]);
    let mut person = Person::with_attributes([("name", "a")]);

    let returned = person
        .write_attribute("name", "b")
        .expect("declared attribute write");

    assert_eq!(returned, json!("b"));
    assert_eq!(person.read_attribute(NAME), Some(&json!("b")));
    assert!(person.is_dirty());
    assert!(person.dirty());
}

#[test]
fn write_same_value_still_marks_dirty() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name"]);
    let mut person = Person::with_attributes([("name", "a")]);

    person
        .write_attribute(NAME, "a")
        .expect("declared attribute write");

    assert!(person.is_dirty());
}

#[test]
fn write_undeclared_key_fails_without_side_effects() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name"]);
    let mut person = Person::with_attributes([("name", "a")]);
    person
        .write_attribute("name", "b")
        .expect("declared attribute write");
    let mut clean = Person::with_attributes([("name", "a")]);

    let err = person
        .write_attribute("ghost", 1)
        .expect_err("undeclared write must fail");
    assert_eq!(err.key, AttributeKey::new("ghost"));
    assert_eq!(err.declared, vec!["name".to_string()]);
    assert!(err.owner.ends_with("Person"));
    assert_eq!(person.as_json(), json!({ "name": "b" }));

    clean
        .write_attribute("ghost", 1)
        .expect_err("undeclared write must fail");
    assert!(!clean.is_dirty());
    assert_eq!(clean.as_json(), json!({ "name": "a" }));
}

#[test]
fn write_is_case_sensitive() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name"]);
    let mut person = Person::blank();

    let err = person
        .write_attribute("Name", "x")
        .expect_err("case mismatch must fail");

    assert_eq!(err.key.as_str(), "Name");
    assert!(!person.is_dirty());
}

#[test]
fn read_of_absent_or_undeclared_key_is_none() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name", "email"]);
    let person = Person::with_attributes([("name", "a")]);

    assert_eq!(person.read_attribute("email"), None);
    assert_eq!(person.read_attribute("ghost"), None);
    assert!(!person.is_dirty());
}

#[test]
fn assign_applies_every_declared_entry() {
    attribute_record!(Person);
    Person::set_declared_attributes(["a", "b"]);
    let mut person = Person::blank();

    person
        .assign_attributes([("a", json!(1)), ("b", json!(2))])
        .expect("all keys declared");

    assert_eq!(person.as_json(), json!({ "a": 1, "b": 2 }));
    assert!(person.is_dirty());
}

#[test]
fn assign_keeps_entries_applied_before_failure() {
    attribute_record!(Person);
    Person::set_declared_attributes(["a", "b"]);
    let mut person = Person::with_attributes([("b", 2)]);
    assert!(!person.is_dirty());

    let err: UndeclaredAttributeError = person
        .assign_attributes([("a", 1), ("c", 9)])
        .expect_err("c is undeclared");

    assert_eq!(err.key, AttributeKey::new("c"));
    assert_eq!(person.as_json(), json!({ "a": 1, "b": 2 }));
    assert!(person.is_dirty());
}

#[test]
fn assign_stops_at_first_failure() {
    attribute_record!(Person);
    Person::set_declared_attributes(["a", "b"]);
    let mut person = Person::blank();

    person
        .assign_attributes([("a", 1), ("ghost", 2), ("b", 3)])
        .expect_err("ghost is undeclared");

    assert_eq!(person.as_json(), json!({ "a": 1 }));
}

#[test]
fn assign_failing_on_first_entry_leaves_record_clean() {
    attribute_record!(Person);
    Person::set_declared_attributes(["a"]);
    let mut person = Person::with_attributes([("a", 1)]);

    person
        .assign_attributes([("ghost", 2), ("a", 3)])
        .expect_err("ghost is undeclared");

    assert!(!person.is_dirty());
    assert_eq!(person.as_json(), json!({ "a": 1 }));
}

#[test]
fn dirty_state_is_absorbing() {
    attribute_record!(Person);
    Person::set_declared_attributes(["a"]);
    let mut person = Person::blank();

    person.write_attribute("a", 1).expect("declared write");
    person
        .write_attribute("ghost", 1)
        .expect_err("undeclared write must fail");
    person
        .assign_attributes(Vec::<(&str, i32)>::new())
        .expect("empty assign succeeds");

    assert!(person.is_dirty());
}

#[test]
fn export_matches_attributes() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name", "age"]);
    let person = Person::with_attributes([("name", json!("a")), ("age", json!(3))]);

    assert_eq!(&person.export(), person.attributes());
    let exported = serde_json::to_value(person.export()).expect("serialize export");
    assert_eq!(exported, person.as_json());
}

#[test]
fn values_are_not_type_checked() {
    attribute_record!(Person);
    Person::set_declared_attributes(["payload"]);
    let mut person = Person::blank();

    person
        .write_attribute("payload", json!({ "nested": [1, "two", null] }))
        .expect("any value is accepted");
    person
        .write_attribute("payload", true)
        .expect("any value is accepted");

    assert_eq!(person.read_attribute("payload"), Some(&json!(true)));
}

#[test]
fn foreign_mapping_is_filtered_when_moved_between_types() {
    attribute_record!(Wide);
    attribute_record!(Narrow);
    Wide::set_declared_attributes(["name", "ghost"]);
    Narrow::set_declared_attributes(["name"]);
    let wide = Wide::with_attributes([("name", "a"), ("ghost", "x")]);

    let mut narrow = Narrow::with_attributes(wide.export());
    narrow
        .write_attribute("ghost", 1)
        .expect_err("ghost is not declared on Narrow");

    assert_eq!(narrow.as_json(), json!({ "name": "a" }));
    assert!(narrow.attribute_set().get("ghost").is_none());
    assert!(!narrow.is_dirty());
}

#[test]
fn rebuilding_from_export_leaves_original_dirty() {
    attribute_record!(Person);
    Person::set_declared_attributes(["name"]);
    let mut person = Person::blank();
    person.write_attribute("name", "b").expect("declared write");
    let snapshot = person.attribute_set().clone();

    let rebuilt = Person::with_attributes(person.export());

    assert!(!rebuilt.is_dirty());
    assert!(person.is_dirty());
    assert!(person.attribute_set().is_dirty());
    assert_eq!(person.attribute_set(), &snapshot);
}
