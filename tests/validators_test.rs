//! Integration tests for the standard validators.

use bindery::{
    readers, validators, BindingError, Context, Environment, EnvironmentBuilder, Reader,
    ReadResult,
};
use serde_json::{json, Value};

fn env() -> Environment<BindingError> {
    EnvironmentBuilder::standard().build().unwrap()
}

fn read<T: 'static>(reader: &Reader<T, BindingError>, node: Value) -> ReadResult<T, BindingError> {
    reader
        .read_document(&env(), &Context::empty(), &node)
        .unwrap()
}

fn code<T>(result: &ReadResult<T, BindingError>) -> Option<&str> {
    result.causes().map(|causes| causes.first().error.code.as_str())
}

// ====== String Tests ======

#[test]
fn test_string_length_bounds() {
    let reader = readers::string()
        .validation(validators::min_length(2))
        .validation(validators::max_length(4));

    assert!(read(&reader, json!("abc")).is_success());
    assert_eq!(code(&read(&reader, json!("a"))), Some("min_length"));
    assert_eq!(code(&read(&reader, json!("abcde"))), Some("max_length"));
}

#[test]
fn test_length_counts_characters() {
    let reader = readers::string().validation(validators::max_length(3));
    assert!(read(&reader, json!("äöü")).is_success());
}

#[test]
fn test_not_blank() {
    let reader = readers::string().validation(validators::not_blank());
    assert!(read(&reader, json!(" x ")).is_success());
    assert_eq!(code(&read(&reader, json!(" \t"))), Some("not_blank"));
}

#[test]
fn test_pattern() {
    let reader = readers::string().validation(validators::pattern(r"^[A-Z]{3}$").unwrap());
    assert!(read(&reader, json!("USD")).is_success());

    let result = read(&reader, json!("usd"));
    assert_eq!(code(&result), Some("pattern"));
    assert_eq!(result.causes().unwrap().first().error.got.as_deref(), Some("usd"));
}

#[test]
fn test_invalid_pattern_is_rejected_up_front() {
    assert!(validators::pattern::<BindingError>("[").is_err());
}

// ====== Numeric Tests ======

#[test]
fn test_inclusive_bounds() {
    let reader = readers::integer::<i32, _>()
        .validation(validators::minimum(0))
        .validation(validators::maximum(10));

    assert!(read(&reader, json!(0)).is_success());
    assert!(read(&reader, json!(10)).is_success());
    assert_eq!(code(&read(&reader, json!(-1))), Some("minimum"));
    assert_eq!(code(&read(&reader, json!(11))), Some("maximum"));
}

#[test]
fn test_exclusive_bounds() {
    let reader = readers::number()
        .validation(validators::exclusive_minimum(0.0))
        .validation(validators::exclusive_maximum(1.0));

    assert!(read(&reader, json!(0.5)).is_success());
    assert_eq!(code(&read(&reader, json!(0.0))), Some("exclusive_minimum"));
    assert_eq!(code(&read(&reader, json!(1.0))), Some("exclusive_maximum"));
}

#[test]
fn test_validator_combinators() {
    let small_or_round = validators::maximum(9).or(validators::minimum(100));
    let reader = readers::integer::<i64, _>().validation(small_or_round);
    assert!(read(&reader, json!(5)).is_success());
    assert!(read(&reader, json!(200)).is_success());
    assert_eq!(code(&read(&reader, json!(50))), Some("minimum"));

    let only_even = validators::minimum(10).apply_if(|_, _, value: &i64| value % 2 == 0);
    let reader = readers::integer::<i64, _>().validation(only_even);
    assert!(read(&reader, json!(3)).is_success());
    assert_eq!(code(&read(&reader, json!(4))), Some("minimum"));
}

#[test]
fn test_apply_if_not_null() {
    let reader = readers::string()
        .nullable()
        .validation(validators::min_length(2).apply_if_not_null());
    assert_eq!(read(&reader, Value::Null).value(), Some(&None));
    assert_eq!(code(&read(&reader, json!("a"))), Some("min_length"));
}

// ====== Object / Array Tests ======

#[test]
fn test_property_count() {
    let reader = readers::map(readers::value())
        .map(|entries| entries.into_iter().collect::<serde_json::Map<String, Value>>())
        .validation(validators::min_properties(1))
        .validation(validators::max_properties(2));

    assert!(read(&reader, json!({"a": 1})).is_success());
    assert_eq!(code(&read(&reader, json!({}))), Some("property_count"));
    assert_eq!(code(&read(&reader, json!({"a": 1, "b": 2, "c": 3}))), Some("property_count"));
}

#[test]
fn test_unique_items() {
    let reader =
        readers::array(readers::integer::<i32, _>()).validation(validators::unique_items());
    assert!(read(&reader, json!([1, 2, 3])).is_success());
    assert_eq!(code(&read(&reader, json!([1, 2, 1]))), Some("unique_items"));
}
