//! Integration tests for struct readers.

use bindery::{
    build_struct_reader, readers, validators, BindingError, Context, Environment,
    EnvironmentBuilder, Location, Reader, StructProperties, StructReader, Validator,
};
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
struct Task {
    id: String,
    title: Option<String>,
}

fn env(fail_fast: bool) -> Environment<BindingError> {
    EnvironmentBuilder::standard()
        .fail_fast(fail_fast)
        .build()
        .unwrap()
}

fn task_reader() -> Reader<Task, BindingError> {
    let mut props = StructProperties::new();
    let id = props.required("id", readers::string().validation(validators::not_blank()));
    let title = props.optional("title", readers::string().validation(validators::not_blank()));
    StructReader::new(props).build(move |values| Task {
        id: values.get(&id).clone(),
        title: values.get(&title).clone(),
    })
}

fn triple_reader() -> Reader<(String, String, String), BindingError> {
    let mut props = StructProperties::new();
    let a = props.required("a", readers::string());
    let b = props.required("b", readers::string());
    let c = props.required("c", readers::string());
    StructReader::new(props).build(move |values| {
        (
            values.get(&a).clone(),
            values.get(&b).clone(),
            values.get(&c).clone(),
        )
    })
}

#[test]
fn test_task_with_absent_title() {
    let result = task_reader()
        .read_document(&env(true), &Context::empty(), &json!({"id": "T1"}))
        .unwrap();
    assert_eq!(
        result.value(),
        Some(&Task {
            id: "T1".into(),
            title: None
        })
    );
    assert!(result.location().unwrap().is_root());
}

#[test]
fn test_task_with_blank_title_fails_at_title() {
    let result = task_reader()
        .read_document(&env(true), &Context::empty(), &json!({"id": "T1", "title": "  "}))
        .unwrap();
    let causes = result.causes().unwrap();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes.first().location.to_string(), "#/title");
    assert_eq!(causes.first().error.code, "not_blank");
}

#[test]
fn test_accumulate_reports_every_property_in_order() {
    let result = triple_reader()
        .read_document(&env(false), &Context::empty(), &json!({"a": 1, "b": 2, "c": 3}))
        .unwrap();
    let causes = result.causes().unwrap();
    let locations: Vec<String> = causes.iter().map(|c| c.location.to_string()).collect();
    assert_eq!(locations, vec!["#/a", "#/b", "#/c"]);
    assert!(causes.iter().all(|c| c.error.code == "invalid_type"));
}

#[test]
fn test_fail_fast_stops_at_first_property() {
    let result = triple_reader()
        .read_document(&env(true), &Context::empty(), &json!({"a": 1, "b": 2, "c": 3}))
        .unwrap();
    let causes = result.causes().unwrap();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes.first().location.to_string(), "#/a");
}

#[test]
fn test_missing_properties_are_located() {
    let result = triple_reader()
        .read_document(&env(false), &Context::empty(), &json!({"b": "x"}))
        .unwrap();
    let causes = result.causes().unwrap();
    assert_eq!(causes.len(), 2);
    assert_eq!(
        causes.at_location(&Location::root().push_key("c"))[0].error.code,
        "required"
    );
}

#[test]
fn test_non_object_is_invalid_type() {
    let result = triple_reader()
        .read_document(&env(false), &Context::empty(), &json!([1, 2]))
        .unwrap();
    let cause = result.causes().unwrap().first();
    assert_eq!(cause.error.code, "invalid_type");
    assert_eq!(cause.error.got.as_deref(), Some("array"));
}

#[test]
fn test_nullable_and_defaulted_properties() {
    let mut props = StructProperties::new();
    let parent = props.nullable("parent", readers::string());
    let note = props.optional_nullable("note", readers::string());
    let retries = props.defaulted("retries", readers::integer::<u32, _>(), 3);
    let reader = StructReader::new(props).build(move |values| {
        (
            values.get(&parent).clone(),
            values.get(&note).clone(),
            *values.get(&retries),
        )
    });

    let result = reader
        .read_document(&env(true), &Context::empty(), &json!({"parent": null}))
        .unwrap();
    assert_eq!(result.value(), Some(&(None, None, 3)));

    let missing_parent = reader
        .read_document(&env(true), &Context::empty(), &json!({}))
        .unwrap();
    let cause = missing_parent.causes().unwrap().first();
    assert_eq!(cause.location.to_string(), "#/parent");
    assert_eq!(cause.error.code, "required");
}

#[test]
fn test_forbid_additional_properties() {
    let mut props = StructProperties::new();
    let name = props.required("name", readers::string());
    let reader = StructReader::new(props)
        .forbid_additional_properties()
        .build(move |values| values.get(&name).clone());

    let result = reader
        .read_document(
            &env(false),
            &Context::empty(),
            &json!({"name": "a", "x": 1, "y": 2}),
        )
        .unwrap();
    let cause = result.causes().unwrap().first();
    assert_eq!(cause.error.code, "additional_properties");
    assert_eq!(cause.error.got.as_deref(), Some("x, y"));
    assert!(cause.location.is_root());
}

#[test]
fn test_before_validator_sees_raw_object() {
    let mut props = StructProperties::new();
    let name = props.required("name", readers::string());
    let reader = StructReader::new(props)
        .before(validators::max_properties(1))
        .build(move |values| values.get(&name).clone());

    let result = reader
        .read_document(&env(true), &Context::empty(), &json!({"name": "a", "x": 1}))
        .unwrap();
    assert_eq!(result.causes().unwrap().first().error.code, "property_count");
}

#[test]
fn test_before_validator_skipped_when_property_fails() {
    let mut props = StructProperties::new();
    let name = props.required("name", readers::string());
    let reader = StructReader::new(props)
        .before(validators::min_properties(2))
        .build(move |values| values.get(&name).clone());

    let bad_property = reader
        .read_document(&env(false), &Context::empty(), &json!({"name": 5}))
        .unwrap();
    let causes = bad_property.causes().unwrap();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes.first().location.to_string(), "#/name");

    let too_few = reader
        .read_document(&env(false), &Context::empty(), &json!({"name": "a"}))
        .unwrap();
    let cause = too_few.causes().unwrap().first();
    assert!(cause.location.is_root());
    assert_eq!(cause.error.code, "property_count");
}

#[test]
fn test_undeclared_properties_accumulate_with_property_errors() {
    let mut props = StructProperties::new();
    let name = props.required("name", readers::string());
    let reader = StructReader::new(props)
        .forbid_additional_properties()
        .build(move |values| values.get(&name).clone());

    let result = reader
        .read_document(&env(false), &Context::empty(), &json!({"name": 5, "x": 1}))
        .unwrap();
    let locations: Vec<String> = result
        .causes()
        .unwrap()
        .iter()
        .map(|c| c.location.to_string())
        .collect();
    assert_eq!(locations, vec!["#", "#/name"]);
}

#[test]
fn test_after_validator_runs_only_on_success() {
    let mut props = StructProperties::new();
    let start = props.required("start", readers::integer::<i64, _>());
    let end = props.required("end", readers::integer::<i64, _>());
    let after = Validator::new(
        move |env: &Environment<BindingError>, _, _, values: &bindery::PropertyValues| {
            if values.get(&start) > values.get(&end) {
                bindery::validator::reject(
                    env,
                    bindery::Failure::ValidationFailed {
                        rule: "range",
                        expected: "start <= end".into(),
                        actual: format!("{} > {}", values.get(&start), values.get(&end)),
                    },
                )
            } else {
                Ok(None)
            }
        },
    );
    let reader = build_struct_reader(props, None, Some(after), |_| ());

    let ok = reader
        .read_document(&env(false), &Context::empty(), &json!({"start": 1, "end": 2}))
        .unwrap();
    assert!(ok.is_success());

    let bad_range = reader
        .read_document(&env(false), &Context::empty(), &json!({"start": 3, "end": 2}))
        .unwrap();
    assert_eq!(bad_range.causes().unwrap().first().error.code, "range");

    // property errors suppress the after validator
    let bad_type = reader
        .read_document(&env(false), &Context::empty(), &json!({"start": "x", "end": 2}))
        .unwrap();
    let causes = bad_type.causes().unwrap();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes.first().error.code, "invalid_type");
}

#[test]
fn test_nested_struct_locations() {
    let mut inner = StructProperties::new();
    let city = inner.required("city", readers::string());
    let address = StructReader::new(inner).build(move |values| values.get(&city).clone());

    let mut outer = StructProperties::new();
    let addresses = outer.required("addresses", readers::array(address));
    let reader = StructReader::new(outer).build(move |values| values.get(&addresses).clone());

    let result = reader
        .read_document(
            &env(false),
            &Context::empty(),
            &json!({"addresses": [{"city": "Oslo"}, {"city": 7}]}),
        )
        .unwrap();
    assert_eq!(
        result.causes().unwrap().first().location.to_string(),
        "#/addresses/1/city"
    );
}

#[test]
fn test_context_override_is_scoped_to_property() {
    #[derive(Debug)]
    struct Strict;

    let strict_aware = Reader::new(
        |env: &Environment<BindingError>, ctx: &Context, location: &Location, node| {
            let strict = ctx.contains::<Strict>();
            readers::string()
                .map(move |s: String| if strict { s.to_uppercase() } else { s })
                .read(env, ctx, location, node)
        },
    );

    let mut props = StructProperties::new();
    let a = props.required("a", strict_aware.clone().with_context(|ctx| ctx.with(Strict)));
    let b = props.required("b", strict_aware);
    let reader = StructReader::new(props).build(move |values| {
        (values.get(&a).clone(), values.get(&b).clone())
    });

    let result = reader
        .read_document(&env(true), &Context::empty(), &json!({"a": "x", "b": "y"}))
        .unwrap();
    assert_eq!(result.value(), Some(&("X".to_string(), "y".to_string())));
}
