//! Integration tests for environments, error builders and exception handlers.

use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

use bindery::{
    readers, ArrayReader, ConfigError, Context, Environment, ErrorKind, Failure, OptionKey,
    ReadError, Reader,
};
use serde_json::json;

/// A caller-defined domain error.
#[derive(Debug, Clone, PartialEq)]
enum ApiError {
    WrongType { expected: String },
    Missing,
    Other(String),
}

fn api_error(failure: &Failure) -> ApiError {
    match failure {
        Failure::InvalidType { expected, .. } => ApiError::WrongType {
            expected: expected.to_string(),
        },
        Failure::RequiredFieldMissing => ApiError::Missing,
        other => ApiError::Other(other.kind().code().to_string()),
    }
}

#[derive(Debug)]
struct DecodeFailed {
    source: ParseIntError,
}

impl fmt::Display for DecodeFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decode failed")
    }
}

impl Error for DecodeFailed {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

#[test]
fn test_custom_error_type() {
    let env = Environment::builder()
        .error_builder(ErrorKind::InvalidType, api_error)
        .error_builder(ErrorKind::RequiredFieldMissing, api_error)
        .build()
        .unwrap();

    let result = readers::boolean()
        .read_document(&env, &Context::empty(), &json!("yes"))
        .unwrap();
    assert_eq!(
        result.causes().unwrap().first().error,
        ApiError::WrongType {
            expected: "boolean".into()
        }
    );
}

#[test]
fn test_build_fails_without_required_builders() {
    let outcome = Environment::<ApiError>::builder()
        .error_builder(ErrorKind::RequiredFieldMissing, api_error)
        .build();
    assert_eq!(
        outcome.unwrap_err(),
        ConfigError::MissingErrorBuilder(ErrorKind::InvalidType)
    );
}

#[test]
fn test_missing_builder_is_fatal_on_first_use() {
    let env = Environment::builder()
        .error_builder(ErrorKind::InvalidType, api_error)
        .error_builder(ErrorKind::RequiredFieldMissing, api_error)
        .build()
        .unwrap();

    let pair = ArrayReader::prefix_items(vec![readers::string(), readers::string()]).build();
    let outcome = pair.read_document(&env, &Context::empty(), &json!(["a", "b", "c"]));
    match outcome {
        Err(ReadError::Config(ConfigError::MissingErrorBuilder(kind))) => {
            assert_eq!(kind, ErrorKind::AdditionalItems)
        }
        _ => panic!("expected a configuration error"),
    }
}

#[test]
fn test_handler_matches_through_source_chain() {
    let env = Environment::builder()
        .error_builders(api_error)
        .handle::<ParseIntError, _>(|_, _, location, error| {
            ApiError::Other(format!("{} at {}", error, location))
        })
        .build()
        .unwrap();

    let reader: Reader<i32, ApiError> = readers::string().try_map(|s| {
        s.parse::<i32>()
            .map_err(|source| DecodeFailed { source }.into())
    });
    let result = reader
        .read(
            &env,
            &Context::empty(),
            &bindery::Location::root().push_key("n"),
            Some(&json!("x1")),
        )
        .unwrap();
    assert_eq!(
        result.causes().unwrap().first().error,
        ApiError::Other("decode failed at #/n".into())
    );
}

#[test]
fn test_handlers_are_ordered() {
    let env = Environment::builder()
        .error_builders(api_error)
        .exception_handler(
            |error| error.to_string().contains("decode"),
            |_, _, _, _| ApiError::Other("by message".into()),
        )
        .handle::<DecodeFailed, _>(|_, _, _, _| ApiError::Other("by type".into()))
        .build()
        .unwrap();

    let error = DecodeFailed {
        source: "x".parse::<u8>().unwrap_err(),
    };
    let handled = env.handle_exception(&Context::empty(), &bindery::Location::root(), &error);
    assert_eq!(handled, Some(ApiError::Other("by message".into())));
}

#[test]
fn test_options_default_and_override() {
    const LIMIT: OptionKey<u32> = OptionKey::new("limit", 10);

    let default_env = Environment::builder()
        .error_builders(api_error)
        .build()
        .unwrap();
    assert_eq!(default_env.option(&LIMIT), 10);
    assert!(default_env.is_fail_fast());

    let env = Environment::builder()
        .error_builders(api_error)
        .option(&LIMIT, 3)
        .fail_fast(false)
        .build()
        .unwrap();
    assert_eq!(env.option(&LIMIT), 3);
    assert!(!env.is_fail_fast());
}

#[test]
fn test_reader_can_consult_options() {
    const UPPERCASE: OptionKey<bool> = OptionKey::new("uppercase", false);

    let reader = readers::string::<ApiError>().and_then(|env, _, location, s| {
        let s = if env.option(&UPPERCASE) {
            s.to_uppercase()
        } else {
            s
        };
        Ok(bindery::ReadResult::success(location.clone(), s))
    });

    let env = Environment::builder()
        .error_builders(api_error)
        .option(&UPPERCASE, true)
        .build()
        .unwrap();
    let result = reader
        .read_document(&env, &Context::empty(), &json!("abc"))
        .unwrap();
    assert_eq!(result.value().map(String::as_str), Some("ABC"));
}
