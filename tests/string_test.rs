use serde_json::json;
use stillwater::Validation;
use veto::{IssueCode, JsonPath, Schema, SchemaLike};

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

// ====== Trim-before-validate ======

#[test]
fn test_trimmed_length_decides_min_check() {
    let schema = Schema::string().min(3);

    // "  ab  " trims to "ab" (length 2): fails with minimum 3.
    let errors = unwrap_failure(schema.validate(&json!("  ab  "), &JsonPath::root()));
    assert_eq!(errors.first().code, IssueCode::TooSmall);
    assert_eq!(errors.first().minimum, Some(3u64.into()));

    // "  abc  " trims to "abc" (length 3): succeeds.
    let result = schema.validate(&json!("  abc  "), &JsonPath::root());
    assert_eq!(result.into_result().unwrap(), json!("abc"));
}

#[test]
fn test_whitespace_only_fails_default_min() {
    let schema = Schema::string();
    let errors = unwrap_failure(schema.validate(&json!("   "), &JsonPath::root()));
    assert_eq!(errors.first().code, IssueCode::TooSmall);
    assert_eq!(errors.first().minimum, Some(1u64.into()));
}

#[test]
fn test_pattern_checked_after_trim() {
    let schema = Schema::string().pattern(r"^\d+$").unwrap();
    assert!(schema.validate(&json!("  123  "), &JsonPath::root()).is_success());
}

// ====== Defaults and bounds ======

#[test]
fn test_empty_string_rejected_by_default() {
    let schema = Schema::string();
    assert!(schema.validate(&json!(""), &JsonPath::root()).is_failure());
}

#[test]
fn test_min_zero_allows_empty() {
    let schema = Schema::string().min(0);
    assert!(schema.validate(&json!(""), &JsonPath::root()).is_success());
}

#[test]
fn test_max_bound_reports_too_big() {
    let schema = Schema::string().max(5);
    let errors = unwrap_failure(schema.validate(&json!("abcdefgh"), &JsonPath::root()));
    assert_eq!(errors.first().code, IssueCode::TooBig);
    assert_eq!(errors.first().maximum, Some(5u64.into()));
}

#[test]
fn test_min_and_pattern_violations_accumulate() {
    let schema = Schema::string().min(10).pattern(r"^\d+$").unwrap();
    let errors = unwrap_failure(schema.validate(&json!("abc"), &JsonPath::root()));
    assert_eq!(errors.len(), 2);
}

// ====== Type errors ======

#[test]
fn test_non_string_values_rejected() {
    let schema = Schema::string();
    for value in [json!(1), json!(true), json!(null), json!([]), json!({})] {
        let errors = unwrap_failure(schema.validate(&value, &JsonPath::root()));
        assert_eq!(errors.first().code, IssueCode::InvalidType);
        assert_eq!(errors.first().expected.as_deref(), Some("string"));
    }
}

#[test]
fn test_path_flows_into_issue() {
    let schema = Schema::string().min(5);
    let path = JsonPath::from_field("user").push_field("name");
    let errors = unwrap_failure(schema.validate(&json!("ab"), &path));
    assert_eq!(errors.first().path.to_string(), "user.name");
}
