use serde_json::json;
use stillwater::Validation;
use veto::{
    refine_array, refine_object, refine_string, veto, ArrayRules, Blacklist, IssueCode, JsonPath,
    NoConsecutive, ObjectRules, Schema, SchemaLike, StringRules, Unique,
};

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

// ====== refine_string ======

#[test]
fn test_blacklist_exact_and_wildcard() {
    let schema = refine_string(
        Schema::string(),
        StringRules::new().blacklist(Blacklist::new(["root", "admin*"])),
    );

    assert!(schema.validate(&json!("alice"), &JsonPath::root()).is_success());
    assert!(schema.validate(&json!("rooted"), &JsonPath::root()).is_success());
    assert!(schema.validate(&json!("root"), &JsonPath::root()).is_failure());
    assert!(schema.validate(&json!("admin"), &JsonPath::root()).is_failure());
    assert!(schema
        .validate(&json!("administrator"), &JsonPath::root())
        .is_failure());
}

#[test]
fn test_blacklist_default_message_quotes_value() {
    let schema = refine_string(
        Schema::string(),
        StringRules::new().blacklist(Blacklist::new(["root"])),
    );
    let errors = unwrap_failure(schema.validate(&json!("root"), &JsonPath::root()));
    assert_eq!(errors.first().message, "Value 'root' is blacklisted");
}

#[test]
fn test_blacklist_message_fn_sees_value() {
    let schema = refine_string(
        Schema::string(),
        StringRules::new().blacklist(
            Blacklist::new(["test*"]).message(|v| format!("'{}' is not a real username", v)),
        ),
    );
    let errors = unwrap_failure(schema.validate(&json!("test42"), &JsonPath::root()));
    assert_eq!(errors.first().message, "'test42' is not a real username");
}

#[test]
fn test_no_consecutive_characters() {
    let schema = refine_string(
        Schema::string(),
        StringRules::new().no_consecutive(NoConsecutive::new(['-', '_'])),
    );

    assert!(schema.validate(&json!("a-b_c"), &JsonPath::root()).is_success());

    let errors = unwrap_failure(schema.validate(&json!("a__b"), &JsonPath::root()));
    assert_eq!(
        errors.first().message,
        "Character '_' cannot appear consecutively"
    );
    assert_eq!(errors.first().code, IssueCode::Custom);
}

#[test]
fn test_string_custom_rule_reports_through_ctx() {
    let schema = refine_string(
        Schema::string(),
        StringRules::new().custom(|value, ctx| {
            if value.contains(' ') {
                ctx.add_issue("Spaces are not allowed");
            }
        }),
    );

    let errors = unwrap_failure(schema.validate(&json!("two words"), &JsonPath::root()));
    assert_eq!(errors.first().message, "Spaces are not allowed");
}

#[test]
fn test_refinement_and_structural_issues_coexist() {
    let schema = refine_string(
        Schema::string().min(10),
        StringRules::new().blacklist(Blacklist::new(["short"])),
    );

    let errors = unwrap_failure(schema.validate(&json!("short"), &JsonPath::root()));
    assert_eq!(errors.with_code(IssueCode::TooSmall).len(), 1);
    assert_eq!(errors.with_code(IssueCode::Custom).len(), 1);
}

#[test]
fn test_optional_absent_field_skips_string_rules() {
    let instance = veto(Schema::object().optional(
        "nickname",
        refine_string(
            Schema::string(),
            StringRules::new().custom(|_, ctx| ctx.add_issue("rule ran")),
        ),
    ));

    // Absent: rules skipped, success.
    assert!(instance.validate(&json!({})).success);
    // Present: rules run.
    assert!(!instance.validate(&json!({"nickname": "x"})).success);
}

// ====== refine_array / uniqueness ======

fn unique_strings() -> impl SchemaLike {
    refine_array(
        Schema::array(Schema::string()),
        ArrayRules::new().unique(Unique::new()),
    )
}

#[test]
fn test_uniqueness_idempotence_distinct() {
    // No duplicates: always succeeds.
    let schema = unique_strings();
    for _ in 0..3 {
        assert!(schema
            .validate(&json!(["a", "b", "c"]), &JsonPath::root())
            .is_success());
    }
}

#[test]
fn test_uniqueness_idempotence_duplicate() {
    // ['a','b','a']: exactly one array-level issue and one element issue at
    // index 2, every time.
    let schema = unique_strings();
    for _ in 0..3 {
        let errors =
            unwrap_failure(schema.validate(&json!(["a", "b", "a"]), &JsonPath::root()));
        let not_unique = errors.with_code(IssueCode::NotUnique);
        assert_eq!(not_unique.len(), 2);

        let (element, array): (Vec<_>, Vec<_>) =
            not_unique.into_iter().partition(|i| !i.path.is_root());
        assert_eq!(element.len(), 1);
        assert_eq!(element[0].path.to_string(), "[2]");
        assert_eq!(element[0].message, "Element already exists");
        assert_eq!(array.len(), 1);
        assert_eq!(array[0].message, "Array elements are not unique");
    }
}

#[test]
fn test_unique_by_map_fn_keys_elements() {
    let schema = refine_array(
        Schema::array(
            Schema::object()
                .field("id", Schema::number())
                .field("label", Schema::string()),
        ),
        ArrayRules::new().unique(Unique::new().by(|v| v["id"].clone())),
    );

    assert!(schema
        .validate(
            &json!([{"id": 1, "label": "x"}, {"id": 2, "label": "x"}]),
            &JsonPath::root()
        )
        .is_success());
    assert!(schema
        .validate(
            &json!([{"id": 1, "label": "x"}, {"id": 1, "label": "y"}]),
            &JsonPath::root()
        )
        .is_failure());
}

#[test]
fn test_unique_element_error_path_in_tree() {
    let instance = veto(Schema::object().field(
        "contacts",
        refine_array(
            Schema::array(
                Schema::object()
                    .field("email", Schema::string())
                    .field("name", Schema::string()),
            ),
            ArrayRules::new().unique(
                Unique::new()
                    .by(|v| v["email"].clone())
                    .at(JsonPath::from_field("email")),
            ),
        ),
    ));

    let result = instance.validate(&json!({"contacts": [
        {"email": "a@b", "name": "one"},
        {"email": "a@b", "name": "two"}
    ]}));

    let tree = result.errors.unwrap();
    let contacts = tree.get("contacts").unwrap();
    // Array-level issue in _errors, element issue nested at [1].email.
    assert_eq!(contacts.direct()[0].code, IssueCode::NotUnique);
    let email = contacts.get("1").unwrap().get("email").unwrap();
    assert_eq!(email.direct()[0].message, "Element already exists");
}

#[test]
fn test_structural_element_issue_and_uniqueness_in_same_result() {
    // A too-small string in one element and a duplicate in another both
    // surface.
    let schema = refine_array(
        Schema::array(Schema::string().min(2)),
        ArrayRules::new().unique(Unique::new()),
    );

    let errors = unwrap_failure(schema.validate(&json!(["ab", "x", "ab"]), &JsonPath::root()));
    assert_eq!(errors.with_code(IssueCode::TooSmall).len(), 1);
    assert_eq!(errors.with_code(IssueCode::NotUnique).len(), 2);
}

#[test]
fn test_array_custom_rule() {
    let schema = refine_array(
        Schema::array(Schema::number()),
        ArrayRules::new().custom(|items, ctx| {
            if items.len() > 2 {
                ctx.add_issue("Too many entries to review");
            }
        }),
    );

    assert!(schema.validate(&json!([1, 2]), &JsonPath::root()).is_success());
    assert!(schema
        .validate(&json!([1, 2, 3]), &JsonPath::root())
        .is_failure());
}

// ====== refine_object ======

#[test]
fn test_object_rule_defaults_to_root_errors() {
    let instance = veto(refine_object(
        Schema::object()
            .field("start", Schema::number())
            .field("end", Schema::number()),
        ObjectRules::new().custom(|obj, ctx| {
            let start = obj.get("start").and_then(serde_json::Value::as_f64);
            let end = obj.get("end").and_then(serde_json::Value::as_f64);
            if let (Some(start), Some(end)) = (start, end) {
                if start > end {
                    ctx.add_issue("start must come before end");
                }
            }
        }),
    ));

    let result = instance.validate(&json!({"start": 9, "end": 3}));
    let tree = result.errors.unwrap();
    assert_eq!(tree.errors()[0].message, "start must come before end");
}

#[test]
fn test_object_rule_with_path_targets_field() {
    let instance = veto(refine_object(
        Schema::object()
            .field("password", Schema::string())
            .field("confirm", Schema::string()),
        ObjectRules::new().custom(|obj, ctx| {
            if obj.get("password") != obj.get("confirm") {
                ctx.add_issue_at(JsonPath::from_field("confirm"), "Passwords do not match");
            }
        }),
    ));

    let result = instance.validate(&json!({"password": "aa1", "confirm": "aa2"}));
    let tree = result.errors.unwrap();
    assert_eq!(
        tree.get("confirm").unwrap().direct()[0].message,
        "Passwords do not match"
    );
}

#[test]
fn test_object_rule_runs_even_when_a_field_fails() {
    let instance = veto(refine_object(
        Schema::object()
            .field("name", Schema::string().min(5))
            .field("flag", Schema::boolean()),
        ObjectRules::new().custom(|_, ctx| ctx.add_issue("cross-check failed")),
    ));

    let result = instance.validate(&json!({"name": "ab", "flag": true}));
    let tree = result.errors.unwrap();
    assert_eq!(tree.errors()[0].message, "cross-check failed");
    assert_eq!(tree.get("name").unwrap().direct()[0].code, IssueCode::TooSmall);
}
