use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::validation::{Checker, FieldPath, ValidationFailure};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 12;
pub const AGE_MIN: i64 = 18;
pub const AGE_MAX: i64 = 100;
pub const DEFAULT_AGE: i64 = 28;

/// A client-submitted user after validation: age defaulted, email lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    pub name: String,
    pub age: i64,
    pub email: String,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern must compile")
    })
}

/// Standard email syntax. The pattern alone accepts a leading dot or a
/// doubled dot in the local part, so those are rejected separately.
pub fn is_valid_email(email: &str) -> bool {
    let local = email.split('@').next().unwrap_or_default();
    !local.starts_with('.') && !local.contains("..") && email_regex().is_match(email)
}

/// Validates a raw request body against the `UserInput` schema.
///
/// Every field is checked; all violations are reported together in
/// `name`, `age`, `email` order. Unknown keys are dropped.
pub fn validate_user_input(body: Option<&Value>) -> Result<UserInput, ValidationFailure> {
    let mut checker = Checker::new();
    let root = FieldPath::root();

    let Some(map) = checker.object(body, &root) else {
        return checker.finish(None);
    };

    let name = check_name(&mut checker, map, &root);
    let age = check_age(&mut checker, map, &root);
    let email = check_email(&mut checker, map, &root);

    let user = match (name, age, email) {
        (Some(name), Some(age), Some(email)) => Some(UserInput { name, age, email }),
        _ => None,
    };
    checker.finish(user)
}

fn check_name(checker: &mut Checker, map: &Map<String, Value>, root: &FieldPath) -> Option<String> {
    let path = root.key("name");
    let name = checker.string(map.get("name"), &path)?;
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        checker.fail(&path, format!("Name must be at least {NAME_MIN_CHARS} characters"));
        return None;
    }
    if len > NAME_MAX_CHARS {
        checker.fail(&path, format!("Name must be at most {NAME_MAX_CHARS} characters"));
        return None;
    }
    Some(name)
}

fn check_age(checker: &mut Checker, map: &Map<String, Value>, root: &FieldPath) -> Option<i64> {
    let path = root.key("age");
    let raw = match map.get("age") {
        None => return Some(DEFAULT_AGE),
        Some(Value::Number(n)) => n,
        other => {
            checker.type_mismatch(&path, "number", other);
            return None;
        }
    };

    // 30 and 30.0 are both integers; 30.5 is not. Integers beyond i64
    // saturate in the cast and then fail the range check.
    let age = match raw.as_i64() {
        Some(age) => age,
        None => match raw.as_f64() {
            Some(f) if f.fract() == 0.0 => f as i64,
            _ => {
                checker.fail(&path, "Expected integer, received float");
                return None;
            }
        },
    };

    if age < AGE_MIN {
        checker.fail(&path, format!("Age must be at least {AGE_MIN}"));
        return None;
    }
    if age > AGE_MAX {
        checker.fail(&path, format!("Age must be at most {AGE_MAX}"));
        return None;
    }
    Some(age)
}

fn check_email(checker: &mut Checker, map: &Map<String, Value>, root: &FieldPath) -> Option<String> {
    let path = root.key("email");
    let email = checker.string(map.get("email"), &path)?;
    if !is_valid_email(&email) {
        checker.fail(&path, "Must be a valid email");
        return None;
    }
    Some(email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(body: Value) -> Vec<String> {
        validate_user_input(Some(&body))
            .unwrap_err()
            .errors
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn test_valid_input_passes_through() {
        let user =
            validate_user_input(Some(&json!({"name": "Ada", "age": 36, "email": "ada@example.com"})))
                .unwrap();
        assert_eq!(
            user,
            UserInput {
                name: "Ada".to_string(),
                age: 36,
                email: "ada@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_age_defaults_to_28() {
        let user =
            validate_user_input(Some(&json!({"name": "Grace", "email": "g@navy.mil"}))).unwrap();
        assert_eq!(user.age, 28);
    }

    #[test]
    fn test_email_is_lowercased() {
        let user =
            validate_user_input(Some(&json!({"name": "Foo", "email": "Foo@BAR.com"}))).unwrap();
        assert_eq!(user.email, "foo@bar.com");
    }

    #[test]
    fn test_name_too_short() {
        let err = validate_user_input(Some(&json!({"name": "Al", "email": "al@x.io"}))).unwrap_err();
        assert_eq!(err.errors[0].field, "name");
        assert_eq!(err.errors[0].message, "Name must be at least 3 characters");
    }

    #[test]
    fn test_name_too_long() {
        let err = validate_user_input(Some(&json!({"name": "Bartholomew Jr", "email": "b@x.io"})))
            .unwrap_err();
        assert_eq!(err.errors[0].message, "Name must be at most 12 characters");
    }

    #[test]
    fn test_name_length_boundaries_are_inclusive() {
        assert!(validate_user_input(Some(&json!({"name": "Abe", "email": "a@x.io"}))).is_ok());
        assert!(
            validate_user_input(Some(&json!({"name": "Abcdefghijkl", "email": "a@x.io"}))).is_ok()
        );
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        assert!(validate_user_input(Some(&json!({"name": "Zoë", "email": "z@x.io"}))).is_ok());
    }

    #[test]
    fn test_age_bounds() {
        let err =
            validate_user_input(Some(&json!({"name": "Kid", "age": 17, "email": "k@x.io"})))
                .unwrap_err();
        assert_eq!(err.errors[0].message, "Age must be at least 18");

        let err =
            validate_user_input(Some(&json!({"name": "Old", "age": 101, "email": "o@x.io"})))
                .unwrap_err();
        assert_eq!(err.errors[0].message, "Age must be at most 100");

        assert!(validate_user_input(Some(&json!({"name": "Edge", "age": 18, "email": "e@x.io"})))
            .is_ok());
        assert!(
            validate_user_input(Some(&json!({"name": "Edge", "age": 100, "email": "e@x.io"})))
                .is_ok()
        );
    }

    #[test]
    fn test_age_must_be_integer() {
        let err =
            validate_user_input(Some(&json!({"name": "Half", "age": 30.5, "email": "h@x.io"})))
                .unwrap_err();
        assert_eq!(err.errors[0].field, "age");
        assert_eq!(err.errors[0].message, "Expected integer, received float");
    }

    #[test]
    fn test_huge_integer_age_is_out_of_range() {
        let body: Value = serde_json::from_str(
            r#"{"name": "Big", "age": 18446744073709551615, "email": "b@x.io"}"#,
        )
        .unwrap();
        let err = validate_user_input(Some(&body)).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "age");
        assert_eq!(err.errors[0].message, "Age must be at most 100");

        let err =
            validate_user_input(Some(&json!({"name": "Neg", "age": -1e300, "email": "n@x.io"})))
                .unwrap_err();
        assert_eq!(err.errors[0].message, "Age must be at least 18");
    }

    #[test]
    fn test_integral_float_age_is_accepted() {
        let user =
            validate_user_input(Some(&json!({"name": "Whole", "age": 30.0, "email": "w@x.io"})))
                .unwrap();
        assert_eq!(user.age, 30);
    }

    #[test]
    fn test_null_age_is_a_type_error() {
        assert_eq!(
            fields(json!({"name": "Nul", "age": null, "email": "n@x.io"})),
            vec!["age"]
        );
    }

    #[test]
    fn test_email_without_domain_is_rejected() {
        for email in ["plainaddress", "user@", "@example.com", "user@localhost", "a..b@x.io"] {
            let err = validate_user_input(Some(&json!({"name": "Bob", "email": email}))).unwrap_err();
            assert_eq!(err.errors[0].field, "email", "{email} should be rejected");
            assert_eq!(err.errors[0].message, "Must be a valid email");
        }
    }

    #[test]
    fn test_is_valid_email_accepts_common_forms() {
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(is_valid_email("o'brien@example.ie"));
        assert!(!is_valid_email(".dot@example.com"));
        assert!(!is_valid_email("trailing.@example.com"));
    }

    #[test]
    fn test_all_violations_are_collected() {
        assert_eq!(
            fields(json!({"name": "Al", "age": 5, "email": "nope"})),
            vec!["name", "age", "email"]
        );
    }

    #[test]
    fn test_missing_fields_report_required() {
        let err = validate_user_input(Some(&json!({}))).unwrap_err();
        let messages: Vec<_> = err.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Required", "Required"]);
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["name", "email"]);
    }

    #[test]
    fn test_non_object_body_fails_at_root() {
        let err = validate_user_input(Some(&json!(["Ada"]))).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "");
        assert_eq!(err.errors[0].message, "Expected object, received array");

        let err = validate_user_input(None).unwrap_err();
        assert_eq!(err.errors[0].message, "Required");
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let user = validate_user_input(Some(
            &json!({"name": "Ada", "email": "a@x.io", "admin": true}),
        ))
        .unwrap();
        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out, json!({"name": "Ada", "age": 28, "email": "a@x.io"}));
    }
}
