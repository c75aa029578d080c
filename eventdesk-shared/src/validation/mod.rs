/// Declarative request validation
///
/// A [`Schema`] is an ordered list of field rules. [`Schema::validate`] walks
/// the list in declaration order against a JSON payload and stops at the first
/// failing rule, returning its message.
///
/// Only [`Rule::Required`] fails on a missing or `null` value. Every other rule
/// passes when the field is absent, which lets the same rule set serve partial
/// updates.
///
/// # Example
///
/// ```
/// use eventdesk_shared::validation::{Rule, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .required("email")
///     .rule("email", Rule::Email, "email must be a valid email");
///
/// assert!(schema.validate(&json!({ "email": "alice@example.com" })).is_ok());
///
/// let err = schema.validate(&json!({ "email": "nope" })).unwrap_err();
/// assert_eq!(err.field, "email");
/// assert_eq!(err.reason, "email must be a valid email");
/// ```

pub mod schemas;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::ValidateEmail;

/// First rule violation found in a payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,

    /// Human-readable message of the failing rule
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Predicate applied to a single field
#[derive(Debug, Clone)]
pub enum Rule {
    /// Present, not null, and not an empty string
    Required,

    /// String in email address format
    Email,

    /// String of at least this many characters
    MinLength(usize),

    /// String containing a match for the pattern
    Pattern(Regex),

    /// Equal to the value of another field
    EqualsField(&'static str),

    /// JSON boolean
    Boolean,

    /// RFC 3339 timestamp string
    Timestamp,

    /// UUID string
    Uuid,
}

/// A rule bound to a field with its failure message
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub message: String,
}

/// Ordered set of field rules
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule with an explicit message
    pub fn rule(mut self, field: &'static str, rule: Rule, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule {
            field,
            rule,
            message: message.into(),
        });
        self
    }

    /// Appends [`Rule::Required`] with the default message
    pub fn required(self, field: &'static str) -> Self {
        self.rule(field, Rule::Required, format!("{} is a required field", field))
    }

    /// Appends `MinLength(1)`: an optional field, if given, can't be blank
    pub fn not_empty(self, field: &'static str) -> Self {
        self.rule(
            field,
            Rule::MinLength(1),
            format!("{} must not be empty", field),
        )
    }

    /// Appends [`Rule::Email`] with the default message
    pub fn email(self, field: &'static str) -> Self {
        self.rule(field, Rule::Email, format!("{} must be a valid email", field))
    }

    /// Appends [`Rule::Boolean`] with the default message
    pub fn boolean(self, field: &'static str) -> Self {
        self.rule(field, Rule::Boolean, format!("{} must be a `boolean` type", field))
    }

    /// Appends [`Rule::Timestamp`] with the default message
    pub fn timestamp(self, field: &'static str) -> Self {
        self.rule(
            field,
            Rule::Timestamp,
            format!("{} must be a valid date-time", field),
        )
    }

    /// Appends [`Rule::Uuid`] with the default message
    pub fn uuid(self, field: &'static str) -> Self {
        self.rule(field, Rule::Uuid, format!("{} must be a valid id", field))
    }

    /// Validates `payload`, failing fast on the first violated rule
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationError> {
        for field_rule in &self.rules {
            let value = payload.get(field_rule.field).filter(|v| !v.is_null());

            if !check(&field_rule.rule, value, payload) {
                return Err(ValidationError::new(field_rule.field, &field_rule.message));
            }
        }

        Ok(())
    }

    /// Validates `payload`, then deserializes it into `T`
    ///
    /// A payload that passes every rule but still doesn't fit `T` is
    /// reported against the `body` field.
    pub fn parse<T: DeserializeOwned>(&self, payload: &Value) -> Result<T, ValidationError> {
        self.validate(payload)?;
        T::deserialize(payload).map_err(|e| ValidationError::new("body", e.to_string()))
    }
}

fn check(rule: &Rule, value: Option<&Value>, payload: &Value) -> bool {
    let value = match (rule, value) {
        (Rule::Required, None) => return false,
        (Rule::Required, Some(Value::String(s))) => return !s.is_empty(),
        (Rule::Required, Some(_)) => return true,
        (_, None) => return true,
        (_, Some(value)) => value,
    };

    match rule {
        Rule::Required => true,
        Rule::Email => value.as_str().is_some_and(|s| s.validate_email()),
        Rule::MinLength(min) => value.as_str().is_some_and(|s| s.chars().count() >= *min),
        Rule::Pattern(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
        Rule::EqualsField(other) => payload.get(*other) == Some(value),
        Rule::Boolean => value.is_boolean(),
        Rule::Timestamp => value
            .as_str()
            .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok()),
        Rule::Uuid => value
            .as_str()
            .is_some_and(|s| uuid::Uuid::parse_str(s).is_ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_rejects_missing_null_and_empty() {
        let schema = Schema::new().required("name");

        assert!(schema.validate(&json!({ "name": "x" })).is_ok());
        assert!(schema.validate(&json!({ "name": 0 })).is_ok());
        assert!(schema.validate(&json!({})).is_err());
        assert!(schema.validate(&json!({ "name": null })).is_err());
        assert!(schema.validate(&json!({ "name": "" })).is_err());
    }

    #[test]
    fn test_optional_rules_skip_absent_fields() {
        let schema = Schema::new()
            .email("email")
            .boolean("flag")
            .timestamp("at")
            .rule("name", Rule::MinLength(3), "too short");

        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({ "email": null })).is_ok());
    }

    #[test]
    fn test_fail_fast_in_declaration_order() {
        let schema = Schema::new()
            .required("first")
            .required("second");

        let err = schema.validate(&json!({})).unwrap_err();
        assert_eq!(err.field, "first");
        assert_eq!(err.reason, "first is a required field");

        let err = schema.validate(&json!({ "first": "ok" })).unwrap_err();
        assert_eq!(err.field, "second");
    }

    #[test]
    fn test_not_empty_only_applies_when_present() {
        let schema = Schema::new().not_empty("name");

        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({ "name": null })).is_ok());
        assert!(schema.validate(&json!({ "name": "x" })).is_ok());

        let err = schema.validate(&json!({ "name": "" })).unwrap_err();
        assert_eq!(err.reason, "name must not be empty");
    }

    #[test]
    fn test_string_rules_reject_non_strings() {
        let schema = Schema::new().rule("name", Rule::MinLength(1), "bad");
        assert!(schema.validate(&json!({ "name": 42 })).is_err());
    }

    #[test]
    fn test_min_length_counts_characters() {
        let schema = Schema::new().rule("name", Rule::MinLength(3), "too short");

        assert!(schema.validate(&json!({ "name": "日本語" })).is_ok());
        assert!(schema.validate(&json!({ "name": "ab" })).is_err());
    }

    #[test]
    fn test_pattern() {
        let schema = Schema::new().rule("code", Rule::Pattern(Regex::new(r"\d").unwrap()), "digit");

        assert!(schema.validate(&json!({ "code": "abc1" })).is_ok());
        let err = schema.validate(&json!({ "code": "abc" })).unwrap_err();
        assert_eq!(err.reason, "digit");
    }

    #[test]
    fn test_equals_field() {
        let schema = Schema::new().rule("confirm", Rule::EqualsField("password"), "mismatch");

        assert!(schema
            .validate(&json!({ "password": "Abc123", "confirm": "Abc123" }))
            .is_ok());
        assert!(schema
            .validate(&json!({ "password": "Abc123", "confirm": "Abc124" }))
            .is_err());
        assert!(schema.validate(&json!({ "confirm": "Abc123" })).is_err());
    }

    #[test]
    fn test_typed_rules() {
        let schema = Schema::new().boolean("flag").timestamp("at").uuid("id");

        assert!(schema
            .validate(&json!({
                "flag": true,
                "at": "2025-01-01T10:00:00Z",
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8"
            }))
            .is_ok());
        assert_eq!(
            schema.validate(&json!({ "flag": "yes" })).unwrap_err().field,
            "flag"
        );
        assert_eq!(
            schema.validate(&json!({ "at": "tomorrow" })).unwrap_err().field,
            "at"
        );
        assert_eq!(
            schema.validate(&json!({ "id": "42" })).unwrap_err().field,
            "id"
        );
    }
}
