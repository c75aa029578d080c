//! Request schemas, built once per process.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Rule, Schema};

lazy_static! {
    static ref UPPERCASE_REGEX: Regex =
        Regex::new(r"[A-Z]").expect("UPPERCASE_REGEX should be a valid regex pattern");
    static ref DIGIT_REGEX: Regex =
        Regex::new(r"\d").expect("DIGIT_REGEX should be a valid regex pattern");
    // Same character classes `slugify` keeps
    static ref SLUGGABLE_REGEX: Regex = Regex::new(r"[\p{Alphabetic}\p{N}]")
        .expect("SLUGGABLE_REGEX should be a valid regex pattern");

    /// `POST /auth/register`
    pub static ref REGISTER: Schema = Schema::new()
        .required("fullName")
        .required("username")
        .required("email")
        .email("email")
        .required("password")
        .rule("password", Rule::MinLength(6), "password must be at least 6 character")
        .rule(
            "password",
            Rule::Pattern(UPPERCASE_REGEX.clone()),
            "Contains at least one uppercase letter",
        )
        .rule(
            "password",
            Rule::Pattern(DIGIT_REGEX.clone()),
            "Contains at least one number",
        )
        .required("confirmPassword")
        .rule(
            "confirmPassword",
            Rule::EqualsField("password"),
            "password must be match",
        );

    /// `POST /auth/login`
    pub static ref LOGIN: Schema = Schema::new()
        .required("identifier")
        .required("password");

    /// `POST /auth/activation`
    pub static ref ACTIVATION: Schema = Schema::new().required("code");

    /// `POST /category`
    pub static ref CATEGORY: Schema = Schema::new()
        .required("name")
        .required("description")
        .required("icon");

    /// `PUT /category/:id`, all fields optional
    pub static ref CATEGORY_UPDATE: Schema = Schema::new()
        .not_empty("name")
        .not_empty("description")
        .not_empty("icon");

    /// `POST /events`
    pub static ref EVENT: Schema = event_types(
        Schema::new()
            .required("name")
            .required("category")
            .required("description")
            .required("banner")
            .required("startDate")
            .required("endDate"),
    );

    /// `PUT /events/:id`, all fields optional
    pub static ref EVENT_UPDATE: Schema = event_types(
        Schema::new()
            .not_empty("name")
            .not_empty("description")
            .not_empty("banner"),
    );
}

fn event_types(schema: Schema) -> Schema {
    schema
        .rule(
            "name",
            Rule::Pattern(SLUGGABLE_REGEX.clone()),
            "name must contain at least one letter or number",
        )
        .uuid("category")
        .timestamp("startDate")
        .timestamp("endDate")
        .boolean("isOnline")
        .boolean("isFeatured")
        .boolean("isPublished")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn register_payload(password: &str, confirm: &str) -> Value {
        json!({
            "fullName": "Alice Liddell",
            "username": "alice",
            "email": "alice@example.com",
            "password": password,
            "confirmPassword": confirm,
        })
    }

    #[test]
    fn test_register_accepts_valid_payload() {
        assert!(REGISTER.validate(&register_payload("Abc123", "Abc123")).is_ok());
    }

    #[test]
    fn test_register_password_rules() {
        let cases = [
            ("Ab1", "password must be at least 6 character"),
            ("abc123", "Contains at least one uppercase letter"),
            ("Abcdef", "Contains at least one number"),
        ];

        for (password, reason) in cases {
            let err = REGISTER
                .validate(&register_payload(password, password))
                .unwrap_err();
            assert_eq!(err.field, "password");
            assert_eq!(err.reason, reason, "password {:?}", password);
        }
    }

    #[test]
    fn test_register_confirm_password() {
        let err = REGISTER
            .validate(&register_payload("Abc123", "Abc124"))
            .unwrap_err();
        assert_eq!(err.field, "confirmPassword");
        assert_eq!(err.reason, "password must be match");

        let mut payload = register_payload("Abc123", "");
        let err = REGISTER.validate(&payload).unwrap_err();
        assert_eq!(err.reason, "confirmPassword is a required field");

        payload["confirmPassword"] = Value::Null;
        assert_eq!(REGISTER.validate(&payload).unwrap_err().field, "confirmPassword");
    }

    #[test]
    fn test_register_reports_first_failure() {
        let err = REGISTER.validate(&json!({})).unwrap_err();
        assert_eq!(err.field, "fullName");

        let mut payload = register_payload("abc", "xyz");
        payload["email"] = json!("not-an-email");
        let err = REGISTER.validate(&payload).unwrap_err();
        assert_eq!(err.reason, "email must be a valid email");
    }

    #[test]
    fn test_login_requires_presence_only() {
        assert!(LOGIN
            .validate(&json!({ "identifier": "alice", "password": "x" }))
            .is_ok());
        assert_eq!(
            LOGIN.validate(&json!({ "password": "x" })).unwrap_err().field,
            "identifier"
        );
        assert_eq!(
            LOGIN.validate(&json!({ "identifier": "alice" })).unwrap_err().field,
            "password"
        );
    }

    #[test]
    fn test_event_schema() {
        let payload = json!({
            "name": "RustConf",
            "category": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "description": "Annual conference",
            "banner": "rustconf.png",
            "startDate": "2025-09-02T09:00:00Z",
            "endDate": "2025-09-04T18:00:00Z",
            "isOnline": false,
        });
        assert!(EVENT.validate(&payload).is_ok());

        let mut bad = payload.clone();
        bad["isOnline"] = json!("no");
        assert_eq!(EVENT.validate(&bad).unwrap_err().field, "isOnline");

        assert!(EVENT_UPDATE.validate(&json!({ "name": "RustConf 2" })).is_ok());
        assert!(EVENT_UPDATE.validate(&json!({ "endDate": "soon" })).is_err());
    }

    #[test]
    fn test_event_name_needs_a_sluggable_character() {
        let reason = "name must contain at least one letter or number";

        let mut payload = json!({
            "name": "!!!",
            "category": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "description": "Annual conference",
            "banner": "rustconf.png",
            "startDate": "2025-09-02T09:00:00Z",
            "endDate": "2025-09-04T18:00:00Z",
        });
        assert_eq!(EVENT.validate(&payload).unwrap_err().reason, reason);

        payload["name"] = json!("Montréal");
        assert!(EVENT.validate(&payload).is_ok());

        let err = EVENT_UPDATE.validate(&json!({ "name": "-- ?" })).unwrap_err();
        assert_eq!(err.reason, reason);
    }

    #[test]
    fn test_updates_reject_blank_fields() {
        for field in ["name", "description", "icon"] {
            let err = CATEGORY_UPDATE
                .validate(&json!({ field: "" }))
                .unwrap_err();
            assert_eq!(err.field, field);
            assert_eq!(err.reason, format!("{} must not be empty", field));
        }
        assert!(CATEGORY_UPDATE.validate(&json!({})).is_ok());
        assert!(CATEGORY_UPDATE.validate(&json!({ "icon": "music.png" })).is_ok());

        for field in ["name", "description", "banner"] {
            let err = EVENT_UPDATE.validate(&json!({ field: "" })).unwrap_err();
            assert_eq!(err.field, field);
        }
    }
}
