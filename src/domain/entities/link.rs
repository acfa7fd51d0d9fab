//! Short link entity and the validated input used to create or edit one.

use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Maximum length of a target URL, in characters.
pub const MAX_URL_LENGTH: u64 = 512;

/// Length of a generated short link id (lowercase hex).
pub const ID_LENGTH: usize = 32;

/// A stored mapping from a short id to its target URL.
///
/// The `id` is produced by the database when the row is inserted and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: String,
    pub url: String,
    pub new_window: bool,
}

impl ShortLink {
    pub fn new(id: String, url: String, new_window: bool) -> Self {
        Self {
            id,
            url,
            new_window,
        }
    }

    /// Returns true if `id` has the shape of a generated id.
    pub fn is_generated_id(id: &str) -> bool {
        id.len() == ID_LENGTH && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

/// Mutable fields of a link, as received from a client.
///
/// `new_win` stays an untyped JSON value until validation because clients send
/// booleans, `0`/`1` and strings interchangeably.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LinkInput {
    #[validate(length(max = MAX_URL_LENGTH))]
    pub url: String,

    #[validate(custom(function = "validate_new_window"))]
    pub new_win: Value,
}

impl LinkInput {
    pub fn new(url: impl Into<String>, new_win: Value) -> Self {
        Self {
            url: url.into(),
            new_win,
        }
    }

    /// Validates the input and converts it into typed [`LinkFields`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is longer than
    /// [`MAX_URL_LENGTH`] characters or `new_win` is not one of
    /// `true`, `false`, `1`, `0` (case-insensitive).
    pub fn into_fields(self) -> Result<LinkFields, AppError> {
        self.validate()?;

        let new_window = parse_new_window(&self.new_win).ok_or_else(|| {
            AppError::bad_request("Invalid new_win value", serde_json::json!({}))
        })?;

        Ok(LinkFields {
            url: self.url,
            new_window,
        })
    }
}

/// Validated link fields ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFields {
    pub url: String,
    pub new_window: bool,
}

/// Interprets a `new_win` value from the accepted literal set.
///
/// Accepts JSON booleans, the integers `1` and `0`, and the strings `"true"`,
/// `"false"`, `"1"`, `"0"` in any letter case. Everything else is `None`.
pub fn parse_new_window(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(n) => match n.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn validate_new_window(value: &Value) -> Result<(), ValidationError> {
    match parse_new_window(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("new_win_literal")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_new_window_literals() {
        assert_eq!(parse_new_window(&json!(true)), Some(true));
        assert_eq!(parse_new_window(&json!(false)), Some(false));
        assert_eq!(parse_new_window(&json!(1)), Some(true));
        assert_eq!(parse_new_window(&json!(0)), Some(false));
        assert_eq!(parse_new_window(&json!("TRUE")), Some(true));
        assert_eq!(parse_new_window(&json!("False")), Some(false));
        assert_eq!(parse_new_window(&json!("1")), Some(true));
        assert_eq!(parse_new_window(&json!("0")), Some(false));
    }

    #[test]
    fn test_parse_new_window_rejects_everything_else() {
        for value in [
            json!(2),
            json!(-1),
            json!(1.0),
            json!("yes"),
            json!(""),
            json!(" true"),
            json!(null),
            json!([true]),
            json!({ "v": true }),
        ] {
            assert_eq!(parse_new_window(&value), None, "accepted {value}");
        }
    }

    #[test]
    fn test_into_fields_valid() {
        let fields = LinkInput::new("https://example.com", json!("false"))
            .into_fields()
            .unwrap();

        assert_eq!(fields.url, "https://example.com");
        assert!(!fields.new_window);
    }

    #[test]
    fn test_into_fields_url_at_limit() {
        let url = "a".repeat(MAX_URL_LENGTH as usize);
        assert!(LinkInput::new(url, json!(true)).into_fields().is_ok());
    }

    #[test]
    fn test_into_fields_url_too_long() {
        let url = "a".repeat(MAX_URL_LENGTH as usize + 1);
        let result = LinkInput::new(url, json!(true)).into_fields();

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_into_fields_counts_characters_not_bytes() {
        // 512 two-byte characters are still within the limit.
        let url = "é".repeat(MAX_URL_LENGTH as usize);
        assert!(LinkInput::new(url, json!(0)).into_fields().is_ok());
    }

    #[test]
    fn test_into_fields_bad_flag() {
        let result = LinkInput::new("https://example.com", json!("maybe")).into_fields();
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_is_generated_id() {
        assert!(ShortLink::is_generated_id("0123456789abcdef0123456789abcdef"));
        assert!(!ShortLink::is_generated_id("0123456789ABCDEF0123456789ABCDEF"));
        assert!(!ShortLink::is_generated_id("doesnotexist"));
        assert!(!ShortLink::is_generated_id(""));
    }

    #[test]
    fn test_link_creation() {
        let link = ShortLink::new(
            "0123456789abcdef0123456789abcdef".to_string(),
            "https://example.com".to_string(),
            true,
        );

        assert_eq!(link.url, "https://example.com");
        assert!(link.new_window);
    }
}
