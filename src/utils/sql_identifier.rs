//! Validation of SQL identifiers taken from configuration.
//!
//! Table and function names are the only parts of a statement that cannot be
//! bound as parameters, so they are restricted to a plain identifier alphabet
//! before they are ever formatted into SQL.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex for plain, unquoted identifiers (MariaDB limit: 64 chars).
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("invalid SQL identifier for {kind}: {value:?}")]
pub struct InvalidIdentifier {
    pub kind: &'static str,
    pub value: String,
}

/// Checks that `value` is safe to embed into SQL as an identifier.
///
/// # Errors
///
/// Returns [`InvalidIdentifier`] if the value is empty, longer than 64
/// characters, or contains anything besides ASCII letters, digits and `_`.
pub fn validate_identifier(kind: &'static str, value: &str) -> Result<(), InvalidIdentifier> {
    if IDENTIFIER_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}
