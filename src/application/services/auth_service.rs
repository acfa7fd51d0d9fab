//! Authentication service for the management credentials.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Length of the per-process HMAC key.
const KEY_LENGTH: usize = 32;

/// Verifies HTTP Basic credentials against the single configured account.
///
/// The plain password is not retained: it is hashed with HMAC-SHA256 under a
/// random key generated at startup, and candidates are compared in constant
/// time against that MAC.
pub struct AuthService {
    username: String,
    password_mac: Vec<u8>,
    key: [u8; KEY_LENGTH],
}

impl AuthService {
    /// Creates the service for one username/password pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the system random number generator fails.
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self, getrandom::Error> {
        let mut key = [0u8; KEY_LENGTH];
        getrandom::fill(&mut key)?;

        let mut service = Self {
            username: username.into(),
            password_mac: Vec::new(),
            key,
        };
        service.password_mac = service.hash_password(password);
        Ok(service)
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length")
    }

    fn hash_password(&self, password: &str) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(password.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Checks a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if either part does not match.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AppError> {
        let mut mac = self.mac();
        mac.update(password.as_bytes());
        let password_ok = mac.verify_slice(&self.password_mac).is_ok();

        if password_ok && username == self.username {
            return Ok(());
        }

        Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Invalid username or password", "username": username }),
        ))
    }
}
