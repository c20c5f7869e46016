pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer};

lazy_static! {
    static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref LOWERCASE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref DIGIT_OR_SYMBOL: Regex = Regex::new(r"[\d\W_]").unwrap();
}

/// Payload for both `POST /auth/signup` and `POST /auth/signin`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AuthCredentials {
    /// Must be between 4 and 20 characters.
    #[validate(length(min = 4, max = 20))]
    pub username: String,
    /// Must be between 8 and 32 characters and contain an upper-case letter,
    /// a lower-case letter and a digit or symbol.
    #[validate(length(min = 8, max = 32), custom = "validate_password_strength")]
    pub password: String,
}

/// Response body of a successful sign-in.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if UPPERCASE.is_match(password)
        && LOWERCASE.is_match(password)
        && DIGIT_OR_SYMBOL.is_match(password)
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some("Password is too weak".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn creds(username: &str, password: &str) -> AuthCredentials {
        AuthCredentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_credentials_validation() {
        assert!(creds("alice", "Passw0rd").validate().is_ok());
        assert!(creds("alice", "Password!").validate().is_ok());

        // username length
        assert!(creds("ali", "Passw0rd").validate().is_err());
        assert!(creds(&"a".repeat(21), "Passw0rd").validate().is_err());

        // password length
        assert!(creds("alice", "Pa0").validate().is_err());
        assert!(creds("alice", &format!("Pa0{}", "a".repeat(30))).validate().is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("Passw0rd").is_ok());
        assert!(validate_password_strength("Pass_word").is_ok());
        assert!(validate_password_strength("password1").is_err());
        assert!(validate_password_strength("PASSWORD1").is_err());
        assert!(validate_password_strength("Password").is_err());
    }

    #[test]
    fn test_access_token_wire_format() {
        let json = serde_json::to_value(AccessToken {
            access_token: "abc".into(),
        })
        .unwrap();
        assert_eq!(json["accessToken"], "abc");
    }
}
