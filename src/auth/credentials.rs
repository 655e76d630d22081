use sha2::{Digest, Sha256};
use validator::{Validate, ValidationError};

/// Hex-encoded SHA-256 of the raw password.
///
/// The digest is unsalted so that it stays comparable with the rows already
/// held in `users.password`. Moving to a salted KDF means rehashing on the
/// next successful login.
pub fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    digest_password(password) == stored_digest
}

#[derive(Debug, Validate)]
#[validate(schema(function = "password_differs_from_username"))]
pub struct NewCredentials {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: String,
}

fn password_differs_from_username(credentials: &NewCredentials) -> Result<(), ValidationError> {
    if credentials.username == credentials.password {
        return Err(ValidationError::new("password_matches_username")
            .with_message("Password must differ from username".into()));
    }
    Ok(())
}

#[derive(Debug, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "Invalid username"))]
    pub username: String,
    pub password: String,
}
