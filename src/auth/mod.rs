pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a new user registration request.
///
/// Both fields are optional at the type level so that a missing field is
/// reported as a 400 with a readable message rather than a decode error.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Must be a valid email format.
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Trims the email, then checks that both fields are present and that the
    /// email is well formed.
    pub fn into_credentials(mut self) -> Result<(String, String), AppError> {
        let (email, password) = credentials(self.email.take(), self.password.take())
            .ok_or_else(|| AppError::BadRequest("Email and password are required".into()))?;

        self.email = Some(email);
        self.validate()
            .map_err(|_| AppError::BadRequest("A valid email address is required".into()))?;

        Ok((self.email.unwrap_or_default(), password))
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Plain acknowledgement body, e.g. after registration or deletion.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// The JWT for bearer authentication.
    pub token: String,
}

/// Returns both fields trimmed, or `None` if either is missing or blank.
pub(crate) fn credentials(
    email: Option<String>,
    password: Option<String>,
) -> Option<(String, String)> {
    let email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty())?;
    let password = password.filter(|p| !p.is_empty())?;
    Some((email, password))
}
