use serde::Deserialize;

use crate::error::AppError;

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

impl CreateUserRequest {
    /// Trims the username and rejects values the `users` table cannot hold.
    pub fn validate(mut self) -> Result<Self, AppError> {
        self.username = self.username.trim().to_string();
        if self.username.is_empty() {
            return Err(AppError::BadRequest("username must not be empty".into()));
        }
        if self.username.chars().count() > 100 {
            return Err(AppError::BadRequest(
                "username must be at most 100 characters".into(),
            ));
        }
        if self.username.contains('\0') {
            return Err(AppError::BadRequest(
                "username must not contain NUL characters".into(),
            ));
        }
        if self.password.is_empty() {
            return Err(AppError::BadRequest("password must not be empty".into()));
        }
        Ok(self)
    }
}
