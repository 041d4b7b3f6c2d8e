use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::{AppError, MissingFields};

#[derive(Debug, Deserialize, Clone)]
pub struct NewEventDto {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

impl NewEventDto {
    /// Every field must hold something other than whitespace.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.location.trim().is_empty() {
            missing.push("location");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(MissingFields(missing)))
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginUserRequest {
    pub email: String,
    pub pwd: String,
}

impl LoginUserRequest {
    pub fn new(email: &str, pwd: &str) -> Self {
        Self {
            email: email.to_string(),
            pwd: pwd.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut missing = Vec::new();
        if self.email.is_empty() {
            missing.push("email");
        }
        if self.pwd.is_empty() {
            missing.push("password");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(MissingFields(missing)))
        }
    }
}

/// Which form the profile screen is showing. Both accept any credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            AuthMode::Login => "Logged in successfully!",
            AuthMode::Signup => "Account created!",
        }
    }
}
