use std::fmt;

use derive_more::{Display, Error};

/// Required input fields that were left empty, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl MissingFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| *f == field)
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required fields: {}", self.0.join(", "))
    }
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum AppError {
    #[display(fmt = "validation error, {}", _0)]
    Validation(#[error(not(source))] MissingFields),

    #[display(fmt = "authentication required")]
    AuthenticationRequired,

    #[display(fmt = "storage error: {}", _0)]
    Storage(#[error(not(source))] String),

    #[display(fmt = "malformed data under key '{}'", _0)]
    MalformedData(#[error(not(source))] String),

    #[display(fmt = "configuration error: {}", _0)]
    Config(#[error(not(source))] String),
}

impl AppError {
    /// Generic text shown to the user when a screen has no more specific message.
    pub fn user_message(&self) -> &'static str {
        match *self {
            AppError::Validation(_) => "Please fill in all fields",
            AppError::AuthenticationRequired => "You need to be logged in to do that",
            AppError::Storage(_)
            | AppError::MalformedData(_)
            | AppError::Config(_) => "Something went wrong. Please try again.",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("failed to encode value: {err}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
