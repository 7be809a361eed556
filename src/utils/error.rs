use std::fmt;

/// Literal shown under the login form when no official matches.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Official ID or Password.";

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    ResourceLoad(String),
    Storage(String),
    Config(String),
    InvalidCredentials,
    NotLoggedIn,
    AlreadyLoggedIn,
    UnknownTab(String),
    InvalidCommand(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ResourceLoad(msg) => write!(f, "Resource load error: {}", msg),
            AppError::Storage(msg) => write!(f, "Session storage error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InvalidCredentials => write!(f, "{}", INVALID_CREDENTIALS_MESSAGE),
            AppError::NotLoggedIn => write!(f, "Not logged in"),
            AppError::AlreadyLoggedIn => write!(f, "Already logged in"),
            AppError::UnknownTab(tab) => write!(f, "Unknown tab: {}", tab),
            AppError::InvalidCommand(msg) => write!(f, "Invalid command: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_literal() {
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Invalid Official ID or Password."
        );
    }
}
