//! Error types for the field schema agent
//!
//! Provides structured error types for file access, decoding and engine failures.

use field_schema_core::SchemaError;
use thiserror::Error;

/// Main error type for agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Schema or template file could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serialization of results failed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Agent configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the engine
    #[error(transparent)]
    Engine(#[from] SchemaError),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AgentError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AgentError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        AgentError::FileError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        AgentError::ParseError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        match self {
            AgentError::InvalidInput(_)
            | AgentError::FileError(_)
            | AgentError::ParseError(_)
            | AgentError::Config(_) => true,
            AgentError::Engine(err) => matches!(
                err,
                SchemaError::Decode(_) | SchemaError::InvalidConfig(_)
            ),
            AgentError::SerializationError(_) | AgentError::InternalError(_) => false,
        }
    }
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        AgentError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::ParseError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for AgentError {
    fn from(err: serde_yaml::Error) -> Self {
        AgentError::ParseError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for AgentError {
    fn from(err: toml::de::Error) -> Self {
        AgentError::Config(format!("TOML error: {}", err))
    }
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "Invalid input: test error");

        let err = AgentError::from(SchemaError::decode("missing field `type`"));
        assert_eq!(err.to_string(), "Decode error: missing field `type`");
    }

    #[test]
    fn test_is_user_error() {
        assert!(AgentError::InvalidInput("test".to_string()).is_user_error());
        assert!(AgentError::FileError("test".to_string()).is_user_error());
        assert!(AgentError::from(SchemaError::decode("bad")).is_user_error());
        assert!(!AgentError::InternalError("test".to_string()).is_user_error());
        assert!(!AgentError::SerializationError("test".to_string()).is_user_error());
    }

    #[test]
    fn test_error_constructors() {
        let err = AgentError::invalid_input("test");
        assert!(matches!(err, AgentError::InvalidInput(_)));

        let err = AgentError::file_error("test");
        assert!(matches!(err, AgentError::FileError(_)));

        let err = AgentError::parse_error("test");
        assert!(matches!(err, AgentError::ParseError(_)));
    }
}
