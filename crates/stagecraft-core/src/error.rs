//! Error types for stagecraft-core

use crate::ActorId;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// `unregister`/`kill` on an actor that is not currently live
    #[error("{0} is not registered")]
    NotRegistered(ActorId),

    /// Property or update access on an actor that has been killed
    #[error("{0} was used after being killed")]
    UseAfterKill(ActorId),

    #[error("Property not found: {0}")]
    MissingProperty(String),

    #[error("{actor} has no capability providing `{method}`")]
    UnknownMethod { actor: ActorId, method: String },

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),
}

impl Error {
    /// Build a type error from the expected type name and the offending value
    pub fn type_error(expected: impl Into<String>, got: &crate::Value) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.type_name().to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
