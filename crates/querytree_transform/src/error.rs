//! Transform error types.

use thiserror::Error;

/// Errors that can occur while preparing or running a pass.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A directive refers to a variable that was not provided.
    #[error("Unknown variable: ${0}")]
    UnknownVariable(String),

    /// A `@skip`/`@include` condition is not a boolean.
    #[error("Invalid condition on @{directive}: {message}")]
    InvalidCondition {
        /// Directive name.
        directive: String,
        /// What was wrong with the condition.
        message: String,
    },

    /// Variables text could not be parsed.
    #[error("Invalid variables: {0}")]
    InvalidVariables(#[from] serde_json::Error),
}

impl TransformError {
    /// Creates an unknown variable error.
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable(name.into())
    }

    /// Creates an invalid condition error.
    pub fn invalid_condition(directive: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCondition {
            directive: directive.into(),
            message: message.into(),
        }
    }
}
