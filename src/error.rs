use thiserror::Error;

pub type SplitResult<T> = Result<T, SplitError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Timestamp text does not match `[[[D:]H:]M:]S.mmm`.
    #[error("Invalid timestamp '{input}': {reason}")]
    Format { input: String, reason: String },

    #[error("{0}")]
    Validation(String),
}

impl SplitError {
    pub fn format(input: &str, reason: impl Into<String>) -> Self {
        SplitError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        SplitError::Validation(message.into())
    }
}
