use thiserror::Error;

/// Why a workout submission was turned away.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("session date, activity type and duration are required (missing: {0})")]
    MissingField(&'static str),

    #[error("invalid {field} format: {value}")]
    FormatError { field: &'static str, value: String },

    #[error("{field} must be {expected}, got {value:?}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("failed to save workout: {0:#}")]
    PersistenceFailure(#[source] anyhow::Error),
}

impl SubmissionError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, SubmissionError::PersistenceFailure(_))
    }
}
