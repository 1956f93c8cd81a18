use crate::query::Field;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid date {input:?}: {reason}")]
    DateFormat { input: String, reason: String },

    #[error("document {position} is missing required field `{field}`")]
    MissingField { position: usize, field: &'static str },

    #[error("batch exceeds the document id space at item {0}")]
    BatchTooLarge(usize),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` cannot be used in a {expected} clause")]
    FieldKind { field: Field, expected: &'static str },
}

impl SearchError {
    pub(crate) fn date(input: &str, reason: impl Into<String>) -> Self {
        SearchError::DateFormat { input: input.to_string(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
