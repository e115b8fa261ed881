use thiserror::Error;

/// A label outside the recognized entity type set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown entity type: {0}")]
pub struct UnknownEntityType(pub String);

#[derive(Debug, Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input contains no tagged sentences")]
    Empty,
}
