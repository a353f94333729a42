use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("invalid brand term {term:?}: {source}")]
    InvalidTerm {
        term: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read brand guidelines: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid brand guidelines: {0}")]
    Parse(#[from] serde_json::Error),
}
