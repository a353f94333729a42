use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),
}
