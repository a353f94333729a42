use thiserror::Error;

use crate::lifecycle::Action;
use crate::models::status::ContentStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("cannot {action} an item that is {from}")]
    InvalidTransition { action: Action, from: ContentStatus },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}
