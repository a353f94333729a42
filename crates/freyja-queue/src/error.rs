use thiserror::Error;
use uuid::Uuid;

use freyja_core::error::LifecycleError;
use freyja_core::lifecycle::Action;
use freyja_core::models::status::ContentStatus;
use freyja_publish::error::PublishError;
use freyja_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("{0}")]
    Validation(String),

    #[error("cannot {action} an item that is {from}")]
    InvalidTransition { action: Action, from: ContentStatus },

    #[error("content item not found: {0}")]
    NotFound(Uuid),

    #[error("publishing failed: {0}")]
    PublisherFailure(#[source] PublishError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("publish task failed: {0}")]
    Task(String),
}

impl From<LifecycleError> for QueueError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Validation(message) => QueueError::Validation(message),
            LifecycleError::InvalidTransition { action, from } => {
                QueueError::InvalidTransition { action, from }
            }
        }
    }
}
