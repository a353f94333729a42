use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("not connected to the platform")]
    NotConnected,

    #[error("nothing to publish")]
    EmptyContent,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("platform returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected platform response: {0}")]
    ResponseParse(String),

    #[error("request signing failed: {0}")]
    Signing(String),

    /// Some thread parts went live before a later part failed.
    #[error("thread stopped after {} posted parts: {source}", .posted.len())]
    Partial {
        posted: Vec<String>,
        source: Box<PublishError>,
    },
}
