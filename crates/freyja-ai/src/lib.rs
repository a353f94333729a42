//! freyja-ai
//!
//! Draft generation for the review queue. A [`ContentGenerator`] turns a
//! topic and tone into post text; the Bedrock generator calls the Converse
//! API and falls back to the offline simulation when the call fails.

pub mod bedrock;
pub mod error;
pub mod prompt;
pub mod simulated;
pub mod types;

use async_trait::async_trait;

pub use bedrock::BedrockGenerator;
pub use simulated::SimulatedGenerator;
pub use types::{GenerateRequest, GeneratedContent, GeneratorStatus, Tone};

use crate::error::AiError;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedContent, AiError>;

    fn status(&self) -> GeneratorStatus;
}
