//! Bedrock Converse generator.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::{info, warn};

use crate::error::AiError;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::simulated::SimulatedGenerator;
use crate::types::{GenerateRequest, GeneratedContent, GeneratorStatus};
use crate::ContentGenerator;

pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

const MAX_TOKENS: i32 = 500;
const TEMPERATURE: f32 = 0.7;

pub struct BedrockGenerator {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    fallback: SimulatedGenerator,
}

impl BedrockGenerator {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
            model_id: model_id.into(),
            fallback: SimulatedGenerator::new(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn converse(&self, request: &GenerateRequest, topic: &str) -> Result<String, AiError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(build_prompt(request, topic)))
            .build()
            .map_err(|e| AiError::Invocation(e.to_string()))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(SYSTEM_PROMPT.to_string()))
            .messages(message)
            .inference_config(
                InferenceConfiguration::builder()
                    .max_tokens(MAX_TOKENS)
                    .temperature(TEMPERATURE)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| AiError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| AiError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(AiError::ResponseParse("empty completion".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl ContentGenerator for BedrockGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedContent, AiError> {
        let topic = request.topic()?;

        match self.converse(request, topic).await {
            Ok(text) => {
                let generated = GeneratedContent::from_raw(&text, request, "bedrock", None);
                info!(
                    model_id = %self.model_id,
                    content_type = %request.content_type,
                    chars = generated.character_count,
                    "generated draft"
                );
                Ok(generated)
            }
            Err(e) => {
                warn!(
                    model_id = %self.model_id,
                    error = %e,
                    "bedrock generation failed, falling back to simulation"
                );
                self.fallback.render(request)
            }
        }
    }

    fn status(&self) -> GeneratorStatus {
        GeneratorStatus {
            provider: "bedrock".to_string(),
            model: Some(self.model_id.clone()),
            available: true,
            message: format!("Running with Bedrock model {}", self.model_id),
        }
    }
}
