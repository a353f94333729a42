use std::fmt;

use freyja_core::models::status::ContentType;
use freyja_core::text::{split_thread, truncate_chars, POST_CHAR_LIMIT};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AiError;

/// Voice of a generated draft. Unrecognised labels read as `Professional`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Educational,
}

impl Tone {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "casual" => Tone::Casual,
            "educational" => Tone::Educational,
            _ => Tone::Professional,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Educational => "educational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Tone::from_label(&label))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "default_true")]
    pub include_hashtags: bool,
}

fn default_true() -> bool {
    true
}

impl GenerateRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            tone: Tone::default(),
            content_type: ContentType::default(),
            include_hashtags: true,
        }
    }

    /// The trimmed topic, or `Validation` when it is blank.
    pub fn topic(&self) -> Result<&str, AiError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(AiError::Validation("topic must not be empty".to_string()));
        }
        Ok(topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Post text; thread parts are separated by blank lines.
    pub content: String,
    pub content_type: ContentType,
    pub provider: String,
    pub topic: String,
    pub tone: Tone,
    pub character_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl GeneratedContent {
    /// Normalise raw model or template output: strip whitespace and
    /// wrapping quotes, cap every post at the platform limit.
    pub fn from_raw(
        raw: &str,
        request: &GenerateRequest,
        provider: &str,
        note: Option<String>,
    ) -> Self {
        let content = match request.content_type {
            ContentType::Thread => split_thread(raw)
                .into_iter()
                .map(finish_post)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
            _ => finish_post(raw),
        };
        Self {
            character_count: content.chars().count(),
            content,
            content_type: request.content_type,
            provider: provider.to_string(),
            topic: request.topic.trim().to_string(),
            tone: request.tone,
            note,
        }
    }
}

fn finish_post(raw: &str) -> String {
    let text = raw.trim().trim_matches(|c: char| c == '"' || c == '\u{201c}' || c == '\u{201d}');
    truncate_chars(text.trim(), POST_CHAR_LIMIT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorStatus {
    pub provider: String,
    pub model: Option<String>,
    pub available: bool,
    pub message: String,
}
