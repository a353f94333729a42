//! Offline generator used when no model provider is configured, and as
//! the fallback when a provider call fails.

use async_trait::async_trait;
use freyja_core::models::status::ContentType;

use crate::error::AiError;
use crate::prompt::THREAD_LENGTH;
use crate::types::{GenerateRequest, GeneratedContent, GeneratorStatus, Tone};
use crate::ContentGenerator;

const GENERIC_HASHTAGS: [&str; 3] = ["#Innovation", "#Technology", "#Growth"];
const MAX_HASHTAGS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct SimulatedGenerator;

impl SimulatedGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Render a draft without any network call. Template choice depends
    /// only on the topic, so the same request yields the same text.
    pub fn render(&self, request: &GenerateRequest) -> Result<GeneratedContent, AiError> {
        let topic = request.topic()?;
        let hashtags = request
            .include_hashtags
            .then(|| hashtags_for(topic).join(" "));

        let body = match request.content_type {
            ContentType::Thread => {
                let hook = format!("1/{THREAD_LENGTH} Let's explore {topic} and why it matters.");
                let middle = format!("2/{THREAD_LENGTH} {}", template(request.tone, topic));
                let mut last = format!("3/{THREAD_LENGTH} Key takeaways on {topic}.");
                if let Some(tags) = &hashtags {
                    last = format!("{last} {tags}");
                }
                [hook, middle, last].join("\n\n")
            }
            ContentType::Tweet | ContentType::Reply => {
                let base = template(request.tone, topic);
                match &hashtags {
                    Some(tags) => format!("{base} {tags}"),
                    None => base,
                }
            }
        };

        Ok(GeneratedContent::from_raw(
            &body,
            request,
            "simulation",
            Some("Configure a model provider for AI-written drafts".to_string()),
        ))
    }
}

#[async_trait]
impl ContentGenerator for SimulatedGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedContent, AiError> {
        self.render(request)
    }

    fn status(&self) -> GeneratorStatus {
        GeneratorStatus {
            provider: "simulation".to_string(),
            model: None,
            available: true,
            message: "Running in simulation mode".to_string(),
        }
    }
}

fn template(tone: Tone, topic: &str) -> String {
    let templates: [String; 3] = match tone {
        Tone::Professional => [
            format!("Exploring the impact of {topic} on modern business strategies."),
            format!("Understanding {topic}: key insights for implementation."),
            format!("How {topic} is reshaping industry standards."),
        ],
        Tone::Casual => [
            format!("Just discovered something cool about {topic}!"),
            format!("Quick thoughts on {topic} and why it matters."),
            format!("Breaking down {topic} in simple terms."),
        ],
        Tone::Educational => [
            format!("Let's dive into {topic}: here are the fundamentals."),
            format!("Key concepts in {topic} explained simply."),
            format!("Understanding {topic}: a beginner's guide."),
        ],
    };
    let index = topic.bytes().map(usize::from).sum::<usize>() % templates.len();
    templates[index].clone()
}

/// Up to three hashtags: capitalised topic words longer than three
/// characters first, then generic tags.
pub fn hashtags_for(topic: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for word in topic.split(|c: char| !c.is_alphanumeric()) {
        if word.chars().count() <= 3 {
            continue;
        }
        let tag = format!("#{}", capitalize(&word.to_lowercase()));
        if !tags.contains(&tag) {
            tags.push(tag);
        }
        if tags.len() == MAX_HASHTAGS {
            return tags;
        }
    }
    for generic in GENERIC_HASHTAGS {
        if tags.len() == MAX_HASHTAGS {
            break;
        }
        if !tags.iter().any(|t| t == generic) {
            tags.push(generic.to_string());
        }
    }
    tags
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
