//! Brand voice compliance.
//!
//! Guidelines are plain data (loadable from JSON); the checker compiles the
//! word lists into case-insensitive whole-word patterns once and reuses
//! them for every item.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use freyja_core::models::annotations::{BrandCompliance, ComplianceLevel};
use freyja_core::models::status::ContentType;
use freyja_core::text::{split_thread, POST_CHAR_LIMIT};

use crate::error::ReviewError;

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"));

const ISSUE_PENALTY: f64 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandGuidelines {
    pub brand_name: String,
    pub tone: String,
    pub style: String,
    pub max_hashtags: usize,
    pub preferred_topics: Vec<String>,
    pub avoid_topics: Vec<String>,
    pub forbidden_words: Vec<String>,
    /// Per content type; types not listed use the platform limit.
    pub character_limits: BTreeMap<ContentType, usize>,
}

impl Default for BrandGuidelines {
    fn default() -> Self {
        Self {
            brand_name: "Freyja".to_string(),
            tone: "professional".to_string(),
            style: "informative".to_string(),
            max_hashtags: 3,
            preferred_topics: vec!["tech".into(), "ai".into(), "productivity".into()],
            avoid_topics: vec!["politics".into(), "controversial".into()],
            forbidden_words: vec!["spam".into(), "clickbait".into(), "urgent".into()],
            character_limits: [
                (ContentType::Tweet, POST_CHAR_LIMIT),
                (ContentType::Thread, POST_CHAR_LIMIT),
                (ContentType::Reply, POST_CHAR_LIMIT),
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl BrandGuidelines {
    pub fn from_json_file(path: &Path) -> Result<Self, ReviewError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn char_limit(&self, content_type: ContentType) -> usize {
        self.character_limits
            .get(&content_type)
            .copied()
            .unwrap_or(POST_CHAR_LIMIT)
    }
}

pub struct BrandVoiceChecker {
    guidelines: BrandGuidelines,
    forbidden: Vec<(String, Regex)>,
    avoided: Vec<(String, Regex)>,
}

impl BrandVoiceChecker {
    pub fn new(guidelines: BrandGuidelines) -> Result<Self, ReviewError> {
        let forbidden = compile_terms(&guidelines.forbidden_words)?;
        let avoided = compile_terms(&guidelines.avoid_topics)?;
        Ok(Self {
            guidelines,
            forbidden,
            avoided,
        })
    }

    pub fn guidelines(&self) -> &BrandGuidelines {
        &self.guidelines
    }

    pub fn check(&self, content: &str, content_type: ContentType) -> BrandCompliance {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        let limit = self.guidelines.char_limit(content_type);
        let posts = match content_type {
            ContentType::Thread => split_thread(content),
            _ => vec![content.trim()],
        };
        for (index, post) in posts.iter().enumerate() {
            let chars = post.chars().count();
            if chars <= limit {
                continue;
            }
            if posts.len() > 1 {
                issues.push(format!(
                    "Thread part {} exceeds {limit} character limit",
                    index + 1
                ));
            } else {
                issues.push(format!("Content exceeds {limit} character limit"));
            }
            suggestions.push(format!("Shorten to {limit} characters or fewer"));
        }

        let hashtag_count = HASHTAG.find_iter(content).count();
        if hashtag_count > self.guidelines.max_hashtags {
            issues.push("Too many hashtags".to_string());
            suggestions.push(format!(
                "Use at most {} hashtags",
                self.guidelines.max_hashtags
            ));
        }

        for (word, pattern) in &self.forbidden {
            if pattern.is_match(content) {
                issues.push(format!("Contains forbidden word \"{word}\""));
            }
        }
        for (topic, pattern) in &self.avoided {
            if pattern.is_match(content) {
                issues.push(format!("Touches avoided topic \"{topic}\""));
            }
        }

        // Score above 0.7 is compliant, above 0.4 a warning: with a 0.3
        // penalty that is zero issues and one issue respectively.
        let score = (1.0 - issues.len() as f64 * ISSUE_PENALTY).max(0.0);
        let level = match issues.len() {
            0 => ComplianceLevel::Compliant,
            1 => ComplianceLevel::Warning,
            _ => ComplianceLevel::NonCompliant,
        };

        BrandCompliance {
            level,
            score: (score * 1000.0).round() / 1000.0,
            issues,
            suggestions,
            hashtag_count,
        }
    }
}

fn compile_terms(terms: &[String]) -> Result<Vec<(String, Regex)>, ReviewError> {
    terms
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .map(|term| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            Regex::new(&pattern)
                .map(|re| (term.to_string(), re))
                .map_err(|source| ReviewError::InvalidTerm {
                    term: term.to_string(),
                    source,
                })
        })
        .collect()
}
