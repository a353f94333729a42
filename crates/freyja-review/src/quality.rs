//! Heuristic quality scoring.

use freyja_core::models::annotations::QualityScores;
use freyja_core::models::status::ContentType;

const BASE_READABILITY: f64 = 0.8;
const LONG_SENTENCE_WORDS: f64 = 25.0;
const RELEVANCE: f64 = 0.7;
const BRAND_ALIGNMENT: f64 = 0.8;

/// Score `content` on six dimensions in `0.0..=1.0`.
///
/// `overall` is the unweighted mean of length, engagement, readability,
/// relevance, brand alignment and technical quality.
pub fn score_content(
    content: &str,
    _content_type: ContentType,
    now: jiff::Timestamp,
) -> QualityScores {
    let length = (content.chars().count() as f64 / 100.0).min(1.0);
    let engagement = if content.contains('?') { 0.7 } else { 0.5 };
    let readability = if average_sentence_words(content) > LONG_SENTENCE_WORDS {
        BASE_READABILITY - 0.2
    } else {
        BASE_READABILITY
    };
    let technical = if content.trim().is_empty() { 0.3 } else { 0.9 };

    let overall =
        (length + engagement + readability + RELEVANCE + BRAND_ALIGNMENT + technical) / 6.0;

    QualityScores {
        overall: round3(overall),
        engagement_potential: round3(engagement),
        readability: round3(readability),
        relevance: round3(RELEVANCE),
        brand_alignment: round3(BRAND_ALIGNMENT),
        technical_quality: round3(technical),
        calculated_at: now,
    }
}

/// Concrete next steps for the author, in display order.
pub fn improvement_suggestions(content: &str, scores: &QualityScores) -> Vec<String> {
    let mut suggestions = Vec::new();

    if scores.overall < 0.6 {
        suggestions.push("Consider revising content for better quality".to_string());
    }
    if !content.contains('?') {
        suggestions.push("Add a question to encourage engagement".to_string());
    }
    if content.chars().count() < 30 {
        suggestions.push("Add more substance to your content".to_string());
    }

    suggestions
}

fn average_sentence_words(content: &str) -> f64 {
    let sentences: Vec<usize> = content
        .split(|c: char| matches!(c, '.' | '!' | '?'))
        .map(|s| s.split_whitespace().count())
        .filter(|&words| words > 0)
        .collect();
    if sentences.is_empty() {
        return 0.0;
    }
    sentences.iter().sum::<usize>() as f64 / sentences.len() as f64
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
