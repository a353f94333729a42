//! freyja-review
//!
//! Content annotations computed before a human reviews an item: quality
//! scores, improvement suggestions and brand-voice compliance.

pub mod brand;
pub mod error;
pub mod quality;

use freyja_core::models::annotations::Annotations;
use freyja_core::models::status::ContentType;

/// Run every check and bundle the results for the queue's `annotate`.
pub fn annotate(
    content: &str,
    content_type: ContentType,
    checker: &brand::BrandVoiceChecker,
    now: jiff::Timestamp,
) -> Annotations {
    let scores = quality::score_content(content, content_type, now);
    let compliance = checker.check(content, content_type);

    let mut suggestions = quality::improvement_suggestions(content, &scores);
    for suggestion in &compliance.suggestions {
        if !suggestions.contains(suggestion) {
            suggestions.push(suggestion.clone());
        }
    }

    Annotations {
        quality_scores: Some(scores),
        brand_compliance: Some(compliance),
        suggestions,
    }
}
