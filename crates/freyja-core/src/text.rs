//! Small text helpers shared by the scorer, generator and publisher.

/// Platform limit for a single post, in characters.
pub const POST_CHAR_LIMIT: usize = 280;

/// Split thread content into its posts. Posts are separated by blank lines.
pub fn split_thread(content: &str) -> Vec<&str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Cap `text` at `limit` characters, ending in `...` when cut.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}
