use freyja_core::models::status::ContentType;
use freyja_core::text::POST_CHAR_LIMIT;

use crate::types::GenerateRequest;

pub const SYSTEM_PROMPT: &str = "You are a social media content creator. \
Reply with the post text only, without commentary or surrounding quotes.";

/// Number of posts requested for a thread.
pub const THREAD_LENGTH: usize = 3;

pub fn build_prompt(request: &GenerateRequest, topic: &str) -> String {
    let tone = request.tone.as_str();
    let hashtags = if request.include_hashtags {
        "Include 2-3 relevant hashtags."
    } else {
        "Do not include hashtags."
    };

    match request.content_type {
        ContentType::Thread => format!(
            "Create a Twitter thread about {topic} with {THREAD_LENGTH} tweets.\n\n\
             Requirements:\n\
             - {tone} tone\n\
             - Each tweet at most {POST_CHAR_LIMIT} characters\n\
             - The first tweet is an engaging hook\n\
             - Number the tweets (1/{THREAD_LENGTH}, 2/{THREAD_LENGTH}, ...)\n\
             - Separate tweets with a blank line\n\
             - {hashtags} Put them in the last tweet\n"
        ),
        ContentType::Reply => format!(
            "Write a short {tone} reply to a conversation about {topic}.\n\n\
             Requirements:\n\
             - At most {POST_CHAR_LIMIT} characters\n\
             - Add something useful to the conversation\n\
             - {hashtags}\n"
        ),
        ContentType::Tweet => format!(
            "Create a {tone} tweet about {topic}.\n\n\
             Requirements:\n\
             - At most {POST_CHAR_LIMIT} characters\n\
             - Engaging and valuable\n\
             - {hashtags}\n"
        ),
    }
}
