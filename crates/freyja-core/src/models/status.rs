use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Where a content item is in the review pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Pending,
    Approved,
    Rejected,
    Scheduled,
    Published,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 5] = [
        ContentStatus::Pending,
        ContentStatus::Approved,
        ContentStatus::Rejected,
        ContentStatus::Scheduled,
        ContentStatus::Published,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Approved => "approved",
            ContentStatus::Rejected => "rejected",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Published => "published",
        }
    }

    /// The transition table. `Scheduled -> Pending` is the explicit
    /// unschedule edge; every other edge moves forward.
    pub fn can_transition_to(self, next: ContentStatus) -> bool {
        use ContentStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Approved, Published)
                | (Approved, Scheduled)
                | (Scheduled, Published)
                | (Scheduled, Pending)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ContentStatus::Rejected | ContentStatus::Published)
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ContentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Queue filter: a single status or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ContentStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ContentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only).map_err(|_| ParseError {
            kind: "status filter",
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Tweet,
    Thread,
    Reply,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Tweet => "tweet",
            ContentType::Thread => "thread",
            ContentType::Reply => "reply",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tweet" => Ok(ContentType::Tweet),
            "thread" => Ok(ContentType::Thread),
            "reply" => Ok(ContentType::Reply),
            _ => Err(ParseError {
                kind: "content type",
                value: s.to_string(),
            }),
        }
    }
}

/// Provenance of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    #[default]
    Manual,
    AiGenerated,
    Template,
    Research,
}

impl ContentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentSource::Manual => "manual",
            ContentSource::AiGenerated => "ai_generated",
            ContentSource::Template => "template",
            ContentSource::Research => "research",
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentSource {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(ContentSource::Manual),
            "ai_generated" | "ai" => Ok(ContentSource::AiGenerated),
            "template" => Ok(ContentSource::Template),
            "research" => Ok(ContentSource::Research),
            _ => Err(ParseError {
                kind: "content source",
                value: s.to_string(),
            }),
        }
    }
}
