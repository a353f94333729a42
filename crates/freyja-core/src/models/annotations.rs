use serde::{Deserialize, Serialize};

/// Multi-dimensional quality metrics, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    pub overall: f64,
    pub engagement_potential: f64,
    pub readability: f64,
    pub relevance: f64,
    pub brand_alignment: f64,
    pub technical_quality: f64,
    pub calculated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    Compliant,
    Warning,
    NonCompliant,
}

impl ComplianceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceLevel::Compliant => "compliant",
            ComplianceLevel::Warning => "warning",
            ComplianceLevel::NonCompliant => "non_compliant",
        }
    }
}

/// Result of checking content against the brand voice guidelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCompliance {
    pub level: ComplianceLevel,
    pub score: f64,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub hashtag_count: usize,
}

/// Everything the scoring collaborators attach to an item in one go.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub quality_scores: Option<QualityScores>,
    pub brand_compliance: Option<BrandCompliance>,
    pub suggestions: Vec<String>,
}
