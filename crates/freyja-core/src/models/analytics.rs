use serde::{Deserialize, Serialize};

use super::status::ContentStatus;

/// Number of items per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub scheduled: u64,
    pub published: u64,
}

impl StatusCounts {
    pub fn record(&mut self, status: ContentStatus) {
        *self.slot(status) += 1;
    }

    pub fn get(&self, status: ContentStatus) -> u64 {
        match status {
            ContentStatus::Pending => self.pending,
            ContentStatus::Approved => self.approved,
            ContentStatus::Rejected => self.rejected,
            ContentStatus::Scheduled => self.scheduled,
            ContentStatus::Published => self.published,
        }
    }

    fn slot(&mut self, status: ContentStatus) -> &mut u64 {
        match status {
            ContentStatus::Pending => &mut self.pending,
            ContentStatus::Approved => &mut self.approved,
            ContentStatus::Rejected => &mut self.rejected,
            ContentStatus::Scheduled => &mut self.scheduled,
            ContentStatus::Published => &mut self.published,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.approved + self.rejected + self.scheduled + self.published
    }

    /// approved / (pending + approved + rejected), as a percentage.
    /// Zero when nothing has been reviewed yet.
    pub fn approval_rate(&self) -> f64 {
        let reviewed = self.pending + self.approved + self.rejected;
        if reviewed == 0 {
            return 0.0;
        }
        self.approved as f64 / reviewed as f64 * 100.0
    }

    /// (approved + published) / (approved + published + rejected + 1), as a
    /// percentage. The `+ 1` is a smoothing constant, not an off-by-one.
    pub fn success_rate(&self) -> f64 {
        let good = self.approved + self.published;
        good as f64 / (good + self.rejected + 1) as f64 * 100.0
    }

    pub fn summary(&self) -> AnalyticsSummary {
        AnalyticsSummary {
            counts: *self,
            total: self.total(),
            approval_rate: round1(self.approval_rate()),
            success_rate: round1(self.success_rate()),
        }
    }
}

impl FromIterator<ContentStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = ContentStatus>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in iter {
            counts.record(status);
        }
        counts
    }
}

/// Counts plus derived rates, ready for the analytics view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub total: u64,
    pub approval_rate: f64,
    pub success_rate: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
