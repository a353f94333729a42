use std::sync::Arc;

use freyja_ai::ContentGenerator;
use freyja_core::models::annotations::Annotations;
use freyja_core::models::status::ContentType;
use freyja_publish::Publisher;
use freyja_queue::ApprovalQueue;
use freyja_queue::sweep::AutoPublishConfig;
use freyja_review::brand::BrandVoiceChecker;

use crate::views::Views;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<ApprovalQueue>,
    pub generator: Arc<dyn ContentGenerator>,
    pub checker: Arc<BrandVoiceChecker>,
    pub views: Arc<Views>,
    /// Reported by the health endpoint; `None` when the sweep is off.
    pub auto_publish: Option<AutoPublishConfig>,
}

impl AppState {
    pub fn publisher(&self) -> &Arc<dyn Publisher> {
        self.queue.publisher()
    }

    pub fn annotations_for(&self, content: &str, content_type: ContentType) -> Annotations {
        freyja_review::annotate(content, content_type, &self.checker, jiff::Timestamp::now())
    }
}
