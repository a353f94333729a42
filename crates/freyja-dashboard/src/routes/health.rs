use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use jiff::Timestamp;
use serde::Serialize;

use freyja_ai::GeneratorStatus;
use freyja_publish::PublisherStatus;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    timestamp: Timestamp,
    components: Components,
}

#[derive(Serialize)]
struct Components {
    store: StoreHealth,
    ai_generator: GeneratorStatus,
    publisher: PublisherStatus,
    auto_publish: AutoPublishHealth,
}

#[derive(Serialize)]
struct StoreHealth {
    backend: &'static str,
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct AutoPublishHealth {
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_approved: Option<bool>,
}

/// 200 when the store answers, 503 otherwise. Generator and publisher
/// state is informational: both have offline fallbacks.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let store = state.queue.store();
    let ping = store.ping().await;
    let reachable = ping.is_ok();

    let auto_publish = match &state.auto_publish {
        Some(config) => AutoPublishHealth {
            enabled: true,
            interval_secs: Some(config.interval.as_secs()),
            include_approved: Some(config.include_approved),
        },
        None => AutoPublishHealth {
            enabled: false,
            interval_secs: None,
            include_approved: None,
        },
    };

    let health = Health {
        status: if reachable { "healthy" } else { "degraded" },
        timestamp: Timestamp::now(),
        components: Components {
            store: StoreHealth {
                backend: store.backend(),
                reachable,
                error: ping.err().map(|e| e.to_string()),
            },
            ai_generator: state.generator.status(),
            publisher: state.publisher().status().await,
            auto_publish,
        },
    };

    let code = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(health))
}
