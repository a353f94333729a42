mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use freyja_core::models::status::ContentStatus;
use freyja_publish::SimulatedPublisher;
use freyja_storage::memory::MemoryStore;

use common::{app, app_with, DownPublisher, UnreachableStore};

#[tokio::test]
async fn dashboard_renders_stats_and_recent_items() {
    let app = app();
    app.submit("First draft about Rust").await;
    app.approved("Second draft").await;

    let reply = app.get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Content Dashboard"));
    assert!(reply.body.contains("First draft about Rust"));
    assert!(reply.body.contains("/api/ai/generate"));
}

#[tokio::test]
async fn submit_json_creates_annotated_pending_item() {
    let app = app();
    let reply = app
        .post_json(
            "/api/content/submit",
            json!({"content": "Is Rust worth learning in 2025?", "content_type": "tweet"}),
        )
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Content submitted successfully");

    let id = body["item_id"].as_str().unwrap().to_string();
    let item = app.get(&format!("/api/content/{id}")).await.json();
    assert_eq!(item["status"], "pending");
    assert_eq!(item["source"], "manual");
    assert!(item["quality_scores"]["overall"].is_f64());
    assert_eq!(item["brand_compliance"]["level"], "compliant");
}

#[tokio::test]
async fn submit_form_keeps_source_and_topic() {
    let app = app();
    let reply = app
        .post_form(
            "/api/content/submit",
            "content=Generated+text&content_type=thread&source=ai_generated&topic=rust&tone=casual",
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);

    let id = reply.json()["item_id"].as_str().unwrap().parse().unwrap();
    let item = app.item(id).await;
    assert_eq!(item.source.as_str(), "ai_generated");
    assert_eq!(item.content_type.as_str(), "thread");
    assert_eq!(item.metadata().topic.as_deref(), Some("rust"));
    assert_eq!(item.metadata().tone.as_deref(), Some("casual"));
}

#[tokio::test]
async fn submit_rejects_empty_content_and_unknown_type() {
    let app = app();

    let reply = app
        .post_json("/api/content/submit", json!({"content": "   "}))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.json()["error"].as_str().unwrap().contains("empty"));

    let reply = app
        .post_json(
            "/api/content/submit",
            json!({"content": "hello", "content_type": "carousel"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.queue.counts().await.unwrap().total(), 0);
}

#[tokio::test]
async fn approve_redirects_and_stores_feedback() {
    let app = app();
    let id = app.submit("Hello world").await;

    let reply = app
        .post_form(&format!("/approve/{id}"), "feedback=looks+good")
        .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/queue"));

    let item = app.item(id).await;
    assert_eq!(item.status(), ContentStatus::Approved);
    assert_eq!(item.approval_feedback(), Some("looks good"));
}

#[tokio::test]
async fn reject_without_reason_renders_error_page() {
    let app = app();
    let id = app.submit("Hello world").await;

    let reply = app.post_form(&format!("/reject/{id}"), "reason=").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.content_type.unwrap().starts_with("text/html"));
    assert!(reply.body.contains("Back to Dashboard"));
    assert_eq!(app.item(id).await.status(), ContentStatus::Pending);

    let reply = app.post_form(&format!("/reject/{id}"), "reason=off-brand").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(app.item(id).await.rejection_reason(), Some("off-brand"));
}

#[tokio::test]
async fn publishing_a_pending_item_conflicts() {
    let app = app();
    let id = app.submit("Hello world").await;

    let reply = app.post_empty(&format!("/publish/{id}")).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert!(reply.body.contains("cannot publish an item that is pending"));
}

#[tokio::test]
async fn publish_records_the_post_url() {
    let app = app();
    let id = app.approved("Hello world").await;

    let reply = app.post_empty(&format!("/publish/{id}")).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/queue?status=published"));

    let item = app.item(id).await;
    assert_eq!(item.status(), ContentStatus::Published);
    assert!(item
        .published_url()
        .unwrap()
        .starts_with("https://twitter.com/demo_account/status/"));
}

#[tokio::test]
async fn publisher_failure_is_bad_gateway_and_leaves_item_approved() {
    let app = app_with(Arc::new(MemoryStore::new()), Arc::new(DownPublisher));
    let id = app.approved("Hello world").await;

    let reply = app.post_empty(&format!("/publish/{id}")).await;
    assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
    assert!(reply.body.contains("over capacity"));
    assert_eq!(app.item(id).await.status(), ContentStatus::Approved);
}

#[tokio::test]
async fn schedule_form_and_local_time_input() {
    let app = app();
    let id = app.approved("Launch post").await;

    let reply = app.get(&format!("/schedule/{id}")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("datetime-local"));

    let reply = app
        .post_form(&format!("/schedule/{id}"), "publish_at=2030-01-01T10%3A00")
        .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/queue?status=scheduled"));

    let item = app.item(id).await;
    assert_eq!(item.status(), ContentStatus::Scheduled);
    assert_eq!(
        item.publish_at(),
        Some("2030-01-01T10:00:00Z".parse().unwrap())
    );

    let reply = app.post_empty(&format!("/unschedule/{id}")).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/queue?status=pending"));
    assert_eq!(app.item(id).await.status(), ContentStatus::Pending);
}

#[tokio::test]
async fn schedule_rejects_bad_input_and_wrong_state() {
    let app = app();
    let pending = app.submit("Not approved yet").await;
    assert_eq!(
        app.get(&format!("/schedule/{pending}")).await.status,
        StatusCode::CONFLICT
    );

    let approved = app.approved("Approved").await;
    let reply = app
        .post_form(&format!("/schedule/{approved}"), "publish_at=next+tuesday")
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.item(approved).await.status(), ContentStatus::Approved);
}

#[tokio::test]
async fn edit_keeps_history_and_rescores() {
    let app = app();
    let id = app.submit("first draft").await;

    let reply = app
        .post_form(
            &format!("/edit/{id}"),
            "edited_content=A+much+better+second+draft%2C+right%3F&edit_notes=tightened",
        )
        .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location, Some(format!("/review/{id}")));

    let item = app.item(id).await;
    assert_eq!(item.content(), "A much better second draft, right?");
    assert_eq!(item.edit_history().len(), 1);
    assert_eq!(item.edit_history()[0].notes.as_deref(), Some("tightened"));
    assert_eq!(item.quality_scores.unwrap().engagement_potential, 0.7);
}

#[tokio::test]
async fn review_page_escapes_content_and_scores_on_the_fly() {
    let app = app();
    let id = app.submit("<script>alert(1)</script> spam").await;

    let reply = app.get(&format!("/review/{id}")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("&lt;script&gt;"));
    assert!(!reply.body.contains("<script>alert(1)</script>"));
    assert!(reply.body.contains("Computed now"));
    assert!(reply.body.contains("Contains forbidden word"));
}

#[tokio::test]
async fn unknown_ids_and_routes_are_not_found() {
    let app = app();
    let id = uuid::Uuid::new_v4();

    let reply = app.get(&format!("/api/content/{id}")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.json()["error"].as_str().unwrap().contains(&id.to_string()));

    let reply = app.get(&format!("/review/{id}")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("Back to Dashboard"));

    let reply = app.get("/api/content/not-a-uuid").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.content_type.as_deref().unwrap().starts_with("application/json"));
    assert!(reply.json()["error"].as_str().unwrap().contains("not-a-uuid"));

    let reply = app.get("/review/not-a-uuid").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.content_type.as_deref().unwrap().starts_with("text/html"));
    assert!(reply.body.contains("Back to Dashboard"));

    let reply = app.post_empty("/publish/not-a-uuid").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("Back to Dashboard"));

    assert_eq!(app.get("/nowhere").await.status, StatusCode::NOT_FOUND);
    let reply = app.get("/api/nowhere").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.json()["error"].is_string());
}

#[tokio::test]
async fn queue_filters_by_status() {
    let app = app();
    app.submit("still pending").await;
    app.approved("already approved").await;

    let reply = app.get("/queue").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("still pending"));
    assert!(!reply.body.contains("already approved"));

    let reply = app.get("/queue?status=approved").await;
    assert!(reply.body.contains("already approved"));
    assert!(!reply.body.contains("still pending"));

    let reply = app.get("/queue?status=all").await;
    assert!(reply.body.contains("already approved"));
    assert!(reply.body.contains("still pending"));

    assert_eq!(app.get("/queue?status=bogus").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn api_list_honours_status_and_limit() {
    let app = app();
    app.submit("one").await;
    app.submit("two").await;
    app.approved("three").await;

    let all = app.get("/api/content").await.json();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let pending = app.get("/api/content?status=pending&limit=1").await.json();
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["status"], "pending");
}

#[tokio::test]
async fn analytics_json_and_page() {
    let app = app();
    app.submit("pending").await;
    app.approved("approved").await;
    let rejected = app.submit("rejected").await;
    app.queue.reject(rejected, "off-brand").await.unwrap();

    let summary = app.get("/api/analytics").await.json();
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["pending"], 1);
    assert_eq!(summary["approval_rate"], 33.3);
    assert_eq!(summary["success_rate"], 33.3);

    let reply = app.get("/analytics").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("33.3%"));
    assert!(reply.body.contains("manual"));
}

#[tokio::test]
async fn ai_generate_and_status() {
    let app = app();

    let reply = app
        .post_json(
            "/api/ai/generate",
            json!({"topic": "machine learning", "tone": "casual"}),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["provider"], "simulation");
    assert_eq!(body["tone"], "casual");
    assert!(body["content"].as_str().unwrap().contains("#Machine"));

    let reply = app.post_json("/api/ai/generate", json!({"topic": "  "})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let reply = app.post_json("/api/ai/generate", json!({"tone": "casual"})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let status = app.get("/api/ai/status").await.json();
    assert_eq!(status["provider"], "simulation");
    assert_eq!(status["available"], true);
}

#[tokio::test]
async fn publisher_account_routes() {
    let app = app();

    let status = app.get("/api/twitter/oauth/status").await.json();
    assert_eq!(status["mode"], "simulation");
    assert_eq!(status["username"], "demo_account");

    let reply = app.get("/twitter/login").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/"));

    let reply = app.post_empty("/twitter/disconnect").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);

    let down = app_with(Arc::new(MemoryStore::new()), Arc::new(DownPublisher));
    let reply = down.get("/twitter/login").await;
    assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
    assert!(reply.body.contains("not connected"));
}

#[tokio::test]
async fn health_reports_components() {
    let app = app();
    let reply = app.get("/health").await;
    assert_eq!(reply.status, StatusCode::OK);

    let body = reply.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["store"]["backend"], "memory");
    assert_eq!(body["components"]["store"]["reachable"], true);
    assert_eq!(body["components"]["ai_generator"]["provider"], "simulation");
    assert_eq!(body["components"]["publisher"]["mode"], "simulation");
    assert_eq!(body["components"]["auto_publish"]["enabled"], true);
    assert_eq!(body["components"]["auto_publish"]["interval_secs"], 30);
}

#[tokio::test]
async fn health_degrades_when_store_is_unreachable() {
    let app = app_with(
        Arc::new(UnreachableStore::default()),
        Arc::new(SimulatedPublisher::new()),
    );
    let reply = app.get("/health").await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);

    let body = reply.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["store"]["reachable"], false);
    assert!(body["components"]["store"]["error"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}
