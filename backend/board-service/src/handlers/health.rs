use crate::db::DocumentStore;
use crate::services::{CommentService, PostService};
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use std::time::Instant;

pub struct HealthState {
    store: Arc<dyn DocumentStore>,
    posts: PostService,
    comments: CommentService,
}

impl HealthState {
    pub fn new(store: Arc<dyn DocumentStore>, posts: PostService, comments: CommentService) -> Self {
        Self {
            store,
            posts,
            comments,
        }
    }
}

/// Store reachability plus collection counts
pub async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    let start = Instant::now();
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "document store ping failed");
        return HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("Document store unreachable: {}", e),
            "service": "board-service"
        }));
    }

    let counts = tokio::try_join!(state.posts.count(), state.comments.count());
    let latency_ms = start.elapsed().as_millis() as u64;

    match counts {
        Ok((posts, comments)) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "board-service",
            "version": env!("CARGO_PKG_VERSION"),
            "posts": posts,
            "comments": comments,
            "latency_ms": latency_ms
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": e.to_string(),
            "service": "board-service"
        })),
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
