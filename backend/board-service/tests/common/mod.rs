//! Shared setup for the HTTP integration tests.
#![allow(dead_code)]

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use board_service::db::{CommentRepository, DocumentStore, InMemoryStore, PostRepository};
use board_service::handlers::{self, HealthState};
use board_service::services::{CommentService, PostService};
use serde_json::{json, Value};
use std::sync::Arc;

/// Full board app over a fresh in-memory store.
pub async fn setup_test_app(
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
    let posts = PostService::new(PostRepository::new(store.clone(), "posts"));
    let comments = CommentService::new(CommentRepository::new(store.clone(), "comments"));
    let health = HealthState::new(store, posts.clone(), comments.clone());

    test::init_service(
        App::new()
            .app_data(web::Data::new(posts))
            .app_data(web::Data::new(comments))
            .app_data(web::Data::new(health))
            .configure(handlers::configure),
    )
    .await
}

pub fn post_body(title: &str) -> Value {
    json!({
        "title": title,
        "content": format!("{} body", title),
        "author": "tester"
    })
}

pub fn comment_body(content: &str, author: &str) -> Value {
    json!({ "content": content, "author": author })
}

/// Creates a post over HTTP and returns its id.
pub async fn create_post<S>(app: &S, title: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post_body(title))
        .to_request();
    let created: Value = test::call_and_read_body_json(app, req).await;
    created["id"].as_str().expect("post id").to_string()
}

/// Creates a comment over HTTP and returns the stored document.
pub async fn create_comment<S>(app: &S, post_id: &str, content: &str, author: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/posts/{}/comments", post_id))
        .set_json(comment_body(content, author))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

pub async fn get_json<S>(app: &S, uri: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    test::call_and_read_body_json(app, req).await
}
