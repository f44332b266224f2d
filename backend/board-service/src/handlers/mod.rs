/// HTTP handlers for board endpoints
///
/// This module contains handlers for:
/// - Posts: create, read, update, delete, list and keyword search
/// - Comments: the same operations nested under a post; every comment route
///   resolves the parent post before touching the comment collection
/// - Health: store reachability and collection counts
pub mod comments;
pub mod health;
pub mod posts;

use actix_web::{error::JsonPayloadError, error::QueryPayloadError, web, HttpRequest};
use serde::Deserialize;
use validator::ValidationError;

use crate::error::{AppError, Result};
use crate::models::{PageRequest, Pageable, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

// Re-export handler functions at module level
pub use comments::{
    create_comment, delete_comment, get_comment, list_comments, search_comments, update_comment,
};
pub use health::{health_summary, liveness_check, HealthState};
pub use posts::{create_post, delete_post, get_post, list_posts, search_posts, update_post};

/// Pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Return every match in a single page
    #[serde(default)]
    pub unpaged: bool,
}

impl PageParams {
    pub fn pageable(&self) -> Result<Pageable> {
        if self.unpaged {
            return Ok(Pageable::Unpaged);
        }
        page_request(self.page, self.size).map(Pageable::Paged)
    }
}

/// Builds a page request from optional query values, defaulting to page 0 / size 10.
pub(crate) fn page_request(page: Option<u32>, size: Option<u32>) -> Result<PageRequest> {
    PageRequest::new(
        page.unwrap_or(DEFAULT_PAGE),
        size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map_err(AppError::BadRequest)
}

/// Rejects empty and whitespace-only strings.
pub(crate) fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Registers every board route under `/api/v1`.
///
/// Literal `search` segments are registered ahead of the `{id}` resources that
/// would otherwise capture them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health_summary))
                .route("/health/live", web::get().to(liveness_check))
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::post().to(create_post))
                                .route(web::get().to(list_posts)),
                        )
                        .service(web::resource("/search").route(web::get().to(search_posts)))
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(get_post))
                                .route(web::put().to(update_post))
                                .route(web::delete().to(delete_post)),
                        )
                        .service(
                            web::resource("/{post_id}/comments")
                                .route(web::post().to(create_comment))
                                .route(web::get().to(list_comments)),
                        )
                        .service(
                            web::resource("/{post_id}/comments/search")
                                .route(web::get().to(search_comments)),
                        )
                        .service(
                            web::resource("/{post_id}/comments/{id}")
                                .route(web::get().to(get_comment))
                                .route(web::put().to(update_comment))
                                .route(web::delete().to(delete_comment)),
                        ),
                ),
        );
}
