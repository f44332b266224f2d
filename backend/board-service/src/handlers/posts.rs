/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::handlers::{page_request, validate_not_blank, PageParams};
use crate::models::PostSearchType;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub author: String,
}

/// Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSearchParams {
    pub keyword: String,
    pub search_type: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Create a new post
pub async fn create_post(
    service: web::Data<PostService>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = service
        .create(&req.title, &req.content, &req.author)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// List posts, paginated unless `unpaged=true`
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let page = service.find_all(query.pageable()?).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Keyword search over title and/or content
pub async fn search_posts(
    service: web::Data<PostService>,
    query: web::Query<PostSearchParams>,
) -> Result<HttpResponse> {
    let search_type = PostSearchType::from_param(query.search_type.as_deref());
    let page = page_request(query.page, query.size)?;

    let posts = service.search(&query.keyword, search_type, page).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by ID
pub async fn get_post(
    service: web::Data<PostService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let post = service.find_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Update title and/or content
pub async fn update_post(
    service: web::Data<PostService>,
    id: web::Path<String>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = service
        .update(&id, req.title.as_deref(), req.content.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post
pub async fn delete_post(
    service: web::Data<PostService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
