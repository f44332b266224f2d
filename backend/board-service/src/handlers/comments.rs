/// Comment handlers - HTTP endpoints nested under `/posts/{post_id}/comments`
///
/// Each handler resolves the parent post first, so a missing post answers 404
/// before the comment collection is queried or written.
use crate::error::Result;
use crate::handlers::{page_request, validate_not_blank, PageParams};
use crate::models::CommentSearchType;
use crate::services::{CommentService, PostService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        length(min = 1, max = 500),
        custom(function = "validate_not_blank")
    )]
    pub content: String,
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub author: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(
        length(min = 1, max = 500),
        custom(function = "validate_not_blank")
    )]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSearchParams {
    pub keyword: String,
    pub search_type: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Create a comment under an existing post
pub async fn create_comment(
    posts: web::Data<PostService>,
    comments: web::Data<CommentService>,
    post_id: web::Path<String>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = posts.find_by_id(&post_id).await?;
    let comment = comments.create(&post, &req.content, &req.author).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// List the comments of a post
pub async fn list_comments(
    posts: web::Data<PostService>,
    comments: web::Data<CommentService>,
    post_id: web::Path<String>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let pageable = query.pageable()?;
    let post = posts.find_by_id(&post_id).await?;

    let page = comments.find_by_post_id(&post.id, pageable).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Keyword search among the comments of a post
pub async fn search_comments(
    posts: web::Data<PostService>,
    comments: web::Data<CommentService>,
    post_id: web::Path<String>,
    query: web::Query<CommentSearchParams>,
) -> Result<HttpResponse> {
    let search_type = CommentSearchType::from_param(query.search_type.as_deref());
    let page = page_request(query.page, query.size)?;
    let post = posts.find_by_id(&post_id).await?;

    let results = comments
        .search(&post.id, &query.keyword, search_type, page)
        .await?;
    Ok(HttpResponse::Ok().json(results))
}

/// Get a comment by ID
pub async fn get_comment(
    posts: web::Data<PostService>,
    comments: web::Data<CommentService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (post_id, id) = path.into_inner();
    posts.find_by_id(&post_id).await?;

    let comment = comments.find_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Update comment content
pub async fn update_comment(
    posts: web::Data<PostService>,
    comments: web::Data<CommentService>,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let (post_id, id) = path.into_inner();
    posts.find_by_id(&post_id).await?;

    let comment = comments.update(&id, req.content.as_deref()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Delete a comment
pub async fn delete_comment(
    posts: web::Data<PostService>,
    comments: web::Data<CommentService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (post_id, id) = path.into_inner();
    posts.find_by_id(&post_id).await?;

    let comment = comments.find_by_id(&id).await?;
    comments.delete(&comment).await?;
    Ok(HttpResponse::NoContent().finish())
}
