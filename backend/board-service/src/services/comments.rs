/// Comment service - handles comment creation, retrieval, update, deletion and search
use crate::db::{comment_repo, CommentRepository};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentSearchType, Page, PageRequest, Pageable, Post};

#[derive(Clone)]
pub struct CommentService {
    repo: CommentRepository,
}

impl CommentService {
    pub fn new(repo: CommentRepository) -> Self {
        Self { repo }
    }

    /// Total number of stored comments
    pub async fn count(&self) -> Result<u64> {
        Ok(self.repo.count().await?)
    }

    /// Create a comment under an already resolved post
    pub async fn create(&self, post: &Post, content: &str, author: &str) -> Result<Comment> {
        let comment = self
            .repo
            .save(Comment::new(post.id.as_str(), content, author))
            .await?;
        tracing::info!(post_id = %post.id, comment_id = %comment.id, "comment created");
        Ok(comment)
    }

    /// Every comment regardless of post
    pub async fn find_all(&self, pageable: Pageable) -> Result<Page<Comment>> {
        Ok(self.repo.find_all(pageable).await?)
    }

    /// Comments for a post, in insertion order
    pub async fn find_by_post_id(&self, post_id: &str, pageable: Pageable) -> Result<Page<Comment>> {
        Ok(self.repo.find_by_post_id(post_id, pageable).await?)
    }

    /// Get a comment by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Comment> {
        match self.repo.find_by_id(id).await? {
            Some(comment) => Ok(comment),
            None => {
                tracing::debug!(comment_id = %id, "comment not found");
                Err(AppError::comment_not_found(id))
            }
        }
    }

    /// Update content; `None` leaves the stored content as it is.
    pub async fn update(&self, id: &str, content: Option<&str>) -> Result<Comment> {
        let mut comment = self.find_by_id(id).await?;
        if let Some(content) = content {
            comment.content = content.to_string();
        }

        let comment = self.repo.save(comment).await?;
        tracing::info!(comment_id = %comment.id, "comment updated");
        Ok(comment)
    }

    /// Delete an already resolved comment
    pub async fn delete(&self, comment: &Comment) -> Result<()> {
        self.repo.delete(comment).await?;
        tracing::info!(comment_id = %comment.id, post_id = %comment.post_id, "comment deleted");
        Ok(())
    }

    /// Keyword search among the comments of one post.
    pub async fn search(
        &self,
        post_id: &str,
        keyword: &str,
        search_type: CommentSearchType,
        page: PageRequest,
    ) -> Result<Page<Comment>> {
        let query = match search_type {
            CommentSearchType::Content => {
                comment_repo::by_post_id_and_content_containing(post_id, keyword)
            }
            CommentSearchType::Author => comment_repo::by_post_id_and_author(post_id, keyword),
            CommentSearchType::ContentAndAuthor => {
                comment_repo::by_post_id_and_content_containing_or_post_id_and_author(
                    post_id, keyword, post_id, keyword,
                )
            }
        };

        tracing::debug!(post_id, %search_type, keyword, "searching comments");
        Ok(self.repo.find(&query, page.into()).await?)
    }
}
