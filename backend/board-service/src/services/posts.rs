/// Post service - handles post creation, retrieval, update, deletion and search
use crate::db::{post_repo, PostRepository};
use crate::error::{AppError, Result};
use crate::models::{Page, PageRequest, Pageable, Post, PostSearchType};

#[derive(Clone)]
pub struct PostService {
    repo: PostRepository,
}

impl PostService {
    pub fn new(repo: PostRepository) -> Self {
        Self { repo }
    }

    /// Total number of stored posts
    pub async fn count(&self) -> Result<u64> {
        Ok(self.repo.count().await?)
    }

    /// Create a new post
    pub async fn create(&self, title: &str, content: &str, author: &str) -> Result<Post> {
        let post = self.repo.save(Post::new(title, content, author)).await?;
        tracing::info!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// List posts in insertion order
    pub async fn find_all(&self, pageable: Pageable) -> Result<Page<Post>> {
        Ok(self.repo.find_all(pageable).await?)
    }

    /// Get a post by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Post> {
        match self.repo.find_by_id(id).await? {
            Some(post) => Ok(post),
            None => {
                tracing::debug!(post_id = %id, "post not found");
                Err(AppError::post_not_found(id))
            }
        }
    }

    /// Update title and/or content; `None` leaves the stored value as it is.
    pub async fn update(
        &self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Post> {
        let mut post = self.find_by_id(id).await?;
        if let Some(title) = title {
            post.title = title.to_string();
        }
        if let Some(content) = content {
            post.content = content.to_string();
        }

        let post = self.repo.save(post).await?;
        tracing::info!(post_id = %post.id, "post updated");
        Ok(post)
    }

    /// Delete a post. Comments referencing it are left untouched.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let post = self.find_by_id(id).await?;
        self.repo.delete(&post).await?;
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }

    pub async fn search(
        &self,
        keyword: &str,
        search_type: PostSearchType,
        page: PageRequest,
    ) -> Result<Page<Post>> {
        let query = match search_type {
            PostSearchType::Title => post_repo::title_containing(keyword),
            PostSearchType::Content => post_repo::content_containing(keyword),
            PostSearchType::TitleAndContent => {
                post_repo::title_or_content_containing(keyword, keyword)
            }
        };

        tracing::debug!(%search_type, keyword, "searching posts");
        Ok(self.repo.find(&query, page.into()).await?)
    }
}
