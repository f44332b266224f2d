use std::sync::Arc;

use super::{Criteria, DocumentQuery, DocumentRepository, DocumentStore, StoreResult};
use crate::models::{Page, Pageable, Post};

/// Posts whose title contains `keyword`
pub fn title_containing(keyword: &str) -> DocumentQuery {
    DocumentQuery::matching(Criteria::new().contains(Post::TITLE, keyword))
}

/// Posts whose content contains `keyword`
pub fn content_containing(keyword: &str) -> DocumentQuery {
    DocumentQuery::matching(Criteria::new().contains(Post::CONTENT, keyword))
}

/// Posts whose title contains `title` or whose content contains `content`
pub fn title_or_content_containing(title: &str, content: &str) -> DocumentQuery {
    title_containing(title).or(Criteria::new().contains(Post::CONTENT, content))
}

#[derive(Clone)]
pub struct PostRepository {
    documents: DocumentRepository<Post>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>) -> Self {
        Self {
            documents: DocumentRepository::new(store, index),
        }
    }

    pub async fn ensure_index(&self) -> StoreResult<()> {
        self.documents.ensure_index().await
    }

    pub async fn save(&self, post: Post) -> StoreResult<Post> {
        self.documents.save(post).await
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Post>> {
        self.documents.find_by_id(id).await
    }

    pub async fn find_all(&self, pageable: Pageable) -> StoreResult<Page<Post>> {
        self.documents
            .find(&DocumentQuery::match_all(), pageable)
            .await
    }

    pub async fn find(&self, query: &DocumentQuery, pageable: Pageable) -> StoreResult<Page<Post>> {
        self.documents.find(query, pageable).await
    }

    pub async fn delete(&self, post: &Post) -> StoreResult<()> {
        self.documents.delete(post).await
    }

    pub async fn count(&self) -> StoreResult<u64> {
        self.documents.count(&DocumentQuery::match_all()).await
    }
}
