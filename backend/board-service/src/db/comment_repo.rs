use std::sync::Arc;

use super::{Criteria, DocumentQuery, DocumentRepository, DocumentStore, StoreResult};
use crate::models::{Comment, Page, Pageable};

/// Comments under `post_id`
pub fn by_post_id(post_id: &str) -> DocumentQuery {
    DocumentQuery::matching(scoped(post_id))
}

/// Comments under `post_id` whose content contains `content`
pub fn by_post_id_and_content_containing(post_id: &str, content: &str) -> DocumentQuery {
    DocumentQuery::matching(scoped(post_id).contains(Comment::CONTENT, content))
}

/// Comments under `post_id` written by exactly `author`
pub fn by_post_id_and_author(post_id: &str, author: &str) -> DocumentQuery {
    DocumentQuery::matching(scoped(post_id).equals(Comment::AUTHOR, author))
}

/// Union of two independently scoped clauses: content contains `content` under
/// `content_post_id`, or author equals `author` under `author_post_id`.
///
/// Callers pass the same post id twice to get per-post "either field" semantics.
pub fn by_post_id_and_content_containing_or_post_id_and_author(
    content_post_id: &str,
    content: &str,
    author_post_id: &str,
    author: &str,
) -> DocumentQuery {
    by_post_id_and_content_containing(content_post_id, content)
        .or(scoped(author_post_id).equals(Comment::AUTHOR, author))
}

fn scoped(post_id: &str) -> Criteria {
    Criteria::new().equals(Comment::POST_ID, post_id)
}

#[derive(Clone)]
pub struct CommentRepository {
    documents: DocumentRepository<Comment>,
}

impl CommentRepository {
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>) -> Self {
        Self {
            documents: DocumentRepository::new(store, index),
        }
    }

    pub async fn ensure_index(&self) -> StoreResult<()> {
        self.documents.ensure_index().await
    }

    pub async fn save(&self, comment: Comment) -> StoreResult<Comment> {
        self.documents.save(comment).await
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Comment>> {
        self.documents.find_by_id(id).await
    }

    pub async fn find_all(&self, pageable: Pageable) -> StoreResult<Page<Comment>> {
        self.documents
            .find(&DocumentQuery::match_all(), pageable)
            .await
    }

    pub async fn find_by_post_id(
        &self,
        post_id: &str,
        pageable: Pageable,
    ) -> StoreResult<Page<Comment>> {
        self.documents.find(&by_post_id(post_id), pageable).await
    }

    pub async fn find(
        &self,
        query: &DocumentQuery,
        pageable: Pageable,
    ) -> StoreResult<Page<Comment>> {
        self.documents.find(query, pageable).await
    }

    pub async fn delete(&self, comment: &Comment) -> StoreResult<()> {
        self.documents.delete(comment).await
    }

    pub async fn count(&self) -> StoreResult<u64> {
        self.documents.count(&DocumentQuery::match_all()).await
    }
}
