/// Document store access layer
///
/// The store is a schemaless document index. Everything above this module talks to it
/// through the `DocumentStore` trait, issuing `DocumentQuery` values composed by the
/// post and comment repositories.
pub mod comment_repo;
pub mod elasticsearch;
pub mod memory;
pub mod post_repo;
pub mod query;
pub mod repository;

pub use comment_repo::CommentRepository;
pub use self::elasticsearch::ElasticsearchStore;
pub use memory::InMemoryStore;
pub use post_repo::PostRepository;
pub use query::{Criteria, Criterion, DocumentQuery};
pub use repository::{Document, DocumentRepository};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid Elasticsearch URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build transport: {0}")]
    TransportBuild(#[from] ::elasticsearch::http::transport::BuildError),
    #[error("transport error: {0}")]
    Transport(#[from] ::elasticsearch::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unexpected response from index '{index}' ({status}): {body}")]
    UnexpectedStatus {
        index: String,
        status: u16,
        body: String,
    },
    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// How a document field is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text: exact and containment matches, plus an analyzed sub-field
    Text,
    /// Identifier-like value, exact matches only
    Keyword,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Name and field layout of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: String,
    pub fields: &'static [FieldSpec],
}

/// A document as held by the store. The id lives outside the source.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub source: Value,
}

/// One window of matching documents plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hits {
    pub documents: Vec<StoredDocument>,
    pub total: u64,
}

/// Offset/limit pair used to fetch one page of hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: u64,
    pub size: u64,
}

/// Field name every document carries; hits are returned in ascending order of it.
pub const INSERTION_ORDER_FIELD: &str = "createdAt";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the collection if it does not exist yet.
    async fn ensure_index(&self, spec: &IndexSpec) -> StoreResult<()>;

    /// Insert or overwrite a document. Without an id the store assigns one; the
    /// effective id is returned.
    async fn index(&self, index: &str, id: Option<String>, source: Value) -> StoreResult<String>;

    async fn get(&self, index: &str, id: &str) -> StoreResult<Option<StoredDocument>>;

    /// Matching documents in insertion order. `None` returns every match the store
    /// is willing to hand out in one response.
    async fn search(
        &self,
        index: &str,
        query: &DocumentQuery,
        window: Option<Window>,
    ) -> StoreResult<Hits>;

    async fn count(&self, index: &str, query: &DocumentQuery) -> StoreResult<u64>;

    async fn delete(&self, index: &str, id: &str) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}
