use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{
    DocumentQuery, DocumentStore, FieldSpec, IndexSpec, StoreError, StoreResult, StoredDocument,
    Window,
};
use crate::models::{Page, Pageable};

const ID_FIELD: &str = "id";

/// A typed document kept in one store collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const FIELDS: &'static [FieldSpec];

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

/// Maps typed documents to store sources and back for a single collection.
pub struct DocumentRepository<D> {
    store: Arc<dyn DocumentStore>,
    index: String,
    _document: PhantomData<fn() -> D>,
}

impl<D> Clone for DocumentRepository<D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            index: self.index.clone(),
            _document: PhantomData,
        }
    }
}

impl<D: Document> DocumentRepository<D> {
    pub fn new(store: Arc<dyn DocumentStore>, index: impl Into<String>) -> Self {
        Self {
            store,
            index: index.into(),
            _document: PhantomData,
        }
    }

    pub async fn ensure_index(&self) -> StoreResult<()> {
        let spec = IndexSpec {
            name: self.index.clone(),
            fields: D::FIELDS,
        };
        self.store.ensure_index(&spec).await
    }

    /// Inserts the document, or overwrites it when it already carries an id.
    pub async fn save(&self, mut document: D) -> StoreResult<D> {
        let id = Some(document.id().to_string()).filter(|id| !id.is_empty());
        let source = to_source(&document)?;
        let assigned = self.store.index(&self.index, id, source).await?;
        document.set_id(assigned);
        Ok(document)
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<D>> {
        self.store
            .get(&self.index, id)
            .await?
            .map(from_stored)
            .transpose()
    }

    pub async fn find(&self, query: &DocumentQuery, pageable: Pageable) -> StoreResult<Page<D>> {
        match pageable {
            Pageable::Unpaged => {
                let hits = self.store.search(&self.index, query, None).await?;
                let documents = decode_all(hits.documents)?;
                Ok(Page::unpaged(documents, hits.total))
            }
            Pageable::Paged(request) => {
                let window = Window {
                    from: request.offset(),
                    size: u64::from(request.size()),
                };
                let hits = self.store.search(&self.index, query, Some(window)).await?;
                let documents = decode_all(hits.documents)?;
                Ok(Page::new(documents, request, hits.total))
            }
        }
    }

    pub async fn count(&self, query: &DocumentQuery) -> StoreResult<u64> {
        self.store.count(&self.index, query).await
    }

    pub async fn delete(&self, document: &D) -> StoreResult<()> {
        if document.id().is_empty() {
            return Err(StoreError::Backend(
                "cannot delete a document that was never saved".to_string(),
            ));
        }
        self.store.delete(&self.index, document.id()).await
    }
}

fn to_source<D: Document>(document: &D) -> StoreResult<Value> {
    let mut source = serde_json::to_value(document)?;
    if let Value::Object(map) = &mut source {
        map.remove(ID_FIELD);
    }
    Ok(source)
}

fn from_stored<D: Document>(stored: StoredDocument) -> StoreResult<D> {
    let StoredDocument { id, mut source } = stored;
    if let Value::Object(map) = &mut source {
        map.insert(ID_FIELD.to_string(), Value::String(id));
    }
    Ok(serde_json::from_value(source)?)
}

fn decode_all<D: Document>(documents: Vec<StoredDocument>) -> StoreResult<Vec<D>> {
    documents.into_iter().map(from_stored).collect()
}
