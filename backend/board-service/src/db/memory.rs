//! In-process document store.
//!
//! Keeps each collection as an insertion-ordered list and evaluates `DocumentQuery`
//! directly against the JSON sources. Backs the `memory` search backend and the tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentQuery, DocumentStore, Hits, IndexSpec, StoreResult, StoredDocument, Window};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    indices: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn ensure_index(&self, spec: &IndexSpec) -> StoreResult<()> {
        self.indices
            .write()
            .await
            .entry(spec.name.clone())
            .or_default();
        Ok(())
    }

    async fn index(&self, index: &str, id: Option<String>, source: Value) -> StoreResult<String> {
        let mut indices = self.indices.write().await;
        let documents = indices.entry(index.to_string()).or_default();
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());

        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => existing.source = source,
            None => documents.push(StoredDocument {
                id: id.clone(),
                source,
            }),
        }

        Ok(id)
    }

    async fn get(&self, index: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        let indices = self.indices.read().await;
        Ok(indices
            .get(index)
            .and_then(|documents| documents.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn search(
        &self,
        index: &str,
        query: &DocumentQuery,
        window: Option<Window>,
    ) -> StoreResult<Hits> {
        let indices = self.indices.read().await;
        let matching: Vec<&StoredDocument> = indices
            .get(index)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| query.matches(&doc.source))
                    .collect()
            })
            .unwrap_or_default();

        let total = matching.len() as u64;
        let (skip, take) = match window {
            Some(window) => (
                usize::try_from(window.from).unwrap_or(usize::MAX),
                usize::try_from(window.size).unwrap_or(usize::MAX),
            ),
            None => (0, usize::MAX),
        };

        Ok(Hits {
            documents: matching.into_iter().skip(skip).take(take).cloned().collect(),
            total,
        })
    }

    async fn count(&self, index: &str, query: &DocumentQuery) -> StoreResult<u64> {
        let indices = self.indices.read().await;
        Ok(indices
            .get(index)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| query.matches(&doc.source))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    async fn delete(&self, index: &str, id: &str) -> StoreResult<()> {
        if let Some(documents) = self.indices.write().await.get_mut(index) {
            documents.retain(|doc| doc.id != id);
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Criteria;
    use serde_json::json;

    #[tokio::test]
    async fn assigns_ids_and_keeps_insertion_order() {
        let store = InMemoryStore::new();
        let first = store.index("c", None, json!({"n": "1"})).await.unwrap();
        let second = store.index("c", None, json!({"n": "2"})).await.unwrap();
        assert_ne!(first, second);

        // Overwriting keeps the original position.
        store
            .index("c", Some(first.clone()), json!({"n": "1b"}))
            .await
            .unwrap();

        let hits = store
            .search("c", &DocumentQuery::match_all(), None)
            .await
            .unwrap();
        assert_eq!(hits.total, 2);
        assert_eq!(hits.documents[0].id, first);
        assert_eq!(hits.documents[0].source["n"], "1b");
        assert_eq!(hits.documents[1].id, second);
    }

    #[tokio::test]
    async fn window_slices_matches_but_total_counts_all() {
        let store = InMemoryStore::new();
        for i in 0..6 {
            let parity = if i % 2 == 0 { "even" } else { "odd" };
            store
                .index("c", None, json!({ "parity": parity, "i": i.to_string() }))
                .await
                .unwrap();
        }

        let even = DocumentQuery::matching(Criteria::new().equals("parity", "even"));
        let hits = store
            .search("c", &even, Some(Window { from: 1, size: 1 }))
            .await
            .unwrap();

        assert_eq!(hits.total, 3);
        assert_eq!(hits.documents.len(), 1);
        assert_eq!(hits.documents[0].source["i"], "2");
        assert_eq!(store.count("c", &even).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unknown_index_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.get("nope", "id").await.unwrap().is_none());
        assert_eq!(
            store.count("nope", &DocumentQuery::match_all()).await.unwrap(),
            0
        );
        store.delete("nope", "id").await.unwrap();
    }

    #[tokio::test]
    async fn delete_removes_only_target() {
        let store = InMemoryStore::new();
        let keep = store.index("c", None, json!({})).await.unwrap();
        let drop = store.index("c", None, json!({})).await.unwrap();

        store.delete("c", &drop).await.unwrap();

        assert!(store.get("c", &drop).await.unwrap().is_none());
        assert!(store.get("c", &keep).await.unwrap().is_some());
    }
}
