use async_trait::async_trait;
use elasticsearch::{
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        StatusCode,
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    CountParts, DeleteParts, Elasticsearch, GetParts, IndexParts, SearchParts,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use url::Url;

use super::{
    Criterion, DocumentQuery, DocumentStore, FieldKind, FieldSpec, Hits, IndexSpec, StoreError,
    StoreResult, StoredDocument, Window, INSERTION_ORDER_FIELD,
};

/// Largest `from + size` Elasticsearch serves without scrolling (`index.max_result_window`).
pub const MAX_RESULT_WINDOW: u64 = 10_000;

#[derive(Clone)]
pub struct ElasticsearchStore {
    client: Elasticsearch,
    refresh: Refresh,
}

impl ElasticsearchStore {
    pub fn new(url: &str, timeout: Duration, refresh_on_write: bool) -> StoreResult<Self> {
        let parsed = Url::parse(url)?;
        let pool = SingleNodeConnectionPool::new(parsed);
        let transport = TransportBuilder::new(pool).timeout(timeout).build()?;
        let client = Elasticsearch::new(transport);

        Ok(Self {
            client,
            refresh: if refresh_on_write {
                Refresh::WaitFor
            } else {
                Refresh::False
            },
        })
    }
}

#[async_trait]
impl DocumentStore for ElasticsearchStore {
    async fn ensure_index(&self, spec: &IndexSpec) -> StoreResult<()> {
        let exists_response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[spec.name.as_str()]))
            .send()
            .await?;

        if exists_response.status_code().is_success() {
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&spec.name))
            .body(json!({ "mappings": mappings_for(spec.fields) }))
            .send()
            .await?;

        let status = response.status_code();
        if status.is_success() {
            tracing::info!(index = %spec.name, "created index");
            return Ok(());
        }

        let body = response.text().await?;
        // Another instance may have created it between the two calls.
        if body.contains("resource_already_exists_exception") {
            return Ok(());
        }
        Err(unexpected(&spec.name, status, body))
    }

    async fn index(&self, index: &str, id: Option<String>, source: Value) -> StoreResult<String> {
        let parts = match id.as_deref() {
            Some(id) => IndexParts::IndexId(index, id),
            None => IndexParts::Index(index),
        };

        let response = self
            .client
            .index(parts)
            .body(source)
            .refresh(self.refresh)
            .send()
            .await?;

        let response = ensure_success(index, response).await?;
        let indexed: IndexResponse = response.json().await?;
        Ok(indexed.id)
    }

    async fn get(&self, index: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await?;

        if response.status_code() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(index, response).await?;
        let fetched: GetResponse = response.json().await?;
        Ok(match (fetched.found, fetched.source) {
            (true, Some(source)) => Some(StoredDocument {
                id: fetched.id,
                source,
            }),
            _ => None,
        })
    }

    async fn search(
        &self,
        index: &str,
        query: &DocumentQuery,
        window: Option<Window>,
    ) -> StoreResult<Hits> {
        let Window { from, size } = window.unwrap_or(Window {
            from: 0,
            size: MAX_RESULT_WINDOW,
        });

        if from >= MAX_RESULT_WINDOW {
            tracing::warn!(index, from, "page starts beyond the result window");
            let total = self.count(index, query).await?;
            return Ok(Hits {
                documents: vec![],
                total,
            });
        }

        let body = json!({
            "from": from,
            "size": size.min(MAX_RESULT_WINDOW - from),
            "query": to_es_query(query),
            "sort": [{ INSERTION_ORDER_FIELD: { "order": "asc" } }],
            "track_total_hits": true,
        });

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await?;

        let response = ensure_success(index, response).await?;
        let search_response: SearchResponse = response.json().await?;

        let documents = search_response
            .hits
            .hits
            .into_iter()
            .filter_map(|hit| {
                hit.source.map(|source| StoredDocument {
                    id: hit.id,
                    source,
                })
            })
            .collect();

        Ok(Hits {
            documents,
            total: search_response.hits.total.map(|t| t.value).unwrap_or(0),
        })
    }

    async fn count(&self, index: &str, query: &DocumentQuery) -> StoreResult<u64> {
        let response = self
            .client
            .count(CountParts::Index(&[index]))
            .body(json!({ "query": to_es_query(query) }))
            .send()
            .await?;

        let response = ensure_success(index, response).await?;
        let counted: CountResponse = response.json().await?;
        Ok(counted.count)
    }

    async fn delete(&self, index: &str, id: &str) -> StoreResult<()> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .refresh(self.refresh)
            .send()
            .await?;

        // Already gone: a concurrent delete won the race.
        if response.status_code() == StatusCode::NOT_FOUND {
            tracing::debug!(index, id, "delete of missing document");
            return Ok(());
        }

        ensure_success(index, response).await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let response = self.client.ping().send().await?;
        if response.status_code().is_success() {
            Ok(())
        } else {
            Err(StoreError::Backend(format!(
                "Elasticsearch health check failed with status {}",
                response.status_code()
            )))
        }
    }
}

async fn ensure_success(index: &str, response: Response) -> StoreResult<Response> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    Err(unexpected(index, status, body))
}

fn unexpected(index: &str, status: StatusCode, body: String) -> StoreError {
    StoreError::UnexpectedStatus {
        index: index.to_string(),
        status: status.as_u16(),
        body,
    }
}

/// Index mappings for a collection. Text fields use the `wildcard` type, which keeps
/// whole values of any length for exact and containment matches, with an analyzed
/// `text` sub-field for relevance search. Dates keep nanosecond precision so documents
/// created within the same millisecond still sort in creation order.
fn mappings_for(fields: &[FieldSpec]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|field| {
            let mapping = match field.kind {
                FieldKind::Text => json!({
                    "type": "wildcard",
                    "fields": {
                        "text": { "type": "text" }
                    }
                }),
                FieldKind::Keyword => json!({ "type": "keyword" }),
                FieldKind::Date => json!({ "type": "date_nanos" }),
            };
            (field.name.to_string(), mapping)
        })
        .collect();

    json!({ "properties": properties })
}

/// Translates a `DocumentQuery` into Query DSL.
fn to_es_query(query: &DocumentQuery) -> Value {
    if query.is_match_all() {
        return json!({ "match_all": {} });
    }

    let should: Vec<Value> = query
        .branches()
        .iter()
        .map(|criteria| {
            let filter: Vec<Value> = criteria.criteria().iter().map(criterion_clause).collect();
            json!({ "bool": { "filter": filter } })
        })
        .collect();

    json!({
        "bool": {
            "should": should,
            "minimum_should_match": 1
        }
    })
}

fn criterion_clause(criterion: &Criterion) -> Value {
    match criterion {
        Criterion::Equals { field, value } => json!({
            "term": { field.as_str(): { "value": value } }
        }),
        Criterion::Contains { field, value } => json!({
            "wildcard": {
                field.as_str(): {
                    "value": format!("*{}*", escape_wildcard(value)),
                    "case_insensitive": true
                }
            }
        }),
    }
}

fn escape_wildcard(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Deserialize)]
struct IndexResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: InnerHits,
}

#[derive(Debug, Deserialize)]
struct InnerHits {
    total: Option<TotalHits>,
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Criteria, Document};
    use crate::models::{Comment, Post};

    #[test]
    fn match_all_translation() {
        assert_eq!(
            to_es_query(&DocumentQuery::match_all()),
            json!({ "match_all": {} })
        );
    }

    #[test]
    fn union_of_scoped_clauses() {
        let query = DocumentQuery::matching(
            Criteria::new()
                .equals("postId", "p1")
                .contains("content", "hello"),
        )
        .or(Criteria::new().equals("postId", "p1").equals("author", "kim"));

        let translated = to_es_query(&query);
        let should = translated["bool"]["should"].as_array().unwrap();

        assert_eq!(translated["bool"]["minimum_should_match"], 1);
        assert_eq!(should.len(), 2);
        assert_eq!(
            should[0]["bool"]["filter"][0],
            json!({ "term": { "postId": { "value": "p1" } } })
        );
        assert_eq!(
            should[0]["bool"]["filter"][1]["wildcard"]["content"]["value"],
            "*hello*"
        );
        assert_eq!(
            should[0]["bool"]["filter"][1]["wildcard"]["content"]["case_insensitive"],
            true
        );
        assert_eq!(
            should[1]["bool"]["filter"][1],
            json!({ "term": { "author": { "value": "kim" } } })
        );
    }

    #[test]
    fn wildcard_metacharacters_are_escaped() {
        assert_eq!(escape_wildcard(r"50% off*? \o/"), r"50% off\*\? \\o/");
    }

    #[test]
    fn comment_mappings() {
        let mappings = mappings_for(Comment::FIELDS);
        let properties = &mappings["properties"];

        assert_eq!(properties["postId"], json!({ "type": "keyword" }));
        assert_eq!(properties["content"]["type"], "wildcard");
        assert!(properties["content"].get("ignore_above").is_none());
        assert_eq!(properties["content"]["fields"]["text"]["type"], "text");
        assert_eq!(properties["createdAt"], json!({ "type": "date_nanos" }));
    }

    #[test]
    fn unbounded_text_fields_are_not_length_capped() {
        let mappings = mappings_for(Post::FIELDS);

        for field in [Post::TITLE, Post::CONTENT, Post::AUTHOR] {
            let mapping = &mappings["properties"][field];
            assert_eq!(mapping["type"], "wildcard", "field: {}", field);
            assert!(mapping.get("ignore_above").is_none(), "field: {}", field);
        }
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(matches!(
            ElasticsearchStore::new("not a url", Duration::from_secs(1), false),
            Err(StoreError::InvalidUrl(_))
        ));
    }
}
