use crate::error::SearchError;
use crate::index::{IndexSchema, HNSW_ALGORITHM_NAME, VECTOR_PROFILE_NAME};
use crate::models::{DocumentStatus, QueryHit, SearchDocument};
use crate::traits::{CreateOutcome, DocumentIndex, IndexAdmin};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use url::Url;

const API_VERSION: &str = "2023-11-01";

/// REST client for the managed search service. One instance covers
/// both index administration (list/create) and document access
/// (batch upsert, free-text query). All auth is the `api-key` header.
pub struct SearchServiceClient {
    client: Client,
    endpoint: String,
    api_key: String,
    index_name: String,
}

impl SearchServiceClient {
    pub fn new(endpoint: &Url, api_key: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            index_name: index_name.into(),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}?api-version={}", self.endpoint, path, API_VERSION)
    }

    fn schema_body(schema: &IndexSchema) -> Value {
        json!({
            "name": schema.name,
            "fields": [
                {"name": "id", "type": "Edm.String", "key": true},
                {"name": "content", "type": "Edm.String", "searchable": true},
                {"name": "source", "type": "Edm.String", "filterable": true},
                {"name": "page", "type": "Edm.Int32"},
                {
                    "name": "vector",
                    "type": "Collection(Edm.Single)",
                    "dimensions": schema.vector_dimensions,
                    "vectorSearchProfile": VECTOR_PROFILE_NAME,
                }
            ],
            "vectorSearch": {
                "algorithms": [{"name": HNSW_ALGORITHM_NAME, "kind": "hnsw"}],
                "profiles": [{"name": VECTOR_PROFILE_NAME, "algorithm": HNSW_ALGORITHM_NAME}],
            }
        })
    }

    fn parse_upload_statuses(payload: &Value) -> Vec<DocumentStatus> {
        payload
            .pointer("/value")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| DocumentStatus {
                        key: row
                            .pointer("/key")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        succeeded: row
                            .pointer("/status")
                            .and_then(Value::as_bool)
                            .unwrap_or(false),
                        error: row
                            .pointer("/errorMessage")
                            .and_then(Value::as_str)
                            .map(|message| message.to_string()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parse_search_hits(payload: &Value) -> Vec<QueryHit> {
        payload
            .pointer("/value")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| QueryHit {
                        content: row
                            .pointer("/content")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        source: row
                            .pointer("/source")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        page: row
                            .pointer("/page")
                            .and_then(Value::as_u64)
                            .unwrap_or_default() as u32,
                        score: row
                            .pointer("/@search.score")
                            .and_then(Value::as_f64)
                            .unwrap_or(0.0),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl IndexAdmin for SearchServiceClient {
    async fn list_index_names(&self) -> Result<Vec<String>, SearchError> {
        let response = self
            .client
            .get(format!("{}&$select=name", self.url("indexes")))
            .header("api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::BackendResponse {
                backend: "search-index".to_string(),
                details: response.status().to_string(),
            });
        }

        let payload: Value = response.json().await?;
        let names = payload
            .pointer("/value")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row.pointer("/name").and_then(Value::as_str))
                    .map(|name| name.to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(names)
    }

    async fn create_index(&self, schema: &IndexSchema) -> Result<CreateOutcome, SearchError> {
        let response = self
            .client
            .post(self.url("indexes"))
            .header("api-key", &self.api_key)
            .json(&Self::schema_body(schema))
            .send()
            .await?;

        // Another ingestion run may have created the index between our
        // list and this call; that race is expected on cold starts.
        if response.status() == StatusCode::CONFLICT {
            return Ok(CreateOutcome::AlreadyExists);
        }

        if !response.status().is_success() {
            return Err(SearchError::BackendResponse {
                backend: "search-index".to_string(),
                details: response.status().to_string(),
            });
        }

        Ok(CreateOutcome::Created)
    }
}

#[async_trait]
impl DocumentIndex for SearchServiceClient {
    async fn upload_documents(
        &self,
        documents: &[SearchDocument],
    ) -> Result<Vec<DocumentStatus>, SearchError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let actions = documents
            .iter()
            .map(|document| {
                json!({
                    "@search.action": "mergeOrUpload",
                    "id": document.id,
                    "content": document.content,
                    "source": document.source,
                    "page": document.page,
                    "vector": document.vector,
                })
            })
            .collect::<Vec<_>>();

        let response = self
            .client
            .post(self.url(&format!("indexes/{}/docs/index", self.index_name)))
            .header("api-key", &self.api_key)
            .json(&json!({ "value": actions }))
            .send()
            .await?;

        // 207 carries per-document failures in the body and is still a
        // parseable response.
        if !response.status().is_success() && response.status() != StatusCode::MULTI_STATUS {
            return Err(SearchError::BackendResponse {
                backend: "search-index".to_string(),
                details: response.status().to_string(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(Self::parse_upload_statuses(&payload))
    }

    async fn search(&self, text: &str, top_k: usize) -> Result<Vec<QueryHit>, SearchError> {
        let response = self
            .client
            .post(self.url(&format!("indexes/{}/docs/search", self.index_name)))
            .header("api-key", &self.api_key)
            .json(&json!({ "search": text, "top": top_k }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::BackendResponse {
                backend: "search-query".to_string(),
                details: response.status().to_string(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(Self::parse_search_hits(&payload))
    }
}
