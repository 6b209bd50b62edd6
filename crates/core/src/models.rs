use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One indexed unit of text: the projection of a chunk onto the search
/// index schema. Immutable once built; `id` is deterministic per
/// (source file, ordinal) so re-ingestion overwrites 1:1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: String,
    pub content: String,
    pub source: String,
    pub page: u32,
    pub vector: Vec<f32>,
}

/// Ranked result row returned by the query surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryHit {
    pub content: String,
    pub source: String,
    pub page: u32,
    pub score: f64,
}

/// Per-document outcome of a batch upload, as reported by the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub key: String,
    pub succeeded: bool,
    pub error: Option<String>,
}

/// Chunking and vector policy for an ingestion run.
#[derive(Debug, Clone, Copy)]
pub struct IngestionOptions {
    pub chunk_max_chars: usize,
    pub chunk_overlap_chars: usize,
    pub vector_dimensions: usize,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            chunk_max_chars: 500,
            chunk_overlap_chars: 50,
            vector_dimensions: crate::embeddings::DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

/// Summary of a completed ingestion run for one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionReport {
    pub object_name: String,
    pub checksum: String,
    pub page_count: usize,
    pub chunk_count: usize,
    pub ingested_at: DateTime<Utc>,
}

/// What the pipeline did with a storage event.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// The object is not a PDF; nothing was written.
    Skipped { reason: String },
    Indexed(IngestionReport),
}
