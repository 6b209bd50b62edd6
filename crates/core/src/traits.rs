use crate::error::{SearchError, StorageError};
use crate::index::IndexSchema;
use crate::models::{DocumentStatus, QueryHit, SearchDocument};
use async_trait::async_trait;

/// Blob-style object storage. Writes overwrite any existing object of
/// the same name; each write is atomic per object.
#[async_trait]
pub trait ObjectStore {
    async fn put_object(
        &self,
        container: &str,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError>;

    async fn get_object(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError>;
}

/// Outcome of an index-creation attempt. A conflict raised by a
/// concurrent creator is `AlreadyExists`, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Index lifecycle management.
#[async_trait]
pub trait IndexAdmin {
    async fn list_index_names(&self) -> Result<Vec<String>, SearchError>;

    async fn create_index(&self, schema: &IndexSchema) -> Result<CreateOutcome, SearchError>;
}

/// Document-level index access: batch upsert and ranked retrieval.
#[async_trait]
pub trait DocumentIndex {
    /// Uploads a batch with upsert semantics. Returns one status per
    /// document; callers decide what a partial failure means.
    async fn upload_documents(
        &self,
        documents: &[SearchDocument],
    ) -> Result<Vec<DocumentStatus>, SearchError>;

    /// Free-text search ranked by the index's own relevance score,
    /// descending. An empty result is a valid outcome.
    async fn search(&self, text: &str, top_k: usize) -> Result<Vec<QueryHit>, SearchError>;
}
