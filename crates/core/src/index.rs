use crate::error::SearchError;
use crate::traits::{CreateOutcome, IndexAdmin};
use tracing::info;

pub const HNSW_ALGORITHM_NAME: &str = "hnsw-default";
pub const VECTOR_PROFILE_NAME: &str = "vector-default";

/// Declarative schema for the search index: key `id`, searchable
/// `content`, filterable `source`, numeric `page`, and one vector
/// field with a fixed dimensionality and an HNSW profile. Created
/// lazily once and never mutated afterward.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    pub name: String,
    pub vector_dimensions: usize,
}

impl IndexSchema {
    pub fn new(name: impl Into<String>, vector_dimensions: usize) -> Self {
        Self {
            name: name.into(),
            vector_dimensions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    Existed,
}

/// Creates the index if it is absent. Lists names first so the warm
/// path is a cheap no-op; a create that loses a cold-start race and
/// comes back as already-existing still counts as success.
pub async fn ensure_index<A: IndexAdmin + Sync>(
    admin: &A,
    schema: &IndexSchema,
) -> Result<EnsureOutcome, SearchError> {
    let existing = admin.list_index_names().await?;
    if existing.iter().any(|name| name == &schema.name) {
        return Ok(EnsureOutcome::Existed);
    }

    match admin.create_index(schema).await? {
        CreateOutcome::Created => {
            info!(index = %schema.name, dimensions = schema.vector_dimensions, "created search index");
            Ok(EnsureOutcome::Created)
        }
        CreateOutcome::AlreadyExists => Ok(EnsureOutcome::Existed),
    }
}
