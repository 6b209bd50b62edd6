use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("invalid storage connection string: {0}")]
    InvalidConnectionString(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("object not found: {container}/{name}")]
    NotFound { container: String, name: String },

    #[error("storage {operation} failed with {status}")]
    Backend { operation: String, status: String },
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("only pdf files are accepted, got: {0}")]
    UnsupportedFile(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
#[error("embedding backend failed: {0}")]
pub struct EmbeddingError(pub String);

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("invalid chunking config: {0}")]
    InvalidChunkConfig(String),

    #[error("embedding failed for {object} segment {segment}: {source}")]
    Embedding {
        object: String,
        segment: usize,
        source: EmbeddingError,
    },

    #[error("vector has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("search service error: {0}")]
    Search(#[from] SearchError),

    #[error("index rejected {failed} of {total} documents for {object}")]
    IndexRejected {
        object: String,
        failed: usize,
        total: usize,
    },
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("search request failed: {0}")]
    Request(String),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
