pub mod chunking;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod extractor;
pub mod gateway;
pub mod index;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod stores;
pub mod traits;

pub use chunking::{sanitize_document_key, split_overlapping, ChunkingConfig, Segment};
pub use config::{PipelineConfig, StorageConnection, CONTAINER_NAME, INDEX_NAME};
pub use embeddings::{CharacterNgramEmbedder, Embedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{
    ConfigError, EmbeddingError, GatewayError, IngestError, SearchError, StorageError,
};
pub use extractor::{extract_page_texts, LopdfExtractor, PageText, PdfExtractor};
pub use gateway::{discover_pdf_files, UploadGateway, UploadReceipt};
pub use index::{ensure_index, EnsureOutcome, IndexSchema};
pub use models::{
    DocumentStatus, IngestOutcome, IngestionOptions, IngestionReport, QueryHit, SearchDocument,
};
pub use pipeline::IngestionPipeline;
pub use query::QueryService;
pub use stores::{BlobHttpStore, SearchServiceClient};
pub use traits::{CreateOutcome, DocumentIndex, IndexAdmin, ObjectStore};
