use crate::chunking::{split_overlapping, sanitize_document_key, ChunkingConfig, Segment};
use crate::embeddings::Embedder;
use crate::error::IngestError;
use crate::extractor::{LopdfExtractor, PageText, PdfExtractor};
use crate::gateway::is_pdf_name;
use crate::index::{ensure_index, IndexSchema};
use crate::models::{IngestOutcome, IngestionOptions, IngestionReport, SearchDocument};
use crate::traits::{DocumentIndex, IndexAdmin};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Trigger-side orchestration: one invocation per object-creation
/// event. Invocations are independent (own scratch file, own batch of
/// deterministic ids), so concurrent runs for different files need no
/// coordination, and at-least-once delivery is safe because re-running
/// the same object upserts the same ids.
pub struct IngestionPipeline<X, E, P = LopdfExtractor> {
    index: X,
    embedder: E,
    extractor: P,
    schema: IndexSchema,
    options: IngestionOptions,
}

impl<X, E> IngestionPipeline<X, E, LopdfExtractor>
where
    X: IndexAdmin + DocumentIndex + Sync,
    E: Embedder + Sync,
{
    pub fn new(index: X, embedder: E, index_name: impl Into<String>, options: IngestionOptions) -> Self {
        Self::with_extractor(index, embedder, LopdfExtractor, index_name, options)
    }
}

impl<X, E, P> IngestionPipeline<X, E, P>
where
    X: IndexAdmin + DocumentIndex + Sync,
    E: Embedder + Sync,
    P: PdfExtractor,
{
    pub fn with_extractor(
        index: X,
        embedder: E,
        extractor: P,
        index_name: impl Into<String>,
        options: IngestionOptions,
    ) -> Self {
        Self {
            index,
            embedder,
            extractor,
            schema: IndexSchema::new(index_name, options.vector_dimensions),
            options,
        }
    }

    /// Processes one storage event. Non-PDF objects are skipped
    /// without error; every other failure aborts the whole file with
    /// nothing written (the index batch is all-or-nothing from the
    /// operator's point of view: on any rejection the file is failed
    /// and should be re-uploaded).
    pub async fn ingest_object(
        &self,
        object_name: &str,
        bytes: &[u8],
    ) -> Result<IngestOutcome, IngestError> {
        if !is_pdf_name(object_name) {
            info!(object = %object_name, "object is not a pdf, skipping");
            return Ok(IngestOutcome::Skipped {
                reason: "not a pdf".to_string(),
            });
        }

        info!(object = %object_name, bytes = bytes.len(), "ingesting object");
        let checksum = digest_bytes(bytes);

        // Scratch file is removed on drop, on every exit path.
        let mut scratch = NamedTempFile::new()?;
        scratch.write_all(bytes)?;
        scratch.flush()?;

        let pages = self.extractor.extract_pages(scratch.path())?;
        let page_count = pages.len();

        let (text, page_offsets) = concatenate_pages(&pages);
        let segments = split_overlapping(&text, ChunkingConfig::from(self.options))?;

        let documents = self.build_documents(object_name, &segments, &page_offsets)?;

        ensure_index(&self.index, &self.schema).await?;

        let statuses = self.index.upload_documents(&documents).await?;
        let failed: Vec<_> = statuses.iter().filter(|status| !status.succeeded).collect();
        if !failed.is_empty() {
            for status in &failed {
                warn!(
                    object = %object_name,
                    id = %status.key,
                    error = status.error.as_deref().unwrap_or("unspecified"),
                    "index rejected document"
                );
            }
            return Err(IngestError::IndexRejected {
                object: object_name.to_string(),
                failed: failed.len(),
                total: documents.len(),
            });
        }

        let report = IngestionReport {
            object_name: object_name.to_string(),
            checksum,
            page_count,
            chunk_count: documents.len(),
            ingested_at: Utc::now(),
        };
        info!(
            object = %object_name,
            pages = report.page_count,
            chunks = report.chunk_count,
            "object indexed"
        );

        Ok(IngestOutcome::Indexed(report))
    }

    fn build_documents(
        &self,
        object_name: &str,
        segments: &[Segment],
        page_offsets: &[(usize, u32)],
    ) -> Result<Vec<SearchDocument>, IngestError> {
        let base_key = sanitize_document_key(file_name_of(object_name));
        let mut documents = Vec::with_capacity(segments.len());

        for (ordinal, segment) in segments.iter().enumerate() {
            let vector =
                self.embedder
                    .embed(&segment.text)
                    .map_err(|source| IngestError::Embedding {
                        object: object_name.to_string(),
                        segment: ordinal,
                        source,
                    })?;

            if vector.len() != self.schema.vector_dimensions {
                return Err(IngestError::DimensionMismatch {
                    expected: self.schema.vector_dimensions,
                    actual: vector.len(),
                });
            }

            documents.push(SearchDocument {
                id: format!("{base_key}-{ordinal}"),
                content: segment.text.clone(),
                source: object_name.to_string(),
                page: page_for_offset(page_offsets, segment.start_offset),
                vector,
            });
        }

        Ok(documents)
    }
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn file_name_of(object_name: &str) -> &str {
    object_name.rsplit('/').next().unwrap_or(object_name)
}

/// Joins page texts into one string, recording each page's character
/// start offset for later attribution.
fn concatenate_pages(pages: &[PageText]) -> (String, Vec<(usize, u32)>) {
    let mut text = String::new();
    let mut offsets = Vec::with_capacity(pages.len());

    for page in pages {
        if !text.is_empty() {
            text.push('\n');
        }
        offsets.push((text.chars().count(), page.number));
        text.push_str(&page.text);
    }

    (text, offsets)
}

/// Page containing the segment's first character. A segment spanning a
/// page break keeps the earlier page; boundary precision is
/// best-effort by design.
fn page_for_offset(page_offsets: &[(usize, u32)], offset: usize) -> u32 {
    page_offsets
        .iter()
        .take_while(|(start, _)| *start <= offset)
        .last()
        .map(|(_, page)| *page)
        .unwrap_or(0)
}
