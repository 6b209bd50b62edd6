use crate::error::SearchError;
use crate::models::QueryHit;
use crate::traits::DocumentIndex;

/// Query-side surface: one fresh round trip per call, no caching.
/// An empty hit list is a normal outcome ("no matching content");
/// only transport/auth problems come back as errors.
pub struct QueryService<I: DocumentIndex> {
    index: I,
}

impl<I: DocumentIndex + Sync> QueryService<I> {
    pub fn new(index: I) -> Self {
        Self { index }
    }

    pub async fn search(&self, text: &str, top_k: usize) -> Result<Vec<QueryHit>, SearchError> {
        if text.trim().is_empty() {
            return Err(SearchError::Request("query is empty".to_string()));
        }

        self.index.search(text, top_k).await
    }
}

#[cfg(test)]
mod tests {
    use super::QueryService;
    use crate::error::SearchError;
    use crate::models::{DocumentStatus, QueryHit, SearchDocument};
    use crate::traits::DocumentIndex;
    use async_trait::async_trait;

    struct FakeDocumentIndex {
        hits: Result<Vec<QueryHit>, ()>,
    }

    #[async_trait]
    impl DocumentIndex for FakeDocumentIndex {
        async fn upload_documents(
            &self,
            _documents: &[SearchDocument],
        ) -> Result<Vec<DocumentStatus>, SearchError> {
            Ok(Vec::new())
        }

        async fn search(&self, _text: &str, _top_k: usize) -> Result<Vec<QueryHit>, SearchError> {
            match &self.hits {
                Ok(hits) => Ok(hits.clone()),
                Err(()) => Err(SearchError::Request("backend unreachable".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn empty_index_returns_an_empty_list_not_an_error() {
        let service = QueryService::new(FakeDocumentIndex { hits: Ok(Vec::new()) });
        let hits = service.search("anything", 3).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn backend_failure_is_distinct_from_no_results() {
        let service = QueryService::new(FakeDocumentIndex { hits: Err(()) });
        let result = service.search("anything", 3).await;
        assert!(matches!(result, Err(SearchError::Request(_))));
    }

    #[tokio::test]
    async fn blank_query_text_is_rejected() {
        let service = QueryService::new(FakeDocumentIndex { hits: Ok(Vec::new()) });
        let result = service.search("   ", 3).await;
        assert!(matches!(result, Err(SearchError::Request(_))));
    }

    #[tokio::test]
    async fn hits_pass_through_in_backend_order() {
        let hits = vec![
            QueryHit {
                content: "TraceMonkey is a trace-based JIT.".to_string(),
                source: "doc.pdf".to_string(),
                page: 1,
                score: 2.0,
            },
            QueryHit {
                content: "unrelated".to_string(),
                source: "other.pdf".to_string(),
                page: 4,
                score: 1.0,
            },
        ];
        let service = QueryService::new(FakeDocumentIndex { hits: Ok(hits) });

        let result = service.search("TraceMonkey", 3).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].source, "doc.pdf");
        assert!(result[0].score >= result[1].score);
    }
}
