use crate::error::GatewayError;
use crate::traits::ObjectStore;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Confirmation that an object landed in storage. Ingestion runs
/// asynchronously off the storage event; the receipt says nothing
/// about its outcome.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub container: String,
    pub object_name: String,
}

/// Upload-side entry point: validates the file name and streams the
/// bytes into the documents container, overwriting any prior object of
/// the same name.
pub struct UploadGateway<S: ObjectStore> {
    store: S,
    container: String,
}

impl<S: ObjectStore + Sync> UploadGateway<S> {
    pub fn new(store: S, container: impl Into<String>) -> Self {
        Self {
            store,
            container: container.into(),
        }
    }

    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, GatewayError> {
        if !is_pdf_name(file_name) {
            return Err(GatewayError::UnsupportedFile(file_name.to_string()));
        }

        self.store
            .put_object(&self.container, file_name, bytes)
            .await?;

        info!(container = %self.container, object = %file_name, "uploaded, ingestion pending");

        Ok(UploadReceipt {
            container: self.container.clone(),
            object_name: file_name.to_string(),
        })
    }

    pub async fn upload_file(&self, path: &Path) -> Result<UploadReceipt, GatewayError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| GatewayError::UnsupportedFile(path.display().to_string()))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        self.upload(&file_name, bytes).await
    }
}

pub fn is_pdf_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}

/// Recursively finds every PDF under a folder, sorted for stable
/// batch-upload ordering.
pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

#[cfg(test)]
mod tests {
    use super::{discover_pdf_files, is_pdf_name, UploadGateway};
    use crate::error::{GatewayError, StorageError};
    use crate::traits::ObjectStore;
    use async_trait::async_trait;
    use std::fs::{self, File};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<(String, String, usize)>>,
    }

    #[async_trait]
    impl ObjectStore for RecordingStore {
        async fn put_object(
            &self,
            container: &str,
            name: &str,
            bytes: Vec<u8>,
        ) -> Result<(), StorageError> {
            self.writes
                .lock()
                .unwrap()
                .push((container.to_string(), name.to_string(), bytes.len()));
            Ok(())
        }

        async fn get_object(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
            Err(StorageError::NotFound {
                container: container.to_string(),
                name: name.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn pdf_upload_lands_in_the_documents_container() {
        let gateway = UploadGateway::new(RecordingStore::default(), "documents");
        let receipt = gateway.upload("report.PDF", vec![1, 2, 3]).await.unwrap();

        assert_eq!(receipt.container, "documents");
        assert_eq!(receipt.object_name, "report.PDF");

        let writes = gateway.store.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(
            writes[0],
            ("documents".to_string(), "report.PDF".to_string(), 3)
        );
    }

    #[tokio::test]
    async fn non_pdf_upload_is_rejected_before_storage() {
        let gateway = UploadGateway::new(RecordingStore::default(), "documents");
        let result = gateway.upload("notes.txt", vec![1]).await;

        assert!(matches!(result, Err(GatewayError::UnsupportedFile(_))));
        assert!(gateway.store.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn pdf_name_check_is_case_insensitive() {
        assert!(is_pdf_name("a.pdf"));
        assert!(is_pdf_name("a.PDF"));
        assert!(!is_pdf_name("a.pdf.txt"));
        assert!(!is_pdf_name("pdf"));
    }

    #[test]
    fn discover_pdf_files_is_recursive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = dir.path();
        let nested = base.join("nested");
        fs::create_dir(&nested)?;

        File::create(base.join("a.pdf")).and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(nested.join("b.pdf"))
            .and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(base.join("c.txt")).and_then(|mut file| file.write_all(b"not a pdf"))?;

        let files = discover_pdf_files(base);
        assert_eq!(files.len(), 2);
        Ok(())
    }
}
