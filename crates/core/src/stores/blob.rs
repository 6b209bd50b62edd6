use crate::config::StorageConnection;
use crate::error::StorageError;
use crate::traits::ObjectStore;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Object storage client speaking a minimal blob REST dialect:
/// `PUT {endpoint}/{container}/{name}` writes (overwriting), `GET`
/// reads. Auth is the connection string's bearer key.
pub struct BlobHttpStore {
    client: Client,
    endpoint: String,
    key: String,
}

impl BlobHttpStore {
    pub fn new(connection: &StorageConnection) -> Self {
        Self {
            client: Client::new(),
            endpoint: connection.endpoint.as_str().trim_end_matches('/').to_string(),
            key: connection.key.clone(),
        }
    }

    fn object_url(&self, container: &str, name: &str) -> String {
        format!("{}/{}/{}", self.endpoint, container, name)
    }
}

#[async_trait]
impl ObjectStore for BlobHttpStore {
    async fn put_object(
        &self,
        container: &str,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        let response = self
            .client
            .put(self.object_url(container, name))
            .bearer_auth(&self.key)
            .header("content-type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Backend {
                operation: format!("put {container}/{name}"),
                status: response.status().to_string(),
            });
        }

        Ok(())
    }

    async fn get_object(&self, container: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get(self.object_url(container, name))
            .bearer_auth(&self.key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound {
                container: container.to_string(),
                name: name.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(StorageError::Backend {
                operation: format!("get {container}/{name}"),
                status: response.status().to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
