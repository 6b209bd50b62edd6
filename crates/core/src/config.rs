use crate::error::ConfigError;
use url::Url;

pub const CONTAINER_NAME: &str = "documents";
pub const INDEX_NAME: &str = "rag-index";

pub const STORAGE_CONNECTION_VAR: &str = "RAG_STORAGE_CONNECTION_STRING";
pub const SEARCH_ENDPOINT_VAR: &str = "RAG_SEARCH_ENDPOINT";
pub const SEARCH_KEY_VAR: &str = "RAG_SEARCH_KEY";

/// Parsed storage connection string of `;`-separated `Key=Value` pairs.
/// Recognized keys (case-insensitive): `Endpoint`, `Key`.
#[derive(Debug, Clone)]
pub struct StorageConnection {
    pub endpoint: Url,
    pub key: String,
}

impl StorageConnection {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut endpoint = None;
        let mut key = None;

        for pair in raw.split(';').filter(|pair| !pair.trim().is_empty()) {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                ConfigError::InvalidConnectionString(format!("segment has no '=': {pair}"))
            })?;

            match name.trim().to_ascii_lowercase().as_str() {
                "endpoint" => endpoint = Some(value.trim().to_string()),
                "key" => key = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let endpoint = endpoint.filter(|value| !value.is_empty()).ok_or_else(|| {
            ConfigError::InvalidConnectionString("missing Endpoint segment".to_string())
        })?;
        let key = key.filter(|value| !value.is_empty()).ok_or_else(|| {
            ConfigError::InvalidConnectionString("missing Key segment".to_string())
        })?;

        Ok(Self {
            endpoint: Url::parse(&endpoint)?,
            key,
        })
    }
}

/// Process-wide configuration, built once at startup and passed by
/// reference to every component. Construction fails fast on any
/// missing or malformed setting.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub storage: StorageConnection,
    pub search_endpoint: Url,
    pub search_key: String,
    pub container: String,
    pub index_name: String,
}

impl PipelineConfig {
    pub fn from_parts(
        storage_connection: &str,
        search_endpoint: &str,
        search_key: &str,
    ) -> Result<Self, ConfigError> {
        if search_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting(SEARCH_KEY_VAR));
        }

        Ok(Self {
            storage: StorageConnection::parse(storage_connection)?,
            search_endpoint: Url::parse(search_endpoint)?,
            search_key: search_key.to_string(),
            container: CONTAINER_NAME.to_string(),
            index_name: INDEX_NAME.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let storage = require_var(STORAGE_CONNECTION_VAR)?;
        let endpoint = require_var(SEARCH_ENDPOINT_VAR)?;
        let key = require_var(SEARCH_KEY_VAR)?;
        Self::from_parts(&storage, &endpoint, &key)
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingSetting(name))
}

#[cfg(test)]
mod tests {
    use super::{PipelineConfig, StorageConnection};

    #[test]
    fn connection_string_parses_endpoint_and_key() {
        let parsed =
            StorageConnection::parse("Endpoint=https://blobs.example.com;Key=secret").unwrap();
        assert_eq!(parsed.endpoint.as_str(), "https://blobs.example.com/");
        assert_eq!(parsed.key, "secret");
    }

    #[test]
    fn connection_string_keys_are_case_insensitive() {
        let parsed =
            StorageConnection::parse("endpoint=https://blobs.example.com;KEY=secret").unwrap();
        assert_eq!(parsed.key, "secret");
    }

    #[test]
    fn connection_string_without_key_is_rejected() {
        let result = StorageConnection::parse("Endpoint=https://blobs.example.com");
        assert!(result.is_err());
    }

    #[test]
    fn config_rejects_blank_search_key() {
        let result = PipelineConfig::from_parts(
            "Endpoint=https://blobs.example.com;Key=secret",
            "https://search.example.com",
            "  ",
        );
        assert!(result.is_err());
    }

    #[test]
    fn config_uses_fixed_container_and_index_names() {
        let config = PipelineConfig::from_parts(
            "Endpoint=https://blobs.example.com;Key=secret",
            "https://search.example.com",
            "search-key",
        )
        .unwrap();
        assert_eq!(config.container, "documents");
        assert_eq!(config.index_name, "rag-index");
    }
}
