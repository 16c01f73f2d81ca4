use async_trait::async_trait;
use reqwest::header;

use crate::config::StorageConfig;
use crate::domain::storage::ObjectStore;
use crate::domain::storage::StorageError;

/// Object-store gateway speaking plain HTTP.
///
/// PUT/DELETE against `gateway_url`, public reads from `public_base_url`.
/// The store behind the gateway is a collaborator; its semantics are not
/// this service's concern.
pub struct HttpObjectStore {
    client: reqwest::Client,
    gateway_url: String,
    public_base_url: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url: config.gateway_url.trim_end_matches('/').to_string(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put(format!("{}/{}", self.gateway_url, name))
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.client
            .delete(format!("{}/{}", self.gateway_url, name))
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base_url, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_base_and_name() {
        let store = HttpObjectStore::new(&StorageConfig {
            gateway_url: "http://gateway:9000/objects/".to_string(),
            public_base_url: "https://cdn.example.com/objects/".to_string(),
        });

        assert_eq!(
            store.public_url("abc123.jpg"),
            "https://cdn.example.com/objects/abc123.jpg"
        );
    }
}
