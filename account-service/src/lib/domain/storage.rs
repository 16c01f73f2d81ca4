use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;

/// Error for stored-object operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Object store request failed: {0}")]
    Unavailable(String),
}

/// Stored-object collaborator.
///
/// The service only does ownership bookkeeping over stored objects; the
/// store's own semantics (durability, generations, ACLs) are the
/// collaborator's concern.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Upload an object under the given name.
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Remove an object by name.
    async fn delete(&self, name: &str) -> Result<(), StorageError>;

    /// Public URL for a stored object.
    fn public_url(&self, name: &str) -> String;
}

/// File extension for the image content types the service accepts.
pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/webp" => Some(".webp"),
        _ => None,
    }
}

/// Random alphanumeric object name.
pub fn random_object_name(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("image/jpeg"), Some(".jpg"));
        assert_eq!(extension_for_mime("image/png"), Some(".png"));
        assert_eq!(extension_for_mime("text/plain"), None);
    }

    #[test]
    fn test_random_object_name() {
        let a = random_object_name(30);
        let b = random_object_name(30);

        assert_eq!(a.len(), 30);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
