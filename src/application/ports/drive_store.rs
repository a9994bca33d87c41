use async_trait::async_trait;

/// Remote file store the webhook payloads point into. Fetch resolves the
/// declared name and content in one round trip; rename returns the name
/// the store confirmed.
#[async_trait]
pub trait DriveStore: Send + Sync {
    async fn fetch(&self, file_id: &str) -> Result<StoredFile, DriveStoreError>;

    async fn rename(&self, file_id: &str, new_name: &str) -> Result<String, DriveStoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum DriveStoreError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("unsupported source file: {0}")]
    UnsupportedSource(String),
    #[error("transfer failed: {0}")]
    Transport(String),
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },
}
