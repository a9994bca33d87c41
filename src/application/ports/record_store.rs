use async_trait::async_trait;

/// A record's field map. Field names are configuration, not code, so the
/// map stays schemaless.
pub type RecordFields = serde_json::Map<String, serde_json::Value>;

/// Spreadsheet-like record store the extraction results are written into.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_fields(&self, record_id: &str) -> Result<RecordFields, RecordStoreError>;

    async fn update_field(
        &self,
        record_id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), RecordStoreError>;

    async fn attach_file(
        &self,
        record_id: &str,
        field: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), RecordStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("transfer failed: {0}")]
    Transport(String),
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },
}
