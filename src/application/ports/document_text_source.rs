use async_trait::async_trait;

/// Provider of a document's native text layer, page by page. Yields one
/// entry per page (blank pages included) or fails with a parse error for
/// corrupt or encrypted sources.
#[async_trait]
pub trait DocumentTextSource: Send + Sync {
    async fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, DocumentTextError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentTextError {
    #[error("document parse failed: {0}")]
    Parse(String),
}
