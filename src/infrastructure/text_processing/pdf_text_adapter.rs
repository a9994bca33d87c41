use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::{DocumentTextError, DocumentTextSource};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Native text-layer source backed by lopdf. Parses entirely in memory;
/// page decoding runs on the blocking pool so a hostile document cannot
/// stall the request executor.
#[derive(Default)]
pub struct PdfTextAdapter;

impl PdfTextAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<String>, DocumentTextError> {
        let document = Document::load_mem(data)
            .map_err(|e| DocumentTextError::Parse(format!("failed to parse PDF: {e}")))?;

        let mut pages = Vec::new();
        for page_number in document.get_pages().keys() {
            // A page whose text cannot be decoded contributes a blank
            // entry; the caller decides what blank pages mean.
            let text = document.extract_text(&[*page_number]).unwrap_or_default();
            pages.push(text);
        }

        Ok(pages)
    }
}

#[async_trait]
impl DocumentTextSource for PdfTextAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, DocumentTextError> {
        let data = data.to_vec();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&data)),
        )
        .await
        .map_err(|_| DocumentTextError::Parse("PDF text extraction timed out".to_string()))?
        .map_err(|e| DocumentTextError::Parse(format!("task join error: {e}")))??;

        tracing::debug!(page_count = pages.len(), "page text extraction complete");
        Ok(pages)
    }
}
