use async_trait::async_trait;

/// Visual-analysis provider exposing four independent detections. Each
/// call returns an empty outcome rather than an error when the service
/// responds but finds nothing.
#[async_trait]
pub trait VisionAnalysis: Send + Sync {
    /// Structured-document OCR: the full multi-block text annotation.
    async fn detect_document_text(
        &self,
        content: &[u8],
    ) -> Result<Option<String>, VisionAnalysisError>;

    /// Generic OCR: the best-guess full-image text annotation.
    async fn detect_text(&self, content: &[u8]) -> Result<Option<String>, VisionAnalysisError>;

    /// Localized objects, ordered by the provider's confidence.
    async fn localize_objects(
        &self,
        content: &[u8],
    ) -> Result<Vec<DetectedObject>, VisionAnalysisError>;

    /// Whole-image labels, ordered by the provider's confidence.
    async fn detect_labels(
        &self,
        content: &[u8],
    ) -> Result<Vec<DetectedLabel>, VisionAnalysisError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    pub name: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLabel {
    pub description: String,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum VisionAnalysisError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
