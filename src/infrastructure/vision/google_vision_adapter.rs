use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{
    DetectedLabel, DetectedObject, VisionAnalysis, VisionAnalysisError,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ANNOTATIONS: u32 = 10;

/// Visual-analysis provider over the Cloud Vision `images:annotate` REST
/// surface. One feature per request: the cascade decides which detection
/// to pay for, never this adapter.
pub struct GoogleVisionAdapter {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleVisionAdapter {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn annotate(
        &self,
        content: &[u8],
        feature: &str,
    ) -> Result<AnnotationBody, VisionAnalysisError> {
        let encoded = general_purpose::STANDARD.encode(content);
        let body = serde_json::json!({
            "requests": [{
                "image": { "content": encoded },
                "features": [{ "type": feature, "maxResults": MAX_ANNOTATIONS }],
            }]
        });

        let url = format!("{}/v1/images:annotate?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionAnalysisError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(VisionAnalysisError::Service { status, message });
        }

        let mut parsed: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| VisionAnalysisError::MalformedResponse(e.to_string()))?;

        if parsed.responses.is_empty() {
            return Err(VisionAnalysisError::MalformedResponse(
                "annotate response carried no entries".to_string(),
            ));
        }
        let annotation = parsed.responses.swap_remove(0);

        if let Some(error) = annotation.error {
            return Err(VisionAnalysisError::Service {
                status: error.code,
                message: error.message,
            });
        }

        Ok(annotation)
    }
}

#[async_trait]
impl VisionAnalysis for GoogleVisionAdapter {
    #[tracing::instrument(skip(self, content), fields(bytes = content.len()))]
    async fn detect_document_text(
        &self,
        content: &[u8],
    ) -> Result<Option<String>, VisionAnalysisError> {
        let annotation = self.annotate(content, "DOCUMENT_TEXT_DETECTION").await?;
        Ok(annotation.full_text_annotation.map(|full| full.text))
    }

    #[tracing::instrument(skip(self, content), fields(bytes = content.len()))]
    async fn detect_text(&self, content: &[u8]) -> Result<Option<String>, VisionAnalysisError> {
        let annotation = self.annotate(content, "TEXT_DETECTION").await?;
        // The first annotation spans the whole image; the rest repeat it
        // word by word.
        Ok(annotation
            .text_annotations
            .into_iter()
            .next()
            .map(|text| text.description))
    }

    #[tracing::instrument(skip(self, content), fields(bytes = content.len()))]
    async fn localize_objects(
        &self,
        content: &[u8],
    ) -> Result<Vec<DetectedObject>, VisionAnalysisError> {
        let annotation = self.annotate(content, "OBJECT_LOCALIZATION").await?;
        Ok(annotation
            .localized_object_annotations
            .into_iter()
            .map(|object| DetectedObject {
                name: object.name,
                score: object.score,
            })
            .collect())
    }

    #[tracing::instrument(skip(self, content), fields(bytes = content.len()))]
    async fn detect_labels(
        &self,
        content: &[u8],
    ) -> Result<Vec<DetectedLabel>, VisionAnalysisError> {
        let annotation = self.annotate(content, "LABEL_DETECTION").await?;
        Ok(annotation
            .label_annotations
            .into_iter()
            .map(|label| DetectedLabel {
                description: label.description,
                score: label.score,
            })
            .collect())
    }
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotationBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotationBody {
    #[serde(default)]
    full_text_annotation: Option<FullTextAnnotation>,
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    #[serde(default)]
    localized_object_annotations: Vec<ObjectAnnotation>,
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    #[serde(default)]
    error: Option<AnnotationError>,
}

#[derive(Deserialize)]
struct FullTextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct ObjectAnnotation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    score: f32,
}

#[derive(Deserialize)]
struct LabelAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f32,
}

#[derive(Deserialize)]
struct AnnotationError {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}
