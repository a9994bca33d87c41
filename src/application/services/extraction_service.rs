use std::sync::Arc;

use crate::application::ports::{DocumentTextSource, TextRepair, VisionAnalysis};
use crate::domain::{ExtractionError, ExtractionResult, ExtractionStrategy, SourceDocument, SourceKind};

/// Strategies past the OCR stages summarize at most this many entities.
const MAX_SUMMARY_ITEMS: usize = 5;

/// Runs the content-extraction cascade: native text layer, document OCR,
/// generic OCR, object localization, label detection, strictly in that
/// order. Strategies are priced cheapest-first and the first usable
/// output wins, so later stages are never invoked once one succeeds.
pub struct ExtractionService<D, V>
where
    D: DocumentTextSource,
    V: VisionAnalysis,
{
    document_text: Arc<D>,
    vision: Arc<V>,
    repair: Arc<dyn TextRepair>,
}

impl<D, V> ExtractionService<D, V>
where
    D: DocumentTextSource,
    V: VisionAnalysis,
{
    pub fn new(document_text: Arc<D>, vision: Arc<V>, repair: Arc<dyn TextRepair>) -> Self {
        Self {
            document_text,
            vision,
            repair,
        }
    }

    /// Total over the declared error channel: every stage failure short of
    /// the final one is absorbed and the cascade moves on. Deterministic
    /// given identical bytes and identical provider responses.
    #[tracing::instrument(
        skip(self, data),
        fields(declared_name = %document.declared_name, bytes = data.len())
    )]
    pub async fn extract(&self, data: &[u8], document: &SourceDocument) -> ExtractionResult {
        if document.kind == SourceKind::Document {
            if let Some(text) = self.native_page_text(data).await {
                tracing::info!(chars = text.len(), "native text layer extraction complete");
                return self.finish_stage(text, ExtractionStrategy::NativeText);
            }
            tracing::info!("no usable native text layer, falling back to visual analysis");
        }

        match self.vision.detect_document_text(data).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                let text = text.trim().to_string();
                tracing::info!(chars = text.len(), "document text detection complete");
                return self.finish_stage(text, ExtractionStrategy::DocumentOcr);
            }
            Ok(_) => tracing::info!("document text detection found no text"),
            Err(error) => tracing::warn!(%error, "document text detection failed"),
        }

        match self.vision.detect_text(data).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                let text = text.trim().to_string();
                tracing::info!(chars = text.len(), "generic text detection complete");
                return self.finish_stage(text, ExtractionStrategy::GenericOcr);
            }
            Ok(_) => tracing::info!("generic text detection found no text"),
            Err(error) => tracing::warn!(%error, "generic text detection failed"),
        }

        match self.vision.localize_objects(data).await {
            Ok(objects) if !objects.is_empty() => {
                let names: Vec<&str> = objects
                    .iter()
                    .take(MAX_SUMMARY_ITEMS)
                    .map(|object| object.name.as_str())
                    .collect();
                tracing::info!(?names, "object localization complete");
                return self.finish_stage(
                    format!("Objects detected: {}", names.join(", ")),
                    ExtractionStrategy::ObjectDetection,
                );
            }
            Ok(_) => tracing::info!("object localization found nothing"),
            Err(error) => tracing::warn!(%error, "object localization failed"),
        }

        // Final stage: a provider failure here leaves "nothing found"
        // unprovable, so it surfaces instead of falling through.
        match self.vision.detect_labels(data).await {
            Ok(labels) if !labels.is_empty() => {
                let descriptions: Vec<&str> = labels
                    .iter()
                    .take(MAX_SUMMARY_ITEMS)
                    .map(|label| label.description.as_str())
                    .collect();
                tracing::info!(?descriptions, "label detection complete");
                self.finish_stage(
                    format!("Image contains: {}", descriptions.join(", ")),
                    ExtractionStrategy::LabelDetection,
                )
            }
            Ok(_) => {
                tracing::warn!(
                    declared_name = %document.declared_name,
                    "all extraction strategies produced no content"
                );
                ExtractionResult::exhausted(&document.declared_name)
            }
            Err(error) => {
                tracing::error!(%error, "label detection failed with no remaining fallback");
                ExtractionResult::provider_failure(ExtractionError::Provider(error.to_string()))
            }
        }
    }

    /// Seals a successful stage. Directional repair applies only to
    /// OCR-derived text; synthesized object/label summaries pass through
    /// untouched.
    fn finish_stage(&self, text: String, strategy: ExtractionStrategy) -> ExtractionResult {
        let text = if strategy.carries_ocr_text() {
            self.repair.repair(&text)
        } else {
            text
        };
        ExtractionResult::extracted(text, strategy)
    }

    /// Native text-layer stage. Blank pages are dropped, the rest joined
    /// with a newline. Parse failures map to absent rather than
    /// propagating: an unreadable text layer just means the visual
    /// strategies take over.
    async fn native_page_text(&self, data: &[u8]) -> Option<String> {
        let pages = match self.document_text.page_texts(data).await {
            Ok(pages) => pages,
            Err(error) => {
                tracing::warn!(%error, "native text layer unreadable");
                return None;
            }
        };

        let joined = pages
            .iter()
            .filter(|page| !page.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
