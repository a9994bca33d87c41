/// The strategy that produced an extraction outcome, in cascade order.
/// Earlier strategies are cheaper; the pipeline stops at the first one
/// yielding usable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    NativeText,
    DocumentOcr,
    GenericOcr,
    ObjectDetection,
    LabelDetection,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NativeText => "native_text",
            Self::DocumentOcr => "document_ocr",
            Self::GenericOcr => "generic_ocr",
            Self::ObjectDetection => "object_detection",
            Self::LabelDetection => "label_detection",
        }
    }

    /// Whether this strategy's output is OCR-derived text that the
    /// directional repair pass applies to. Synthesized summaries are not.
    pub fn carries_ocr_text(&self) -> bool {
        matches!(
            self,
            Self::NativeText | Self::DocumentOcr | Self::GenericOcr
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("visual analysis provider failed: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// A strategy produced usable content.
    Extracted {
        text: String,
        strategy: ExtractionStrategy,
    },
    /// Every strategy legitimately found nothing; carries the fixed
    /// sentinel naming the file. Not an error.
    Exhausted { sentinel: String },
    /// The final strategy's provider itself failed, so "nothing found"
    /// cannot be claimed.
    Failed { error: ExtractionError },
}

/// Immutable per-request outcome record. Constructed through the three
/// factory methods only, so that text is never blank and text/error are
/// never both populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    outcome: ExtractionOutcome,
}

impl ExtractionResult {
    pub fn extracted(text: String, strategy: ExtractionStrategy) -> Self {
        debug_assert!(!text.trim().is_empty(), "blank text must escalate, not extract");
        Self {
            outcome: ExtractionOutcome::Extracted { text, strategy },
        }
    }

    pub fn exhausted(declared_name: &str) -> Self {
        Self {
            outcome: ExtractionOutcome::Exhausted {
                sentinel: format!(
                    "No text or recognizable content found in {declared_name}"
                ),
            },
        }
    }

    pub fn provider_failure(error: ExtractionError) -> Self {
        Self {
            outcome: ExtractionOutcome::Failed { error },
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            ExtractionOutcome::Extracted { text, .. } => Some(text),
            ExtractionOutcome::Exhausted { sentinel } => Some(sentinel),
            ExtractionOutcome::Failed { .. } => None,
        }
    }

    pub fn strategy(&self) -> Option<ExtractionStrategy> {
        match &self.outcome {
            ExtractionOutcome::Extracted { strategy, .. } => Some(*strategy),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ExtractionError> {
        match &self.outcome {
            ExtractionOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.outcome, ExtractionOutcome::Exhausted { .. })
    }

    pub fn into_outcome(self) -> ExtractionOutcome {
        self.outcome
    }
}
