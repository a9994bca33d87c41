mod extraction;
mod source_document;

pub use extraction::{ExtractionError, ExtractionOutcome, ExtractionResult, ExtractionStrategy};
pub use source_document::{SourceDocument, SourceKind};
