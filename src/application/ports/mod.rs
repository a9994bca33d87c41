mod document_text_source;
mod drive_store;
mod record_store;
mod text_repair;
mod vision_analysis;

pub use document_text_source::{DocumentTextError, DocumentTextSource};
pub use drive_store::{DriveStore, DriveStoreError, StoredFile};
pub use record_store::{RecordFields, RecordStore, RecordStoreError};
pub use text_repair::TextRepair;
pub use vision_analysis::{DetectedLabel, DetectedObject, VisionAnalysis, VisionAnalysisError};
