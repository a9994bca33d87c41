mod analysis_service;
mod extraction_service;

pub use analysis_service::{
    AnalysisError, AnalysisReport, AnalysisService, RecordSchema, RenameOutcome,
};
pub use extraction_service::ExtractionService;
