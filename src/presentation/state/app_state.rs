use std::sync::Arc;

use crate::application::ports::{DocumentTextSource, DriveStore, RecordStore, VisionAnalysis};
use crate::application::services::AnalysisService;

pub struct AppState<D, V, S, R>
where
    D: DocumentTextSource,
    V: VisionAnalysis,
    S: DriveStore,
    R: RecordStore,
{
    pub analysis_service: Arc<AnalysisService<D, V, S, R>>,
}

impl<D, V, S, R> Clone for AppState<D, V, S, R>
where
    D: DocumentTextSource,
    V: VisionAnalysis,
    S: DriveStore,
    R: RecordStore,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
        }
    }
}
