mod analyze;
mod attach;
mod file_ref;
mod health;
mod rename;

pub use analyze::analyze_handler;
pub use attach::attach_handler;
pub use file_ref::resolve_file_id;
pub use health::health_handler;
pub use rename::{auto_rename_handler, rename_handler};

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::application::ports::{DriveStoreError, RecordStoreError};
use crate::application::services::AnalysisError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(super) fn analysis_error_response(error: &AnalysisError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match error {
        AnalysisError::Drive(DriveStoreError::NotFound(_))
        | AnalysisError::Records(RecordStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        AnalysisError::Drive(DriveStoreError::UnsupportedSource(_)) => {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        }
        AnalysisError::MissingRecordField(_) => StatusCode::BAD_REQUEST,
        AnalysisError::Drive(_) | AnalysisError::Records(_) | AnalysisError::Extraction(_) => {
            StatusCode::BAD_GATEWAY
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}
