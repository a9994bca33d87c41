use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentTextSource, DriveStore, RecordStore, VisionAnalysis};
use crate::presentation::state::AppState;

use super::{ErrorResponse, analysis_error_response, resolve_file_id};

#[derive(Deserialize)]
pub struct AttachRequest {
    pub record_id: String,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub drive_url: Option<String>,
}

#[derive(Serialize)]
pub struct AttachResponse {
    pub success: bool,
    pub message: String,
    pub file_name: String,
    pub file_id: String,
}

#[tracing::instrument(skip(state, request), fields(record_id = %request.record_id))]
pub async fn attach_handler<D, V, S, R>(
    State(state): State<AppState<D, V, S, R>>,
    Json(request): Json<AttachRequest>,
) -> impl IntoResponse
where
    D: DocumentTextSource + 'static,
    V: VisionAnalysis + 'static,
    S: DriveStore + 'static,
    R: RecordStore + 'static,
{
    let Some(file_id) = resolve_file_id(request.file_id, request.drive_url) else {
        tracing::warn!("attach request without resolvable file id");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "file_id or a drive_url containing /d/ is required".to_string(),
            }),
        )
            .into_response();
    };

    match state
        .analysis_service
        .stage_attachment(&file_id, &request.record_id)
        .await
    {
        Ok(file_name) => (
            StatusCode::OK,
            Json(AttachResponse {
                success: true,
                message: "File attached to record".to_string(),
                file_name,
                file_id,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, "attach failed");
            analysis_error_response(&error).into_response()
        }
    }
}
