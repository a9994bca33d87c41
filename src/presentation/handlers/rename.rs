use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentTextSource, DriveStore, RecordStore, VisionAnalysis};
use crate::application::services::RenameOutcome;
use crate::presentation::state::AppState;

use super::{ErrorResponse, analysis_error_response};

#[derive(Deserialize)]
pub struct RenameRequest {
    pub file_id: String,
    pub new_name: String,
}

#[derive(Serialize)]
pub struct RenameResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize)]
pub struct AutoRenameRequest {
    pub record_id: String,
}

#[derive(Serialize)]
pub struct AutoRenameResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

#[tracing::instrument(skip(state, request), fields(file_id = %request.file_id))]
pub async fn rename_handler<D, V, S, R>(
    State(state): State<AppState<D, V, S, R>>,
    Json(request): Json<RenameRequest>,
) -> impl IntoResponse
where
    D: DocumentTextSource + 'static,
    V: VisionAnalysis + 'static,
    S: DriveStore + 'static,
    R: RecordStore + 'static,
{
    if request.new_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "new_name must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    match state
        .analysis_service
        .rename_file(&request.file_id, &request.new_name)
        .await
    {
        Ok(confirmed) => (
            StatusCode::OK,
            Json(RenameResponse {
                success: true,
                message: format!("File renamed to: {confirmed}"),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, "rename failed");
            analysis_error_response(&error).into_response()
        }
    }
}

#[tracing::instrument(skip(state, request), fields(record_id = %request.record_id))]
pub async fn auto_rename_handler<D, V, S, R>(
    State(state): State<AppState<D, V, S, R>>,
    Json(request): Json<AutoRenameRequest>,
) -> impl IntoResponse
where
    D: DocumentTextSource + 'static,
    V: VisionAnalysis + 'static,
    S: DriveStore + 'static,
    R: RecordStore + 'static,
{
    match state.analysis_service.auto_rename(&request.record_id).await {
        Ok(RenameOutcome::Renamed {
            original_name,
            new_name,
        }) => (
            StatusCode::OK,
            Json(AutoRenameResponse {
                success: true,
                message: format!("Auto-renamed to: {new_name}"),
                original_name,
                new_name: Some(new_name),
            }),
        )
            .into_response(),
        Ok(RenameOutcome::NoSuggestion) => (
            StatusCode::OK,
            Json(AutoRenameResponse {
                success: false,
                message: "No suggested name available".to_string(),
                original_name: None,
                new_name: None,
            }),
        )
            .into_response(),
        Ok(RenameOutcome::AlreadyNamed { name }) => (
            StatusCode::OK,
            Json(AutoRenameResponse {
                success: false,
                message: "Suggested name same as original".to_string(),
                original_name: Some(name),
                new_name: None,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, "auto-rename failed");
            analysis_error_response(&error).into_response()
        }
    }
}
