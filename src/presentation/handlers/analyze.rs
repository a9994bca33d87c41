use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentTextSource, DriveStore, RecordStore, VisionAnalysis};
use crate::presentation::state::AppState;

use super::{ErrorResponse, analysis_error_response, resolve_file_id};

const PREVIEW_CHARS: usize = 100;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub record_id: String,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub drive_url: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub message: String,
    pub file_name: String,
    pub file_id: String,
    pub strategy: Option<&'static str>,
    pub extracted_text_length: usize,
    pub text_preview: String,
}

#[tracing::instrument(skip(state, request), fields(record_id = %request.record_id))]
pub async fn analyze_handler<D, V, S, R>(
    State(state): State<AppState<D, V, S, R>>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse
where
    D: DocumentTextSource + 'static,
    V: VisionAnalysis + 'static,
    S: DriveStore + 'static,
    R: RecordStore + 'static,
{
    let Some(file_id) = resolve_file_id(request.file_id, request.drive_url) else {
        tracing::warn!("analyze request without resolvable file id");
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
        .analyze_to_record(&file_id, &request.record_id)
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                success: true,
                message: "File processed and record updated".to_string(),
                file_name: report.file_name,
                file_id,
                strategy: report.strategy.map(|strategy| strategy.as_str()),
                extracted_text_length: report.text.len(),
                text_preview: preview(&report.text),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, "analysis failed");
            analysis_error_response(&error).into_response()
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{truncated}...")
    }
}
