use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{DocumentTextSource, DriveStore, RecordStore, VisionAnalysis};
use crate::infrastructure::observability::request_id_middleware;
use crate::infrastructure::security::{AuthGuard, require_auth};
use crate::presentation::handlers::{
    analyze_handler, attach_handler, auto_rename_handler, health_handler, rename_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<D, V, S, R>(state: AppState<D, V, S, R>, guard: Arc<AuthGuard>) -> Router
where
    D: DocumentTextSource + 'static,
    V: VisionAnalysis + 'static,
    S: DriveStore + 'static,
    R: RecordStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let protected = Router::new()
        .route("/api/v1/files/analyze", post(analyze_handler::<D, V, S, R>))
        .route("/api/v1/files/attach", post(attach_handler::<D, V, S, R>))
        .route("/api/v1/files/rename", post(rename_handler::<D, V, S, R>))
        .route(
            "/api/v1/files/auto-rename",
            post(auto_rename_handler::<D, V, S, R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_auth));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
