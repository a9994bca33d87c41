use std::sync::Arc;

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::bearer_token::bearer_header_matches;
use super::webhook_signature::{SIGNATURE_HEADER, signature_matches};

/// Signature checking buffers the whole body; webhook payloads are small
/// JSON documents, so anything past this is not one of ours.
const MAX_SIGNED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Optional request authorization. Each check is enforced only when its
/// secret is configured, so a bare deployment stays open the way the
/// health endpoint is.
#[derive(Debug, Clone, Default)]
pub struct AuthGuard {
    pub bearer_token: Option<String>,
    pub webhook_secret: Option<String>,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
}

pub async fn require_auth(
    State(guard): State<Arc<AuthGuard>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = &guard.bearer_token {
        let header_value = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if !bearer_header_matches(expected, header_value) {
            tracing::warn!(uri = %request.uri().path(), "bearer token rejected");
            return unauthorized("Unauthorized");
        }
    }

    if let Some(secret) = &guard.webhook_secret {
        let signature = request
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let Some(signature) = signature else {
            tracing::warn!(uri = %request.uri().path(), "webhook signature missing");
            return unauthorized("Invalid signature");
        };

        let (parts, body) = request.into_parts();
        let bytes = match to_bytes(body, MAX_SIGNED_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(%error, "failed to buffer body for signature check");
                return (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(AuthErrorBody {
                        error: "Request body too large to verify".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        if !signature_matches(secret, &bytes, &signature) {
            tracing::warn!(uri = %parts.uri.path(), "webhook signature rejected");
            return unauthorized("Invalid signature");
        }

        let request = Request::from_parts(parts, Body::from(bytes));
        return next.run(request).await;
    }

    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}
