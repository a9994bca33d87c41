mod auth_middleware;
mod bearer_token;
mod webhook_signature;

pub use auth_middleware::{AuthGuard, require_auth};
pub use bearer_token::bearer_header_matches;
pub use webhook_signature::{SIGNATURE_HEADER, signature_matches};
