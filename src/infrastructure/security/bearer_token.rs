use sha2::{Digest, Sha256};

/// Checks an `Authorization: Bearer <token>` header against the expected
/// token. Both sides are hashed before comparison so equality cost does
/// not depend on where the raw tokens diverge.
pub fn bearer_header_matches(expected: &str, header_value: Option<&str>) -> bool {
    let Some(header_value) = header_value else {
        return false;
    };
    let Some((scheme, token)) = header_value.split_once(' ') else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return false;
    }

    Sha256::digest(token.trim().as_bytes()) == Sha256::digest(expected.as_bytes())
}
