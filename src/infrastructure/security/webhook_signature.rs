use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

type HmacSha256 = Hmac<Sha256>;

/// Checks an HMAC-SHA256 signature of the raw request body against the
/// `sha256=<hex>` header value. Verification goes through the MAC's own
/// tag comparison, which does not short-circuit on the first mismatching
/// byte.
pub fn signature_matches(secret: &str, body: &[u8], header_value: &str) -> bool {
    let hex_signature = header_value.strip_prefix("sha256=").unwrap_or(header_value);
    let Ok(signature) = hex::decode(hex_signature) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}
