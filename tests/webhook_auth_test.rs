use hmac::{Hmac, Mac};
use sha2::Sha256;

use klaksvik::infrastructure::security::{bearer_header_matches, signature_matches};

fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[test]
fn given_correctly_signed_body_when_verifying_then_signature_matches() {
    let secret = "shhh";
    let body = br#"{"record_id":"rec123"}"#;
    let header = format!("sha256={}", sign(secret, body));

    assert!(signature_matches(secret, body, &header));
}

#[test]
fn given_signature_without_prefix_when_verifying_then_it_still_matches() {
    let secret = "shhh";
    let body = br#"{"record_id":"rec123"}"#;
    let header = sign(secret, body);

    assert!(signature_matches(secret, body, &header));
}

#[test]
fn given_tampered_body_when_verifying_then_signature_does_not_match() {
    let secret = "shhh";
    let body = br#"{"record_id":"rec123"}"#;
    let header = format!("sha256={}", sign(secret, body));

    assert!(!signature_matches(secret, br#"{"record_id":"rec999"}"#, &header));
}

#[test]
fn given_wrong_secret_when_verifying_then_signature_does_not_match() {
    let body = br#"{"record_id":"rec123"}"#;
    let header = format!("sha256={}", sign("one secret", body));

    assert!(!signature_matches("another secret", body, &header));
}

#[test]
fn given_non_hex_signature_when_verifying_then_it_does_not_match() {
    assert!(!signature_matches("shhh", b"body", "sha256=not-hex-at-all"));
}

#[test]
fn given_matching_bearer_header_when_checking_then_it_is_accepted() {
    assert!(bearer_header_matches("tok-1", Some("Bearer tok-1")));
}

#[test]
fn given_lowercase_scheme_when_checking_then_it_is_accepted() {
    assert!(bearer_header_matches("tok-1", Some("bearer tok-1")));
}

#[test]
fn given_wrong_token_when_checking_then_it_is_rejected() {
    assert!(!bearer_header_matches("tok-1", Some("Bearer tok-2")));
}

#[test]
fn given_missing_header_when_checking_then_it_is_rejected() {
    assert!(!bearer_header_matches("tok-1", None));
}

#[test]
fn given_non_bearer_scheme_when_checking_then_it_is_rejected() {
    assert!(!bearer_header_matches("tok-1", Some("Basic dXNlcjpwdw==")));
}

#[test]
fn given_header_without_scheme_when_checking_then_it_is_rejected() {
    assert!(!bearer_header_matches("tok-1", Some("tok-1")));
}
