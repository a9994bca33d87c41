use klaksvik::presentation::handlers::resolve_file_id;

#[test]
fn given_explicit_file_id_when_resolving_then_it_wins_over_the_url() {
    let resolved = resolve_file_id(
        Some("file-123".to_string()),
        Some("https://drive.google.com/file/d/other/view".to_string()),
    );

    assert_eq!(resolved.as_deref(), Some("file-123"));
}

#[test]
fn given_sharing_url_when_resolving_then_id_is_the_segment_after_d() {
    let resolved = resolve_file_id(
        None,
        Some("https://drive.google.com/file/d/abc123XYZ/view?usp=sharing".to_string()),
    );

    assert_eq!(resolved.as_deref(), Some("abc123XYZ"));
}

#[test]
fn given_url_without_d_segment_when_resolving_then_nothing_is_resolved() {
    let resolved = resolve_file_id(None, Some("https://drive.google.com/open?id=abc".to_string()));

    assert!(resolved.is_none());
}

#[test]
fn given_blank_file_id_when_resolving_then_url_is_used_instead() {
    let resolved = resolve_file_id(
        Some("   ".to_string()),
        Some("https://drive.google.com/file/d/abc/view".to_string()),
    );

    assert_eq!(resolved.as_deref(), Some("abc"));
}

#[test]
fn given_neither_id_nor_url_when_resolving_then_nothing_is_resolved() {
    assert!(resolve_file_id(None, None).is_none());
}

#[test]
fn given_url_ending_at_the_id_when_resolving_then_id_is_still_found() {
    let resolved = resolve_file_id(None, Some("https://drive.google.com/file/d/tail".to_string()));

    assert_eq!(resolved.as_deref(), Some("tail"));
}
