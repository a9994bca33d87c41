/// Resolves the drive file id from a request that carries either the id
/// itself or a sharing URL. Sharing URLs keep the id in the path segment
/// after `/d/`.
pub fn resolve_file_id(file_id: Option<String>, drive_url: Option<String>) -> Option<String> {
    file_id
        .filter(|id| !id.trim().is_empty())
        .or_else(|| drive_url.as_deref().and_then(file_id_from_url))
}

fn file_id_from_url(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/d/")?;
    let id = rest.split('/').next().unwrap_or_default();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
