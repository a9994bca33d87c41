use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::ports::{DriveStore, DriveStoreError, StoredFile};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const WORKSPACE_MIME_PREFIX: &str = "application/vnd.google-apps";
const PDF_MIME: &str = "application/pdf";

/// Drive v3 adapter: metadata lookup, media download, workspace export,
/// rename. Workspace documents, spreadsheets, and presentations are
/// exported as PDF under a `.pdf` name; other workspace kinds have no
/// binary representation and are rejected.
pub struct GoogleDriveAdapter {
    client: Client,
    base_url: String,
    access_token: String,
}

impl GoogleDriveAdapter {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    async fn metadata(&self, file_id: &str) -> Result<FileMetadata, DriveStoreError> {
        let url = format!(
            "{}/files/{}?fields=name,mimeType",
            self.base_url, file_id
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| DriveStoreError::Transport(e.to_string()))?;

        let response = check_status(response, file_id).await?;
        response
            .json()
            .await
            .map_err(|e| DriveStoreError::Transport(format!("metadata parse failed: {e}")))
    }

    async fn download(&self, url: &str, file_id: &str) -> Result<Vec<u8>, DriveStoreError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| DriveStoreError::Transport(e.to_string()))?;

        let response = check_status(response, file_id).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DriveStoreError::Transport(format!("download failed: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl DriveStore for GoogleDriveAdapter {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, file_id: &str) -> Result<StoredFile, DriveStoreError> {
        let metadata = self.metadata(file_id).await?;

        if metadata.mime_type.starts_with(WORKSPACE_MIME_PREFIX) {
            let exported_name = workspace_export_name(&metadata.name, &metadata.mime_type)
                .ok_or_else(|| {
                    DriveStoreError::UnsupportedSource(format!(
                        "no PDF export for workspace type {}",
                        metadata.mime_type
                    ))
                })?;

            let url = format!(
                "{}/files/{}/export?mimeType={}",
                self.base_url, file_id, PDF_MIME
            );
            let data = self.download(&url, file_id).await?;
            tracing::info!(
                file_name = %exported_name,
                bytes = data.len(),
                "workspace file exported as PDF"
            );
            return Ok(StoredFile {
                name: exported_name,
                mime_type: PDF_MIME.to_string(),
                data,
            });
        }

        let url = format!("{}/files/{}?alt=media", self.base_url, file_id);
        let data = self.download(&url, file_id).await?;
        tracing::info!(file_name = %metadata.name, bytes = data.len(), "file downloaded");
        Ok(StoredFile {
            name: metadata.name,
            mime_type: metadata.mime_type,
            data,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn rename(&self, file_id: &str, new_name: &str) -> Result<String, DriveStoreError> {
        let url = format!("{}/files/{}", self.base_url, file_id);
        let body = serde_json::json!({ "name": new_name });

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DriveStoreError::Transport(e.to_string()))?;

        let response = check_status(response, file_id).await?;
        let updated: FileMetadata = response
            .json()
            .await
            .map_err(|e| DriveStoreError::Transport(format!("rename response parse failed: {e}")))?;

        Ok(updated.name)
    }
}

async fn check_status(
    response: reqwest::Response,
    file_id: &str,
) -> Result<reqwest::Response, DriveStoreError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(DriveStoreError::NotFound(file_id.to_string())),
        status => {
            let message = response.text().await.unwrap_or_default();
            Err(DriveStoreError::Service {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Maps a workspace file name onto its exported `.pdf` counterpart.
/// Returns `None` for workspace kinds without a PDF export.
fn workspace_export_name(name: &str, mime_type: &str) -> Option<String> {
    let source_extension = if mime_type.contains("document") {
        ".gdoc"
    } else if mime_type.contains("spreadsheet") {
        ".gsheet"
    } else if mime_type.contains("presentation") {
        ".gslides"
    } else {
        return None;
    };

    if let Some(stem) = name.strip_suffix(source_extension) {
        Some(format!("{stem}.pdf"))
    } else {
        Some(format!("{name}.pdf"))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
}
