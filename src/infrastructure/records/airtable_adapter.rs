use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::ports::{RecordFields, RecordStore, RecordStoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Record store over the Airtable REST surface. Attachments travel as
/// base64 data URLs so no staging bucket is involved.
pub struct AirtableAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    base_id: String,
    table_name: String,
}

impl AirtableAdapter {
    pub fn new(base_url: &str, api_key: &str, base_id: &str, table_name: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            base_id: base_id.to_string(),
            table_name: table_name.to_string(),
        }
    }

    fn record_url(&self, record_id: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, self.base_id, self.table_name, record_id
        )
    }

    async fn patch_fields(
        &self,
        record_id: &str,
        fields: serde_json::Value,
    ) -> Result<(), RecordStoreError> {
        let body = serde_json::json!({ "fields": fields });
        let response = self
            .client
            .patch(self.record_url(record_id))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RecordStoreError::Transport(e.to_string()))?;

        check_status(response, record_id).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for AirtableAdapter {
    #[tracing::instrument(skip(self))]
    async fn fetch_fields(&self, record_id: &str) -> Result<RecordFields, RecordStoreError> {
        let response = self
            .client
            .get(self.record_url(record_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| RecordStoreError::Transport(e.to_string()))?;

        let response = check_status(response, record_id).await?;
        let record: RecordResponse = response
            .json()
            .await
            .map_err(|e| RecordStoreError::Transport(format!("record parse failed: {e}")))?;
        Ok(record.fields)
    }

    #[tracing::instrument(skip(self, value), fields(chars = value.len()))]
    async fn update_field(
        &self,
        record_id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), RecordStoreError> {
        self.patch_fields(record_id, serde_json::json!({ field: value }))
            .await
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn attach_file(
        &self,
        record_id: &str,
        field: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), RecordStoreError> {
        let encoded = general_purpose::STANDARD.encode(data);
        let attachment = serde_json::json!([{
            "url": format!("data:application/octet-stream;base64,{encoded}"),
            "filename": filename,
        }]);
        self.patch_fields(record_id, serde_json::json!({ field: attachment }))
            .await
    }
}

async fn check_status(
    response: reqwest::Response,
    record_id: &str,
) -> Result<reqwest::Response, RecordStoreError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(RecordStoreError::NotFound(record_id.to_string())),
        status => {
            let message = response.text().await.unwrap_or_default();
            Err(RecordStoreError::Service {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[derive(Deserialize)]
struct RecordResponse {
    #[serde(default)]
    fields: RecordFields,
}
