use std::sync::Arc;

use crate::application::ports::{
    DocumentTextSource, DriveStore, DriveStoreError, RecordStore, RecordStoreError,
    VisionAnalysis,
};
use crate::domain::{ExtractionError, ExtractionOutcome, ExtractionStrategy, SourceDocument};

use super::extraction_service::ExtractionService;

/// Field names of the record table the service writes into. Defaults
/// mirror the base this bridge was built against; all of them are
/// configurable.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub text_field: String,
    pub attachment_field: String,
    pub file_id_field: String,
    pub suggested_name_field: String,
    pub original_name_field: String,
    pub rename_status_field: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub file_name: String,
    pub strategy: Option<ExtractionStrategy>,
    pub text: String,
}

/// Outcome of the suggested-name rename flow. The skip variants are
/// successes from the caller's point of view: nothing was wrong, there
/// was just nothing to do.
#[derive(Debug, Clone, PartialEq)]
pub enum RenameOutcome {
    Renamed {
        original_name: Option<String>,
        new_name: String,
    },
    NoSuggestion,
    AlreadyNamed { name: String },
}

/// Webhook use-cases: fetch a drive file, run it through the extraction
/// cascade, and write outcomes back onto the triggering record.
pub struct AnalysisService<D, V, S, R>
where
    D: DocumentTextSource,
    V: VisionAnalysis,
    S: DriveStore,
    R: RecordStore,
{
    extraction: Arc<ExtractionService<D, V>>,
    drive: Arc<S>,
    records: Arc<R>,
    schema: RecordSchema,
}

impl<D, V, S, R> AnalysisService<D, V, S, R>
where
    D: DocumentTextSource,
    V: VisionAnalysis,
    S: DriveStore,
    R: RecordStore,
{
    pub fn new(
        extraction: Arc<ExtractionService<D, V>>,
        drive: Arc<S>,
        records: Arc<R>,
        schema: RecordSchema,
    ) -> Self {
        Self {
            extraction,
            drive,
            records,
            schema,
        }
    }

    /// Fetch, extract, and write the outcome text into the record's text
    /// field. The exhausted sentinel is written like any other outcome so
    /// downstream automations always see the field populated.
    #[tracing::instrument(skip(self))]
    pub async fn analyze_to_record(
        &self,
        file_id: &str,
        record_id: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        let file = self.drive.fetch(file_id).await?;
        tracing::info!(
            file_name = %file.name,
            bytes = file.data.len(),
            "fetched source file"
        );

        let document = SourceDocument::new(file.name.clone(), file.data.len() as u64);
        let result = self.extraction.extract(&file.data, &document).await;

        match result.into_outcome() {
            ExtractionOutcome::Failed { error } => Err(AnalysisError::Extraction(error)),
            ExtractionOutcome::Extracted { text, strategy } => {
                self.records
                    .update_field(record_id, &self.schema.text_field, &text)
                    .await?;
                tracing::info!(
                    strategy = strategy.as_str(),
                    chars = text.len(),
                    "extraction written to record"
                );
                Ok(AnalysisReport {
                    file_name: file.name,
                    strategy: Some(strategy),
                    text,
                })
            }
            ExtractionOutcome::Exhausted { sentinel } => {
                self.records
                    .update_field(record_id, &self.schema.text_field, &sentinel)
                    .await?;
                tracing::info!("exhausted sentinel written to record");
                Ok(AnalysisReport {
                    file_name: file.name,
                    strategy: None,
                    text: sentinel,
                })
            }
        }
    }

    /// Fetch the drive file and attach its content to the record, leaving
    /// extraction to a later trigger.
    #[tracing::instrument(skip(self))]
    pub async fn stage_attachment(
        &self,
        file_id: &str,
        record_id: &str,
    ) -> Result<String, AnalysisError> {
        let file = self.drive.fetch(file_id).await?;
        self.records
            .attach_file(
                record_id,
                &self.schema.attachment_field,
                &file.name,
                &file.data,
            )
            .await?;
        tracing::info!(file_name = %file.name, bytes = file.data.len(), "file attached to record");
        Ok(file.name)
    }

    /// Rename the drive file to a caller-chosen name. Returns the name
    /// the store confirmed.
    #[tracing::instrument(skip(self))]
    pub async fn rename_file(
        &self,
        file_id: &str,
        new_name: &str,
    ) -> Result<String, AnalysisError> {
        let confirmed = self.drive.rename(file_id, new_name).await?;
        tracing::info!(confirmed_name = %confirmed, "file renamed");
        Ok(confirmed)
    }

    /// Rename the drive file to the record's suggested name, then write a
    /// status back onto the record. The status write is best-effort: the
    /// rename already happened, so its failure is logged, not returned.
    #[tracing::instrument(skip(self))]
    pub async fn auto_rename(&self, record_id: &str) -> Result<RenameOutcome, AnalysisError> {
        let fields = self.records.fetch_fields(record_id).await?;

        let file_id = field_str(&fields, &self.schema.file_id_field).ok_or_else(|| {
            AnalysisError::MissingRecordField(self.schema.file_id_field.clone())
        })?;
        let Some(suggested_name) = field_str(&fields, &self.schema.suggested_name_field) else {
            tracing::info!("no suggested name on record, skipping rename");
            return Ok(RenameOutcome::NoSuggestion);
        };
        let original_name = field_str(&fields, &self.schema.original_name_field);

        if original_name.as_deref() == Some(suggested_name.as_str()) {
            tracing::info!(name = %suggested_name, "suggested name equals original, skipping rename");
            return Ok(RenameOutcome::AlreadyNamed {
                name: suggested_name,
            });
        }

        match self.drive.rename(&file_id, &suggested_name).await {
            Ok(confirmed) => {
                self.write_rename_status(record_id, &format!("Renamed to: {confirmed}"))
                    .await;
                Ok(RenameOutcome::Renamed {
                    original_name,
                    new_name: confirmed,
                })
            }
            Err(error) => {
                self.write_rename_status(record_id, &format!("Rename failed: {error}"))
                    .await;
                Err(error.into())
            }
        }
    }

    async fn write_rename_status(&self, record_id: &str, status: &str) {
        if let Err(error) = self
            .records
            .update_field(record_id, &self.schema.rename_status_field, status)
            .await
        {
            tracing::warn!(%error, "failed to update rename status field");
        }
    }
}

fn field_str(fields: &serde_json::Map<String, serde_json::Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("drive store: {0}")]
    Drive(#[from] DriveStoreError),
    #[error("record store: {0}")]
    Records(#[from] RecordStoreError),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("record field missing or empty: {0}")]
    MissingRecordField(String),
}
