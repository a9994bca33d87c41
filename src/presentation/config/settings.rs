use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::application::services::RecordSchema;
use crate::infrastructure::security::AuthGuard;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub drive: DriveSettings,
    pub vision: VisionSettings,
    pub records: RecordsSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

impl Settings {
    /// Layers `appsettings.{Environment}` (optional) under `APP__`-prefixed
    /// environment variables, so deployments can override any key without
    /// shipping a file.
    pub fn load(environment: &Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriveSettings {
    #[serde(default = "default_drive_base_url")]
    pub base_url: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionSettings {
    #[serde(default = "default_vision_base_url")]
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordsSettings {
    #[serde(default = "default_records_base_url")]
    pub base_url: String,
    pub api_key: String,
    pub base_id: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default)]
    pub schema: RecordSchemaSettings,
}

/// Field names on the record table. Defaults match the base this bridge
/// was originally wired to.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSchemaSettings {
    #[serde(default = "default_text_field")]
    pub text_field: String,
    #[serde(default = "default_attachment_field")]
    pub attachment_field: String,
    #[serde(default = "default_file_id_field")]
    pub file_id_field: String,
    #[serde(default = "default_suggested_name_field")]
    pub suggested_name_field: String,
    #[serde(default = "default_original_name_field")]
    pub original_name_field: String,
    #[serde(default = "default_rename_status_field")]
    pub rename_status_field: String,
}

impl Default for RecordSchemaSettings {
    fn default() -> Self {
        Self {
            text_field: default_text_field(),
            attachment_field: default_attachment_field(),
            file_id_field: default_file_id_field(),
            suggested_name_field: default_suggested_name_field(),
            original_name_field: default_original_name_field(),
            rename_status_field: default_rename_status_field(),
        }
    }
}

impl From<RecordSchemaSettings> for RecordSchema {
    fn from(settings: RecordSchemaSettings) -> Self {
        Self {
            text_field: settings.text_field,
            attachment_field: settings.attachment_field,
            file_id_field: settings.file_id_field,
            suggested_name_field: settings.suggested_name_field,
            original_name_field: settings.original_name_field,
            rename_status_field: settings.rename_status_field,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

impl From<AuthSettings> for AuthGuard {
    fn from(settings: AuthSettings) -> Self {
        Self {
            bearer_token: settings.bearer_token.filter(|token| !token.is_empty()),
            webhook_secret: settings.webhook_secret.filter(|secret| !secret.is_empty()),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_drive_base_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_vision_base_url() -> String {
    "https://vision.googleapis.com".to_string()
}

fn default_records_base_url() -> String {
    "https://api.airtable.com/v0".to_string()
}

fn default_table_name() -> String {
    "Files".to_string()
}

fn default_text_field() -> String {
    "Text".to_string()
}

fn default_attachment_field() -> String {
    "File for AI Analysis".to_string()
}

fn default_file_id_field() -> String {
    "Google Drive File ID".to_string()
}

fn default_suggested_name_field() -> String {
    "Suggested File Name".to_string()
}

fn default_original_name_field() -> String {
    "Original File Name".to_string()
}

fn default_rename_status_field() -> String {
    "Rename Status".to_string()
}
