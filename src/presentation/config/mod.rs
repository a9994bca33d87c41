mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AuthSettings, DriveSettings, LoggingSettings, RecordSchemaSettings, RecordsSettings,
    ServerSettings, Settings, VisionSettings,
};
