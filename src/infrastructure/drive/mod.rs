mod google_drive_adapter;

pub use google_drive_adapter::GoogleDriveAdapter;
