//! Data export: CSV of logged sets and full JSON backups.

pub mod backup;
pub mod csv;

pub use backup::{
    export_backup, import_backup, parse_backup, read_backup, write_backup, Backup, BackupError,
    BackupSetting, BackupStores, ImportSummary,
};
pub use csv::{export_sets_csv, write_export};

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing to export
    #[error("No sets to export")]
    NoData,

    /// Failed to format output
    #[error("Failed to write export: {0}")]
    WriteFailed(String),

    /// Failed to write the output file
    #[error("IO error: {0}")]
    Io(String),
}
