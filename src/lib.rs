pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::config::{ChecksumMode, ExportConfig, PlaylistConfig};
pub use services::export::{
    estimate_size, ArchiveSink, ExportRequest, ExportSummary, Exporter, Format, Game,
    GameMetadata, Generator,
};
pub use types::errors::{ExportError, ExportResult};
