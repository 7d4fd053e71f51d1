//! ROM pack export: turns a resolved game list into a zip laid out for a
//! specific front end (plain folders, RetroArch playlists, EmulationStation
//! gamelists).

mod exporter;
mod formats;
mod generator;
mod types;
mod writer;

// Re-export public API
pub use exporter::{partition_by_system, Exporter, Partition};
pub use formats::{
    playlist_name, render_gamelist, FolderExporter, GameList, GameListEntry, GamelistExporter,
    Playlist, PlaylistExporter, PlaylistItem, CRC_PLACEHOLDER, GAMELIST_FILE_NAME,
    PLAYLIST_EXTENSION,
};
pub use generator::{estimate_size, Generator};
pub use types::{ExportRequest, ExportSummary, Format, Game, GameMetadata};
pub use writer::{ArchiveSink, ArchiveWriter};

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod types_tests;
