use crate::services::export::exporter::Exporter;
use crate::services::export::types::{Format, Game};
use crate::services::export::writer::ArchiveSink;
use crate::types::errors::{ExportError, ExportResult};

/// Plain `<system>/<file>` folders, no metadata.
#[derive(Debug, Default)]
pub struct FolderExporter;

impl FolderExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for FolderExporter {
    fn format(&self) -> Format {
        Format::Folder
    }

    fn export(&self, games: &[Game], sink: &mut dyn ArchiveSink) -> ExportResult<()> {
        if games.is_empty() {
            return Err(ExportError::NoGames);
        }

        for game in games {
            let entry_path = format!("{}/{}", game.system, game.file_name);
            sink.add_file(&entry_path, &game.file_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/folder_tests.rs"]
mod tests;
