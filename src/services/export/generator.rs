//! Pack generation: picks the exporter for a request, owns the archive
//! lifecycle and reports what was written.
//!
//! The registry is filled at construction. Register extra exporters before the
//! generator is shared across threads; `generate` only reads it.

use super::exporter::Exporter;
use super::formats::{FolderExporter, GamelistExporter, PlaylistExporter};
use super::types::{ExportRequest, ExportSummary, Format, Game};
use super::writer::ArchiveWriter;
use crate::services::config::ExportConfig;
use crate::types::errors::{ExportError, ExportResult};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Generator {
    config: ExportConfig,
    exporters: HashMap<Format, Arc<dyn Exporter>>,
}

impl Generator {
    /// Generator with the built-in folder, RetroArch, EmulationStation and
    /// ArkOS exporters.
    pub fn new(config: ExportConfig) -> Self {
        let playlist = PlaylistExporter::new(config.playlist.clone());
        let mut generator = Self::empty(config);

        generator.register_exporter(Arc::new(FolderExporter::new()));
        generator.register_exporter(Arc::new(playlist));

        // ArkOS shares the EmulationStation instance, not a copy.
        let gamelist: Arc<dyn Exporter> = Arc::new(GamelistExporter::new());
        generator.register_exporter(Arc::clone(&gamelist));
        generator.exporters.insert(Format::ArkOs, gamelist);

        generator
    }

    /// Generator with nothing registered.
    pub fn empty(config: ExportConfig) -> Self {
        Self {
            config,
            exporters: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Insert or replace the exporter for its declared format.
    pub fn register_exporter(&mut self, exporter: Arc<dyn Exporter>) {
        let format = exporter.format();
        if self.exporters.insert(format, exporter).is_some() {
            log::debug!("Replaced exporter for format '{format}'");
        }
    }

    /// Point `alias` at the exporter already registered for `target`.
    pub fn register_alias(&mut self, alias: Format, target: Format) -> ExportResult<()> {
        let exporter = self
            .exporters
            .get(&target)
            .cloned()
            .ok_or_else(|| ExportError::UnsupportedFormat(target.to_string()))?;
        self.exporters.insert(alias, exporter);
        Ok(())
    }

    pub fn exporter(&self, format: Format) -> Option<&Arc<dyn Exporter>> {
        self.exporters.get(&format)
    }

    /// Registered formats, in declaration order.
    pub fn formats(&self) -> Vec<Format> {
        Format::ALL
            .into_iter()
            .filter(|format| self.exporters.contains_key(format))
            .collect()
    }

    /// Build the pack for `request` into `output`.
    ///
    /// The archive trailer is written on success and on failure. On any error
    /// the bytes already in `output` are not a valid pack and must be thrown
    /// away.
    ///
    /// `output` must be seekable; transports holding a non-seekable stream
    /// should use [`Generator::generate_to_file`] and stream the file.
    pub fn generate<W: Write + Seek>(
        &self,
        request: &ExportRequest,
        output: W,
    ) -> ExportResult<ExportSummary> {
        self.write_archive(request, output)
            .map(|(summary, _)| summary)
    }

    /// Build the pack into a file. The archive is written next to `dest` as
    /// `<dest>.tmp` and only renamed into place once complete.
    pub fn generate_to_file(
        &self,
        request: &ExportRequest,
        dest: &Path,
    ) -> ExportResult<ExportSummary> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = tmp_path_for(dest);

        let result = File::create(&tmp_path)
            .map_err(ExportError::from)
            .and_then(|file| {
                let (summary, mut out) = self.write_archive(request, BufWriter::new(file))?;
                out.flush()?;
                out.get_ref().sync_all()?;
                Ok(summary)
            })
            .and_then(|summary| {
                fs::rename(&tmp_path, dest)?;
                Ok(summary)
            });

        if result.is_err() && tmp_path.exists() {
            if let Err(e) = fs::remove_file(&tmp_path) {
                log::warn!(
                    "Failed to remove partial archive {}: {e}",
                    tmp_path.display()
                );
            }
        }
        result
    }

    pub fn estimate_size(&self, games: &[Game]) -> u64 {
        estimate_size(games)
    }

    fn write_archive<W: Write + Seek>(
        &self,
        request: &ExportRequest,
        output: W,
    ) -> ExportResult<(ExportSummary, W)> {
        let exporter = self
            .exporters
            .get(&request.format)
            .ok_or_else(|| ExportError::UnsupportedFormat(request.format.to_string()))?;

        let pack_name = request
            .pack_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.config.default_pack_name)
            .to_string();

        log::info!(
            "Exporting pack '{}': {} games as {}",
            pack_name,
            request.games.len(),
            request.format
        );

        let mut writer = ArchiveWriter::new(output, self.config.compression_level);
        let exported = exporter.export(&request.games, &mut writer);
        let file_count = writer.files_written();
        let manifest_count = writer.manifests_written();
        let finished = writer.finish();

        let output = match (exported, finished) {
            (Ok(()), Ok(output)) => output,
            (Ok(()), Err(finalize)) => {
                log::error!("Failed to finalize pack '{pack_name}': {finalize}");
                return Err(finalize);
            }
            (Err(primary), Ok(_)) => {
                log::warn!("Export of pack '{pack_name}' aborted: {primary}");
                return Err(primary);
            }
            (Err(primary), Err(finalize)) => {
                log::error!(
                    "Export of pack '{pack_name}' aborted: {primary}; finalize failed: {finalize}"
                );
                return Err(ExportError::Finalize {
                    primary: Box::new(primary),
                    finalize: Box::new(finalize),
                });
            }
        };

        let summary = ExportSummary {
            pack_name,
            file_count,
            total_size: request
                .games
                .iter()
                .map(|game| game.size)
                .fold(0, u64::saturating_add),
            format: request.format,
        };

        log::info!(
            "Exported pack '{}': {} files, {} manifests, {} bytes declared",
            summary.pack_name,
            summary.file_count,
            manifest_count,
            summary.total_size
        );
        Ok((summary, output))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

/// Declared sizes plus 10% for archive and manifest overhead. The overhead is
/// taken from the total, not per game. Pure, touches no files.
pub fn estimate_size(games: &[Game]) -> u64 {
    let total = games
        .iter()
        .map(|game| game.size)
        .fold(0, u64::saturating_add);
    total.saturating_add(total / 10)
}

fn tmp_path_for(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "tests/generator_tests.rs"]
mod tests;
