//! Archive writer adapter over `zip::ZipWriter`.
//!
//! Exporters only ever see [`ArchiveSink`], so every format shares one entry
//! policy: Deflate, source mtime and permission bits preserved, and a missing
//! source surfaced as [`ExportError::FileNotFound`].

use crate::types::errors::{ExportError, ExportResult};
use chrono::{Datelike, Local, Timelike};
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Sources at or above this size need zip64 headers.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Destination for archive entries.
pub trait ArchiveSink {
    /// Stream `source` from disk into a new entry at `archive_path`.
    fn add_file(&mut self, archive_path: &str, source: &Path) -> ExportResult<()>;

    /// Write a generated manifest (playlist, gamelist) at `archive_path`.
    fn add_manifest(&mut self, archive_path: &str, content: &[u8]) -> ExportResult<()>;
}

pub struct ArchiveWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    compression_level: Option<i64>,
    files_written: usize,
    manifests_written: usize,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    pub fn new(inner: W, compression_level: Option<i64>) -> Self {
        Self {
            zip: ZipWriter::new(inner),
            compression_level,
            files_written: 0,
            manifests_written: 0,
        }
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    pub fn manifests_written(&self) -> usize {
        self.manifests_written
    }

    /// Write the central directory and hand back the underlying stream.
    pub fn finish(self) -> ExportResult<W> {
        Ok(self.zip.finish()?)
    }

    fn base_options(&self) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.compression_level)
    }
}

impl<W: Write + Seek> ArchiveSink for ArchiveWriter<W> {
    fn add_file(&mut self, archive_path: &str, source: &Path) -> ExportResult<()> {
        let mut source_file = open_source(source)?;
        let metadata = source_file.metadata()?;

        let options = self
            .base_options()
            .last_modified_time(zip_modified_time(&metadata))
            .large_file(metadata.len() >= ZIP64_THRESHOLD);
        #[cfg(unix)]
        let options = {
            use std::os::unix::fs::PermissionsExt;
            options.unix_permissions(metadata.permissions().mode())
        };

        self.zip.start_file(archive_path, options)?;
        let copied = io::copy(&mut source_file, &mut self.zip)?;
        self.files_written += 1;

        log::debug!(
            "Added {} ({copied} bytes) from {}",
            archive_path,
            source.display()
        );
        Ok(())
    }

    fn add_manifest(&mut self, archive_path: &str, content: &[u8]) -> ExportResult<()> {
        // Fixed timestamp keeps manifests byte-stable between runs.
        let options = self
            .base_options()
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        self.zip.start_file(archive_path, options)?;
        self.zip.write_all(content)?;
        self.manifests_written += 1;

        log::debug!("Added manifest {} ({} bytes)", archive_path, content.len());
        Ok(())
    }
}

/// Open a source ROM read-only. A missing file is `FileNotFound`, anything
/// else passes through as I/O.
pub(crate) fn open_source(path: &Path) -> ExportResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExportError::FileNotFound(path.to_path_buf()),
        _ => ExportError::Io(e),
    })
}

/// Convert the source mtime to a zip timestamp (local time, 2s resolution).
/// Anything zip can't represent, such as pre-1980 dates, becomes 1980-01-01.
fn zip_modified_time(metadata: &fs::Metadata) -> DateTime {
    let Ok(modified) = metadata.modified() else {
        return DateTime::default();
    };
    let local: chrono::DateTime<Local> = modified.into();

    u16::try_from(local.year())
        .ok()
        .and_then(|year| {
            DateTime::from_date_and_time(
                year,
                local.month() as u8,
                local.day() as u8,
                local.hour() as u8,
                local.minute() as u8,
                local.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
