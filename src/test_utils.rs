use crate::services::export::{ArchiveSink, Game};
use crate::types::errors::{ExportError, ExportResult};
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Write a fake ROM under `dir` and return its path.
pub fn write_rom(dir: &Path, file_name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}

/// Build a game backed by a freshly written ROM file.
pub fn rom_game(dir: &Path, id: i64, name: &str, system: &str, file_name: &str) -> Game {
    let content = format!("{system}:{file_name}").into_bytes();
    let path = write_rom(dir, &format!("{id}_{file_name}"), &content);
    Game::new(id, name, system, path, file_name, content.len() as u64)
}

pub fn open_archive(bytes: &[u8]) -> zip::ZipArchive<Cursor<&[u8]>> {
    zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
}

/// Entry names in central-directory order.
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = open_archive(bytes);
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

pub fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = open_archive(bytes);
    let mut entry = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    content
}

/// What a [`RecordingSink`] saw, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    File { path: String, source: PathBuf },
    Manifest { path: String, content: Vec<u8> },
}

/// In-memory sink for exporter tests. Reports missing sources like the real
/// writer does.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn file_paths(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SinkCall::File { path, .. } => Some(path.as_str()),
                SinkCall::Manifest { .. } => None,
            })
            .collect()
    }

    pub fn manifest(&self, path: &str) -> Option<&[u8]> {
        self.calls.iter().find_map(|call| match call {
            SinkCall::Manifest { path: p, content } if p == path => Some(content.as_slice()),
            _ => None,
        })
    }

    pub fn manifest_paths(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SinkCall::Manifest { path, .. } => Some(path.as_str()),
                SinkCall::File { .. } => None,
            })
            .collect()
    }
}

impl ArchiveSink for RecordingSink {
    fn add_file(&mut self, archive_path: &str, source: &Path) -> ExportResult<()> {
        if !source.exists() {
            return Err(ExportError::FileNotFound(source.to_path_buf()));
        }
        self.calls.push(SinkCall::File {
            path: archive_path.to_string(),
            source: source.to_path_buf(),
        });
        Ok(())
    }

    fn add_manifest(&mut self, archive_path: &str, content: &[u8]) -> ExportResult<()> {
        self.calls.push(SinkCall::Manifest {
            path: archive_path.to_string(),
            content: content.to_vec(),
        });
        Ok(())
    }
}
