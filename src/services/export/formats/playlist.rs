//! RetroArch layout: ROMs under `roms/<system>/`, one JSON playlist per system
//! under `playlists/<name>.lpl`.
//!
//! Item paths are archive-root relative with a leading `/`, since RetroArch
//! resolves them against wherever the pack is unpacked.

use crate::services::config::{ChecksumMode, PlaylistConfig};
use crate::services::export::exporter::{
    partition_by_system, rom_entry_path, Exporter, Partition,
};
use crate::services::export::types::{Format, Game};
use crate::services::export::writer::{open_source, ArchiveSink};
use crate::types::errors::{ExportError, ExportResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

pub const PLAYLIST_EXTENSION: &str = "lpl";

/// Core binding left for RetroArch to resolve at launch.
const DETECT: &str = "DETECT";

/// Written when checksums are not computed.
pub const CRC_PLACEHOLDER: &str = "00000000|crc";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub version: String,
    pub default_core_path: String,
    pub default_core_name: String,
    pub label_display_mode: i32,
    pub right_thumbnail_mode: i32,
    pub left_thumbnail_mode: i32,
    pub sort_mode: i32,
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub path: String,
    pub label: String,
    pub core_path: String,
    pub core_name: String,
    pub crc32: String,
    pub db_name: String,
}

#[derive(Debug, Default)]
pub struct PlaylistExporter {
    config: PlaylistConfig,
}

impl PlaylistExporter {
    pub fn new(config: PlaylistConfig) -> Self {
        Self { config }
    }

    fn build_playlist(&self, partition: &Partition<'_>, db_name: &str) -> ExportResult<Playlist> {
        let items = partition
            .games
            .iter()
            .map(|game| {
                Ok(PlaylistItem {
                    path: format!("/{}", rom_entry_path(game)),
                    label: game.name.clone(),
                    core_path: DETECT.to_string(),
                    core_name: DETECT.to_string(),
                    crc32: self.checksum(game)?,
                    db_name: db_name.to_string(),
                })
            })
            .collect::<ExportResult<Vec<_>>>()?;

        Ok(Playlist {
            version: self.config.version.clone(),
            default_core_path: self.config.default_core_path.clone(),
            default_core_name: self.config.default_core_name.clone(),
            label_display_mode: self.config.label_display_mode,
            right_thumbnail_mode: self.config.right_thumbnail_mode,
            left_thumbnail_mode: self.config.left_thumbnail_mode,
            sort_mode: self.config.sort_mode,
            items,
        })
    }

    fn checksum(&self, game: &Game) -> ExportResult<String> {
        match self.config.checksum {
            ChecksumMode::Placeholder => Ok(CRC_PLACEHOLDER.to_string()),
            ChecksumMode::Crc32 => Ok(format!("{:08X}|crc", crc32_of_file(&game.file_path)?)),
        }
    }
}

impl Exporter for PlaylistExporter {
    fn format(&self) -> Format {
        Format::RetroArch
    }

    fn export(&self, games: &[Game], sink: &mut dyn ArchiveSink) -> ExportResult<()> {
        if games.is_empty() {
            return Err(ExportError::NoGames);
        }

        let mut used_names: HashSet<String> = HashSet::new();
        for partition in partition_by_system(games) {
            for game in &partition.games {
                sink.add_file(&rom_entry_path(game), &game.file_path)?;
            }

            let name = unique_playlist_name(&partition, &mut used_names);
            let db_name = format!("{name}.{PLAYLIST_EXTENSION}");
            let playlist = self.build_playlist(&partition, &db_name)?;
            let json = serde_json::to_vec_pretty(&playlist)?;
            sink.add_manifest(&format!("playlists/{db_name}"), &json)?;

            log::debug!(
                "Playlist {} lists {} games for system '{}'",
                db_name,
                playlist.items.len(),
                partition.system
            );
        }
        Ok(())
    }
}

/// Display name when any game supplies one, else the system id. Path
/// separators and other reserved characters are stripped.
pub fn playlist_name(partition: &Partition<'_>) -> String {
    let raw = partition.display_name().unwrap_or(partition.system);
    let cleaned = sanitize_filename::sanitize(raw);
    if cleaned.trim().is_empty() {
        partition.system.to_string()
    } else {
        cleaned
    }
}

/// [`playlist_name`], made unique within one export. Systems sharing a
/// display name (`genesis` and `megadrive` both "Sega Genesis") would otherwise
/// write the same entry; later ones get ` (<system>)` appended.
fn unique_playlist_name(partition: &Partition<'_>, used: &mut HashSet<String>) -> String {
    let base = playlist_name(partition);
    let mut candidate = base.clone();
    if used.contains(&candidate.to_lowercase()) {
        let system = sanitize_filename::sanitize(partition.system);
        candidate = format!("{base} ({system})");
        let mut counter = 2;
        while used.contains(&candidate.to_lowercase()) {
            candidate = format!("{base} ({system} {counter})");
            counter += 1;
        }
    }
    used.insert(candidate.to_lowercase());
    candidate
}

fn crc32_of_file(path: &Path) -> ExportResult<u32> {
    let mut file = open_source(path)?;

    let mut hasher = crc32fast::Hasher::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

#[cfg(test)]
#[path = "tests/playlist_tests.rs"]
mod tests;
