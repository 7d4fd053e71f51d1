use crate::types::errors::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Optional scraper metadata. Only gamelist manifests carry these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMetadata {
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<String>,
    pub release_date: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub genre: Option<String>,
    pub players: Option<String>,
}

/// One exportable ROM, already resolved by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub system: String,
    pub system_name: Option<String>,
    pub file_path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub sub_path: Option<String>,
    #[serde(default)]
    pub metadata: GameMetadata,
}

impl Game {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        system: impl Into<String>,
        file_path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            system: system.into(),
            system_name: None,
            file_path: file_path.into(),
            file_name: file_name.into(),
            size,
            sub_path: None,
            metadata: GameMetadata::default(),
        }
    }

    pub fn with_system_name(mut self, system_name: impl Into<String>) -> Self {
        self.system_name = Some(system_name.into());
        self
    }
}

/// Target front-end layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `<system>/<file>` folders, no manifest.
    Folder,
    /// RetroArch: `roms/` plus one `.lpl` playlist per system.
    RetroArch,
    /// EmulationStation: `roms/<system>/gamelist.xml`.
    EmulationStation,
    /// ArkOS handhelds, which share the EmulationStation layout.
    ArkOs,
}

impl Format {
    pub const ALL: [Format; 4] = [
        Format::Folder,
        Format::RetroArch,
        Format::EmulationStation,
        Format::ArkOs,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Format::Folder => "folder",
            Format::RetroArch => "retroarch",
            Format::EmulationStation => "emulationstation",
            Format::ArkOs => "arkos",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.id() == wanted)
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

/// One export order. Game order is archive write order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub games: Vec<Game>,
    pub format: Format,
    pub pack_name: Option<String>,
}

impl ExportRequest {
    pub fn new(games: Vec<Game>, format: Format) -> Self {
        Self {
            games,
            format,
            pack_name: None,
        }
    }

    pub fn with_pack_name(mut self, pack_name: impl Into<String>) -> Self {
        self.pack_name = Some(pack_name.into());
        self
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub pack_name: String,
    /// ROM entries written. Manifests are not counted.
    pub file_count: usize,
    /// Sum of declared game sizes, not compressed bytes.
    pub total_size: u64,
    pub format: Format,
}

impl ExportSummary {
    /// File name a transport should offer for download.
    pub fn archive_file_name(&self) -> String {
        let stem = sanitize_filename::sanitize(&self.pack_name);
        if stem.trim().is_empty() {
            return "pack.zip".to_string();
        }
        format!("{stem}.zip")
    }
}
