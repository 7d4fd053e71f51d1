use serde::{Deserialize, Serialize};

/// How the `crc32` field of playlist items is filled in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumMode {
    /// Literal `00000000|crc`, no file read.
    #[default]
    Placeholder,
    /// CRC32 of the source ROM, read once more before the entry is written.
    Crc32,
}

/// Playlist header defaults written into every `.lpl` file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlaylistConfig {
    pub version: String,
    pub default_core_path: String,
    pub default_core_name: String,
    pub label_display_mode: i32,
    pub right_thumbnail_mode: i32,
    pub left_thumbnail_mode: i32,
    pub sort_mode: i32,
    pub checksum: ChecksumMode,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            version: "1.5".into(),
            default_core_path: String::new(),
            default_core_name: String::new(),
            label_display_mode: 0,
            right_thumbnail_mode: 0,
            left_thumbnail_mode: 0,
            sort_mode: 0,
            checksum: ChecksumMode::Placeholder,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub default_pack_name: String,
    /// Deflate level handed to the zip writer. `None` keeps the library default.
    pub compression_level: Option<i64>,
    pub playlist: PlaylistConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_pack_name: "ROM Pack".into(),
            compression_level: None,
            playlist: PlaylistConfig::default(),
        }
    }
}
