//! EmulationStation layout: ROMs and a `gamelist.xml` side by side in
//! `roms/<system>/`. ArkOS reads the same layout, so one instance serves both.
//!
//! Game paths are relative to the manifest's own folder (`./<file>`).

use crate::services::export::exporter::{
    partition_by_system, rom_entry_path, Exporter, Partition,
};
use crate::services::export::types::{Format, Game};
use crate::services::export::writer::ArchiveSink;
use crate::types::errors::{ExportError, ExportResult};
use serde::{Deserialize, Serialize};

pub const GAMELIST_FILE_NAME: &str = "gamelist.xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename = "gameList")]
pub struct GameList {
    #[serde(rename = "game", default)]
    pub games: Vec<GameListEntry>,
}

/// One `<game>` element. Scraper fields are always emitted, empty unless the
/// caller supplied metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameListEntry {
    pub path: String,
    pub name: String,
    pub desc: String,
    pub image: String,
    pub rating: String,
    pub releasedate: String,
    pub developer: String,
    pub publisher: String,
    pub genre: String,
    pub players: String,
}

impl GameListEntry {
    fn from_game(game: &Game) -> Self {
        let meta = &game.metadata;
        Self {
            path: format!("./{}", game.file_name),
            name: game.name.clone(),
            desc: meta.description.clone().unwrap_or_default(),
            image: meta.image.clone().unwrap_or_default(),
            rating: meta.rating.clone().unwrap_or_default(),
            releasedate: meta.release_date.clone().unwrap_or_default(),
            developer: meta.developer.clone().unwrap_or_default(),
            publisher: meta.publisher.clone().unwrap_or_default(),
            genre: meta.genre.clone().unwrap_or_default(),
            players: meta.players.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct GamelistExporter;

impl GamelistExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for GamelistExporter {
    fn format(&self) -> Format {
        Format::EmulationStation
    }

    fn export(&self, games: &[Game], sink: &mut dyn ArchiveSink) -> ExportResult<()> {
        if games.is_empty() {
            return Err(ExportError::NoGames);
        }

        for partition in partition_by_system(games) {
            for game in &partition.games {
                sink.add_file(&rom_entry_path(game), &game.file_path)?;
            }

            let xml = render_gamelist(&partition)?;
            let manifest_path = format!("roms/{}/{GAMELIST_FILE_NAME}", partition.system);
            sink.add_manifest(&manifest_path, xml.as_bytes())?;
        }
        Ok(())
    }
}

/// Serialize one partition as an indented `gamelist.xml` document.
pub fn render_gamelist(partition: &Partition<'_>) -> ExportResult<String> {
    let list = GameList {
        games: partition
            .games
            .iter()
            .map(|game| GameListEntry::from_game(game))
            .collect(),
    };

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    list.serialize(serializer)
        .map_err(|e| ExportError::Xml(e.to_string()))?;

    Ok(format!("{XML_DECLARATION}{body}"))
}

#[cfg(test)]
#[path = "tests/gamelist_tests.rs"]
mod tests;
