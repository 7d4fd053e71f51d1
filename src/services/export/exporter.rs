use super::types::{Format, Game};
use super::writer::ArchiveSink;
use crate::types::errors::ExportResult;
use std::collections::HashMap;

/// One target layout's rules for populating an archive.
///
/// Implementations fail with `NoGames` on an empty list and stop at the first
/// writer error; there is no partial success.
pub trait Exporter: Send + Sync {
    fn format(&self) -> Format;

    fn export(&self, games: &[Game], sink: &mut dyn ArchiveSink) -> ExportResult<()>;
}

/// Games sharing one system id, in request order.
#[derive(Debug)]
pub struct Partition<'a> {
    pub system: &'a str,
    pub games: Vec<&'a Game>,
}

impl<'a> Partition<'a> {
    /// First non-empty display name supplied by any game in the partition.
    pub fn display_name(&self) -> Option<&'a str> {
        self.games
            .iter()
            .filter_map(|game| game.system_name.as_deref())
            .find(|name| !name.trim().is_empty())
    }
}

/// Group games by system. Systems come out in first-seen order.
pub fn partition_by_system(games: &[Game]) -> Vec<Partition<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut partitions: Vec<Partition<'_>> = Vec::new();

    for game in games {
        let slot = *index.entry(game.system.as_str()).or_insert_with(|| {
            partitions.push(Partition {
                system: game.system.as_str(),
                games: Vec::new(),
            });
            partitions.len() - 1
        });
        partitions[slot].games.push(game);
    }

    partitions
}

/// `roms/<system>/<file>`, shared by the manifest layouts.
pub(crate) fn rom_entry_path(game: &Game) -> String {
    format!("roms/{}/{}", game.system, game.file_name)
}

#[cfg(test)]
#[path = "tests/exporter_tests.rs"]
mod tests;
