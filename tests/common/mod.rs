#![allow(dead_code)]

use rompack::Game;
use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Write `content` as a ROM under `dir` and describe it as a game.
pub fn make_game(
    dir: &Path,
    id: i64,
    name: &str,
    system: &str,
    file_name: &str,
    content: &[u8],
) -> Game {
    let source_dir = dir.join("library").join(system);
    fs::create_dir_all(&source_dir).unwrap();
    let path = source_dir.join(file_name);
    fs::write(&path, content).unwrap();
    Game::new(id, name, system, path, file_name, content.len() as u64)
}

/// Every entry of a zip, keyed by name.
pub fn read_all_entries(bytes: &[u8]) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        entries.insert(entry.name().to_string(), content);
    }
    entries
}

/// Entry names in archive order.
pub fn entry_order(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}
