use super::*;
use crate::test_utils::{entry_names, open_archive, read_entry, write_rom};
use std::io::Cursor;
use tempfile::TempDir;

fn finish(writer: ArchiveWriter<Cursor<Vec<u8>>>) -> Vec<u8> {
    writer.finish().unwrap().into_inner()
}

#[test]
fn test_add_file_copies_content_with_deflate() {
    let tmp = TempDir::new().unwrap();
    let content = vec![0x4E, 0x45, 0x53, 0x1A, 0x00, 0x00, 0x00, 0x00].repeat(64);
    let rom = write_rom(tmp.path(), "mario.nes", &content);

    let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()), None);
    writer.add_file("nes/mario.nes", &rom).unwrap();
    assert_eq!(writer.files_written(), 1);
    assert_eq!(writer.manifests_written(), 0);

    let bytes = finish(writer);
    assert_eq!(entry_names(&bytes), vec!["nes/mario.nes"]);
    assert_eq!(read_entry(&bytes, "nes/mario.nes"), content);

    let mut archive = open_archive(&bytes);
    let entry = archive.by_name("nes/mario.nes").unwrap();
    assert_eq!(entry.compression(), CompressionMethod::Deflated);
}

#[test]
fn test_add_file_missing_source_is_file_not_found() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("gone.sfc");

    let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()), None);
    let err = writer.add_file("snes/gone.sfc", &missing).unwrap_err();

    match err {
        ExportError::FileNotFound(path) => assert_eq!(path, missing),
        other => panic!("Expected FileNotFound, got {other:?}"),
    }
    assert_eq!(writer.files_written(), 0);

    // No entry was started, so the archive still finalizes cleanly and empty.
    let bytes = finish(writer);
    assert!(entry_names(&bytes).is_empty());
}

#[cfg(unix)]
#[test]
fn test_add_file_preserves_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let rom = write_rom(tmp.path(), "tetris.gb", b"gameboy");
    fs::set_permissions(&rom, fs::Permissions::from_mode(0o640)).unwrap();

    let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()), None);
    writer.add_file("gb/tetris.gb", &rom).unwrap();
    let bytes = finish(writer);

    let mut archive = open_archive(&bytes);
    let entry = archive.by_name("gb/tetris.gb").unwrap();
    assert_eq!(entry.unix_mode().map(|mode| mode & 0o777), Some(0o640));
}

#[test]
fn test_add_manifest_counts_separately() {
    let tmp = TempDir::new().unwrap();
    let rom = write_rom(tmp.path(), "sonic.md", b"genesis");

    let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()), Some(9));
    writer.add_file("roms/genesis/sonic.md", &rom).unwrap();
    writer
        .add_manifest("roms/genesis/gamelist.xml", b"<gameList/>")
        .unwrap();
    assert_eq!(writer.files_written(), 1);
    assert_eq!(writer.manifests_written(), 1);

    let bytes = finish(writer);
    assert_eq!(
        entry_names(&bytes),
        vec!["roms/genesis/sonic.md", "roms/genesis/gamelist.xml"]
    );
    assert_eq!(
        read_entry(&bytes, "roms/genesis/gamelist.xml"),
        b"<gameList/>"
    );
}

#[test]
fn test_modified_time_uses_source_mtime() {
    let tmp = TempDir::new().unwrap();
    let rom = write_rom(tmp.path(), "pong.a26", b"atari");
    let metadata = fs::metadata(&rom).unwrap();

    // A freshly written file is well inside the zip date range.
    let stamp = zip_modified_time(&metadata);
    assert!(stamp.year() >= 2020);
}

#[test]
fn test_add_file_unreadable_source_stays_io_error() {
    let tmp = TempDir::new().unwrap();

    // A directory opens on Linux but can't be read as a ROM.
    let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()), None);
    let err = writer.add_file("nes/folder.nes", tmp.path()).unwrap_err();

    assert!(matches!(err, ExportError::Io(_)), "got {err:?}");
    assert!(!err.is_file_not_found());
    assert_eq!(writer.files_written(), 0);
}
