mod folder;
mod gamelist;
mod playlist;

pub use folder::FolderExporter;
pub use gamelist::{render_gamelist, GameList, GameListEntry, GamelistExporter, GAMELIST_FILE_NAME};
pub use playlist::{
    playlist_name, Playlist, PlaylistExporter, PlaylistItem, CRC_PLACEHOLDER, PLAYLIST_EXTENSION,
};
