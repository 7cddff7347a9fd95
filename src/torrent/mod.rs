pub mod error;
pub mod infohash;
pub mod metadata;

pub use error::MetainfoError;
pub use infohash::{hash_bvalue, info_hash, info_hash_hex};
pub use metadata::{get_bytestring, get_integer, FileEntry, FileLayout, Torrent, TorrentInfo};
