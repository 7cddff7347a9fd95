// lib.rs - Library interface for the bencode / metainfo CLI

pub mod bencode;
pub mod cli;
pub mod config;
pub mod engine;
pub mod torrent;

// Re-export commonly used types for easier testing
pub use bencode::{decode_all, decode_bencode, encode_bvalue, BValue, BencodeError, Decoder};
pub use config::Config;
pub use torrent::{info_hash, info_hash_hex, MetainfoError, Torrent, TorrentInfo};
