use std::{collections::BTreeMap, path::Path};

use log::{debug, warn};

use crate::bencode::{BValue, Decoder};
use crate::torrent::{info_hash, MetainfoError};

type BDict = BTreeMap<Vec<u8>, BValue>;

/// Represents a .torrent file, including the announce URL and the associated info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Torrent {
    pub announce: Option<String>, // The tracker URL, absent for trackerless torrents
    pub info: TorrentInfo,        // Torrent metadata
    pub info_hash: [u8; 20],      // SHA-1 of the re-encoded info dict
}

/// Contains detailed metadata about the torrent's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentInfo {
    pub name: String,           // Name of the file or folder
    pub piece_length: u64,      // Size of each piece
    pub pieces: Vec<[u8; 20]>,  // SHA-1 hashes are 20 bytes each
    pub files: FileLayout,
    total_length: u64,          // sum of file lengths, checked for overflow
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLayout {
    Single { length: u64 },
    Multi { files: Vec<FileEntry> },
}

/// One entry of a multi-file torrent's `files` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub length: u64,
    pub path: Vec<String>,
}

impl Torrent {
    /// Reads a .torrent file from disk and parses its contents.
    pub fn from_file<P: AsRef<Path>>(path: P, max_depth: usize) -> Result<Self, MetainfoError> {
        let path = path.as_ref();
        let buf = std::fs::read(path)?;
        debug!("read {} bytes from {}", buf.len(), path.display());
        Self::from_bytes(&buf, max_depth)
    }

    /// Decodes a metainfo buffer and builds a `Torrent` from it.
    pub fn from_bytes(buf: &[u8], max_depth: usize) -> Result<Self, MetainfoError> {
        let mut decoder = Decoder::new(buf).with_max_depth(max_depth);
        let bvalue = decoder.decode_next()?;
        if !decoder.remaining().is_empty() {
            warn!(
                "ignoring {} trailing bytes after metainfo at byte {}",
                decoder.remaining().len(),
                decoder.position()
            );
        }
        Self::from_bvalue(&bvalue)
    }

    /// Creates a `Torrent` from a `BValue` (the result of a bencode parse).
    pub fn from_bvalue(value: &BValue) -> Result<Self, MetainfoError> {
        let root_dict = value.as_dict().ok_or(MetainfoError::NotADict)?;

        let announce = match root_dict.get(&b"announce"[..]) {
            Some(_) => Some(get_bytestring(root_dict, "announce")?),
            None => None,
        };

        let info_dict = get_dict(root_dict, "info")?;
        let info = TorrentInfo::from_bdict(info_dict)?;
        let info_hash = info_hash(value)?;

        Ok(Torrent {
            announce,
            info,
            info_hash,
        })
    }
}

impl TorrentInfo {
    pub fn from_bdict(info_dict: &BDict) -> Result<Self, MetainfoError> {
        let name = get_bytestring(info_dict, "name")?;
        let piece_length = get_length(info_dict, "piece length")?;
        let pieces_bytes = lookup_bytestring(info_dict, "pieces")?;

        if pieces_bytes.len() % 20 != 0 {
            return Err(MetainfoError::BadPiecesLength(pieces_bytes.len()));
        }
        let pieces = pieces_bytes
            .chunks_exact(20)
            .map(|chunk| {
                let mut hash = [0u8; 20];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();

        // single-file torrents carry "length", multi-file ones a "files" list
        let files = if info_dict.contains_key(&b"files"[..]) {
            let entries = get_list(info_dict, "files")?
                .iter()
                .map(FileEntry::from_bvalue)
                .collect::<Result<Vec<_>, _>>()?;
            FileLayout::Multi { files: entries }
        } else {
            FileLayout::Single {
                length: get_length(info_dict, "length")?,
            }
        };

        let total_length = match &files {
            FileLayout::Single { length } => *length,
            FileLayout::Multi { files } => files
                .iter()
                .try_fold(0u64, |total, f| total.checked_add(f.length))
                .ok_or(MetainfoError::LengthOverflow)?,
        };

        Ok(TorrentInfo {
            name,
            piece_length,
            pieces,
            files,
            total_length,
        })
    }

    /// Total size of the content in bytes.
    pub fn total_length(&self) -> u64 {
        self.total_length
    }
}

impl FileEntry {
    fn from_bvalue(value: &BValue) -> Result<Self, MetainfoError> {
        let dict = value.as_dict().ok_or(MetainfoError::WrongType {
            field: "files",
            expected: "a list of dictionaries",
        })?;
        let length = get_length(dict, "length")?;
        let path = get_list(dict, "path")?
            .iter()
            .map(|part| match part {
                BValue::ByteString(b) => String::from_utf8(b.clone())
                    .map_err(|_| MetainfoError::InvalidUtf8("path")),
                _ => Err(MetainfoError::WrongType {
                    field: "path",
                    expected: "a list of ByteStrings",
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FileEntry { length, path })
    }
}

fn lookup<'a>(dict: &'a BDict, key: &'static str) -> Result<&'a BValue, MetainfoError> {
    dict.get(key.as_bytes())
        .ok_or(MetainfoError::MissingField(key))
}

/// Looks up a key in the dictionary and returns a byte slice if the value is a ByteString.
pub fn lookup_bytestring<'a>(dict: &'a BDict, key: &'static str) -> Result<&'a [u8], MetainfoError> {
    lookup(dict, key)?
        .as_bytes()
        .ok_or(MetainfoError::WrongType {
            field: key,
            expected: "a ByteString",
        })
}

/// Gets a ByteString from the dictionary and converts it into a UTF-8 String.
pub fn get_bytestring(dict: &BDict, key: &'static str) -> Result<String, MetainfoError> {
    let bytes = lookup_bytestring(dict, key)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| MetainfoError::InvalidUtf8(key))
}

/// Retrieves an integer value from the dictionary.
pub fn get_integer(dict: &BDict, key: &'static str) -> Result<i64, MetainfoError> {
    lookup(dict, key)?
        .as_integer()
        .ok_or(MetainfoError::WrongType {
            field: key,
            expected: "a Number",
        })
}

fn get_length(dict: &BDict, key: &'static str) -> Result<u64, MetainfoError> {
    let value = get_integer(dict, key)?;
    u64::try_from(value).map_err(|_| MetainfoError::NegativeInteger { field: key, value })
}

fn get_list<'a>(dict: &'a BDict, key: &'static str) -> Result<&'a [BValue], MetainfoError> {
    lookup(dict, key)?
        .as_list()
        .ok_or(MetainfoError::WrongType {
            field: key,
            expected: "a List",
        })
}

fn get_dict<'a>(dict: &'a BDict, key: &'static str) -> Result<&'a BDict, MetainfoError> {
    lookup(dict, key)?
        .as_dict()
        .ok_or(MetainfoError::WrongType {
            field: key,
            expected: "a dictionary",
        })
}
