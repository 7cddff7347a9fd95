use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors raised while reading a metainfo file.
#[derive(Debug, Error)]
pub enum MetainfoError {
    #[error("Bencode error: {0}")]
    Bencode(#[from] BencodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Root of .torrent must be a dictionary")]
    NotADict,

    #[error("Missing '{0}'")]
    MissingField(&'static str),

    #[error("'{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' value not valid UTF-8")]
    InvalidUtf8(&'static str),

    #[error("'{field}' must not be negative, got {value}")]
    NegativeInteger { field: &'static str, value: i64 },

    #[error("Total length of 'files' does not fit in 64 bits")]
    LengthOverflow,

    #[error("'pieces' length {0} is not a multiple of 20")]
    BadPiecesLength(usize),
}
