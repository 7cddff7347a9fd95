use thiserror::Error;

/// Decoding failures. Every variant records the byte offset where the
/// failing production started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BencodeError {
    #[error("Unexpected end of input at byte {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("Unknown tag {:?} at byte {offset}", tag_char(.tag))]
    UnknownTag { offset: usize, tag: u8 },

    #[error("Malformed string length at byte {offset}: {reason}")]
    MalformedLength { offset: usize, reason: String },

    #[error("Truncated string at byte {offset}: declared {declared} bytes, only {available} available")]
    TruncatedString {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("Malformed integer at byte {offset}: {reason}")]
    MalformedInteger { offset: usize, reason: String },

    #[error("Unterminated list starting at byte {offset} (missing 'e')")]
    UnterminatedList { offset: usize },

    #[error("Unterminated dictionary starting at byte {offset} (missing 'e')")]
    UnterminatedDict { offset: usize },

    #[error("Dict key at byte {offset} must be a byte string, found tag {:?}", tag_char(.tag))]
    InvalidKeyType { offset: usize, tag: u8 },

    #[error("Duplicate dict key {:?} at byte {offset}", String::from_utf8_lossy(.key))]
    DuplicateKey { offset: usize, key: Vec<u8> },

    #[error("Nesting deeper than {max_depth} levels at byte {offset}")]
    NestingTooDeep { offset: usize, max_depth: usize },

    #[error("Trailing data after value at byte {offset}")]
    TrailingData { offset: usize },
}

fn tag_char(tag: &u8) -> char {
    char::from(*tag)
}

impl BencodeError {
    /// Byte offset in the input where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            BencodeError::UnexpectedEnd { offset }
            | BencodeError::UnknownTag { offset, .. }
            | BencodeError::MalformedLength { offset, .. }
            | BencodeError::TruncatedString { offset, .. }
            | BencodeError::MalformedInteger { offset, .. }
            | BencodeError::UnterminatedList { offset }
            | BencodeError::UnterminatedDict { offset }
            | BencodeError::InvalidKeyType { offset, .. }
            | BencodeError::DuplicateKey { offset, .. }
            | BencodeError::NestingTooDeep { offset, .. }
            | BencodeError::TrailingData { offset } => *offset,
        }
    }
}
