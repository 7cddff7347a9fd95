use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::error::BencodeError;
use crate::bencode::bvalue::BValue;

/// Containers nested deeper than this are rejected unless the caller picks
/// another limit with [`Decoder::with_max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decodes one value from the front of `input`.
///
/// Returns the number of bytes consumed together with the value; anything
/// after the value is left untouched.
pub fn decode_bencode(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
    let mut decoder = Decoder::new(input);
    let value = decoder.decode_next()?;
    Ok((decoder.position(), value))
}

/// Decodes `input` as exactly one value, failing on trailing bytes.
pub fn decode_all(input: &[u8]) -> Result<BValue, BencodeError> {
    let mut decoder = Decoder::new(input);
    let value = decoder.decode_next()?;
    if !decoder.remaining().is_empty() {
        return Err(BencodeError::TrailingData {
            offset: decoder.position(),
        });
    }
    Ok(value)
}

/// A cursor over a bencoded buffer.
///
/// Each call to [`Decoder::decode_next`] reads one complete value starting at
/// the current position and leaves the cursor right after it, so a buffer of
/// concatenated values can be walked value by value.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::at(input, 0)
    }

    /// Starts decoding at `offset` instead of the beginning of `input`.
    pub fn at(input: &'a [u8], offset: usize) -> Self {
        Decoder {
            input,
            pos: offset,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// The not yet consumed tail of the input.
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    pub fn decode_next(&mut self) -> Result<BValue, BencodeError> {
        match self.peek() {
            None => Err(BencodeError::UnexpectedEnd { offset: self.pos }),
            Some(b'i') => self.decode_integer(),
            Some(b'l') => self.decode_list(),
            Some(b'd') => self.decode_dict(),
            Some(c) if c.is_ascii_digit() => self.decode_string().map(BValue::ByteString),
            Some(tag) => Err(BencodeError::UnknownTag {
                offset: self.pos,
                tag,
            }),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Offset of the first `needle` at or after `from`.
    fn find(&self, from: usize, needle: u8) -> Option<usize> {
        self.input[from..]
            .iter()
            .position(|&b| b == needle)
            .map(|i| from + i)
    }

    /// Decodes `i<digits>e`.
    fn decode_integer(&mut self) -> Result<BValue, BencodeError> {
        let start = self.pos;
        let malformed = |reason: &str| BencodeError::MalformedInteger {
            offset: start,
            reason: reason.to_string(),
        };

        let end = self
            .find(start + 1, b'e')
            .ok_or_else(|| malformed("missing 'e'"))?;
        let digits = &self.input[start + 1..end];

        let magnitude = digits.strip_prefix(b"-").unwrap_or(digits);
        if magnitude.is_empty() {
            return Err(malformed("no digits"));
        }
        if !magnitude.iter().all(u8::is_ascii_digit) {
            return Err(malformed("non-digit character"));
        }
        // "0" is the only spelling of zero: no "00", "01" or "-0"
        if magnitude[0] == b'0' && (magnitude.len() > 1 || magnitude.len() != digits.len()) {
            return Err(malformed("leading zero"));
        }

        // only ASCII digits and '-' are left, so this is valid UTF-8
        let text = std::str::from_utf8(digits).map_err(|_| malformed("non-digit character"))?;
        let parsed = text
            .parse::<i64>()
            .map_err(|e| malformed(&format!("'{}' out of range: {}", text, e)))?;

        // add 1 to account for 'e'
        self.pos = end + 1;
        Ok(BValue::Integer(parsed))
    }

    /// Decodes `<length>:<bytes>`.
    fn decode_string(&mut self) -> Result<Vec<u8>, BencodeError> {
        let start = self.pos;
        let malformed = |reason: &str| BencodeError::MalformedLength {
            offset: start,
            reason: reason.to_string(),
        };

        let colon = self
            .find(start, b':')
            .ok_or_else(|| malformed("missing ':'"))?;
        let digits = &self.input[start..colon];
        if digits.is_empty() {
            return Err(malformed("empty length"));
        }
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(malformed("non-digit character in length"));
        }

        let text = std::str::from_utf8(digits).map_err(|_| malformed("non-digit character in length"))?;
        let length = text
            .parse::<usize>()
            .map_err(|e| malformed(&format!("'{}' out of range: {}", text, e)))?;

        let start_data = colon + 1;
        let available = self.input.len() - start_data;
        if length > available {
            return Err(BencodeError::TruncatedString {
                offset: start,
                declared: length,
                available,
            });
        }

        let end_data = start_data + length;
        self.pos = end_data;
        Ok(self.input[start_data..end_data].to_vec())
    }

    /// Decodes `l<items>e`.
    fn decode_list(&mut self) -> Result<BValue, BencodeError> {
        let start = self.pos;
        self.enter(start)?;
        let list = self.list_items(start);
        self.depth -= 1;
        list
    }

    fn list_items(&mut self, start: usize) -> Result<BValue, BencodeError> {
        self.pos += 1; // skip 'l'

        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(BencodeError::UnterminatedList { offset: start }),
                Some(b'e') => break,
                Some(_) => items.push(self.decode_next()?),
            }
        }

        self.pos += 1; // skip 'e'
        Ok(BValue::List(items))
    }

    /// Decodes `d(<key><value>)*e`.
    fn decode_dict(&mut self) -> Result<BValue, BencodeError> {
        let start = self.pos;
        self.enter(start)?;
        let dict = self.dict_entries(start);
        self.depth -= 1;
        dict
    }

    fn dict_entries(&mut self, start: usize) -> Result<BValue, BencodeError> {
        self.pos += 1; // skip 'd'

        let mut map = BTreeMap::new();
        loop {
            let key_offset = self.pos;
            let key = match self.peek() {
                None => return Err(BencodeError::UnterminatedDict { offset: start }),
                Some(b'e') => break,
                Some(c) if c.is_ascii_digit() => self.decode_string()?,
                Some(tag) => {
                    return Err(BencodeError::InvalidKeyType {
                        offset: key_offset,
                        tag,
                    })
                }
            };

            let value = self.decode_next()?;
            match map.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(BencodeError::DuplicateKey {
                        offset: key_offset,
                        key: entry.key().clone(),
                    })
                }
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }

        self.pos += 1; // skip 'e'
        Ok(BValue::Dict(map))
    }

    fn enter(&mut self, offset: usize) -> Result<(), BencodeError> {
        if self.depth >= self.max_depth {
            return Err(BencodeError::NestingTooDeep {
                offset,
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }
}
