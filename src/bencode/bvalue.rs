use std::collections::BTreeMap;

/// A decoded bencode value.
///
/// Dictionary keys are raw bytes held in a `BTreeMap`, so iterating a `Dict`
/// always yields keys in ascending byte order, which is the order the encoder
/// has to emit them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
    ByteString(Vec<u8>), // raw bytes, not necessarily UTF-8
    Integer(i64),
    List(Vec<BValue>),
    Dict(BTreeMap<Vec<u8>, BValue>),
}

impl BValue {
    /// Builds a byte string from UTF-8 text.
    pub fn string(s: &str) -> Self {
        BValue::ByteString(s.as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BValue::ByteString(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Returns the byte string as text if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[BValue]> {
        match self {
            BValue::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, BValue>> {
        match self {
            BValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_dict(self) -> Option<BTreeMap<Vec<u8>, BValue>> {
        match self {
            BValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.as_dict()?.get(key)
    }
}

impl From<i64> for BValue {
    fn from(i: i64) -> Self {
        BValue::Integer(i)
    }
}

impl From<&str> for BValue {
    fn from(s: &str) -> Self {
        BValue::string(s)
    }
}

impl From<Vec<u8>> for BValue {
    fn from(b: Vec<u8>) -> Self {
        BValue::ByteString(b)
    }
}

impl From<Vec<BValue>> for BValue {
    fn from(l: Vec<BValue>) -> Self {
        BValue::List(l)
    }
}

impl From<BTreeMap<Vec<u8>, BValue>> for BValue {
    fn from(d: BTreeMap<Vec<u8>, BValue>) -> Self {
        BValue::Dict(d)
    }
}
