// infohash.rs
use sha1::{Digest, Sha1};

use crate::bencode::{encode_bvalue, BValue};
use crate::torrent::MetainfoError;

/// SHA-1 over the canonical encoding of `value`.
pub fn hash_bvalue(value: &BValue) -> [u8; 20] {
    let encoded = encode_bvalue(value);

    let mut hasher = Sha1::new();
    hasher.update(&encoded);
    let result = hasher.finalize();

    let mut hash_bytes = [0u8; 20];
    hash_bytes.copy_from_slice(&result);
    hash_bytes
}

/// Computes the info hash of a decoded metainfo root.
///
/// The `info` dictionary is taken as decoded and re-encoded with sorted keys,
/// so every field (including ones this crate never reads) contributes to the
/// hash.
pub fn info_hash(root: &BValue) -> Result<[u8; 20], MetainfoError> {
    let root_dict = root.as_dict().ok_or(MetainfoError::NotADict)?;
    let info = root_dict
        .get(&b"info"[..])
        .ok_or(MetainfoError::MissingField("info"))?;
    if info.as_dict().is_none() {
        return Err(MetainfoError::WrongType {
            field: "info",
            expected: "a dictionary",
        });
    }
    Ok(hash_bvalue(info))
}

/// Like [`info_hash`], rendered as 40 lowercase hex characters.
pub fn info_hash_hex(root: &BValue) -> Result<String, MetainfoError> {
    info_hash(root).map(hex::encode)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::bencode::decode_bencode;

    fn info_in_order(keys: &[&str]) -> BValue {
        let mut info = BTreeMap::new();
        for key in keys {
            let value = match *key {
                "length" => BValue::Integer(92063),
                "name" => BValue::string("sample.txt"),
                "piece length" => BValue::Integer(32768),
                _ => BValue::ByteString(vec![0xab; 20]),
            };
            info.insert(key.as_bytes().to_vec(), value);
        }
        let mut root = BTreeMap::new();
        root.insert(b"info".to_vec(), BValue::Dict(info));
        BValue::Dict(root)
    }

    #[test]
    fn test_hash_of_known_bytes() {
        // sha1("i42e")
        assert_eq!(
            hex::encode(hash_bvalue(&BValue::Integer(42))),
            "3ce69356df4222111c27b41cccf2164e6cced799"
        );
    }

    #[test]
    fn test_info_hash_ignores_attachment_order() {
        let a = info_in_order(&["length", "name", "piece length", "pieces"]);
        let b = info_in_order(&["pieces", "piece length", "name", "length"]);
        assert_eq!(info_hash(&a).unwrap(), info_hash(&b).unwrap());
    }

    #[test]
    fn test_info_hash_covers_only_info() {
        let (_, with_announce) =
            decode_bencode(b"d8:announce3:url4:infod4:name1:xee").unwrap();
        let (_, without) = decode_bencode(b"d4:infod4:name1:xee").unwrap();
        assert_eq!(
            info_hash(&with_announce).unwrap(),
            info_hash(&without).unwrap()
        );

        let (_, info) = decode_bencode(b"d4:name1:xe").unwrap();
        assert_eq!(info_hash(&without).unwrap(), hash_bvalue(&info));
    }

    #[test]
    fn test_info_hash_hex_is_40_chars() {
        let root = info_in_order(&["name"]);
        let hex = info_hash_hex(&root).unwrap();
        assert_eq!(hex.len(), 40);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_info_hash_errors() {
        assert!(matches!(
            info_hash(&BValue::Integer(1)),
            Err(MetainfoError::NotADict)
        ));

        let (_, no_info) = decode_bencode(b"d8:announce3:urle").unwrap();
        assert!(matches!(
            info_hash(&no_info),
            Err(MetainfoError::MissingField("info"))
        ));

        let (_, info_list) = decode_bencode(b"d4:infolee").unwrap();
        assert!(matches!(
            info_hash(&info_list),
            Err(MetainfoError::WrongType { field: "info", .. })
        ));
    }
}
