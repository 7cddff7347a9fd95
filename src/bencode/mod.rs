pub mod bvalue;
pub mod decode;
pub mod encode;
pub mod error;
pub mod json;

pub use bvalue::BValue;   // re-export
pub use decode::{decode_all, decode_bencode, Decoder, DEFAULT_MAX_DEPTH};   // re-export
pub use encode::{encode_bvalue, encode_into};   // re-export
pub use error::BencodeError;
pub use json::bvalue_to_json;
