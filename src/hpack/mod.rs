//! [HPACK] header compression.
//!
//! [HPACK]: https://tools.ietf.org/html/rfc7541
//!
//! Header blocks are encoded and decoded against a [`DynamicTable`] owned by
//! the caller. A connection keeps one table per direction.
//!
//! # Examples
//!
//! ```
//! use h2_codec::hpack::{self, DynamicTable, Encoding, Header, Representation};
//!
//! let headers = vec![
//!     Header::new(":method", "GET"),
//!     Header::new(":authority", "www.example.com"),
//! ];
//! let entries = hpack::make_header_block(Representation::IncrementalIndexing, headers);
//!
//! let mut encoder_table = DynamicTable::default();
//! let (block, _) = hpack::encode_block(&entries, Encoding::Raw, &mut encoder_table).unwrap();
//! assert_eq!(block[0], 0x82);
//!
//! let mut decoder_table = DynamicTable::default();
//! let decoded = hpack::decode_block(&block, &mut decoder_table).unwrap();
//! assert_eq!(decoded, entries);
//! assert_eq!(decoder_table, encoder_table);
//! ```
pub use self::decoder::{decode_block, HeaderBlockDecoder};
pub use self::encoder::{encode_block, HeaderBlockEncoder};
pub use self::field::{
    decode_entry, decode_entry_slice, encode_entry, make_header_block, HeaderBlockEntry,
    PrefixPattern, Representation, TableUpdate,
};
pub use self::literal::Encoding;
pub use self::table::{DynamicTable, Header, StaticEntry};

pub mod huffman;
pub mod literal;
pub mod table;

mod decoder;
mod encoder;
mod field;
