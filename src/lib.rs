//! Encoder and Decoder for [HTTP/2 frames (RFC 7540)][H2] and [HPACK (RFC 7541)][HPACK].
//!
//! [H2]: https://tools.ietf.org/html/rfc7540#section-4
//! [HPACK]: https://tools.ietf.org/html/rfc7541
//!
//! The crate is a stateless-per-call codec. The only state is the pair of
//! HPACK dynamic tables a connection keeps (one per direction); they are owned
//! by the caller and passed into each header-bearing encode/decode call.
//!
//! # Examples
//!
//! ```
//! use h2_codec::frame::{self, Frame, FrameHeader, HeadersFrame, flags};
//! use h2_codec::hpack::{make_header_block, DynamicTable, Encoding, Header, Representation};
//!
//! // Sending side
//! let mut request_table = DynamicTable::default();
//! let block = make_header_block(
//!     Representation::IncrementalIndexing,
//!     vec![Header::new(":method", "GET"), Header::new("hoge", "fuga")],
//! );
//! let headers = HeadersFrame::new(
//!     flags::END_HEADERS | flags::END_STREAM,
//!     1,
//!     block,
//!     Encoding::Huffman,
//!     &mut request_table,
//! ).unwrap();
//! let bytes = headers.serialize();
//!
//! // Receiving side
//! let mut response_table = DynamicTable::default();
//! let header = FrameHeader::parse(&bytes[..9]).unwrap();
//! let frame = frame::build_frame(header, &bytes[9..], &mut response_table).unwrap();
//! assert_eq!(frame, Frame::Headers(headers));
//! assert_eq!(response_table.at(0), Some(&Header::new("hoge", "fuga")));
//! ```
#![warn(missing_docs)]
#[macro_use]
extern crate trackable;

macro_rules! track_io {
    ($e:expr) => {
        $e.map_err(|e| {
            use trackable::error::ErrorKindExt;
            let kind = if e.kind() == std::io::ErrorKind::UnexpectedEof {
                crate::ErrorKind::UnexpectedEos
            } else {
                crate::ErrorKind::Io
            };
            kind.cause(e)
        })
    };
}

pub use crate::error::{Error, ErrorKind};

pub mod bits;
pub mod frame;
pub mod hpack;
pub mod io;

mod error;

/// This crate specific `Result` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
