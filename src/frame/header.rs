use byteorder::{BigEndian, ByteOrder};
use std::fmt;

use crate::bits::{self, MAX_STREAM_ID};
use crate::{ErrorKind, Result};

/// Size of the fixed frame header.
pub const FRAME_HEADER_LEN: usize = 9;

/// The largest payload length a 24-bit length field can carry.
pub const MAX_PAYLOAD_LEN: usize = 0xff_ffff;

/// Frame flag bits (RFC 7540 §6).
///
/// The meaning of a bit depends on the frame type, so `END_STREAM` and `ACK` share a value.
pub mod flags {
    /// DATA, HEADERS: the last frame of the stream.
    pub const END_STREAM: u8 = 0x01;

    /// SETTINGS, PING: acknowledgement.
    pub const ACK: u8 = 0x01;

    /// HEADERS, PUSH_PROMISE, CONTINUATION: the header block ends in this frame.
    pub const END_HEADERS: u8 = 0x04;

    /// DATA, HEADERS, PUSH_PROMISE: the payload is padded.
    pub const PADDED: u8 = 0x08;

    /// HEADERS: the payload starts with priority fields.
    pub const PRIORITY: u8 = 0x20;
}

/// Frame type (RFC 7540 §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FrameType {
    Data,
    Headers,
    Priority,
    RstStream,
    Settings,
    PushPromise,
    Ping,
    Goaway,
    WindowUpdate,
    Continuation,

    /// A type this crate has no codec for; carried as a raw frame.
    Unknown(u8),
}
impl FrameType {
    /// Returns the type code.
    pub fn as_u8(self) -> u8 {
        match self {
            FrameType::Data => 0x0,
            FrameType::Headers => 0x1,
            FrameType::Priority => 0x2,
            FrameType::RstStream => 0x3,
            FrameType::Settings => 0x4,
            FrameType::PushPromise => 0x5,
            FrameType::Ping => 0x6,
            FrameType::Goaway => 0x7,
            FrameType::WindowUpdate => 0x8,
            FrameType::Continuation => 0x9,
            FrameType::Unknown(code) => code,
        }
    }
}
impl From<u8> for FrameType {
    fn from(f: u8) -> Self {
        match f {
            0x0 => FrameType::Data,
            0x1 => FrameType::Headers,
            0x2 => FrameType::Priority,
            0x3 => FrameType::RstStream,
            0x4 => FrameType::Settings,
            0x5 => FrameType::PushPromise,
            0x6 => FrameType::Ping,
            0x7 => FrameType::Goaway,
            0x8 => FrameType::WindowUpdate,
            0x9 => FrameType::Continuation,
            code => FrameType::Unknown(code),
        }
    }
}
impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FrameType::Data => write!(f, "DATA"),
            FrameType::Headers => write!(f, "HEADERS"),
            FrameType::Priority => write!(f, "PRIORITY"),
            FrameType::RstStream => write!(f, "RST_STREAM"),
            FrameType::Settings => write!(f, "SETTINGS"),
            FrameType::PushPromise => write!(f, "PUSH_PROMISE"),
            FrameType::Ping => write!(f, "PING"),
            FrameType::Goaway => write!(f, "GOAWAY"),
            FrameType::WindowUpdate => write!(f, "WINDOW_UPDATE"),
            FrameType::Continuation => write!(f, "CONTINUATION"),
            FrameType::Unknown(code) => write!(f, "UNKNOWN(0x{:02x})", code),
        }
    }
}

/// The 9-octet header every frame starts with (RFC 7540 §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHeader {
    /// Payload length (24 bits).
    pub length: u32,

    /// Frame type.
    pub frame_type: FrameType,

    /// Type specific flags.
    pub flags: u8,

    /// Reserved bit.
    pub reserved: u8,

    /// Stream identifier (31 bits).
    pub stream_id: u32,
}
impl FrameHeader {
    /// Makes a header for a payload of `length` octets.
    pub fn new(length: usize, frame_type: FrameType, flags: u8, stream_id: u32) -> Result<Self> {
        track_assert!(
            length <= MAX_PAYLOAD_LEN,
            ErrorKind::OutOfRange,
            "Too large payload: {} octets",
            length
        );
        track_assert!(
            stream_id <= MAX_STREAM_ID,
            ErrorKind::OutOfRange,
            "Too large stream identifier: {}",
            stream_id
        );
        Ok(FrameHeader {
            length: length as u32,
            frame_type,
            flags,
            reserved: 0,
            stream_id,
        })
    }

    /// Returns `true` if every bit of `flag` is set.
    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag == flag
    }

    /// Returns the wire form of this header.
    pub fn serialize(&self) -> [u8; FRAME_HEADER_LEN] {
        let mut buf = [0; FRAME_HEADER_LEN];
        BigEndian::write_u24(&mut buf[0..3], bits::extract_low_bits(self.length, 24));
        buf[3] = self.frame_type.as_u8();
        buf[4] = self.flags;
        buf[5..9].copy_from_slice(&bits::reserved_and_id_to_bytes(
            self.reserved,
            self.stream_id,
        ));
        buf
    }

    /// Parses the header at the start of `bytes`.
    ///
    /// Only the length of `bytes` is checked; field values are taken as is.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        track_assert!(
            bytes.len() >= FRAME_HEADER_LEN,
            ErrorKind::UnexpectedEos,
            "Too short frame header: {} octets",
            bytes.len()
        );
        let (reserved, stream_id) = bits::reserved_and_id_from_bytes(&bytes[5..9]);
        Ok(FrameHeader {
            length: BigEndian::read_u24(&bytes[0..3]),
            frame_type: FrameType::from(bytes[3]),
            flags: bytes[4],
            reserved,
            stream_id,
        })
    }
}
impl fmt::Display for FrameHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "length={}, type={}, flags=0x{:02x}, reserved={}, stream_id={}",
            self.length, self.frame_type, self.flags, self.reserved, self.stream_id
        )
    }
}
