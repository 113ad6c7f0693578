use crate::frame::header::FrameHeader;
use crate::{ErrorKind, Result};

/// A frame kept as its header and undecoded payload.
///
/// Used for frame types without a codec and for HEADERS frames whose header
/// block could not be decoded. It serializes to exactly the received octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    header: FrameHeader,
    payload: Vec<u8>,
}
impl RawFrame {
    /// Makes a new `RawFrame` instance.
    pub fn new(header: FrameHeader, payload: Vec<u8>) -> Result<Self> {
        track_assert_eq!(
            header.length as usize,
            payload.len(),
            ErrorKind::InvalidInput
        );
        Ok(RawFrame { header, payload })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.payload)
    }
}
