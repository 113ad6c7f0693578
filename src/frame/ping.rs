use crate::frame::header::{flags, FrameHeader, FrameType};
use crate::{ErrorKind, Result};

/// Size of the opaque data of a PING frame.
pub const PING_DATA_LEN: usize = 8;

/// PING frame (RFC 7540 §6.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingFrame {
    header: FrameHeader,
    opaque_data: [u8; PING_DATA_LEN],
}
impl PingFrame {
    /// Makes a new `PingFrame` instance.
    ///
    /// `data` shorter than eight octets is zero padded; longer data is rejected.
    pub fn new(flags: u8, stream_id: u32, data: &[u8]) -> Result<Self> {
        track_assert!(
            data.len() <= PING_DATA_LEN,
            ErrorKind::OutOfRange,
            "Too long opaque data: {} octets",
            data.len()
        );
        let header = track!(FrameHeader::new(
            PING_DATA_LEN,
            FrameType::Ping,
            flags,
            stream_id
        ))?;
        let mut opaque_data = [0; PING_DATA_LEN];
        opaque_data[..data.len()].copy_from_slice(data);
        Ok(PingFrame {
            header,
            opaque_data,
        })
    }

    /// Parses a PING payload, which must be exactly eight octets.
    pub fn parse(header: FrameHeader, payload: &[u8]) -> Result<Self> {
        track_assert_eq!(payload.len(), PING_DATA_LEN, ErrorKind::InvalidInput);
        let mut opaque_data = [0; PING_DATA_LEN];
        opaque_data.copy_from_slice(payload);
        Ok(PingFrame {
            header,
            opaque_data,
        })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns `true` if this is a PING response.
    pub fn is_ack(&self) -> bool {
        self.header.has_flag(flags::ACK)
    }

    /// Returns the opaque data.
    pub fn opaque_data(&self) -> &[u8; PING_DATA_LEN] {
        &self.opaque_data
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        self.opaque_data.to_vec()
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.payload())
    }
}
