use byteorder::{BigEndian, ByteOrder};

use crate::frame::error_code::ErrorCode;
use crate::frame::header::{FrameHeader, FrameType};
use crate::{ErrorKind, Result};

/// RST_STREAM frame (RFC 7540 §6.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RstStreamFrame {
    header: FrameHeader,
    error_code: ErrorCode,
}
impl RstStreamFrame {
    /// Makes a new `RstStreamFrame` instance.
    pub fn new(flags: u8, stream_id: u32, error_code: ErrorCode) -> Result<Self> {
        let header = track!(FrameHeader::new(4, FrameType::RstStream, flags, stream_id))?;
        Ok(RstStreamFrame { header, error_code })
    }

    /// Parses a RST_STREAM payload, which must be exactly four octets.
    pub fn parse(header: FrameHeader, payload: &[u8]) -> Result<Self> {
        track_assert_eq!(payload.len(), 4, ErrorKind::InvalidInput);
        let error_code = ErrorCode::from(BigEndian::read_u32(payload));
        Ok(RstStreamFrame { header, error_code })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        let mut buf = vec![0; 4];
        BigEndian::write_u32(&mut buf, self.error_code.as_u32());
        buf
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.payload())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let frame = track_try_unwrap!(RstStreamFrame::new(0, 1, ErrorCode::Cancel));
        assert_eq!(frame.serialize(), [0, 0, 4, 3, 0, 0, 0, 0, 1, 0, 0, 0, 8]);

        let parsed = track_try_unwrap!(RstStreamFrame::parse(*frame.header(), &frame.payload()));
        assert_eq!(parsed, frame);
    }

    #[test]
    fn unknown_code_is_preserved() {
        let header = track_try_unwrap!(FrameHeader::new(4, FrameType::RstStream, 0, 1));
        let frame = track_try_unwrap!(RstStreamFrame::parse(header, &[0, 0, 0x12, 0x34]));
        assert_eq!(frame.error_code(), ErrorCode::Unknown(0x1234));
        assert_eq!(frame.payload(), [0, 0, 0x12, 0x34]);
    }

    #[test]
    fn wrong_length() {
        let header = track_try_unwrap!(FrameHeader::new(5, FrameType::RstStream, 0, 1));
        let e = RstStreamFrame::parse(header, &[0; 5]).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::InvalidInput);
    }
}
