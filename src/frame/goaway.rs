use byteorder::{BigEndian, ByteOrder};

use crate::bits::{self, MAX_STREAM_ID};
use crate::frame::error_code::ErrorCode;
use crate::frame::header::{FrameHeader, FrameType};
use crate::{ErrorKind, Result};

const FIXED_LEN: usize = 8;

/// GOAWAY frame (RFC 7540 §6.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoawayFrame {
    header: FrameHeader,
    reserved: u8,
    last_stream_id: u32,
    error_code: ErrorCode,
    debug_data: Vec<u8>,
}
impl GoawayFrame {
    /// Makes a new `GoawayFrame` instance.
    pub fn new(
        flags: u8,
        stream_id: u32,
        last_stream_id: u32,
        error_code: ErrorCode,
        debug_data: Vec<u8>,
    ) -> Result<Self> {
        track_assert!(
            last_stream_id <= MAX_STREAM_ID,
            ErrorKind::OutOfRange,
            "Too large last stream identifier: {}",
            last_stream_id
        );
        let header = track!(FrameHeader::new(
            FIXED_LEN + debug_data.len(),
            FrameType::Goaway,
            flags,
            stream_id
        ))?;
        Ok(GoawayFrame {
            header,
            reserved: 0,
            last_stream_id,
            error_code,
            debug_data,
        })
    }

    /// Sets the reserved bit preceding the last stream identifier.
    pub fn with_reserved(mut self, reserved: u8) -> Result<Self> {
        track_assert!(
            reserved <= 1,
            ErrorKind::OutOfRange,
            "Reserved bit must be 0 or 1: {}",
            reserved
        );
        self.reserved = reserved;
        Ok(self)
    }

    /// Parses a GOAWAY payload.
    pub fn parse(header: FrameHeader, payload: &[u8]) -> Result<Self> {
        track_assert!(
            payload.len() >= FIXED_LEN,
            ErrorKind::UnexpectedEos,
            "payload.len={}",
            payload.len()
        );
        let (reserved, last_stream_id) = bits::reserved_and_id_from_bytes(&payload[..4]);
        let error_code = ErrorCode::from(BigEndian::read_u32(&payload[4..8]));
        Ok(GoawayFrame {
            header,
            reserved,
            last_stream_id,
            error_code,
            debug_data: payload[FIXED_LEN..].to_vec(),
        })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the reserved bit preceding the last stream identifier.
    pub fn reserved(&self) -> u8 {
        self.reserved
    }

    /// Returns the highest stream identifier the sender may have acted on.
    pub fn last_stream_id(&self) -> u32 {
        self.last_stream_id
    }

    /// Returns the reason for closing the connection.
    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// Returns the additional diagnostic data.
    pub fn debug_data(&self) -> &[u8] {
        &self.debug_data
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FIXED_LEN + self.debug_data.len());
        buf.extend_from_slice(&bits::reserved_and_id_to_bytes(
            self.reserved,
            self.last_stream_id,
        ));
        let mut code = [0; 4];
        BigEndian::write_u32(&mut code, self.error_code.as_u32());
        buf.extend_from_slice(&code);
        buf.extend_from_slice(&self.debug_data);
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
        let frame = track_try_unwrap!(GoawayFrame::new(
            0,
            0,
            7,
            ErrorCode::ProtocolError,
            b"bye".to_vec()
        ));
        assert_eq!(
            frame.serialize(),
            [0, 0, 11, 7, 0, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 1, b'b', b'y', b'e']
        );

        let parsed = track_try_unwrap!(GoawayFrame::parse(*frame.header(), &frame.payload()));
        assert_eq!(parsed, frame);
        assert_eq!(parsed.debug_data(), b"bye");
    }

    #[test]
    fn reserved_bit_is_preserved() {
        let header = track_try_unwrap!(FrameHeader::new(8, FrameType::Goaway, 0, 0));
        let payload = [0x80, 0, 0, 1, 0, 0, 0, 0];
        let frame = track_try_unwrap!(GoawayFrame::parse(header, &payload));
        assert_eq!(frame.reserved(), 1);
        assert_eq!(frame.last_stream_id(), 1);
        assert_eq!(frame.error_code(), ErrorCode::NoError);
        assert_eq!(frame.payload(), payload);
    }

    #[test]
    fn reserved_bit_round_trip() {
        let frame = track_try_unwrap!(GoawayFrame::new(0, 0, 5, ErrorCode::NoError, Vec::new()));
        let frame = track_try_unwrap!(frame.with_reserved(1));
        assert_eq!(frame.payload(), [0x80, 0, 0, 5, 0, 0, 0, 0]);

        let parsed = track_try_unwrap!(GoawayFrame::parse(*frame.header(), &frame.payload()));
        assert_eq!(parsed, frame);

        let e = frame.with_reserved(2).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn invalid_fields() {
        let e = GoawayFrame::new(0, 0, MAX_STREAM_ID + 1, ErrorCode::NoError, Vec::new())
            .err()
            .unwrap();
        assert_eq!(*e.kind(), ErrorKind::OutOfRange);

        let header = track_try_unwrap!(FrameHeader::new(7, FrameType::Goaway, 0, 0));
        let e = GoawayFrame::parse(header, &[0; 7]).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::UnexpectedEos);
    }
}
