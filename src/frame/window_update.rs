use crate::bits::{self, MAX_STREAM_ID};
use crate::frame::header::{FrameHeader, FrameType};
use crate::{ErrorKind, Result};

/// WINDOW_UPDATE frame (RFC 7540 §6.9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowUpdateFrame {
    header: FrameHeader,
    reserved: u8,
    window_size_increment: u32,
}
impl WindowUpdateFrame {
    /// Makes a new `WindowUpdateFrame` instance.
    pub fn new(flags: u8, stream_id: u32, window_size_increment: u32) -> Result<Self> {
        track_assert!(
            window_size_increment <= MAX_STREAM_ID,
            ErrorKind::OutOfRange,
            "Too large window size increment: {}",
            window_size_increment
        );
        let header = track!(FrameHeader::new(4, FrameType::WindowUpdate, flags, stream_id))?;
        Ok(WindowUpdateFrame {
            header,
            reserved: 0,
            window_size_increment,
        })
    }

    /// Sets the reserved bit.
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

    /// Parses a WINDOW_UPDATE payload, which must be exactly four octets.
    pub fn parse(header: FrameHeader, payload: &[u8]) -> Result<Self> {
        track_assert_eq!(payload.len(), 4, ErrorKind::InvalidInput);
        let (reserved, window_size_increment) = bits::reserved_and_id_from_bytes(payload);
        Ok(WindowUpdateFrame {
            header,
            reserved,
            window_size_increment,
        })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the reserved bit.
    pub fn reserved(&self) -> u8 {
        self.reserved
    }

    /// Returns the flow control window increment.
    pub fn window_size_increment(&self) -> u32 {
        self.window_size_increment
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        bits::reserved_and_id_to_bytes(self.reserved, self.window_size_increment).to_vec()
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
        let frame = track_try_unwrap!(WindowUpdateFrame::new(0, 0, 0x7fff_0000));
        assert_eq!(
            frame.serialize(),
            [0, 0, 4, 8, 0, 0, 0, 0, 0, 0x7f, 0xff, 0, 0]
        );
        let parsed = track_try_unwrap!(WindowUpdateFrame::parse(*frame.header(), &frame.payload()));
        assert_eq!(parsed, frame);
    }

    #[test]
    fn reserved_bit_round_trip() {
        let frame = track_try_unwrap!(WindowUpdateFrame::new(0, 3, 1024));
        let frame = track_try_unwrap!(frame.with_reserved(1));
        assert_eq!(frame.payload(), [0x80, 0, 0x04, 0]);

        let parsed = track_try_unwrap!(WindowUpdateFrame::parse(*frame.header(), &frame.payload()));
        assert_eq!(parsed, frame);
        assert_eq!(parsed.reserved(), 1);

        let e = frame.with_reserved(2).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn increment_must_fit_in_31_bits() {
        assert!(WindowUpdateFrame::new(0, 1, MAX_STREAM_ID).is_ok());
        let e = WindowUpdateFrame::new(0, 1, 0x8000_0000).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn wrong_length() {
        let header = track_try_unwrap!(FrameHeader::new(3, FrameType::WindowUpdate, 0, 0));
        let e = WindowUpdateFrame::parse(header, &[0; 3]).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::InvalidInput);
    }
}
