use crate::bits::{self, MAX_STREAM_ID};
use crate::frame::header::{FrameHeader, FrameType};
use crate::io::SliceReader;
use crate::{ErrorKind, Result};

/// Size of the priority fields.
pub const PRIORITY_LEN: usize = 5;

/// Stream dependency and weight (RFC 7540 §5.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Priority {
    exclusive: u8,
    stream_dependency: u32,
    weight: u8,
}
impl Priority {
    /// Makes a new `Priority` instance.
    ///
    /// `exclusive` must be 0 or 1 and `stream_dependency` must fit in 31 bits.
    pub fn new(exclusive: u8, stream_dependency: u32, weight: u8) -> Result<Self> {
        track_assert!(
            exclusive <= 1,
            ErrorKind::OutOfRange,
            "Exclusive flag must be 0 or 1: {}",
            exclusive
        );
        track_assert!(
            stream_dependency <= MAX_STREAM_ID,
            ErrorKind::OutOfRange,
            "Too large stream dependency: {}",
            stream_dependency
        );
        Ok(Priority {
            exclusive,
            stream_dependency,
            weight,
        })
    }

    /// Returns the exclusive flag (0 or 1).
    pub fn exclusive(&self) -> u8 {
        self.exclusive
    }

    /// Returns the stream this stream depends on.
    pub fn stream_dependency(&self) -> u32 {
        self.stream_dependency
    }

    /// Returns the weight field; the effective weight is this value plus one.
    pub fn weight(&self) -> u8 {
        self.weight
    }

    /// Returns the wire form.
    pub fn to_bytes(&self) -> [u8; PRIORITY_LEN] {
        let mut buf = [0; PRIORITY_LEN];
        buf[..4].copy_from_slice(&bits::reserved_and_id_to_bytes(
            self.exclusive,
            self.stream_dependency,
        ));
        buf[4] = self.weight;
        buf
    }

    pub(crate) fn read_from(reader: &mut SliceReader) -> Result<Self> {
        let bytes = track!(reader.read_slice(PRIORITY_LEN))?;
        let (exclusive, stream_dependency) = bits::reserved_and_id_from_bytes(&bytes[..4]);
        Ok(Priority {
            exclusive,
            stream_dependency,
            weight: bytes[4],
        })
    }
}

/// PRIORITY frame (RFC 7540 §6.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityFrame {
    header: FrameHeader,
    priority: Priority,
}
impl PriorityFrame {
    /// Makes a new `PriorityFrame` instance.
    pub fn new(flags: u8, stream_id: u32, priority: Priority) -> Result<Self> {
        let header = track!(FrameHeader::new(
            PRIORITY_LEN,
            FrameType::Priority,
            flags,
            stream_id
        ))?;
        Ok(PriorityFrame { header, priority })
    }

    /// Parses a PRIORITY payload, which must be exactly five octets.
    pub fn parse(header: FrameHeader, payload: &[u8]) -> Result<Self> {
        track_assert_eq!(payload.len(), PRIORITY_LEN, ErrorKind::InvalidInput);
        let priority = track!(Priority::read_from(&mut SliceReader::new(payload)))?;
        Ok(PriorityFrame { header, priority })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the priority fields.
    pub fn priority(&self) -> &Priority {
        &self.priority
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        self.priority.to_bytes().to_vec()
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.payload())
    }
}
