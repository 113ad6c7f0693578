use crate::bits::{self, MAX_STREAM_ID};
use crate::frame::header::{flags, FrameHeader, FrameType};
use crate::frame::padding;
use crate::hpack::{self, DynamicTable, Encoding, Header, HeaderBlockEntry};
use crate::{ErrorKind, Result};

/// PUSH_PROMISE frame (RFC 7540 §6.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushPromiseFrame {
    header: FrameHeader,
    padding: Option<Vec<u8>>,
    reserved: u8,
    promised_stream_id: u32,
    fragment: Vec<u8>,
    entries: Vec<HeaderBlockEntry>,
}
impl PushPromiseFrame {
    /// Makes a new `PushPromiseFrame` instance by encoding `entries`.
    ///
    /// `table` is updated only if the frame is successfully built.
    pub fn new(
        flags: u8,
        stream_id: u32,
        promised_stream_id: u32,
        entries: Vec<HeaderBlockEntry>,
        encoding: Encoding,
        table: &mut DynamicTable,
    ) -> Result<Self> {
        track_assert!(
            promised_stream_id <= MAX_STREAM_ID,
            ErrorKind::OutOfRange,
            "Too large promised stream identifier: {}",
            promised_stream_id
        );
        let header = track!(FrameHeader::new(0, FrameType::PushPromise, flags, stream_id))?;
        let mut scratch = table.clone();
        let (fragment, entries) = track!(hpack::encode_block(&entries, encoding, &mut scratch))?;
        let mut frame = PushPromiseFrame {
            header,
            padding: None,
            reserved: 0,
            promised_stream_id,
            fragment,
            entries,
        };
        track!(frame.refresh_header())?;
        *table = scratch;
        Ok(frame)
    }

    /// Pads the frame with `padding`, setting the PADDED flag.
    pub fn with_padding(mut self, padding: Vec<u8>) -> Result<Self> {
        track!(padding::check(&padding))?;
        self.padding = Some(padding);
        track!(self.refresh_header())?;
        Ok(self)
    }

    /// Sets the reserved bit preceding the promised stream identifier.
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

    /// Parses a PUSH_PROMISE payload, decoding its header block with `table`.
    pub fn parse(header: FrameHeader, payload: &[u8], table: &mut DynamicTable) -> Result<Self> {
        let (body, padding) = track!(padding::split(&header, payload))?;
        track_assert!(
            body.len() >= 4,
            ErrorKind::UnexpectedEos,
            "No promised stream identifier"
        );
        let (reserved, promised_stream_id) = bits::reserved_and_id_from_bytes(&body[..4]);
        let fragment = body[4..].to_vec();
        let entries = track!(hpack::decode_block(&fragment, table))?;
        Ok(PushPromiseFrame {
            header,
            padding,
            reserved,
            promised_stream_id,
            fragment,
            entries,
        })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the padding octets if the frame is padded.
    pub fn padding(&self) -> Option<&[u8]> {
        self.padding.as_ref().map(|p| &p[..])
    }

    /// Returns the reserved bit preceding the promised stream identifier.
    pub fn reserved(&self) -> u8 {
        self.reserved
    }

    /// Returns the identifier of the stream the sender reserves.
    pub fn promised_stream_id(&self) -> u32 {
        self.promised_stream_id
    }

    /// Returns the encoded header block fragment.
    pub fn fragment(&self) -> &[u8] {
        &self.fragment
    }

    /// Returns the header block entries.
    pub fn entries(&self) -> &[HeaderBlockEntry] {
        &self.entries
    }

    /// Returns the header fields, skipping table size updates.
    pub fn headers(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter().filter_map(HeaderBlockEntry::header)
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(4 + self.fragment.len());
        body.extend_from_slice(&bits::reserved_and_id_to_bytes(
            self.reserved,
            self.promised_stream_id,
        ));
        body.extend_from_slice(&self.fragment);
        padding::wrap(body, self.padding())
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.payload())
    }

    fn refresh_header(&mut self) -> Result<()> {
        let flags = padding::with_flag(self.header.flags, flags::PADDED, self.padding.is_some());
        let length = self.payload().len();
        self.header = track!(FrameHeader::new(
            length,
            FrameType::PushPromise,
            flags,
            self.header.stream_id
        ))?;
        Ok(())
    }
}
