use crate::frame::header::{flags, FrameHeader, FrameType};
use crate::hpack::{self, DynamicTable, Encoding, Header, HeaderBlockEntry};
use crate::Result;

/// CONTINUATION frame (RFC 7540 §6.10).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationFrame {
    header: FrameHeader,
    fragment: Vec<u8>,
    entries: Vec<HeaderBlockEntry>,
}
impl ContinuationFrame {
    /// Makes a new `ContinuationFrame` instance by encoding `entries`.
    ///
    /// `table` is updated only if the frame is successfully built.
    pub fn new(
        flags: u8,
        stream_id: u32,
        entries: Vec<HeaderBlockEntry>,
        encoding: Encoding,
        table: &mut DynamicTable,
    ) -> Result<Self> {
        track!(FrameHeader::new(0, FrameType::Continuation, flags, stream_id))?;
        let mut scratch = table.clone();
        let (fragment, entries) = track!(hpack::encode_block(&entries, encoding, &mut scratch))?;
        let header = track!(FrameHeader::new(
            fragment.len(),
            FrameType::Continuation,
            flags,
            stream_id
        ))?;
        *table = scratch;
        Ok(ContinuationFrame {
            header,
            fragment,
            entries,
        })
    }

    /// Parses a CONTINUATION payload, decoding its header block with `table`.
    pub fn parse(header: FrameHeader, payload: &[u8], table: &mut DynamicTable) -> Result<Self> {
        let entries = track!(hpack::decode_block(payload, table))?;
        Ok(ContinuationFrame {
            header,
            fragment: payload.to_vec(),
            entries,
        })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
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

    /// Returns `true` if END_HEADERS is set.
    pub fn is_end_headers(&self) -> bool {
        self.header.has_flag(flags::END_HEADERS)
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        self.fragment.clone()
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.fragment)
    }
}
