use crate::frame::header::{flags, FrameHeader, FrameType};
use crate::frame::padding;
use crate::frame::priority::Priority;
use crate::hpack::{self, DynamicTable, Encoding, Header, HeaderBlockEntry};
use crate::io::SliceReader;
use crate::Result;

/// HEADERS frame (RFC 7540 §6.2).
///
/// Keeps both the encoded header block fragment, which is serialized
/// verbatim, and the entries it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadersFrame {
    header: FrameHeader,
    padding: Option<Vec<u8>>,
    priority: Option<Priority>,
    fragment: Vec<u8>,
    entries: Vec<HeaderBlockEntry>,
}
impl HeadersFrame {
    /// Makes a new `HeadersFrame` instance by encoding `entries`.
    ///
    /// `table` is the sending direction's dynamic table; it is updated only if
    /// the frame is successfully built.
    pub fn new(
        flags: u8,
        stream_id: u32,
        entries: Vec<HeaderBlockEntry>,
        encoding: Encoding,
        table: &mut DynamicTable,
    ) -> Result<Self> {
        let header = track!(FrameHeader::new(0, FrameType::Headers, flags, stream_id))?;
        let mut scratch = table.clone();
        let (fragment, entries) = track!(hpack::encode_block(&entries, encoding, &mut scratch))?;
        let mut frame = HeadersFrame {
            header,
            padding: None,
            priority: None,
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

    /// Adds priority fields, setting the PRIORITY flag.
    pub fn with_priority(mut self, priority: Priority) -> Result<Self> {
        self.priority = Some(priority);
        track!(self.refresh_header())?;
        Ok(self)
    }

    /// Parses a HEADERS payload, decoding its header block with `table`.
    ///
    /// `table` is left untouched on error.
    pub fn parse(header: FrameHeader, payload: &[u8], table: &mut DynamicTable) -> Result<Self> {
        let (body, padding) = track!(padding::split(&header, payload))?;
        let mut reader = SliceReader::new(body);
        let priority = if header.has_flag(flags::PRIORITY) {
            Some(track!(Priority::read_from(&mut reader))?)
        } else {
            None
        };
        let fragment = reader.read_rest().to_vec();
        let entries = track!(hpack::decode_block(&fragment, table))?;
        Ok(HeadersFrame {
            header,
            padding,
            priority,
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

    /// Returns the priority fields if present.
    pub fn priority(&self) -> Option<&Priority> {
        self.priority.as_ref()
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

    /// Returns `true` if END_STREAM is set.
    pub fn is_end_stream(&self) -> bool {
        self.header.has_flag(flags::END_STREAM)
    }

    /// Returns `true` if END_HEADERS is set.
    pub fn is_end_headers(&self) -> bool {
        self.header.has_flag(flags::END_HEADERS)
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(priority) = self.priority {
            body.extend_from_slice(&priority.to_bytes());
        }
        body.extend_from_slice(&self.fragment);
        padding::wrap(body, self.padding())
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.payload())
    }

    fn refresh_header(&mut self) -> Result<()> {
        let flags = padding::with_flag(self.header.flags, flags::PADDED, self.padding.is_some());
        let flags = padding::with_flag(flags, flags::PRIORITY, self.priority.is_some());
        let length = self.payload().len();
        self.header = track!(FrameHeader::new(
            length,
            FrameType::Headers,
            flags,
            self.header.stream_id
        ))?;
        Ok(())
    }
}
