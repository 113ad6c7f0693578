//! [HTTP/2 frames][FRAMES].
//!
//! [FRAMES]: https://tools.ietf.org/html/rfc7540#section-6
//!
//! Every frame type has its own struct with a constructor that derives the
//! frame header from the typed fields, a `parse` function taking an already
//! parsed [`FrameHeader`] and the payload, and `payload`/`serialize`.
//! [`Frame`] is the sum of them all.
use std::fmt;
use std::io::{Read, Write};
use tracing::{debug, warn};

use crate::hpack::{DynamicTable, HeaderBlockEntry};
use crate::{ErrorKind, Result};

pub use self::continuation::ContinuationFrame;
pub use self::data::DataFrame;
pub use self::error_code::ErrorCode;
pub use self::goaway::GoawayFrame;
pub use self::header::{flags, FrameHeader, FrameType, FRAME_HEADER_LEN, MAX_PAYLOAD_LEN};
pub use self::headers::HeadersFrame;
pub use self::padding::MAX_PADDING_LEN;
pub use self::ping::{PingFrame, PING_DATA_LEN};
pub use self::priority::{Priority, PriorityFrame, PRIORITY_LEN};
pub use self::push_promise::PushPromiseFrame;
pub use self::raw::RawFrame;
pub use self::rst_stream::RstStreamFrame;
pub use self::settings::{SettingsFrame, SettingsParameter};
pub use self::window_update::WindowUpdateFrame;

mod continuation;
mod data;
mod error_code;
mod goaway;
mod header;
mod headers;
mod padding;
mod ping;
mod priority;
mod push_promise;
mod raw;
mod rst_stream;
mod settings;
mod window_update;

/// The octets a client sends before its first frame (RFC 7540 §3.5).
pub const CONNECTION_PREFACE: &[u8] = b"PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n";

fn concat(header: &FrameHeader, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(FRAME_HEADER_LEN + payload.len());
    buf.extend_from_slice(&header.serialize());
    buf.extend_from_slice(payload);
    buf
}

/// An HTTP/2 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Frame {
    Data(DataFrame),
    Headers(HeadersFrame),
    Priority(PriorityFrame),
    RstStream(RstStreamFrame),
    Settings(SettingsFrame),
    PushPromise(PushPromiseFrame),
    Ping(PingFrame),
    Goaway(GoawayFrame),
    WindowUpdate(WindowUpdateFrame),
    Continuation(ContinuationFrame),
    Raw(RawFrame),
}

macro_rules! each_frame {
    ($frame:expr, $f:ident => $e:expr) => {
        match $frame {
            Frame::Data($f) => $e,
            Frame::Headers($f) => $e,
            Frame::Priority($f) => $e,
            Frame::RstStream($f) => $e,
            Frame::Settings($f) => $e,
            Frame::PushPromise($f) => $e,
            Frame::Ping($f) => $e,
            Frame::Goaway($f) => $e,
            Frame::WindowUpdate($f) => $e,
            Frame::Continuation($f) => $e,
            Frame::Raw($f) => $e,
        }
    };
}

impl Frame {
    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        each_frame!(self, f => f.header())
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        each_frame!(self, f => Vec::<u8>::from(f.payload()))
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        each_frame!(self, f => f.serialize())
    }
}

macro_rules! impl_from_frame {
    ($variant:ident, $frame:ty) => {
        impl From<$frame> for Frame {
            fn from(f: $frame) -> Self {
                Frame::$variant(f)
            }
        }
    };
}
impl_from_frame!(Data, DataFrame);
impl_from_frame!(Headers, HeadersFrame);
impl_from_frame!(Priority, PriorityFrame);
impl_from_frame!(RstStream, RstStreamFrame);
impl_from_frame!(Settings, SettingsFrame);
impl_from_frame!(PushPromise, PushPromiseFrame);
impl_from_frame!(Ping, PingFrame);
impl_from_frame!(Goaway, GoawayFrame);
impl_from_frame!(WindowUpdate, WindowUpdateFrame);
impl_from_frame!(Continuation, ContinuationFrame);
impl_from_frame!(Raw, RawFrame);

/// Builds a frame from a parsed header and its payload.
///
/// `table` is the receiving direction's dynamic table. Unknown frame types
/// become [`Frame::Raw`]. So does a HEADERS frame whose payload fails to
/// parse; `table` is then left untouched. Any other parse failure is an error.
pub fn build_frame(header: FrameHeader, payload: &[u8], table: &mut DynamicTable) -> Result<Frame> {
    track_assert_eq!(
        header.length as usize,
        payload.len(),
        ErrorKind::InvalidInput,
        "Payload length does not match the frame header"
    );
    debug!("build_frame: {}", header);
    let frame: Frame = match header.frame_type {
        FrameType::Data => track!(DataFrame::parse(header, payload))?.into(),
        FrameType::Headers => match HeadersFrame::parse(header, payload, table) {
            Ok(frame) => frame.into(),
            Err(e) => {
                warn!("Cannot parse a HEADERS frame; kept as a raw frame: {}", e);
                track!(RawFrame::new(header, payload.to_vec()))?.into()
            }
        },
        FrameType::Priority => track!(PriorityFrame::parse(header, payload))?.into(),
        FrameType::RstStream => track!(RstStreamFrame::parse(header, payload))?.into(),
        FrameType::Settings => track!(SettingsFrame::parse(header, payload))?.into(),
        FrameType::PushPromise => track!(PushPromiseFrame::parse(header, payload, table))?.into(),
        FrameType::Ping => track!(PingFrame::parse(header, payload))?.into(),
        FrameType::Goaway => track!(GoawayFrame::parse(header, payload))?.into(),
        FrameType::WindowUpdate => track!(WindowUpdateFrame::parse(header, payload))?.into(),
        FrameType::Continuation => {
            track!(ContinuationFrame::parse(header, payload, table))?.into()
        }
        FrameType::Unknown(_) => track!(RawFrame::new(header, payload.to_vec()))?.into(),
    };
    Ok(frame)
}

/// Reads exactly one frame from `reader`.
pub fn read_frame<R: Read>(mut reader: R, table: &mut DynamicTable) -> Result<Frame> {
    let mut header = [0; FRAME_HEADER_LEN];
    track_io!(reader.read_exact(&mut header))?;
    let header = track!(FrameHeader::parse(&header))?;

    let mut payload = vec![0; header.length as usize];
    track_io!(reader.read_exact(&mut payload))?;
    track!(build_frame(header, &payload, table))
}

/// Writes `frame` to `writer`.
pub fn write_frame<W: Write>(mut writer: W, frame: &Frame) -> Result<()> {
    track_io!(writer.write_all(&frame.serialize()))?;
    Ok(())
}

fn fmt_entries(f: &mut fmt::Formatter, entries: &[HeaderBlockEntry]) -> fmt::Result {
    writeln!(f, "  Header Block:")?;
    for entry in entries {
        match *entry {
            HeaderBlockEntry::Field { ref header, .. } => writeln!(f, "    {}", header)?,
            HeaderBlockEntry::SizeUpdate { max_size } => {
                writeln!(f, "    {} (dynamic table size update)", max_size)?
            }
        }
    }
    Ok(())
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = self.header();
        writeln!(f, "=== {} FRAME ===", header.frame_type)?;
        writeln!(f, "[HEADER] {}", header)?;
        writeln!(f, "[PAYLOAD]")?;
        match *self {
            Frame::Data(ref frame) => writeln!(f, "  Data: {} octets", frame.data().len()),
            Frame::Headers(ref frame) => {
                if let Some(priority) = frame.priority() {
                    writeln!(
                        f,
                        "  Priority: exclusive={}, stream_dependency={}, weight={}",
                        priority.exclusive(),
                        priority.stream_dependency(),
                        priority.weight()
                    )?;
                }
                fmt_entries(f, frame.entries())
            }
            Frame::Priority(ref frame) => {
                let priority = frame.priority();
                writeln!(
                    f,
                    "  Priority: exclusive={}, stream_dependency={}, weight={}",
                    priority.exclusive(),
                    priority.stream_dependency(),
                    priority.weight()
                )
            }
            Frame::RstStream(ref frame) => writeln!(f, "  Error Code: {}", frame.error_code()),
            Frame::Settings(ref frame) => {
                for (id, value) in frame.settings() {
                    match SettingsParameter::from_id(*id) {
                        Some(parameter) => writeln!(f, "  {:?}: {}", parameter, value)?,
                        None => writeln!(f, "  Unknown(0x{:04x}): {}", id, value)?,
                    }
                }
                Ok(())
            }
            Frame::PushPromise(ref frame) => {
                writeln!(f, "  Promised Stream ID: {}", frame.promised_stream_id())?;
                fmt_entries(f, frame.entries())
            }
            Frame::Ping(ref frame) => writeln!(f, "  Opaque Data: {:?}", frame.opaque_data()),
            Frame::Goaway(ref frame) => {
                writeln!(f, "  Last Stream ID: {}", frame.last_stream_id())?;
                writeln!(f, "  Error Code: {}", frame.error_code())?;
                writeln!(
                    f,
                    "  Debug Data: {}",
                    String::from_utf8_lossy(frame.debug_data())
                )
            }
            Frame::WindowUpdate(ref frame) => writeln!(
                f,
                "  Window Size Increment: {}",
                frame.window_size_increment()
            ),
            Frame::Continuation(ref frame) => fmt_entries(f, frame.entries()),
            Frame::Raw(ref frame) => writeln!(f, "  Raw: {} octets", frame.payload().len()),
        }
    }
}
