use byteorder::{BigEndian, ByteOrder};
use std::collections::BTreeMap;

use crate::frame::header::{flags, FrameHeader, FrameType};
use crate::{ErrorKind, Result};

const SETTING_LEN: usize = 6;

/// Registered SETTINGS parameters (RFC 7540 §6.5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum SettingsParameter {
    HeaderTableSize = 0x1,
    EnablePush = 0x2,
    MaxConcurrentStreams = 0x3,
    InitialWindowSize = 0x4,
    MaxFrameSize = 0x5,
    MaxHeaderListSize = 0x6,
}
impl SettingsParameter {
    /// Returns the identifier.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Returns the parameter registered under `id`.
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            0x1 => Some(SettingsParameter::HeaderTableSize),
            0x2 => Some(SettingsParameter::EnablePush),
            0x3 => Some(SettingsParameter::MaxConcurrentStreams),
            0x4 => Some(SettingsParameter::InitialWindowSize),
            0x5 => Some(SettingsParameter::MaxFrameSize),
            0x6 => Some(SettingsParameter::MaxHeaderListSize),
            _ => None,
        }
    }
}

/// SETTINGS frame (RFC 7540 §6.5).
///
/// Parameters are kept ordered by identifier, so serialization is
/// deterministic. Unregistered identifiers are carried as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFrame {
    header: FrameHeader,
    settings: BTreeMap<u16, u32>,
}
impl SettingsFrame {
    /// Makes a new `SettingsFrame` instance.
    pub fn new(flags: u8, stream_id: u32, settings: BTreeMap<u16, u32>) -> Result<Self> {
        track_assert!(
            flags & flags::ACK == 0 || settings.is_empty(),
            ErrorKind::OutOfRange,
            "SETTINGS ACK must have an empty payload"
        );
        let header = track!(FrameHeader::new(
            settings.len() * SETTING_LEN,
            FrameType::Settings,
            flags,
            stream_id
        ))?;
        Ok(SettingsFrame { header, settings })
    }

    /// Makes a SETTINGS frame acknowledging the peer's settings.
    pub fn ack() -> Self {
        SettingsFrame {
            header: FrameHeader {
                length: 0,
                frame_type: FrameType::Settings,
                flags: flags::ACK,
                reserved: 0,
                stream_id: 0,
            },
            settings: BTreeMap::new(),
        }
    }

    /// Parses a SETTINGS payload.
    pub fn parse(header: FrameHeader, payload: &[u8]) -> Result<Self> {
        track_assert_eq!(
            payload.len() % SETTING_LEN,
            0,
            ErrorKind::InvalidInput,
            "payload.len={}",
            payload.len()
        );
        if header.has_flag(flags::ACK) {
            track_assert!(
                payload.is_empty(),
                ErrorKind::InvalidInput,
                "SETTINGS ACK with {} octets of payload",
                payload.len()
            );
        }
        let settings = payload
            .chunks(SETTING_LEN)
            .map(|chunk| {
                (
                    BigEndian::read_u16(&chunk[..2]),
                    BigEndian::read_u32(&chunk[2..]),
                )
            })
            .collect();
        Ok(SettingsFrame { header, settings })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns `true` if this is an acknowledgement.
    pub fn is_ack(&self) -> bool {
        self.header.has_flag(flags::ACK)
    }

    /// Returns every parameter, ordered by identifier.
    pub fn settings(&self) -> &BTreeMap<u16, u32> {
        &self.settings
    }

    /// Returns the value of `parameter` if present.
    pub fn get(&self, parameter: SettingsParameter) -> Option<u32> {
        self.settings.get(&parameter.id()).copied()
    }

    /// Returns SETTINGS_HEADER_TABLE_SIZE if present.
    ///
    /// This is the size the peer allows our HPACK encoder's dynamic table to grow to.
    pub fn header_table_size(&self) -> Option<u32> {
        self.get(SettingsParameter::HeaderTableSize)
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        let mut buf = vec![0; self.settings.len() * SETTING_LEN];
        for ((&id, &value), chunk) in self.settings.iter().zip(buf.chunks_mut(SETTING_LEN)) {
            BigEndian::write_u16(&mut chunk[..2], id);
            BigEndian::write_u32(&mut chunk[2..], value);
        }
        buf
    }

    /// Returns the frame header followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        super::concat(&self.header, &self.payload())
    }
}
