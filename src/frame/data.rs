use crate::frame::header::{flags, FrameHeader, FrameType};
use crate::frame::padding;
use crate::Result;

/// DATA frame (RFC 7540 §6.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFrame {
    header: FrameHeader,
    data: Vec<u8>,
    padding: Option<Vec<u8>>,
}
impl DataFrame {
    /// Makes a new unpadded `DataFrame` instance.
    pub fn new(flags: u8, stream_id: u32, data: Vec<u8>) -> Result<Self> {
        let header = track!(FrameHeader::new(0, FrameType::Data, flags, stream_id))?;
        let mut frame = DataFrame {
            header,
            data,
            padding: None,
        };
        track!(frame.refresh_header())?;
        Ok(frame)
    }

    /// Pads the frame with `padding`, setting the PADDED flag.
    pub fn with_padding(mut self, padding: Vec<u8>) -> Result<Self> {
        track!(padding::check(&padding))?;
        self.padding = Some(padding);
        track!(self.refresh_header())?;
        Ok(self)
    }

    /// Parses a DATA payload.
    pub fn parse(header: FrameHeader, payload: &[u8]) -> Result<Self> {
        let (data, padding) = track!(padding::split(&header, payload))?;
        Ok(DataFrame {
            header,
            data: data.to_vec(),
            padding,
        })
    }

    /// Returns the frame header.
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Returns the application data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the padding octets if the frame is padded.
    pub fn padding(&self) -> Option<&[u8]> {
        self.padding.as_ref().map(|p| &p[..])
    }

    /// Returns `true` if END_STREAM is set.
    pub fn is_end_stream(&self) -> bool {
        self.header.has_flag(flags::END_STREAM)
    }

    /// Returns the payload octets.
    pub fn payload(&self) -> Vec<u8> {
        padding::wrap(self.data.clone(), self.padding())
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
            FrameType::Data,
            flags,
            self.header.stream_id
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn unpadded() {
        let frame = track_try_unwrap!(DataFrame::new(flags::END_STREAM, 1, b"hello".to_vec()));
        assert_eq!(frame.header().length, 5);
        assert!(frame.is_end_stream());
        assert_eq!(
            frame.serialize(),
            [0, 0, 5, 0, 1, 0, 0, 0, 1, b'h', b'e', b'l', b'l', b'o']
        );

        let parsed = track_try_unwrap!(DataFrame::parse(*frame.header(), &frame.payload()));
        assert_eq!(parsed, frame);
    }

    #[test]
    fn padded() {
        let frame = track_try_unwrap!(DataFrame::new(0, 3, b"hi".to_vec()));
        let frame = track_try_unwrap!(frame.with_padding(vec![0; 4]));
        assert_eq!(frame.header().flags, flags::PADDED);
        assert_eq!(frame.header().length, 7);
        assert_eq!(frame.payload(), [4, b'h', b'i', 0, 0, 0, 0]);

        let parsed = track_try_unwrap!(DataFrame::parse(*frame.header(), &frame.payload()));
        assert_eq!(parsed.data(), b"hi");
        assert_eq!(parsed.padding(), Some(&[0, 0, 0, 0][..]));
        assert_eq!(parsed, frame);
    }

    #[test]
    fn padded_flag_follows_padding() {
        let frame = track_try_unwrap!(DataFrame::new(flags::PADDED, 1, Vec::new()));
        assert_eq!(frame.header().flags, 0);
        assert_eq!(frame.header().length, 0);

        let e = frame.with_padding(vec![0; 256]).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::OutOfRange);
    }
}
