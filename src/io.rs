//! Input cursor used by the decoders.
use crate::{ErrorKind, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Read, Result as IoResult};

/// Cursor over a borrowed input buffer.
///
/// Decoders read through it so that the exact number of consumed octets is
/// always known (header blocks carry no per-entry length delimiter).
#[derive(Debug)]
pub struct SliceReader<'a> {
    slice: &'a [u8],
    offset: usize,
}
impl<'a> SliceReader<'a> {
    /// Makes a new reader positioned at the start of `slice`.
    pub fn new(slice: &'a [u8]) -> Self {
        SliceReader { slice, offset: 0 }
    }
    /// Returns `true` if every octet has been consumed.
    pub fn eos(&self) -> bool {
        debug_assert!(self.offset <= self.slice.len());
        self.offset == self.slice.len()
    }
    /// Returns the number of octets consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }
    /// Returns the number of unconsumed octets.
    pub fn remaining(&self) -> usize {
        self.slice.len() - self.offset
    }
    /// Returns the next octet without consuming it.
    pub fn peek_u8(&mut self) -> Result<u8> {
        let value = track_io!(self.read_u8())?;
        self.unread();
        Ok(value)
    }
    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        track_assert!(
            self.remaining() >= 4,
            ErrorKind::UnexpectedEos,
            "offset={}, slice.len={}",
            self.offset,
            self.slice.len()
        );
        let value = track_io!(ReadBytesExt::read_u32::<BigEndian>(self))?;
        Ok(value)
    }
    /// Consumes `size` octets and returns them.
    pub fn read_slice(&mut self, size: usize) -> Result<&'a [u8]> {
        track_assert!(
            size <= self.remaining(),
            ErrorKind::UnexpectedEos,
            "offset={}, size={}, slice.len={}",
            self.offset,
            size,
            self.slice.len()
        );
        let slice = &self.slice[self.offset..self.offset + size];
        self.offset += size;
        Ok(slice)
    }
    /// Consumes every remaining octet.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let slice = &self.slice[self.offset..];
        self.offset = self.slice.len();
        slice
    }

    fn unread(&mut self) {
        debug_assert!(self.offset > 0);
        self.offset -= 1;
    }
}
impl<'a> Read for SliceReader<'a> {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        let size = (&self.slice[self.offset..]).read(buf)?;
        self.offset += size;
        Ok(size)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_are_bounded_by_the_slice() {
        let mut reader = SliceReader::new(&[1, 2, 3, 4, 5]);
        assert_eq!(track_try_unwrap!(reader.peek_u8()), 1);
        assert_eq!(track_try_unwrap!(reader.read_u32()), 0x0102_0304);
        assert_eq!(reader.remaining(), 1);

        let e = reader.read_slice(2).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::UnexpectedEos);
        assert_eq!(reader.read_rest(), &[5]);
        assert!(reader.eos());
        assert!(reader.peek_u8().is_err());
    }
}
