//! Primitive type representations (RFC 7541 §5).
//!
//! Both helpers are parameterized by the prefix width and take the bits
//! that occupy the rest of the first octet separately, so the same code
//! serves every representation pattern.
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::convert::TryFrom;
use std::io::{Read, Write};
use tracing::trace;

use crate::hpack::huffman;
use crate::io::SliceReader;
use crate::{ErrorKind, Result};

/// Encodes `value` as an integer with a `prefix_bits` wide prefix (RFC 7541 §5.1).
///
/// `prepended_value` fills the high `8 - prefix_bits` bits of the first octet.
pub fn encode_int<W: Write>(
    mut writer: W,
    prepended_value: u8,
    prefix_bits: u8,
    value: usize,
) -> Result<()> {
    debug_assert!(1 <= prefix_bits && prefix_bits <= 8);
    let max_prefix_value: usize = (1 << prefix_bits) - 1;
    let high_bits = u16::from(prepended_value) << prefix_bits;
    if value < max_prefix_value {
        let first_octet = (high_bits | value as u16) as u8;
        track_io!(writer.write_u8(first_octet))?;
    } else {
        let first_octet = (high_bits | max_prefix_value as u16) as u8;
        track_io!(writer.write_u8(first_octet))?;
        let mut value = value - max_prefix_value;
        while value >= 128 {
            track_io!(writer.write_u8((value % 128 + 128) as u8))?;
            value /= 128;
        }
        track_io!(writer.write_u8(value as u8))?;
    }
    Ok(())
}

/// Decodes an integer with a `prefix_bits` wide prefix (RFC 7541 §5.1).
///
/// Returns the bits above the prefix in the first octet together with the decoded value.
pub fn decode_int<R: Read>(mut reader: R, prefix_bits: u8) -> Result<(u8, usize)> {
    debug_assert!(1 <= prefix_bits && prefix_bits <= 8);
    let max_prefix_value: u64 = (1 << prefix_bits) - 1;
    let first_octet = track_io!(reader.read_u8())?;
    let prepended_value = (u16::from(first_octet) >> prefix_bits) as u8;
    let mut value = u64::from(first_octet) & max_prefix_value;
    if value == max_prefix_value {
        let mut offset = 0;
        let mut octet = 128;
        while octet & 128 == 128 {
            track_assert!(
                offset <= 56,
                ErrorKind::InvalidInput,
                "Too many continuation octets: value={}",
                value
            );
            octet = track_io!(reader.read_u8())?;

            let addition = u64::from(octet & 127) << offset;
            value = track_assert_some!(
                value.checked_add(addition),
                ErrorKind::InvalidInput,
                "Too large integer: value={}, addition={}",
                value,
                addition
            );
            offset += 7;
        }
    }
    let value = track_assert_some!(
        usize::try_from(value).ok(),
        ErrorKind::InvalidInput,
        "Too large integer: {}",
        value
    );
    Ok((prepended_value, value))
}

/// String literal encoding (RFC 7541 §5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// The octets are emitted as is.
    Raw = 0,

    /// The octets are Huffman coded.
    Huffman = 1,
}
impl Default for Encoding {
    fn default() -> Self {
        Encoding::Raw
    }
}

/// Writes a string literal: the (Huffman flag, 7-bit prefix length) integer followed by the octets.
pub fn encode_string<W: Write>(mut writer: W, octets: &[u8], encoding: Encoding) -> Result<()> {
    match encoding {
        Encoding::Raw => {
            track!(encode_int(&mut writer, 0, 7, octets.len()))?;
            track_io!(writer.write_all(octets))?;
        }
        Encoding::Huffman => {
            let encoded = huffman::encode(octets);
            track!(encode_int(&mut writer, 1, 7, encoded.len()))?;
            track_io!(writer.write_all(&encoded))?;
        }
    }
    Ok(())
}

/// Reads a string literal and returns its (Huffman decoded if necessary) octets.
pub fn decode_string(reader: &mut SliceReader) -> Result<Vec<u8>> {
    let (huffman_flag, octets_len) = track!(decode_int(&mut *reader, 7))?;
    let octets = track!(reader.read_slice(octets_len))?;
    if huffman_flag == 1 {
        trace!("decode_string: Huffman coded, len = {}", octets_len);
        track!(huffman::decode(octets))
    } else {
        trace!("decode_string: raw octets, len = {}", octets_len);
        Ok(octets.to_vec())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn round_trip(prefix_bits: u8, value: usize) -> Vec<u8> {
        let mut buf = Vec::new();
        track_try_unwrap!(encode_int(&mut buf, 0, prefix_bits, value));
        let mut reader = SliceReader::new(&buf);
        let (prepended, decoded) = track_try_unwrap!(decode_int(&mut reader, prefix_bits));
        assert_eq!(prepended, 0);
        assert_eq!(decoded, value, "prefix_bits={}", prefix_bits);
        assert!(reader.eos(), "prefix_bits={}, value={}", prefix_bits, value);
        buf
    }

    #[test]
    /// https://tools.ietf.org/html/rfc7541#appendix-C.1.1
    fn encoding_10_using_a_5bit_prefix() {
        let mut buf = [0; 1];
        track_try_unwrap!(encode_int(&mut buf[..], 0b110, 5, 10));
        assert_eq!(buf, [0b110_01010]);

        let (prepended, value) = track_try_unwrap!(decode_int(&buf[..], 5));
        assert_eq!(prepended, 0b110);
        assert_eq!(value, 10);
    }

    #[test]
    /// https://tools.ietf.org/html/rfc7541#appendix-C.1.2
    fn encoding_1337_using_a_5bit_prefix() {
        let mut buf = [0; 3];
        track_try_unwrap!(encode_int(&mut buf[..], 0b110, 5, 1337));
        assert_eq!(buf, [0b110_11111, 0b10011010, 0b00001010]);

        let (prepended, value) = track_try_unwrap!(decode_int(&buf[..], 5));
        assert_eq!(prepended, 0b110);
        assert_eq!(value, 1337);
    }

    #[test]
    /// https://tools.ietf.org/html/rfc7541#appendix-C.1.3
    fn encoding_42_starting_at_an_octet_boundary() {
        let mut buf = [0; 1];
        track_try_unwrap!(encode_int(&mut buf[..], 0, 8, 42));
        assert_eq!(buf, [0b00101010]);

        let (prepended, value) = track_try_unwrap!(decode_int(&buf[..], 8));
        assert_eq!(prepended, 0);
        assert_eq!(value, 42);
    }

    #[test]
    fn prefix_boundaries() {
        for &prefix_bits in &[4u8, 5, 6, 7] {
            let max = (1usize << prefix_bits) - 1;
            assert_eq!(round_trip(prefix_bits, 0), [0]);
            assert_eq!(round_trip(prefix_bits, max - 1), [(max - 1) as u8]);
            assert_eq!(round_trip(prefix_bits, max), [max as u8, 0]);
            assert_eq!(round_trip(prefix_bits, max + 1), [max as u8, 1]);

            let large = max + (1 << 21) + 5;
            let encoded = round_trip(prefix_bits, large);
            assert_eq!(encoded.len(), 5);
            assert_eq!(encoded[0], max as u8);
            assert!(encoded[1..4].iter().all(|b| b & 0x80 == 0x80));
            assert_eq!(encoded[4] & 0x80, 0);
        }
    }

    #[test]
    fn size_update_8192() {
        let mut buf = Vec::new();
        track_try_unwrap!(encode_int(&mut buf, 0b001, 5, 8192));
        assert_eq!(buf, [0x3f, 0xe1, 0x3f]);
    }

    #[test]
    fn truncated_integer() {
        let e = decode_int(&[0x1f, 0x80][..], 5).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::UnexpectedEos);

        let e = decode_int(&[][..], 5).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::UnexpectedEos);
    }

    #[test]
    fn overlong_integer() {
        let mut buf = vec![0x7f];
        buf.extend(std::iter::repeat(0xff).take(10));
        buf.push(0x01);
        let e = decode_int(&buf[..], 7).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn string_literals() {
        let mut buf = Vec::new();
        track_try_unwrap!(encode_string(&mut buf, b"hoge", Encoding::Raw));
        assert_eq!(buf, [0x04, b'h', b'o', b'g', b'e']);

        let mut buf = Vec::new();
        track_try_unwrap!(encode_string(&mut buf, b"hoge", Encoding::Huffman));
        assert_eq!(buf, [0x83, 0x9c, 0xf3, 0x17]);

        let mut reader = SliceReader::new(&buf);
        assert_eq!(track_try_unwrap!(decode_string(&mut reader)), b"hoge");
        assert!(reader.eos());

        let mut reader = SliceReader::new(&[0x05, b'a', b'b']);
        let e = decode_string(&mut reader).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::UnexpectedEos);
    }
}
