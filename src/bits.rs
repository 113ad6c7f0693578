//! Bit extraction and network byte order helpers shared by the codecs.
use byteorder::{BigEndian, ByteOrder};

/// The largest stream identifier (and 31-bit field value) allowed on the wire.
pub const MAX_STREAM_ID: u32 = 0x7fff_ffff;

/// Returns the lowest `n` bits of `value`.
///
/// # Examples
///
/// ```
/// use h2_codec::bits::extract_low_bits;
///
/// assert_eq!(extract_low_bits(0b1011_0110, 4), 0b0110);
/// assert_eq!(extract_low_bits(0xffff_ffff, 31), 0x7fff_ffff);
/// ```
pub fn extract_low_bits(value: u32, n: u32) -> u32 {
    debug_assert!(n <= 32);
    if n == 32 {
        value
    } else {
        value & ((1 << n) - 1)
    }
}

/// Returns the highest `n` bits of a `width`-bit wide `value`, shifted down to the lowest position.
///
/// # Examples
///
/// ```
/// use h2_codec::bits::extract_high_bits;
///
/// assert_eq!(extract_high_bits(0b1011_0110, 4, 8), 0b1011);
/// assert_eq!(extract_high_bits(0x8000_0001, 1, 32), 1);
/// ```
pub fn extract_high_bits(value: u32, n: u32, width: u32) -> u32 {
    debug_assert!(n <= width && width <= 32);
    if n == 0 {
        0
    } else {
        extract_low_bits(value >> (width - n), n)
    }
}

/// Packs a reserved bit and a 31-bit identifier into one 32-bit word.
pub fn pack_reserved_and_id(reserved: u8, id: u32) -> u32 {
    (extract_low_bits(u32::from(reserved), 1) << 31) | extract_low_bits(id, 31)
}

/// Splits a 32-bit word into its top bit and its lower 31 bits.
pub fn unpack_reserved_and_id(word: u32) -> (u8, u32) {
    (extract_high_bits(word, 1, 32) as u8, extract_low_bits(word, 31))
}

/// Writes `reserved | id` as four network order octets.
pub fn reserved_and_id_to_bytes(reserved: u8, id: u32) -> [u8; 4] {
    let mut buf = [0; 4];
    BigEndian::write_u32(&mut buf, pack_reserved_and_id(reserved, id));
    buf
}

/// Reads four network order octets as `(reserved, id)`.
///
/// # Panics
///
/// Panics if `bytes` is shorter than four octets.
pub fn reserved_and_id_from_bytes(bytes: &[u8]) -> (u8, u32) {
    unpack_reserved_and_id(BigEndian::read_u32(bytes))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn low_and_high_bits() {
        assert_eq!(extract_low_bits(0, 0), 0);
        assert_eq!(extract_low_bits(0xff, 8), 0xff);
        assert_eq!(extract_low_bits(0x1ff, 8), 0xff);
        assert_eq!(extract_high_bits(0xf0, 4, 8), 0xf);
        assert_eq!(extract_high_bits(0x00ff_ffff, 24, 32), 0xffff);
        assert_eq!(extract_high_bits(0xffff_ffff, 0, 32), 0);
    }

    #[test]
    fn reserved_and_id() {
        assert_eq!(pack_reserved_and_id(0, 0x80), 0x80);
        assert_eq!(pack_reserved_and_id(1, 0xffff), 0x8000_ffff);
        assert_eq!(pack_reserved_and_id(1, 0xffff_ffff), 0xffff_ffff);
        assert_eq!(unpack_reserved_and_id(0xffff_ffff), (1, MAX_STREAM_ID));
        assert_eq!(unpack_reserved_and_id(0x0000_0001), (0, 1));

        assert_eq!(reserved_and_id_to_bytes(1, 3), [0x80, 0, 0, 3]);
        assert_eq!(reserved_and_id_from_bytes(&[0x80, 0, 0, 3]), (1, 3));
    }
}
