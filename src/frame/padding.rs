use crate::frame::header::{flags, FrameHeader};
use crate::{ErrorKind, Result};

/// The pad length field is one octet.
pub const MAX_PADDING_LEN: usize = 0xff;

pub fn check(padding: &[u8]) -> Result<()> {
    track_assert!(
        padding.len() <= MAX_PADDING_LEN,
        ErrorKind::OutOfRange,
        "Too long padding: {} octets",
        padding.len()
    );
    Ok(())
}

/// Returns `flags` with `flag` set if `on`, cleared otherwise.
pub fn with_flag(flags: u8, flag: u8, on: bool) -> u8 {
    if on {
        flags | flag
    } else {
        flags & !flag
    }
}

/// Prepends the pad length and appends the padding to `body`.
pub fn wrap(body: Vec<u8>, padding: Option<&[u8]>) -> Vec<u8> {
    match padding {
        None => body,
        Some(padding) => {
            let mut payload = Vec::with_capacity(1 + body.len() + padding.len());
            payload.push(padding.len() as u8);
            payload.extend_from_slice(&body);
            payload.extend_from_slice(padding);
            payload
        }
    }
}

/// Splits `payload` into its body and, if the PADDED flag is set, its padding.
pub fn split<'a>(header: &FrameHeader, payload: &'a [u8]) -> Result<(&'a [u8], Option<Vec<u8>>)> {
    if !header.has_flag(flags::PADDED) {
        return Ok((payload, None));
    }
    track_assert!(!payload.is_empty(), ErrorKind::UnexpectedEos, "No pad length");
    let pad_len = payload[0] as usize;
    let rest = &payload[1..];
    track_assert!(
        pad_len <= rest.len(),
        ErrorKind::InvalidInput,
        "Pad length exceeds the payload: pad_len={}, payload.len={}",
        pad_len,
        payload.len()
    );
    let (body, padding) = rest.split_at(rest.len() - pad_len);
    Ok((body, Some(padding.to_vec())))
}
