use trackable::error::ErrorKind as TrackableErrorKind;
use trackable::error::TrackableError;

/// This crate specific `Error` type.
#[derive(Debug, Clone)]
pub struct Error(TrackableError<ErrorKind>);
derive_traits_for_trackable_error_newtype!(Error, ErrorKind);

/// The list of the possible error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input data is invalid.
    ///
    /// e.g., an unknown table index or a Huffman sequence that matches no code.
    InvalidInput,

    /// Input data ended before a declared length was satisfied.
    UnexpectedEos,

    /// A value supplied by the caller is out of the range permitted by the protocol.
    OutOfRange,

    /// I/O error.
    Io,

    /// Other error.
    Other,
}
impl TrackableErrorKind for ErrorKind {}
