use thiserror::Error;

/// Programmer errors raised by the tag decoding core.
///
/// Malformed input never produces one of these; data faults degrade to
/// skipped fields or the faulty-value sentinel instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// A field type name outside the supported enumeration was requested
    #[error("Invalid field type: {0}")]
    InvalidType(String),
}

/// Error returned by a tag description callback.
///
/// The decoder absorbs these and falls back to the generic rendering of
/// the value, so they never escape a directory read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescribeError {
    /// The value did not have the shape the description expects
    #[error("Unexpected value shape for {tag}: {message}")]
    UnexpectedValue { tag: &'static str, message: String },

    /// An enumerated tag carried a code the description does not know
    #[error("Unknown code {code} for {tag}")]
    UnknownCode { tag: &'static str, code: u32 },
}

/// Errors that can occur when parsing a TIFF header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Invalid byte order marker (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Buffer is too small to contain a TIFF header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: usize, actual: usize },

    /// First IFD offset points outside the buffer
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),
}
