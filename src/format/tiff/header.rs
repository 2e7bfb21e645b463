//! TIFF header parsing.
//!
//! Exif payloads (the APP1 segment body after `Exif\0\0`, or a bare TIFF file)
//! start with a classic TIFF header. Every offset in the payload is relative
//! to the first byte of this header.
//!
//! # Header Structure (8 bytes)
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to the primary directory
//! ```

use crate::error::HeaderError;
use crate::io::ByteSource;

use super::primitives::{long_at, short_at, ByteOrder};

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the payload
    pub byte_order: ByteOrder,

    /// Offset of the primary directory, relative to the header start
    pub first_ifd_offset: usize,
}

impl TiffHeader {
    /// Parse the header found at `offset_origin`.
    pub fn parse<S: ByteSource + ?Sized>(
        source: &S,
        offset_origin: usize,
    ) -> Result<Self, HeaderError> {
        let available = source.len().saturating_sub(offset_origin);
        if available < TIFF_HEADER_SIZE {
            return Err(HeaderError::FileTooSmall {
                required: TIFF_HEADER_SIZE,
                actual: available,
            });
        }

        let marker = source
            .array_at::<2>(offset_origin)
            .ok_or(HeaderError::FileTooSmall {
                required: TIFF_HEADER_SIZE,
                actual: available,
            })?;
        let byte_order = ByteOrder::from_marker(marker)
            .ok_or_else(|| HeaderError::InvalidMagic(u16::from_be_bytes(marker)))?;

        let version = short_at(source, offset_origin + 2, byte_order).unwrap_or_default();
        if version != VERSION_TIFF {
            return Err(HeaderError::InvalidVersion(version));
        }

        let first_ifd_offset = long_at(source, offset_origin + 4, byte_order).unwrap_or_default();
        if first_ifd_offset as usize >= available {
            return Err(HeaderError::InvalidIfdOffset(u64::from(first_ifd_offset)));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset: first_ifd_offset as usize,
        })
    }
}
