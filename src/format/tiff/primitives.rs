//! Bounds-checked scalar reads.
//!
//! Every read takes the byte order explicitly; there is no "current" byte
//! order carried between calls. Reads that would leave the source return
//! `None` instead of panicking.

use crate::error::TagError;
use crate::io::ByteSource;

use super::tags::FieldType;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a tag directory.
///
/// Determined once from the 2-byte marker of the enclosing TIFF header and
/// passed into every decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Map a 2-byte marker to a byte order.
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match &marker {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    #[inline]
    pub fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn i32_from(self, bytes: [u8; 4]) -> i32 {
        match self {
            ByteOrder::LittleEndian => i32::from_le_bytes(bytes),
            ByteOrder::BigEndian => i32::from_be_bytes(bytes),
        }
    }
}

// =============================================================================
// Scalar reads
// =============================================================================

/// Read an unsigned byte.
#[inline]
pub fn byte_at<S: ByteSource + ?Sized>(source: &S, offset: usize) -> Option<u8> {
    source.array_at::<1>(offset).map(|[b]| b)
}

/// Read a single character code.
#[inline]
pub fn ascii_byte_at<S: ByteSource + ?Sized>(source: &S, offset: usize) -> Option<u8> {
    byte_at(source, offset)
}

/// Read an unsigned 16-bit value.
#[inline]
pub fn short_at<S: ByteSource + ?Sized>(source: &S, offset: usize, order: ByteOrder) -> Option<u16> {
    source.array_at::<2>(offset).map(|b| order.u16_from(b))
}

/// Read an unsigned 32-bit value.
#[inline]
pub fn long_at<S: ByteSource + ?Sized>(source: &S, offset: usize, order: ByteOrder) -> Option<u32> {
    source.array_at::<4>(offset).map(|b| order.u32_from(b))
}

/// Read a two's-complement 32-bit value.
#[inline]
pub fn slong_at<S: ByteSource + ?Sized>(source: &S, offset: usize, order: ByteOrder) -> Option<i32> {
    source.array_at::<4>(offset).map(|b| order.i32_from(b))
}

/// Read a rational as (numerator, denominator).
pub fn rational_at<S: ByteSource + ?Sized>(
    source: &S,
    offset: usize,
    order: ByteOrder,
) -> Option<(u32, u32)> {
    let numerator = long_at(source, offset, order)?;
    let denominator = long_at(source, offset.checked_add(4)?, order)?;
    Some((numerator, denominator))
}

/// Read a signed rational as (numerator, denominator).
pub fn srational_at<S: ByteSource + ?Sized>(
    source: &S,
    offset: usize,
    order: ByteOrder,
) -> Option<(i32, i32)> {
    let numerator = slong_at(source, offset, order)?;
    let denominator = slong_at(source, offset.checked_add(4)?, order)?;
    Some((numerator, denominator))
}

/// Read a sub-directory offset (same encoding as LONG).
#[inline]
pub fn ifd_pointer_at<S: ByteSource + ?Sized>(
    source: &S,
    offset: usize,
    order: ByteOrder,
) -> Option<u32> {
    long_at(source, offset, order)
}

/// Width in bytes of the field type with the given canonical name.
///
/// # Errors
/// `InvalidType` if `name` is not one of the supported field types. This is
/// a table or configuration bug, never a consequence of file contents.
pub fn type_size(name: &str) -> Result<usize, TagError> {
    FieldType::from_name(name)
        .map(FieldType::size_in_bytes)
        .ok_or_else(|| TagError::InvalidType(name.to_string()))
}

/// Join a sequence of character codes into a string, one char per code.
pub fn ascii_value(codes: &[u8]) -> String {
    codes.iter().map(|&code| char::from(code)).collect()
}

// =============================================================================
// Tests
// =============================================================================
