//! Field type and directory type definitions.
//!
//! This module defines the vocabulary shared by every tag directory:
//! - Field types that determine how a field's value is encoded
//! - Directory types that select which tag name table applies

use crate::filter::Group;

// =============================================================================
// Field Types
// =============================================================================

/// Field types that determine how values are encoded.
///
/// Each field type has a fixed width in bytes, which decides whether a value
/// fits in the 4-byte inline slot of a field record and how many bytes an
/// element sequence occupies. Type codes outside this set are legal in real
/// files and are reported as `None` by [`FieldType::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit character, NUL separated
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two consecutive LONGs: numerator, denominator
    Rational = 5,

    /// Opaque byte
    Undefined = 7,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two consecutive SLONGs: numerator, denominator
    SRational = 10,

    /// Offset of a sub-directory, encoded like LONG
    IfdPointer = 13,
}

impl FieldType {
    /// Every supported field type, in type code order.
    pub const ALL: [FieldType; 9] = [
        FieldType::Byte,
        FieldType::Ascii,
        FieldType::Short,
        FieldType::Long,
        FieldType::Rational,
        FieldType::Undefined,
        FieldType::SLong,
        FieldType::SRational,
        FieldType::IfdPointer,
    ];

    /// Size of a single element of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SLong | FieldType::IfdPointer => 4,
            FieldType::Rational | FieldType::SRational => 8,
        }
    }

    /// Create a FieldType from the numeric code stored in a field record.
    ///
    /// Returns `None` for unsupported or unknown type codes.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            13 => Some(FieldType::IfdPointer),
            _ => None,
        }
    }

    /// Look a field type up by its canonical upper-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Canonical upper-case name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::IfdPointer => "IFD_POINTER",
        }
    }

    /// Get the numeric type code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Whether elements of this type are numerator/denominator pairs.
    #[inline]
    pub const fn is_rational(self) -> bool {
        matches!(self, FieldType::Rational | FieldType::SRational)
    }

    /// Maximum bytes that can be stored in the inline slot of a field record.
    pub const INLINE_THRESHOLD: usize = 4;
}

// =============================================================================
// Directory Types
// =============================================================================

/// Kind of tag directory being decoded.
///
/// The directory type selects the tag name table, decides which filter group
/// the fields belong to, and gates thumbnail chaining: only
/// [`DirectoryType::Primary`] is followed by a chained directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirectoryType {
    /// Main image directory (IFD0)
    Primary,

    /// Exif sub-directory
    Exif,

    /// GPS sub-directory
    Gps,

    /// Interoperability sub-directory
    Interoperability,

    /// Thumbnail directory chained after IFD0 (IFD1)
    Thumbnail,

    /// Canon maker-note directory
    Canon,

    /// Pentax maker-note directory
    Pentax,
}

impl DirectoryType {
    /// Short identifier used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            DirectoryType::Primary => "0th",
            DirectoryType::Exif => "exif",
            DirectoryType::Gps => "gps",
            DirectoryType::Interoperability => "interoperability",
            DirectoryType::Thumbnail => "1st",
            DirectoryType::Canon => "canon",
            DirectoryType::Pentax => "pentax",
        }
    }

    /// Filter group the decoded fields are reported under.
    pub const fn group(self) -> Group {
        match self {
            DirectoryType::Primary
            | DirectoryType::Exif
            | DirectoryType::Gps
            | DirectoryType::Interoperability => Group::Exif,
            DirectoryType::Thumbnail => Group::Thumbnail,
            DirectoryType::Canon | DirectoryType::Pentax => Group::MakerNotes,
        }
    }

    /// Whether a next-directory offset after the fields should be followed.
    #[inline]
    pub const fn chains_thumbnail(self) -> bool {
        matches!(self, DirectoryType::Primary)
    }
}

// =============================================================================
// Tests
// =============================================================================
