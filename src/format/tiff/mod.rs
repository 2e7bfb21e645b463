//! TIFF structure decoding for Exif metadata.
//!
//! # Key Concepts
//!
//! - **Byte order**: payloads declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. The order is passed to every read and
//!   never stored in the buffer abstraction.
//!
//! - **Offset origin**: non-inline values are located relative to the start
//!   of the TIFF header, which is not the start of the buffer when the payload
//!   is embedded in a JPEG APP1 segment.
//!
//! - **Directory (IFD)**: a count-prefixed list of 12-byte field records.
//!   Exif uses several directory kinds (primary, Exif, GPS, Interoperability,
//!   thumbnail, vendor maker notes), each with its own tag name table.
//!
//! - **Inline vs offset values**: values of at most 4 bytes live in the field
//!   record itself, larger values are stored at an offset from the origin.

mod directory;
mod header;
mod names;
mod primitives;
mod tables;
mod tags;
mod values;

pub use directory::{
    read_directory, DecodedField, DirectoryReader, TagDirectory, FIELD_RECORD_SIZE, MAKER_NOTE,
    THUMBNAIL_KEY,
};
pub use header::{TiffHeader, TIFF_HEADER_SIZE};
pub use names::{DescribeFn, TagNameEntry, TagNameTable, TagTables};
pub use primitives::{
    ascii_byte_at, ascii_value, byte_at, ifd_pointer_at, long_at, rational_at, short_at,
    slong_at, srational_at, type_size, ByteOrder,
};
pub use tables::{CANON_TAGS, GPS_TAGS, INTEROPERABILITY_TAGS, PENTAX_TAGS, STANDARD_TAGS};
pub use tags::{DirectoryType, FieldType};
pub use values::{decode_ascii, Description, Element, TagValue, FAULTY_VALUE};
