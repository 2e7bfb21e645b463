//! Tag directory decoding.
//!
//! # Directory Structure
//!
//! ```text
//! Bytes 0-1:           Field count N
//! Bytes 2..2+12N:      N field records
//! Bytes 2+12N..+4:     Next directory offset (primary directory only)
//! ```
//!
//! # Field Record (12 bytes)
//!
//! ```text
//! Bytes 0-1:  Tag code
//! Bytes 2-3:  Type code
//! Bytes 4-7:  Element count
//! Bytes 8-11: Inline value (if width * count <= 4) or offset from the origin
//! ```
//!
//! Decoding never fails on malformed input. A truncated directory keeps the
//! fields decoded so far, unsupported types and unnamed tags are skipped, and
//! values pointing outside the buffer become [`TagValue::Faulty`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::filter::TagFilter;
use crate::io::ByteSource;

use super::names::{TagNameEntry, TagNameTable, TagTables};
use super::primitives::{
    byte_at, long_at, rational_at, short_at, slong_at, srational_at, ByteOrder,
};
use super::tags::{DirectoryType, FieldType};
use super::values::{decode_ascii, Description, Element, TagValue, FAULTY_VALUE};

/// Size of one field record in bytes.
pub const FIELD_RECORD_SIZE: usize = 12;

/// Size of the field count at the start of a directory.
const FIELD_COUNT_SIZE: usize = 2;

/// Offset of the value/offset slot inside a field record.
const VALUE_SLOT_OFFSET: usize = 8;

/// IPTC-NAA tag. Some producers declare it LONG or UNDEFINED; its payload is
/// always read as raw bytes.
const IPTC_NAA_TAG: u16 = 0x83BB;

/// Tag names whose records keep the absolute offset of their value.
pub const MAKER_NOTE: &str = "MakerNote";
const PENTAX_LEVEL_INFO: &str = "LevelInfo";

/// Key of the chained thumbnail directory in serialized output.
pub const THUMBNAIL_KEY: &str = "Thumbnail";

// =============================================================================
// DecodedField / TagDirectory
// =============================================================================

/// One decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedField {
    /// Tag code
    pub id: u16,

    pub value: TagValue,

    pub description: Description,

    /// Absolute offset the value was read from; kept only for maker notes
    /// and Pentax level info, which vendor decoders re-read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_offset: Option<usize>,
}

impl DecodedField {
    fn faulty(id: u16, source_offset: Option<usize>) -> Self {
        Self {
            id,
            value: TagValue::Faulty,
            description: Description::Text(FAULTY_VALUE.to_string()),
            source_offset,
        }
    }
}

/// Decoded fields of one directory, keyed by resolved tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagDirectory {
    #[serde(flatten)]
    pub fields: BTreeMap<String, DecodedField>,

    /// Directory chained after the primary directory
    #[serde(rename = "Thumbnail", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Box<TagDirectory>>,
}

impl TagDirectory {
    pub fn get(&self, name: &str) -> Option<&DecodedField> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when there are no fields and no chained thumbnail.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.thumbnail.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedField)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }
}

// =============================================================================
// DirectoryReader
// =============================================================================

/// Decodes tag directories from a byte source.
///
/// The reader holds only borrowed, immutable inputs, so one reader can decode
/// any number of directories of the same buffer.
pub struct DirectoryReader<'a, S: ByteSource + ?Sized> {
    source: &'a S,
    tables: &'a TagTables,
    byte_order: ByteOrder,
    include_unknown: bool,
    filter: Option<&'a TagFilter>,
}

impl<'a, S: ByteSource + ?Sized> DirectoryReader<'a, S> {
    /// Create a reader that skips unnamed tags and applies no filter.
    pub fn new(source: &'a S, tables: &'a TagTables, byte_order: ByteOrder) -> Self {
        Self {
            source,
            tables,
            byte_order,
            include_unknown: false,
            filter: None,
        }
    }

    /// Also emit tags missing from the name table, as `undefined-<code>`.
    pub fn include_unknown(mut self, include_unknown: bool) -> Self {
        self.include_unknown = include_unknown;
        self
    }

    /// Skip fields the filter would not parse.
    pub fn with_filter(mut self, filter: &'a TagFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Decode the directory starting at `directory_offset`.
    ///
    /// Non-inline values are resolved relative to `offset_origin`, which is
    /// also the origin of the chained thumbnail directory offset.
    pub fn read_directory(
        &self,
        directory_type: DirectoryType,
        offset_origin: usize,
        directory_offset: usize,
    ) -> TagDirectory {
        let table = self.tables.get(directory_type);
        let mut directory = TagDirectory::default();

        let field_count = short_at(self.source, directory_offset, self.byte_order).unwrap_or(0);
        let mut offset = directory_offset.saturating_add(FIELD_COUNT_SIZE);

        for index in 0..field_count {
            if !self.source.contains(offset, FIELD_RECORD_SIZE) {
                debug!(
                    directory = directory_type.name(),
                    decoded = index,
                    declared = field_count,
                    "Directory truncated"
                );
                break;
            }

            if let Some((name, field)) =
                self.read_field(directory_type, table, offset_origin, offset)
            {
                directory.fields.insert(name, field);
            }
            offset += FIELD_RECORD_SIZE;
        }

        if directory_type.chains_thumbnail() {
            directory.thumbnail = self
                .read_chained_thumbnail(offset_origin, offset)
                .map(Box::new);
        }

        directory
    }

    fn read_chained_thumbnail(&self, offset_origin: usize, offset: usize) -> Option<TagDirectory> {
        if let Some(filter) = self.filter {
            if !filter.should_parse_group(DirectoryType::Thumbnail.group().as_str()) {
                return None;
            }
        }

        let next = long_at(self.source, offset, self.byte_order).filter(|&next| next != 0)?;
        let Some(thumbnail_offset) = offset_origin.checked_add(next as usize) else {
            debug!(next, "Thumbnail directory offset overflows");
            return None;
        };
        if !self.source.contains(thumbnail_offset, FIELD_COUNT_SIZE) {
            debug!(thumbnail_offset, "Thumbnail directory outside buffer");
            return None;
        }

        trace!(thumbnail_offset, "Following chained thumbnail directory");
        Some(self.read_directory(DirectoryType::Thumbnail, offset_origin, thumbnail_offset))
    }

    /// Decode one field record. `None` means the field is declined.
    fn read_field(
        &self,
        directory_type: DirectoryType,
        table: Option<&TagNameTable>,
        offset_origin: usize,
        record_offset: usize,
    ) -> Option<(String, DecodedField)> {
        let order = self.byte_order;
        let tag_code = short_at(self.source, record_offset, order)?;
        let type_code = short_at(self.source, record_offset + 2, order)?;
        let count = long_at(self.source, record_offset + 4, order)?;

        let Some(field_type) = FieldType::from_code(type_code) else {
            trace!(tag = tag_code, type_code, "Skipping field of unsupported type");
            return None;
        };

        let entry = table.and_then(|table| table.get(tag_code));
        if entry.is_none() && !self.include_unknown {
            return None;
        }
        let name = entry.map_or_else(|| format!("undefined-{tag_code}"), |e| e.name().to_string());

        if let Some(filter) = self.filter {
            if !Self::parses(filter, directory_type, &name, tag_code) {
                return None;
            }
        }
        let keeps_offset = name == MAKER_NOTE
            || (directory_type == DirectoryType::Pentax && name == PENTAX_LEVEL_INFO);

        let size = field_type.size_in_bytes() as u64 * u64::from(count);
        let slot_offset = record_offset + VALUE_SLOT_OFFSET;

        let (value_offset, value_type, value_count) = if size <= FieldType::INLINE_THRESHOLD as u64 {
            (slot_offset, field_type, count as usize)
        } else {
            let relative = long_at(self.source, slot_offset, order)?;
            let start = offset_origin.saturating_add(relative as usize);
            let in_bounds =
                usize::try_from(size).is_ok_and(|size| self.source.contains(start, size));
            if !in_bounds {
                debug!(
                    directory = directory_type.name(),
                    tag = tag_code,
                    offset = relative,
                    size,
                    "Field value outside buffer"
                );
                let field = DecodedField::faulty(tag_code, keeps_offset.then_some(start));
                return Some((name, field));
            }

            if tag_code == IPTC_NAA_TAG {
                (start, FieldType::Byte, count as usize * field_type.size_in_bytes())
            } else {
                (start, field_type, count as usize)
            }
        };

        let Some(value) = self.read_value(value_offset, value_type, value_count) else {
            let field = DecodedField::faulty(tag_code, keeps_offset.then_some(value_offset));
            return Some((name, field));
        };

        let description = describe(entry, value_type, &value);

        trace!(tag = tag_code, name = %name, field_type = value_type.name(), "Decoded field");

        let field = DecodedField {
            id: tag_code,
            value,
            description,
            source_offset: keeps_offset.then_some(value_offset),
        };
        Some((name, field))
    }

    fn parses(filter: &TagFilter, directory_type: DirectoryType, name: &str, tag_code: u16) -> bool {
        match directory_type {
            DirectoryType::Thumbnail => filter.should_parse_thumbnail_tag(name, Some(tag_code)),
            _ => filter.should_parse_tag(directory_type.group().as_str(), name, Some(tag_code)),
        }
    }

    fn read_value(&self, offset: usize, field_type: FieldType, count: usize) -> Option<TagValue> {
        if field_type == FieldType::Ascii {
            let raw = self.source.bytes_at(offset, count)?;
            return Some(TagValue::List(decode_ascii(raw)));
        }

        let width = field_type.size_in_bytes();
        let order = self.byte_order;
        let mut elements = Vec::with_capacity(count);

        for index in 0..count {
            let at = offset + index * width;
            let element = match field_type {
                FieldType::Byte | FieldType::Undefined | FieldType::Ascii => {
                    Element::Unsigned(byte_at(self.source, at)?.into())
                }
                FieldType::Short => Element::Unsigned(short_at(self.source, at, order)?.into()),
                FieldType::Long | FieldType::IfdPointer => {
                    Element::Unsigned(long_at(self.source, at, order)?)
                }
                FieldType::SLong => Element::Signed(slong_at(self.source, at, order)?),
                FieldType::Rational => {
                    let (n, d) = rational_at(self.source, at, order)?;
                    Element::Rational(n, d)
                }
                FieldType::SRational => {
                    let (n, d) = srational_at(self.source, at, order)?;
                    Element::SRational(n, d)
                }
            };
            elements.push(element);
        }

        Some(TagValue::from_elements(elements, field_type))
    }
}

/// Resolve the description of a decoded value.
fn describe(entry: Option<&TagNameEntry>, field_type: FieldType, value: &TagValue) -> Description {
    match entry {
        Some(TagNameEntry::Descriptor { name, describe }) => match describe(value) {
            Ok(text) => Description::Text(text),
            Err(err) => {
                trace!(tag = %name, error = %err, "Description failed, using generic rendering");
                Description::Text(value.render())
            }
        },
        Some(TagNameEntry::Alias(_)) if field_type.is_rational() => {
            Description::Text(render_quotients(value))
        }
        Some(TagNameEntry::Alias(_)) => Description::Text(value.render()),
        None => Description::Raw(value.clone()),
    }
}

/// Rationals as the decimal value of numerator over denominator.
///
/// A zero denominator renders as `inf` or `NaN`.
fn render_quotients(value: &TagValue) -> String {
    let quotients: Vec<String> = value
        .elements()
        .iter()
        .map(|element| match *element {
            Element::Rational(n, d) => (f64::from(n) / f64::from(d)).to_string(),
            Element::SRational(n, d) => (f64::from(n) / f64::from(d)).to_string(),
            ref other => other.to_string(),
        })
        .collect();
    quotients.join(", ")
}

/// Decode one directory.
///
/// Convenience wrapper over [`DirectoryReader`] without a filter.
pub fn read_directory<S: ByteSource + ?Sized>(
    source: &S,
    tables: &TagTables,
    directory_type: DirectoryType,
    offset_origin: usize,
    directory_offset: usize,
    byte_order: ByteOrder,
    include_unknown: bool,
) -> TagDirectory {
    DirectoryReader::new(source, tables, byte_order)
        .include_unknown(include_unknown)
        .read_directory(directory_type, offset_origin, directory_offset)
}

// =============================================================================
// Tests
// =============================================================================
