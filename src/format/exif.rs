//! Exif payload reader.
//!
//! An Exif payload is a TIFF structure: the primary directory (IFD0), an
//! optional chained thumbnail directory (IFD1), and sub-directories reached
//! through pointer tags in IFD0 and the Exif directory:
//!
//! ```text
//! IFD0 ──"Exif IFD Pointer"──────────▶ Exif IFD ──"Interoperability IFD Pointer"──▶ Interop IFD
//!   │  ──"GPS Info IFD Pointer"──────▶ GPS IFD
//!   └──next directory offset─────────▶ IFD1 (thumbnail)
//! ```
//!
//! The primary, Exif, GPS and Interoperability directories are merged into a
//! single `exif` mapping. The thumbnail directory stays separate.

use serde::Serialize;
use tracing::debug;

use crate::error::HeaderError;
use crate::filter::{
    Group, TagFilter, EXIF_IFD_POINTER, GPS_IFD_POINTER, INTEROPERABILITY_IFD_POINTER,
};
use crate::io::ByteSource;

use super::tiff::{
    ByteOrder, DirectoryReader, DirectoryType, TagDirectory, TagTables, TiffHeader,
};

/// Decoded Exif payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExifData {
    /// Primary, Exif, GPS and Interoperability fields
    pub exif: TagDirectory,

    /// Fields of the chained thumbnail directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<TagDirectory>,
}

/// Options for [`read_exif`].
#[derive(Debug, Clone, Default)]
pub struct ExifOptions {
    /// Position of the TIFF header in the source
    pub offset_origin: usize,

    /// Emit tags missing from the name tables as `undefined-<code>`
    pub include_unknown: bool,

    pub filter: TagFilter,
}

/// Read the Exif payload whose TIFF header starts at `options.offset_origin`.
pub fn read_exif<S: ByteSource + ?Sized>(
    source: &S,
    tables: &TagTables,
    options: &ExifOptions,
) -> Result<ExifData, HeaderError> {
    let origin = options.offset_origin;
    let header = TiffHeader::parse(source, origin)?;
    debug!(
        byte_order = ?header.byte_order,
        first_ifd_offset = header.first_ifd_offset,
        "Parsed TIFF header"
    );

    let reader = DirectoryReader::new(source, tables, header.byte_order)
        .include_unknown(options.include_unknown)
        .with_filter(&options.filter);

    let mut exif = reader.read_directory(
        DirectoryType::Primary,
        origin,
        origin + header.first_ifd_offset,
    );
    let mut thumbnail = exif.thumbnail.take().map(|thumbnail| *thumbnail);

    let exif_ifd = follow_pointer(&reader, &exif, EXIF_IFD_POINTER, DirectoryType::Exif, origin);
    if let Some(exif_ifd) = exif_ifd {
        let interop = follow_pointer(
            &reader,
            &exif_ifd,
            INTEROPERABILITY_IFD_POINTER,
            DirectoryType::Interoperability,
            origin,
        );
        exif.fields.extend(exif_ifd.fields);
        if let Some(interop) = interop {
            exif.fields.extend(interop.fields);
        }
    }

    if let Some(gps) = follow_pointer(&reader, &exif, GPS_IFD_POINTER, DirectoryType::Gps, origin) {
        exif.fields.extend(gps.fields);
    }

    let filter = &options.filter;
    let exif_group = Group::Exif.as_str();
    exif.fields
        .retain(|name, field| filter.should_return_tag(exif_group, name, Some(field.id)));

    let thumbnail_group = Group::Thumbnail.as_str();
    if filter.should_return_group(thumbnail_group) {
        if let Some(thumbnail) = thumbnail.as_mut() {
            thumbnail
                .fields
                .retain(|name, field| filter.should_return_tag(thumbnail_group, name, Some(field.id)));
        }
    } else {
        thumbnail = None;
    }

    Ok(ExifData { exif, thumbnail })
}

/// Decode the directory a pointer field refers to, if the pointer was decoded.
fn follow_pointer<S: ByteSource + ?Sized>(
    reader: &DirectoryReader<'_, S>,
    parent: &TagDirectory,
    pointer: &str,
    directory_type: DirectoryType,
    origin: usize,
) -> Option<TagDirectory> {
    let field = parent.get(pointer)?;
    let Some(relative) = field.value.as_u32() else {
        debug!(pointer, "Pointer value is not an offset");
        return None;
    };
    let offset = origin.checked_add(relative as usize)?;
    debug!(pointer, offset, directory = directory_type.name(), "Following directory pointer");
    Some(reader.read_directory(directory_type, origin, offset))
}

/// Byte order of the payload at `offset_origin`, if it has a valid header.
pub fn byte_order_of<S: ByteSource + ?Sized>(source: &S, offset_origin: usize) -> Option<ByteOrder> {
    TiffHeader::parse(source, offset_origin)
        .ok()
        .map(|header| header.byte_order)
}
