//! Metadata format readers.
//!
//! [`tiff`] decodes the TIFF directory structure shared by TIFF files and
//! Exif payloads; [`exif`] walks that structure to produce the `exif` and
//! `thumbnail` tag groups.

pub mod exif;
pub mod tiff;

pub use exif::{read_exif, ExifData, ExifOptions};
