//! # metatag
//!
//! A reader for TIFF and Exif metadata.
//!
//! The library decodes the tag directories of a TIFF structure (a TIFF file,
//! or the Exif payload embedded in a JPEG APP1 segment) into named, typed and
//! described fields, and selects which tag groups are parsed and returned.
//!
//! ## Features
//!
//! - **Lenient decoding**: truncated directories, out-of-range offsets and
//!   unknown types degrade into partial results instead of errors
//! - **Both byte orders**: every read takes the payload's byte order explicitly
//! - **Tag name tables**: built-in names and descriptions for the standard,
//!   GPS, Interoperability, Canon and Pentax directories
//! - **Tag selection**: include/exclude lists per group, with parse-time
//!   dependencies resolved automatically
//!
//! ## Architecture
//!
//! - [`io`] - Byte source abstraction over in-memory buffers
//! - [`mod@format`] - TIFF directory decoding and the Exif reader
//! - [`filter`] - Tag selection engine
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use metatag::{read_exif, ExifOptions, FilterConfig, Group, TagFilter, TagSpec, TagTables};
//!
//! let data = std::fs::read("photo.tif").unwrap();
//! let config = FilterConfig::new().include(Group::Exif, TagSpec::list(["Make", "Model"]));
//! let options = ExifOptions {
//!     filter: TagFilter::new(&config),
//!     ..ExifOptions::default()
//! };
//!
//! let exif = read_exif(&data, &TagTables::standard(), &options).unwrap();
//! if let Some(make) = exif.exif.get("Make") {
//!     println!("{}", make.description);
//! }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::Config;
pub use error::{DescribeError, HeaderError, TagError};
pub use filter::{FilterConfig, Group, GroupSpecs, Selection, TagFilter, TagSelector, TagSpec};
pub use format::tiff::{
    decode_ascii, read_directory, type_size, ByteOrder, DecodedField, Description,
    DirectoryReader, DirectoryType, Element, FieldType, TagDirectory, TagNameEntry, TagNameTable,
    TagTables, TagValue, TiffHeader, FAULTY_VALUE,
};
pub use format::{read_exif, ExifData, ExifOptions};
pub use io::ByteSource;
