//! Tag name tables.
//!
//! Each directory type has its own table mapping a tag code to either a bare
//! alias or a named descriptor with a description callback. Tables are plain
//! values handed to the decoder; nothing here is global.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::DescribeError;

use super::tables;
use super::tags::DirectoryType;
use super::values::TagValue;

/// Description callback of a descriptor entry.
///
/// Returning an error is a normal outcome: the decoder substitutes the
/// generic rendering of the value.
pub type DescribeFn = fn(&TagValue) -> Result<String, DescribeError>;

// =============================================================================
// TagNameEntry
// =============================================================================

/// Name table entry for one tag code.
#[derive(Debug, Clone)]
pub enum TagNameEntry {
    /// Bare name, described with the generic rendering
    Alias(Cow<'static, str>),
    /// Name with a description callback
    Descriptor {
        name: Cow<'static, str>,
        describe: DescribeFn,
    },
}

impl TagNameEntry {
    pub const fn alias(name: &'static str) -> Self {
        TagNameEntry::Alias(Cow::Borrowed(name))
    }

    pub const fn descriptor(name: &'static str, describe: DescribeFn) -> Self {
        TagNameEntry::Descriptor {
            name: Cow::Borrowed(name),
            describe,
        }
    }

    /// Resolved tag name.
    pub fn name(&self) -> &str {
        match self {
            TagNameEntry::Alias(name) | TagNameEntry::Descriptor { name, .. } => name,
        }
    }
}

// =============================================================================
// TagNameTable
// =============================================================================

/// Mapping from tag code to name entry for one directory type.
#[derive(Debug, Clone, Default)]
pub struct TagNameTable {
    entries: HashMap<u16, TagNameEntry>,
}

impl TagNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a static list of entries.
    pub fn from_static(entries: &[(u16, TagNameEntry)]) -> Self {
        entries.iter().cloned().collect()
    }

    pub fn get(&self, code: u16) -> Option<&TagNameEntry> {
        self.entries.get(&code)
    }

    pub fn contains(&self, code: u16) -> bool {
        self.entries.contains_key(&code)
    }

    /// Add or replace an entry, returning the previous one.
    pub fn insert(&mut self, code: u16, entry: TagNameEntry) -> Option<TagNameEntry> {
        self.entries.insert(code, entry)
    }

    /// Look a tag code up by its resolved name.
    pub fn code_of(&self, name: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.name() == name)
            .map(|(&code, _)| code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(u16, TagNameEntry)> for TagNameTable {
    fn from_iter<I: IntoIterator<Item = (u16, TagNameEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// TagTables
// =============================================================================

/// Name tables for every directory type a decode may touch.
///
/// A directory type without a table behaves as if its table were empty.
#[derive(Debug, Clone, Default)]
pub struct TagTables {
    tables: HashMap<DirectoryType, TagNameTable>,
}

impl TagTables {
    /// Empty set of tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in tables for the standard, GPS, Interoperability and vendor
    /// directories. Primary, Exif and thumbnail directories share a table.
    pub fn standard() -> Self {
        let standard = TagNameTable::from_static(tables::STANDARD_TAGS);
        Self::new()
            .with(DirectoryType::Primary, standard.clone())
            .with(DirectoryType::Exif, standard.clone())
            .with(DirectoryType::Thumbnail, standard)
            .with(DirectoryType::Gps, TagNameTable::from_static(tables::GPS_TAGS))
            .with(
                DirectoryType::Interoperability,
                TagNameTable::from_static(tables::INTEROPERABILITY_TAGS),
            )
            .with(DirectoryType::Canon, TagNameTable::from_static(tables::CANON_TAGS))
            .with(DirectoryType::Pentax, TagNameTable::from_static(tables::PENTAX_TAGS))
    }

    /// Builder-style table registration.
    pub fn with(mut self, directory_type: DirectoryType, table: TagNameTable) -> Self {
        self.insert(directory_type, table);
        self
    }

    pub fn insert(&mut self, directory_type: DirectoryType, table: TagNameTable) {
        self.tables.insert(directory_type, table);
    }

    pub fn get(&self, directory_type: DirectoryType) -> Option<&TagNameTable> {
        self.tables.get(&directory_type)
    }

    /// Entry for `code` in the table of `directory_type`, if any.
    pub fn entry(&self, directory_type: DirectoryType, code: u16) -> Option<&TagNameEntry> {
        self.get(directory_type).and_then(|table| table.get(code))
    }
}

// =============================================================================
// Tests
// =============================================================================
