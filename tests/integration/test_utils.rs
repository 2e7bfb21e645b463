//! Test utilities for integration tests.
//!
//! Provides a builder that lays out TIFF/Exif payloads with a primary
//! directory, optional Exif/GPS/Interoperability sub-directories and an
//! optional thumbnail directory, in either byte order.

#![allow(dead_code)]

/// Size of the TIFF header.
const HEADER_SIZE: u32 = 8;

pub const EXIF_POINTER_TAG: u16 = 0x8769;
pub const GPS_POINTER_TAG: u16 = 0x8825;
pub const INTEROP_POINTER_TAG: u16 = 0xa005;

#[derive(Clone, Copy, Debug)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    pub const BOTH: [ByteOrderType; 2] = [ByteOrderType::LittleEndian, ByteOrderType::BigEndian];

    fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }
}

// =============================================================================
// Field payloads
// =============================================================================

#[derive(Clone, Debug)]
enum Payload {
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    SLongs(Vec<i32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Value slot written verbatim, no external data
    Slot(u32),
    /// Pointer to a sub-directory, resolved at build time
    Pointer(SubDirectory),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubDirectory {
    Exif,
    Gps,
    Interop,
}

impl Payload {
    fn encode(&self, order: ByteOrderType) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Payload::Bytes(bytes) => out.extend_from_slice(bytes),
            Payload::Shorts(values) => values.iter().for_each(|v| out.extend(order.u16(*v))),
            Payload::Longs(values) => values.iter().for_each(|v| out.extend(order.u32(*v))),
            Payload::SLongs(values) => values.iter().for_each(|v| out.extend(order.u32(*v as u32))),
            Payload::Rationals(values) => values.iter().for_each(|(n, d)| {
                out.extend(order.u32(*n));
                out.extend(order.u32(*d));
            }),
            Payload::SRationals(values) => values.iter().for_each(|(n, d)| {
                out.extend(order.u32(*n as u32));
                out.extend(order.u32(*d as u32));
            }),
            Payload::Slot(_) | Payload::Pointer(_) => {}
        }
        out
    }
}

#[derive(Clone, Debug)]
struct Entry {
    tag: u16,
    field_type: u16,
    count: u32,
    payload: Payload,
}

// =============================================================================
// IfdBuilder
// =============================================================================

/// Builder for one directory.
#[derive(Clone, Debug, Default)]
pub struct IfdBuilder {
    entries: Vec<Entry>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, tag: u16, field_type: u16, count: u32, payload: Payload) -> Self {
        self.entries.push(Entry {
            tag,
            field_type,
            count,
            payload,
        });
        self
    }

    /// NUL-terminated ASCII value.
    pub fn ascii(self, tag: u16, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        let count = bytes.len() as u32;
        self.push(tag, 2, count, Payload::Bytes(bytes))
    }

    /// BYTE (1) or UNDEFINED (7) value.
    pub fn bytes(self, tag: u16, field_type: u16, bytes: &[u8]) -> Self {
        self.push(tag, field_type, bytes.len() as u32, Payload::Bytes(bytes.to_vec()))
    }

    pub fn short(self, tag: u16, value: u16) -> Self {
        self.shorts(tag, &[value])
    }

    pub fn shorts(self, tag: u16, values: &[u16]) -> Self {
        self.push(tag, 3, values.len() as u32, Payload::Shorts(values.to_vec()))
    }

    pub fn long(self, tag: u16, value: u32) -> Self {
        self.push(tag, 4, 1, Payload::Longs(vec![value]))
    }

    /// Bytes declared with an arbitrary 4-byte type (e.g. IPTC-NAA as LONG).
    pub fn longs_raw(self, tag: u16, bytes: &[u8]) -> Self {
        assert_eq!(bytes.len() % 4, 0);
        self.push(tag, 4, (bytes.len() / 4) as u32, Payload::Bytes(bytes.to_vec()))
    }

    pub fn slong(self, tag: u16, value: i32) -> Self {
        self.push(tag, 9, 1, Payload::SLongs(vec![value]))
    }

    pub fn rational(self, tag: u16, numerator: u32, denominator: u32) -> Self {
        self.rationals(tag, &[(numerator, denominator)])
    }

    pub fn rationals(self, tag: u16, values: &[(u32, u32)]) -> Self {
        self.push(tag, 5, values.len() as u32, Payload::Rationals(values.to_vec()))
    }

    pub fn srational(self, tag: u16, numerator: i32, denominator: i32) -> Self {
        self.push(tag, 10, 1, Payload::SRationals(vec![(numerator, denominator)]))
    }

    /// Record with an explicit type, count and value slot.
    pub fn raw(self, tag: u16, field_type: u16, count: u32, slot: u32) -> Self {
        self.push(tag, field_type, count, Payload::Slot(slot))
    }

    fn with_pointer(mut self, tag: u16, target: SubDirectory) -> Self {
        self.entries.retain(|entry| entry.tag != tag);
        self.push(tag, 4, 1, Payload::Pointer(target))
    }

    /// Bytes the directory occupies, including its external data.
    fn size(&self, order: ByteOrderType) -> u32 {
        let external: usize = self
            .entries
            .iter()
            .map(|entry| entry.payload.encode(order).len())
            .filter(|&len| len > 4)
            .sum();
        2 + 12 * self.entries.len() as u32 + 4 + external as u32
    }

    fn write(
        &self,
        out: &mut Vec<u8>,
        order: ByteOrderType,
        offset: u32,
        next: u32,
        pointers: &[(SubDirectory, u32)],
    ) {
        let mut data_offset = offset + 2 + 12 * self.entries.len() as u32 + 4;
        let mut external = Vec::new();

        out.extend(order.u16(self.entries.len() as u16));
        for entry in &self.entries {
            out.extend(order.u16(entry.tag));
            out.extend(order.u16(entry.field_type));
            out.extend(order.u32(entry.count));

            match entry.payload {
                Payload::Slot(slot) => out.extend(order.u32(slot)),
                Payload::Pointer(target) => {
                    let target_offset = pointers
                        .iter()
                        .find(|(kind, _)| *kind == target)
                        .map_or(0, |(_, offset)| *offset);
                    out.extend(order.u32(target_offset));
                }
                _ => {
                    let mut encoded = entry.payload.encode(order);
                    if encoded.len() <= 4 {
                        encoded.resize(4, 0);
                        out.extend(encoded);
                    } else {
                        out.extend(order.u32(data_offset));
                        data_offset += encoded.len() as u32;
                        external.extend(encoded);
                    }
                }
            }
        }
        out.extend(order.u32(next));
        out.extend(external);
    }
}

// =============================================================================
// TiffBuilder
// =============================================================================

/// Builder for a complete TIFF/Exif payload.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    prefix: Vec<u8>,
    primary: IfdBuilder,
    exif: Option<IfdBuilder>,
    gps: Option<IfdBuilder>,
    interop: Option<IfdBuilder>,
    thumbnail: Option<IfdBuilder>,
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            prefix: Vec::new(),
            primary: IfdBuilder::new(),
            exif: None,
            gps: None,
            interop: None,
            thumbnail: None,
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    /// Bytes placed before the TIFF header (e.g. `Exif\0\0`).
    pub fn with_prefix(mut self, prefix: &[u8]) -> Self {
        self.prefix = prefix.to_vec();
        self
    }

    pub fn primary(mut self, ifd: IfdBuilder) -> Self {
        self.primary = ifd;
        self
    }

    pub fn exif(mut self, ifd: IfdBuilder) -> Self {
        self.exif = Some(ifd);
        self
    }

    pub fn gps(mut self, ifd: IfdBuilder) -> Self {
        self.gps = Some(ifd);
        self
    }

    pub fn interop(mut self, ifd: IfdBuilder) -> Self {
        self.interop = Some(ifd);
        self
    }

    pub fn thumbnail(mut self, ifd: IfdBuilder) -> Self {
        self.thumbnail = Some(ifd);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let order = self.byte_order;

        let mut primary = self.primary.clone();
        if self.exif.is_some() {
            primary = primary.with_pointer(EXIF_POINTER_TAG, SubDirectory::Exif);
        }
        if self.gps.is_some() {
            primary = primary.with_pointer(GPS_POINTER_TAG, SubDirectory::Gps);
        }
        let exif = match (&self.exif, &self.interop) {
            (Some(exif), Some(_)) => {
                Some(exif.clone().with_pointer(INTEROP_POINTER_TAG, SubDirectory::Interop))
            }
            (exif, _) => exif.clone(),
        };

        // Layout: header, primary, exif, gps, interop, thumbnail
        let primary_offset = HEADER_SIZE;
        let mut cursor = primary_offset + primary.size(order);
        let mut pointers = Vec::new();
        let mut place = |ifd: &Option<IfdBuilder>, kind: Option<SubDirectory>| {
            ifd.as_ref().map(|ifd| {
                let offset = cursor;
                cursor += ifd.size(order);
                if let Some(kind) = kind {
                    pointers.push((kind, offset));
                }
                offset
            })
        };
        let exif_offset = place(&exif, Some(SubDirectory::Exif));
        let gps_offset = place(&self.gps, Some(SubDirectory::Gps));
        let interop_offset = place(&self.interop, Some(SubDirectory::Interop));
        let thumbnail_offset = place(&self.thumbnail, None);

        let mut out = self.prefix.clone();
        let mut tiff = Vec::new();
        match order {
            ByteOrderType::LittleEndian => tiff.extend(b"II"),
            ByteOrderType::BigEndian => tiff.extend(b"MM"),
        }
        tiff.extend(order.u16(42));
        tiff.extend(order.u32(primary_offset));

        primary.write(&mut tiff, order, primary_offset, thumbnail_offset.unwrap_or(0), &pointers);
        for (ifd, offset) in [
            (&exif, exif_offset),
            (&self.gps, gps_offset),
            (&self.interop, interop_offset),
            (&self.thumbnail, thumbnail_offset),
        ] {
            if let (Some(ifd), Some(offset)) = (ifd, offset) {
                assert_eq!(tiff.len() as u32, offset);
                ifd.write(&mut tiff, order, offset, 0, &pointers);
            }
        }

        out.extend(tiff);
        out
    }
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Sample payloads
// =============================================================================

/// A camera-like payload exercising every directory kind.
pub fn camera_payload(order: ByteOrderType) -> TiffBuilder {
    TiffBuilder::new()
        .with_byte_order(order)
        .primary(
            IfdBuilder::new()
                .ascii(0x010f, "Canon")
                .ascii(0x0110, "Canon EOS 5D")
                .short(0x0112, 6)
                .rational(0x011a, 72, 1)
                .rational(0x011b, 72, 1)
                .short(0x0128, 2),
        )
        .exif(
            IfdBuilder::new()
                .rational(0x829a, 1, 250)
                .rational(0x829d, 28, 10)
                .short(0x8827, 400)
                .bytes(0x9000, 7, b"0230")
                .srational(0x9204, -1, 3)
                .rational(0x920a, 50, 1)
                .bytes(0x927c, 7, b"Canon maker note"),
        )
        .gps(
            IfdBuilder::new()
                .bytes(0x0000, 1, &[2, 3, 0, 0])
                .ascii(0x0001, "N")
                .rationals(0x0002, &[(48, 1), (51, 1), (30, 1)]),
        )
        .interop(IfdBuilder::new().ascii(0x0001, "R98"))
        .thumbnail(
            IfdBuilder::new()
                .short(0x0103, 6)
                .long(0x0201, 4096)
                .long(0x0202, 1024),
        )
}
