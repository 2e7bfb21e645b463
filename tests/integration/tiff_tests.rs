//! Directory decoding integration tests.
//!
//! Tests verify:
//! - Little-endian and big-endian payloads decode identically
//! - Truncated and corrupt payloads degrade instead of failing
//! - Payloads embedded after an `Exif\0\0` prefix resolve offsets correctly

use metatag::{
    read_directory, read_exif, ByteOrder, Description, DirectoryType, Element, ExifOptions,
    HeaderError, TagTables, TagValue, TiffHeader, FAULTY_VALUE,
};

use super::test_utils::{camera_payload, ByteOrderType, IfdBuilder, TiffBuilder};

fn decode(data: &[u8], options: &ExifOptions) -> metatag::ExifData {
    read_exif(data, &TagTables::standard(), options).unwrap()
}

// =============================================================================
// Byte Order Tests
// =============================================================================

#[test]
fn test_header_byte_order() {
    let le = camera_payload(ByteOrderType::LittleEndian).build();
    let be = camera_payload(ByteOrderType::BigEndian).build();

    assert_eq!(&le[0..2], b"II");
    assert_eq!(&be[0..2], b"MM");
    assert_eq!(TiffHeader::parse(&le[..], 0).unwrap().byte_order, ByteOrder::LittleEndian);
    assert_eq!(TiffHeader::parse(&be[..], 0).unwrap().byte_order, ByteOrder::BigEndian);
}

#[test]
fn test_both_byte_orders_decode_identically() {
    let options = ExifOptions::default();
    let le = decode(&camera_payload(ByteOrderType::LittleEndian).build(), &options);
    let be = decode(&camera_payload(ByteOrderType::BigEndian).build(), &options);

    assert!(!le.exif.is_empty());
    assert_eq!(le, be);
}

#[test]
fn test_big_endian_values() {
    let data = camera_payload(ByteOrderType::BigEndian).build();
    let result = decode(&data, &ExifOptions::default());

    let orientation = result.exif.get("Orientation").unwrap();
    assert_eq!(orientation.value, TagValue::Single(Element::Unsigned(6)));
    assert_eq!(orientation.description, Description::Text("right-top".into()));

    let bias = result.exif.get("ExposureBiasValue").unwrap();
    assert_eq!(bias.value, TagValue::Single(Element::SRational(-1, 3)));
    let Description::Text(text) = &bias.description else {
        panic!("expected text description, got {:?}", bias.description);
    };
    assert!(text.starts_with("-0.333"), "{text}");
}

// =============================================================================
// Degradation Tests
// =============================================================================

#[test]
fn test_truncated_payload_keeps_inline_fields() {
    let mut data = camera_payload(ByteOrderType::LittleEndian).build();
    // Header (8) + count (2) + Make, Model, Orientation records
    data.truncate(8 + 2 + 3 * 12);

    let result = decode(&data, &ExifOptions::default());

    assert_eq!(result.exif.get("Make").unwrap().value, TagValue::Faulty);
    assert_eq!(result.exif.get("Model").unwrap().value, TagValue::Faulty);
    assert_eq!(
        result.exif.get("Orientation").unwrap().description,
        Description::Text("right-top".into())
    );
    assert!(!result.exif.contains("XResolution"));
    assert!(!result.exif.contains("ExposureTime"));
    assert!(result.thumbnail.is_none());
}

#[test]
fn test_out_of_range_offset_is_faulty() {
    let data = TiffBuilder::new()
        .primary(
            IfdBuilder::new()
                .raw(0x010f, 2, 32, 0xFFFF_0000)
                .short(0x0112, 1),
        )
        .build();

    let result = decode(&data, &ExifOptions::default());
    let make = result.exif.get("Make").unwrap();
    assert_eq!(make.id, 0x010f);
    assert!(make.value.is_faulty());
    assert_eq!(make.description, Description::Text(FAULTY_VALUE.into()));
    assert!(result.exif.contains("Orientation"));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["exif"]["Make"]["value"], "<faulty value>");
}

#[test]
fn test_unsupported_type_and_unknown_tag() {
    let data = TiffBuilder::new()
        .primary(
            IfdBuilder::new()
                .raw(0x0112, 11, 1, 0) // FLOAT
                .short(0xC0DE, 7)
                .short(0x0128, 2),
        )
        .build();

    let result = decode(&data, &ExifOptions::default());
    assert_eq!(result.exif.len(), 1);
    assert!(result.exif.contains("ResolutionUnit"));

    let options = ExifOptions {
        include_unknown: true,
        ..ExifOptions::default()
    };
    let result = decode(&data, &options);
    assert_eq!(result.exif.len(), 2);
    let unknown = result.exif.get("undefined-49374").unwrap();
    assert_eq!(unknown.description, Description::Raw(TagValue::Single(Element::Unsigned(7))));
}

#[test]
fn test_iptc_payload_read_as_bytes() {
    let iptc = [0x1C, 0x02, 0x05, 0x00, 0x03, b'a', b'b', b'c'];
    for order in ByteOrderType::BOTH {
        let data = TiffBuilder::new()
            .with_byte_order(order)
            .primary(IfdBuilder::new().longs_raw(0x83bb, &iptc))
            .build();

        let result = decode(&data, &ExifOptions::default());
        let bytes: Vec<u32> = result
            .exif
            .get("IPTC-NAA")
            .unwrap()
            .value
            .elements()
            .iter()
            .filter_map(Element::as_u32)
            .collect();
        assert_eq!(bytes, iptc.iter().map(|&b| u32::from(b)).collect::<Vec<_>>());
    }
}

#[test]
fn test_ascii_runs() {
    let data = TiffBuilder::new()
        .primary(IfdBuilder::new().ascii(0x010e, "first\0\0second"))
        .build();

    let result = decode(&data, &ExifOptions::default());
    assert_eq!(
        result.exif.get("ImageDescription").unwrap().value,
        TagValue::List(vec![Element::Text("first".into()), Element::Text("second".into())])
    );
}

#[test]
fn test_invalid_header() {
    let result = read_exif(&b"MM\x00\x2B\x00\x00\x00\x08"[..], &TagTables::standard(), &ExifOptions::default());
    assert_eq!(result, Err(HeaderError::InvalidVersion(43)));
}

// =============================================================================
// Offset Origin Tests
// =============================================================================

#[test]
fn test_exif_prefix_offset_origin() {
    for order in ByteOrderType::BOTH {
        let plain = camera_payload(order).build();
        let prefixed = camera_payload(order).with_prefix(b"Exif\0\0").build();
        assert_eq!(prefixed.len(), plain.len() + 6);

        let at_origin = decode(&plain, &ExifOptions::default());
        let options = ExifOptions {
            offset_origin: 6,
            ..ExifOptions::default()
        };
        let shifted = decode(&prefixed, &options);

        assert_eq!(
            shifted.exif.get("Make").unwrap().value,
            at_origin.exif.get("Make").unwrap().value
        );
        // Source offsets are absolute buffer positions
        assert_eq!(
            shifted.exif.get("MakerNote").unwrap().source_offset,
            at_origin.exif.get("MakerNote").unwrap().source_offset.map(|o| o + 6)
        );
    }
}

#[test]
fn test_read_directory_standalone() {
    let data = camera_payload(ByteOrderType::LittleEndian).build();
    let tables = TagTables::standard();

    let primary = read_directory(&data[..], &tables, DirectoryType::Primary, 0, 8, ByteOrder::LittleEndian, false);
    assert!(primary.contains("Make"));
    assert!(primary.contains("Exif IFD Pointer"));
    assert!(primary.thumbnail.as_ref().unwrap().contains("Compression"));

    // Same bytes read as a non-primary directory never chain
    let exif = read_directory(&data[..], &tables, DirectoryType::Exif, 0, 8, ByteOrder::LittleEndian, false);
    assert!(exif.contains("Make"));
    assert!(exif.thumbnail.is_none());
}
