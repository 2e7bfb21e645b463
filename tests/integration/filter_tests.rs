//! Tag filtering integration tests.
//!
//! Tests verify:
//! - Filter configurations deserialize from the camelCase JSON shape
//! - Pointer dependencies are parsed but not returned
//! - Exclusions by name and by numeric id

use metatag::{read_exif, ExifData, ExifOptions, FilterConfig, Group, TagFilter, TagTables};

use super::test_utils::{camera_payload, ByteOrderType};

fn filtered(json: &str) -> ExifData {
    let config: FilterConfig = serde_json::from_str(json).unwrap();
    let options = ExifOptions {
        filter: TagFilter::new(&config),
        ..ExifOptions::default()
    };
    let data = camera_payload(ByteOrderType::BigEndian).build();
    read_exif(&data[..], &TagTables::standard(), &options).unwrap()
}

fn names(data: &ExifData) -> Vec<&str> {
    data.exif.iter().map(|(name, _)| name).collect()
}

// =============================================================================
// Include Tests
// =============================================================================

#[test]
fn test_include_gps_tag_follows_pointers() {
    let data = filtered(r#"{"includeTags": {"exif": ["GPSLatitude"]}}"#);
    assert_eq!(names(&data), vec!["GPSLatitude"]);
    assert!(data.thumbnail.is_none());
}

#[test]
fn test_include_is_case_insensitive() {
    let data = filtered(r#"{"includeTags": {"exif": ["interoperabilityindex", "make"]}}"#);
    assert_eq!(names(&data), vec!["InteroperabilityIndex", "Make"]);
}

#[test]
fn test_include_by_id() {
    let data = filtered(r#"{"includeTags": {"exif": [274, 33434]}}"#);
    assert_eq!(names(&data), vec!["ExposureTime", "Orientation"]);
}

#[test]
fn test_include_thumbnail_subset() {
    let data = filtered(r#"{"includeTags": {"exif": true, "thumbnail": ["Compression"]}}"#);
    assert!(data.exif.contains("GPSLatitude"));

    let thumbnail = data.thumbnail.unwrap();
    assert_eq!(thumbnail.len(), 1);
    assert!(thumbnail.contains("Compression"));
}

#[test]
fn test_false_is_absent() {
    let data = filtered(r#"{"includeTags": {"exif": false}}"#);
    assert!(data.exif.is_empty());
    assert!(data.thumbnail.is_none());
}

#[test]
fn test_dependent_group_parses_exif_without_returning_it() {
    let config: FilterConfig = serde_json::from_str(r#"{"includeTags": {"composite": true}}"#).unwrap();
    let filter = TagFilter::new(&config);

    assert!(filter.should_parse_group("exif"));
    assert!(!filter.should_return_group("exif"));
    assert!(filter.should_parse_tag("exif", "FocalLength", Some(0x920a)));

    let data = filtered(r#"{"includeTags": {"composite": true}}"#);
    assert!(data.exif.is_empty());
}

// =============================================================================
// Exclude Tests
// =============================================================================

#[test]
fn test_exclude_by_name_and_id() {
    let data = filtered(r#"{"excludeTags": {"exif": ["MakerNote", 33434]}}"#);
    assert!(!data.exif.contains("MakerNote"));
    assert!(!data.exif.contains("ExposureTime"));
    assert!(data.exif.contains("FNumber"));
    assert!(data.thumbnail.is_some());
}

#[test]
fn test_exclude_wins_over_include() {
    let data = filtered(r#"{"includeTags": {"exif": ["Make", "Model"]}, "excludeTags": {"exif": ["make"]}}"#);
    assert_eq!(names(&data), vec!["Model"]);
}

#[test]
fn test_exclude_thumbnail_group() {
    let data = filtered(r#"{"excludeTags": {"thumbnail": true}}"#);
    assert!(data.thumbnail.is_none());
    assert!(data.exif.contains("Make"));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_round_trip_shape() {
    let config = FilterConfig::new()
        .include(Group::Exif, metatag::TagSpec::list(["Make"]))
        .exclude(Group::Xmp, metatag::TagSpec::Flag(true));

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"includeTags": {"exif": ["Make"]}, "excludeTags": {"xmp": true}})
    );
}

#[test]
fn test_empty_config_allows_all() {
    let config: FilterConfig = serde_json::from_str("{}").unwrap();
    let filter = TagFilter::new(&config);
    assert!(filter.is_allow_all());
    assert!(filter.should_return_tag("anything", "Whatever", None));
}

#[test]
fn test_ungoverned_group() {
    let config: FilterConfig = serde_json::from_str(r#"{"includeTags": {"exif": ["Make"]}}"#).unwrap();
    let filter = TagFilter::new(&config);
    assert!(filter.should_return_group("customGroup"));
    assert!(filter.should_parse_tag("customGroup", "Anything", None));
}
