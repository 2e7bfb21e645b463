//! Built-in tag name tables and their description callbacks.

use crate::error::DescribeError;

use super::names::{TagNameEntry, TagNameEntry as E};
use super::values::{Element, TagValue};

// =============================================================================
// Description helpers
// =============================================================================

fn expect_u32(tag: &'static str, value: &TagValue) -> Result<u32, DescribeError> {
    value.as_u32().ok_or_else(|| DescribeError::UnexpectedValue {
        tag,
        message: format!("expected an integer, got {value}"),
    })
}

fn expect_text(tag: &'static str, value: &TagValue) -> Result<String, DescribeError> {
    value.as_text().ok_or_else(|| DescribeError::UnexpectedValue {
        tag,
        message: format!("expected text, got {value}"),
    })
}

fn expect_numbers(tag: &'static str, value: &TagValue, count: usize) -> Result<Vec<f64>, DescribeError> {
    let numbers: Option<Vec<f64>> = value.elements().iter().map(|e| e.as_f64()).collect();
    match numbers {
        Some(numbers) if numbers.len() >= count => Ok(numbers),
        _ => Err(DescribeError::UnexpectedValue {
            tag,
            message: format!("expected {count} numeric element(s), got {value}"),
        }),
    }
}

fn enumerated(
    tag: &'static str,
    value: &TagValue,
    names: &[(u32, &'static str)],
) -> Result<String, DescribeError> {
    let code = expect_u32(tag, value)?;
    names
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| (*name).to_string())
        .ok_or(DescribeError::UnknownCode { tag, code })
}

fn lettered(
    tag: &'static str,
    value: &TagValue,
    names: &[(&'static str, &'static str)],
) -> Result<String, DescribeError> {
    let text = expect_text(tag, value)?;
    names
        .iter()
        .find(|(letter, _)| *letter == text)
        .map(|(_, name)| (*name).to_string())
        .ok_or_else(|| DescribeError::UnexpectedValue {
            tag,
            message: format!("unknown reference {text:?}"),
        })
}

/// Render undefined bytes holding a 4-character version such as "0231".
fn version_bytes(tag: &'static str, value: &TagValue) -> Result<String, DescribeError> {
    let bytes: Option<Vec<u8>> = value
        .elements()
        .iter()
        .map(|e| e.as_u32().and_then(|v| u8::try_from(v).ok()))
        .collect();
    match bytes {
        Some(bytes) if !bytes.is_empty() => Ok(bytes.into_iter().map(char::from).collect()),
        _ => Err(DescribeError::UnexpectedValue {
            tag,
            message: format!("expected version bytes, got {value}"),
        }),
    }
}

fn join_elements(value: &TagValue, separator: &str) -> String {
    value
        .elements()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

const RESOLUTION_UNITS: &[(u32, &str)] = &[(1, "None"), (2, "inches"), (3, "centimeters")];

// =============================================================================
// Standard (IFD0 / Exif / IFD1) descriptions
// =============================================================================

fn describe_compression(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "Compression",
        value,
        &[
            (1, "Uncompressed"),
            (5, "LZW"),
            (6, "JPEG (old-style)"),
            (7, "JPEG"),
            (8, "Adobe Deflate"),
            (32773, "PackBits"),
        ],
    )
}

fn describe_photometric(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "PhotometricInterpretation",
        value,
        &[
            (0, "WhiteIsZero"),
            (1, "BlackIsZero"),
            (2, "RGB"),
            (3, "RGB Palette"),
            (5, "CMYK"),
            (6, "YCbCr"),
        ],
    )
}

fn describe_orientation(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "Orientation",
        value,
        &[
            (1, "top-left"),
            (2, "top-right"),
            (3, "bottom-right"),
            (4, "bottom-left"),
            (5, "left-top"),
            (6, "right-top"),
            (7, "right-bottom"),
            (8, "left-bottom"),
        ],
    )
}

fn describe_resolution_unit(value: &TagValue) -> Result<String, DescribeError> {
    enumerated("ResolutionUnit", value, RESOLUTION_UNITS)
}

fn describe_focal_plane_resolution_unit(value: &TagValue) -> Result<String, DescribeError> {
    enumerated("FocalPlaneResolutionUnit", value, RESOLUTION_UNITS)
}

fn describe_ycbcr_positioning(value: &TagValue) -> Result<String, DescribeError> {
    enumerated("YCbCrPositioning", value, &[(1, "centered"), (2, "co-sited")])
}

fn describe_exposure_time(value: &TagValue) -> Result<String, DescribeError> {
    let tag = "ExposureTime";
    match value.first() {
        Some(&Element::Rational(n, d)) if n != 0 && n <= d && d % n == 0 => {
            Ok(format!("1/{}", d / n))
        }
        _ => {
            let seconds = expect_numbers(tag, value, 1)?[0];
            Ok(format!("{seconds}"))
        }
    }
}

fn describe_f_number(value: &TagValue) -> Result<String, DescribeError> {
    let f = expect_numbers("FNumber", value, 1)?[0];
    Ok(format!("f/{f}"))
}

fn describe_exposure_program(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "ExposureProgram",
        value,
        &[
            (0, "Undefined"),
            (1, "Manual"),
            (2, "Normal program"),
            (3, "Aperture priority"),
            (4, "Shutter priority"),
            (5, "Creative program"),
            (6, "Action program"),
            (7, "Portrait mode"),
            (8, "Landscape mode"),
        ],
    )
}

fn describe_exif_version(value: &TagValue) -> Result<String, DescribeError> {
    version_bytes("ExifVersion", value)
}

fn describe_flashpix_version(value: &TagValue) -> Result<String, DescribeError> {
    version_bytes("FlashpixVersion", value)
}

fn describe_components_configuration(value: &TagValue) -> Result<String, DescribeError> {
    let tag = "ComponentsConfiguration";
    value
        .elements()
        .iter()
        .map(|e| match e.as_u32() {
            Some(0) => Ok(""),
            Some(1) => Ok("Y"),
            Some(2) => Ok("Cb"),
            Some(3) => Ok("Cr"),
            Some(4) => Ok("R"),
            Some(5) => Ok("G"),
            Some(6) => Ok("B"),
            Some(code) => Err(DescribeError::UnknownCode { tag, code }),
            None => Err(DescribeError::UnexpectedValue {
                tag,
                message: format!("expected component codes, got {value}"),
            }),
        })
        .collect()
}

fn describe_metering_mode(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "MeteringMode",
        value,
        &[
            (0, "Unknown"),
            (1, "Average"),
            (2, "CenterWeightedAverage"),
            (3, "Spot"),
            (4, "MultiSpot"),
            (5, "Pattern"),
            (6, "Partial"),
            (255, "Other"),
        ],
    )
}

fn describe_flash(value: &TagValue) -> Result<String, DescribeError> {
    let flags = expect_u32("Flash", value)?;
    let fired = if flags & 0x01 != 0 {
        "Flash fired"
    } else {
        "Flash did not fire"
    };
    let mode = match (flags >> 3) & 0x03 {
        1 => ", compulsory flash mode",
        2 => ", compulsory flash suppression",
        3 => ", auto mode",
        _ => "",
    };
    let red_eye = if flags & 0x40 != 0 {
        ", red-eye reduction mode"
    } else {
        ""
    };
    Ok(format!("{fired}{mode}{red_eye}"))
}

fn describe_focal_length(value: &TagValue) -> Result<String, DescribeError> {
    let mm = expect_numbers("FocalLength", value, 1)?[0];
    Ok(format!("{mm} mm"))
}

fn describe_focal_length_35mm(value: &TagValue) -> Result<String, DescribeError> {
    match expect_u32("FocalLengthIn35mmFilm", value)? {
        0 => Ok("Unknown".to_string()),
        mm => Ok(format!("{mm} mm")),
    }
}

fn describe_maker_note(_: &TagValue) -> Result<String, DescribeError> {
    Ok("[Raw maker note data]".to_string())
}

fn describe_color_space(value: &TagValue) -> Result<String, DescribeError> {
    enumerated("ColorSpace", value, &[(1, "sRGB"), (0xFFFF, "Uncalibrated")])
}

fn describe_exposure_mode(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "ExposureMode",
        value,
        &[(0, "Auto exposure"), (1, "Manual exposure"), (2, "Auto bracket")],
    )
}

fn describe_white_balance(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "WhiteBalance",
        value,
        &[(0, "Auto white balance"), (1, "Manual white balance")],
    )
}

fn describe_scene_capture_type(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "SceneCaptureType",
        value,
        &[(0, "Standard"), (1, "Landscape"), (2, "Portrait"), (3, "Night scene")],
    )
}

pub static STANDARD_TAGS: &[(u16, TagNameEntry)] = &[
    (0x0100, E::alias("ImageWidth")),
    (0x0101, E::alias("ImageLength")),
    (0x0102, E::alias("BitsPerSample")),
    (0x0103, E::descriptor("Compression", describe_compression)),
    (0x0106, E::descriptor("PhotometricInterpretation", describe_photometric)),
    (0x010e, E::alias("ImageDescription")),
    (0x010f, E::alias("Make")),
    (0x0110, E::alias("Model")),
    (0x0111, E::alias("StripOffsets")),
    (0x0112, E::descriptor("Orientation", describe_orientation)),
    (0x0115, E::alias("SamplesPerPixel")),
    (0x0116, E::alias("RowsPerStrip")),
    (0x0117, E::alias("StripByteCounts")),
    (0x011a, E::alias("XResolution")),
    (0x011b, E::alias("YResolution")),
    (0x011c, E::alias("PlanarConfiguration")),
    (0x0128, E::descriptor("ResolutionUnit", describe_resolution_unit)),
    (0x0131, E::alias("Software")),
    (0x0132, E::alias("DateTime")),
    (0x013b, E::alias("Artist")),
    (0x013e, E::alias("WhitePoint")),
    (0x013f, E::alias("PrimaryChromaticities")),
    (0x0201, E::alias("JPEGInterchangeFormat")),
    (0x0202, E::alias("JPEGInterchangeFormatLength")),
    (0x0211, E::alias("YCbCrCoefficients")),
    (0x0212, E::alias("YCbCrSubSampling")),
    (0x0213, E::descriptor("YCbCrPositioning", describe_ycbcr_positioning)),
    (0x0214, E::alias("ReferenceBlackWhite")),
    (0x02bc, E::alias("ApplicationNotes")),
    (0x8298, E::alias("Copyright")),
    (0x829a, E::descriptor("ExposureTime", describe_exposure_time)),
    (0x829d, E::descriptor("FNumber", describe_f_number)),
    (0x83bb, E::alias("IPTC-NAA")),
    (0x8649, E::alias("PhotoshopSettings")),
    (0x8769, E::alias("Exif IFD Pointer")),
    (0x8773, E::alias("ICC_Profile")),
    (0x8822, E::descriptor("ExposureProgram", describe_exposure_program)),
    (0x8825, E::alias("GPS Info IFD Pointer")),
    (0x8827, E::alias("ISOSpeedRatings")),
    (0x9000, E::descriptor("ExifVersion", describe_exif_version)),
    (0x9003, E::alias("DateTimeOriginal")),
    (0x9004, E::alias("DateTimeDigitized")),
    (0x9101, E::descriptor("ComponentsConfiguration", describe_components_configuration)),
    (0x9201, E::alias("ShutterSpeedValue")),
    (0x9202, E::alias("ApertureValue")),
    (0x9204, E::alias("ExposureBiasValue")),
    (0x9207, E::descriptor("MeteringMode", describe_metering_mode)),
    (0x9209, E::descriptor("Flash", describe_flash)),
    (0x920a, E::descriptor("FocalLength", describe_focal_length)),
    (0x927c, E::descriptor("MakerNote", describe_maker_note)),
    (0x9286, E::alias("UserComment")),
    (0x9290, E::alias("SubSecTime")),
    (0x935c, E::alias("ImageSourceData")),
    (0xa000, E::descriptor("FlashpixVersion", describe_flashpix_version)),
    (0xa001, E::descriptor("ColorSpace", describe_color_space)),
    (0xa002, E::alias("PixelXDimension")),
    (0xa003, E::alias("PixelYDimension")),
    (0xa005, E::alias("Interoperability IFD Pointer")),
    (0xa20e, E::alias("FocalPlaneXResolution")),
    (0xa20f, E::alias("FocalPlaneYResolution")),
    (0xa210, E::descriptor("FocalPlaneResolutionUnit", describe_focal_plane_resolution_unit)),
    (0xa401, E::alias("CustomRendered")),
    (0xa402, E::descriptor("ExposureMode", describe_exposure_mode)),
    (0xa403, E::descriptor("WhiteBalance", describe_white_balance)),
    (0xa405, E::descriptor("FocalLengthIn35mmFilm", describe_focal_length_35mm)),
    (0xa406, E::descriptor("SceneCaptureType", describe_scene_capture_type)),
    (0xa420, E::alias("ImageUniqueID")),
    (0xa430, E::alias("CameraOwnerName")),
    (0xa431, E::alias("BodySerialNumber")),
    (0xa432, E::alias("LensSpecification")),
    (0xa433, E::alias("LensMake")),
    (0xa434, E::alias("LensModel")),
];

// =============================================================================
// GPS descriptions
// =============================================================================

fn describe_gps_version(value: &TagValue) -> Result<String, DescribeError> {
    expect_numbers("GPSVersionID", value, 1)?;
    Ok(join_elements(value, "."))
}

fn describe_latitude_ref(value: &TagValue) -> Result<String, DescribeError> {
    lettered(
        "GPSLatitudeRef",
        value,
        &[("N", "North latitude"), ("S", "South latitude")],
    )
}

fn describe_longitude_ref(value: &TagValue) -> Result<String, DescribeError> {
    lettered(
        "GPSLongitudeRef",
        value,
        &[("E", "East longitude"), ("W", "West longitude")],
    )
}

/// Degrees, minutes and seconds collapsed to decimal degrees.
fn degrees(tag: &'static str, value: &TagValue) -> Result<String, DescribeError> {
    let dms = expect_numbers(tag, value, 3)?;
    Ok(format!("{}", dms[0] + dms[1] / 60.0 + dms[2] / 3600.0))
}

fn describe_latitude(value: &TagValue) -> Result<String, DescribeError> {
    degrees("GPSLatitude", value)
}

fn describe_longitude(value: &TagValue) -> Result<String, DescribeError> {
    degrees("GPSLongitude", value)
}

fn describe_altitude_ref(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "GPSAltitudeRef",
        value,
        &[(0, "Sea level"), (1, "Sea level reference (negative value)")],
    )
}

fn describe_altitude(value: &TagValue) -> Result<String, DescribeError> {
    let meters = expect_numbers("GPSAltitude", value, 1)?[0];
    Ok(format!("{meters} m"))
}

fn describe_time_stamp(value: &TagValue) -> Result<String, DescribeError> {
    let hms = expect_numbers("GPSTimeStamp", value, 3)?;
    Ok(format!(
        "{:02}:{:02}:{:02}",
        hms[0] as u32, hms[1] as u32, hms[2] as u32
    ))
}

fn describe_gps_status(value: &TagValue) -> Result<String, DescribeError> {
    lettered(
        "GPSStatus",
        value,
        &[("A", "Measurement in progress"), ("V", "Measurement interrupted")],
    )
}

fn describe_measure_mode(value: &TagValue) -> Result<String, DescribeError> {
    lettered(
        "GPSMeasureMode",
        value,
        &[("2", "2-dimensional measurement"), ("3", "3-dimensional measurement")],
    )
}

fn describe_speed_ref(value: &TagValue) -> Result<String, DescribeError> {
    lettered(
        "GPSSpeedRef",
        value,
        &[("K", "Kilometers per hour"), ("M", "Miles per hour"), ("N", "Knots")],
    )
}

fn describe_img_direction_ref(value: &TagValue) -> Result<String, DescribeError> {
    lettered(
        "GPSImgDirectionRef",
        value,
        &[("T", "True North"), ("M", "Magnetic North")],
    )
}

fn describe_differential(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "GPSDifferential",
        value,
        &[
            (0, "Measurement without differential correction"),
            (1, "Differential correction applied"),
        ],
    )
}

pub static GPS_TAGS: &[(u16, TagNameEntry)] = &[
    (0x0000, E::descriptor("GPSVersionID", describe_gps_version)),
    (0x0001, E::descriptor("GPSLatitudeRef", describe_latitude_ref)),
    (0x0002, E::descriptor("GPSLatitude", describe_latitude)),
    (0x0003, E::descriptor("GPSLongitudeRef", describe_longitude_ref)),
    (0x0004, E::descriptor("GPSLongitude", describe_longitude)),
    (0x0005, E::descriptor("GPSAltitudeRef", describe_altitude_ref)),
    (0x0006, E::descriptor("GPSAltitude", describe_altitude)),
    (0x0007, E::descriptor("GPSTimeStamp", describe_time_stamp)),
    (0x0008, E::alias("GPSSatellites")),
    (0x0009, E::descriptor("GPSStatus", describe_gps_status)),
    (0x000a, E::descriptor("GPSMeasureMode", describe_measure_mode)),
    (0x000b, E::alias("GPSDOP")),
    (0x000c, E::descriptor("GPSSpeedRef", describe_speed_ref)),
    (0x000d, E::alias("GPSSpeed")),
    (0x0010, E::descriptor("GPSImgDirectionRef", describe_img_direction_ref)),
    (0x0011, E::alias("GPSImgDirection")),
    (0x0012, E::alias("GPSMapDatum")),
    (0x001d, E::alias("GPSDateStamp")),
    (0x001e, E::descriptor("GPSDifferential", describe_differential)),
];

// =============================================================================
// Interoperability descriptions
// =============================================================================

fn describe_interoperability_index(value: &TagValue) -> Result<String, DescribeError> {
    lettered(
        "InteroperabilityIndex",
        value,
        &[
            ("R98", "ExifR98 / DCF basic file"),
            ("THM", "DCF thumbnail file"),
            ("R03", "DCF option file"),
        ],
    )
}

pub static INTEROPERABILITY_TAGS: &[(u16, TagNameEntry)] = &[
    (0x0001, E::descriptor("InteroperabilityIndex", describe_interoperability_index)),
    (0x0002, E::alias("InteroperabilityVersion")),
    (0x1000, E::alias("RelatedImageFileFormat")),
    (0x1001, E::alias("RelatedImageWidth")),
    (0x1002, E::alias("RelatedImageHeight")),
];

// =============================================================================
// Vendor maker-note tables
// =============================================================================

pub static CANON_TAGS: &[(u16, TagNameEntry)] = &[
    (0x0001, E::alias("CanonCameraSettings")),
    (0x0002, E::alias("CanonFocalLength")),
    (0x0004, E::alias("CanonShotInfo")),
    (0x0006, E::alias("CanonImageType")),
    (0x0007, E::alias("CanonFirmwareVersion")),
    (0x0008, E::alias("FileNumber")),
    (0x0009, E::alias("OwnerName")),
    (0x000c, E::alias("SerialNumber")),
    (0x0010, E::alias("CanonModelID")),
];

fn describe_pentax_version(value: &TagValue) -> Result<String, DescribeError> {
    expect_numbers("PentaxVersion", value, 1)?;
    Ok(join_elements(value, "."))
}

fn describe_pentax_quality(value: &TagValue) -> Result<String, DescribeError> {
    enumerated(
        "Quality",
        value,
        &[
            (0, "Good"),
            (1, "Better"),
            (2, "Best"),
            (3, "TIFF"),
            (4, "RAW"),
            (5, "Premium"),
        ],
    )
}

pub static PENTAX_TAGS: &[(u16, TagNameEntry)] = &[
    (0x0000, E::descriptor("PentaxVersion", describe_pentax_version)),
    (0x0001, E::alias("PentaxModelType")),
    (0x0005, E::alias("PentaxModelID")),
    (0x0006, E::alias("Date")),
    (0x0007, E::alias("Time")),
    (0x0008, E::descriptor("Quality", describe_pentax_quality)),
    (0x000d, E::alias("FocusMode")),
    (0x0229, E::alias("SerialNumber")),
    (0x022b, E::alias("LevelInfo")),
];

// =============================================================================
// Tests
// =============================================================================
