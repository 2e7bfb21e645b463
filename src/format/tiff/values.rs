//! Decoded tag values.
//!
//! A field decodes to a [`TagValue`]: a single [`Element`], a sequence of
//! elements, or the faulty-value sentinel used when the value's bytes lie
//! outside the buffer. ASCII fields always stay sequences (one string per
//! NUL separated run); every other single-element sequence collapses to its
//! scalar.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::primitives::ascii_value;
use super::tags::FieldType;

/// Placeholder used as both value and description of an unreadable field.
pub const FAULTY_VALUE: &str = "<faulty value>";

// =============================================================================
// Element
// =============================================================================

/// One decoded element of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// BYTE, SHORT, LONG, UNDEFINED and IFD pointer elements
    Unsigned(u32),
    /// SLONG elements
    Signed(i32),
    /// RATIONAL elements as (numerator, denominator)
    Rational(u32, u32),
    /// SRATIONAL elements as (numerator, denominator)
    SRational(i32, i32),
    /// One NUL separated run of an ASCII field
    Text(String),
}

impl Element {
    /// Integer view of unsigned and non-negative signed elements.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Element::Unsigned(v) => Some(v),
            Element::Signed(v) => u32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Numeric view; rationals divide out, a zero denominator yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Element::Unsigned(v) => Some(f64::from(v)),
            Element::Signed(v) => Some(f64::from(v)),
            Element::Rational(_, 0) | Element::SRational(_, 0) => None,
            Element::Rational(n, d) => Some(f64::from(n) / f64::from(d)),
            Element::SRational(n, d) => Some(f64::from(n) / f64::from(d)),
            Element::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Element::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Unsigned(v) => write!(f, "{v}"),
            Element::Signed(v) => write!(f, "{v}"),
            Element::Rational(n, d) => write!(f, "{n}/{d}"),
            Element::SRational(n, d) => write!(f, "{n}/{d}"),
            Element::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Unsigned(v) => serializer.serialize_u32(*v),
            Element::Signed(v) => serializer.serialize_i32(*v),
            Element::Rational(n, d) => [*n, *d].serialize(serializer),
            Element::SRational(n, d) => [*n, *d].serialize(serializer),
            Element::Text(s) => serializer.serialize_str(s),
        }
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// Value of a decoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Single(Element),
    List(Vec<Element>),
    /// The value's bytes were outside the buffer
    Faulty,
}

impl TagValue {
    /// Build a value from decoded elements, collapsing a single non-ASCII
    /// element to a scalar.
    pub fn from_elements(mut elements: Vec<Element>, field_type: FieldType) -> Self {
        if field_type != FieldType::Ascii && elements.len() == 1 {
            if let Some(element) = elements.pop() {
                return TagValue::Single(element);
            }
        }
        TagValue::List(elements)
    }

    /// All elements, as a slice. Empty for the faulty sentinel.
    pub fn elements(&self) -> &[Element] {
        match self {
            TagValue::Single(element) => std::slice::from_ref(element),
            TagValue::List(elements) => elements,
            TagValue::Faulty => &[],
        }
    }

    pub fn first(&self) -> Option<&Element> {
        self.elements().first()
    }

    /// Integer view of the first element.
    pub fn as_u32(&self) -> Option<u32> {
        self.first().and_then(Element::as_u32)
    }

    /// Text of an ASCII value; runs are joined with a space.
    pub fn as_text(&self) -> Option<String> {
        let runs: Option<Vec<&str>> = self.elements().iter().map(Element::as_text).collect();
        runs.filter(|runs| !runs.is_empty()).map(|runs| runs.join(" "))
    }

    #[inline]
    pub fn is_faulty(&self) -> bool {
        matches!(self, TagValue::Faulty)
    }

    /// Generic rendering: sequences join their elements with `", "`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Single(element) => fmt::Display::fmt(element, f),
            TagValue::List(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(element, f)?;
                }
                Ok(())
            }
            TagValue::Faulty => f.write_str(FAULTY_VALUE),
        }
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Single(element) => element.serialize(serializer),
            TagValue::List(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            TagValue::Faulty => serializer.serialize_str(FAULTY_VALUE),
        }
    }
}

// =============================================================================
// Description
// =============================================================================

/// Human-readable description of a decoded field.
///
/// Fields without a name table entry keep their raw value as description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    Text(String),
    Raw(TagValue),
}

impl Description {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Description::Text(s) => Some(s),
            Description::Raw(_) => None,
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Description::Text(s) => f.write_str(s),
            Description::Raw(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl Serialize for Description {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Description::Text(s) => serializer.serialize_str(s),
            Description::Raw(value) => value.serialize(serializer),
        }
    }
}

// =============================================================================
// ASCII decoding
// =============================================================================

/// Split raw ASCII bytes on NUL into non-empty runs and decode them.
///
/// All runs are decoded as UTF-8 when every run is valid UTF-8; otherwise
/// every run keeps its one-char-per-byte form.
pub fn decode_ascii(raw: &[u8]) -> Vec<Element> {
    let runs: Vec<&[u8]> = raw.split(|&b| b == 0).filter(|run| !run.is_empty()).collect();

    let decoded: Result<Vec<String>, _> = runs
        .iter()
        .map(|run| std::str::from_utf8(run).map(str::to_owned))
        .collect();

    let strings = match decoded {
        Ok(strings) => strings,
        Err(_) => runs.iter().map(|run| ascii_value(run)).collect(),
    };

    strings.into_iter().map(Element::Text).collect()
}

// =============================================================================
// Tests
// =============================================================================
