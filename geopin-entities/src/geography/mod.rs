//! Decoding of geography column values into a [`Coordinate`].
//!
//! The data layer delivers a geography value in one of three shapes
//! without telling which one:
//!
//! - an already parsed GeoJSON structure,
//! - GeoJSON text,
//! - hex encoded WKB or EWKB.
//!
//! Only `Point` geometries are supported. [`try_decode`] reports why a
//! value was rejected, while [`decode`] is the total variant that callers
//! use: every rejected value becomes [`Coordinate::SENTINEL`].

use crate::geo::Coordinate;
use serde_json::Value;
use thiserror::Error;

mod geojson;
mod wkb;


/// A borrowed, untyped geography value as produced by the data layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawGeographyValue<'a> {
    Absent,
    Structured(&'a Value),
    Text(&'a str),
}

impl<'a> From<&'a Value> for RawGeographyValue<'a> {
    fn from(from: &'a Value) -> Self {
        match from {
            Value::Null => Self::Absent,
            Value::String(s) => Self::Text(s),
            _ => Self::Structured(from),
        }
    }
}

impl<'a> From<&'a str> for RawGeographyValue<'a> {
    fn from(from: &'a str) -> Self {
        Self::Text(from)
    }
}

impl<'a, T> From<Option<T>> for RawGeographyValue<'a>
where
    T: Into<RawGeographyValue<'a>>,
{
    fn from(from: Option<T>) -> Self {
        from.map(Into::into).unwrap_or(Self::Absent)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGeography {
    #[error("Missing geography value")]
    Absent,
    #[error("Missing or malformed GeoJSON coordinates")]
    Coordinates,
    #[error("Malformed GeoJSON text")]
    GeoJsonText,
    #[error("Invalid hex length: {0}")]
    HexLength(usize),
    #[error("Invalid hex digit")]
    HexDigit,
    #[error("Unsupported geometry type: {0}")]
    GeometryType(u32),
    #[error("Unexpected end of WKB buffer")]
    Truncated,
    #[error("Non-finite coordinate")]
    NonFinite,
}

/// Decodes a geography value or tells why it is not a valid point.
///
/// The order of the checks matters: structured values first, then text
/// starting with `{` as GeoJSON, and only then hex encoded WKB.
/// GeoJSON text that fails to parse is rejected and never retried as hex.
pub fn try_decode(raw: RawGeographyValue<'_>) -> Result<Coordinate, InvalidGeography> {
    let coord = match raw {
        RawGeographyValue::Absent => return Err(InvalidGeography::Absent),
        RawGeographyValue::Structured(value) => geojson::point_from_value(value)?,
        RawGeographyValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(InvalidGeography::Absent);
            }
            if text.starts_with('{') {
                geojson::point_from_str(text)?
            } else {
                wkb::point_from_hex(text)?
            }
        }
    };
    if !coord.is_finite() {
        return Err(InvalidGeography::NonFinite);
    }
    Ok(coord)
}

/// Decodes a geography value, falling back to [`Coordinate::SENTINEL`].
///
/// This function never fails and never panics.
pub fn decode<'a, T>(raw: T) -> Coordinate
where
    T: Into<RawGeographyValue<'a>>,
{
    try_decode(raw.into()).unwrap_or(Coordinate::SENTINEL)
}
