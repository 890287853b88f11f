use super::InvalidGeography;
use crate::geo::Coordinate;
use serde_json::Value;

const COORDINATES_KEY: &str = "coordinates";

/// GeoJSON positions are `[longitude, latitude]`.
pub fn point_from_value(value: &Value) -> Result<Coordinate, InvalidGeography> {
    let position = value
        .get(COORDINATES_KEY)
        .and_then(Value::as_array)
        .ok_or(InvalidGeography::Coordinates)?;
    match position.as_slice() {
        [lng, lat] => match (lng.as_f64(), lat.as_f64()) {
            (Some(lng), Some(lat)) => Ok(Coordinate::from_lng_lat(lng, lat)),
            _ => Err(InvalidGeography::Coordinates),
        },
        _ => Err(InvalidGeography::Coordinates),
    }
}

pub fn point_from_str(text: &str) -> Result<Coordinate, InvalidGeography> {
    let value: Value = serde_json::from_str(text).map_err(|_| InvalidGeography::GeoJsonText)?;
    point_from_value(&value)
}
