use super::*;
use geopin_entities as e;

impl From<e::geo::Coordinate> for Coordinate {
    fn from(from: e::geo::Coordinate) -> Self {
        let e::geo::Coordinate {
            latitude,
            longitude,
        } = from;
        Self {
            lat: latitude,
            lng: longitude,
        }
    }
}

impl From<Coordinate> for e::geo::Coordinate {
    fn from(from: Coordinate) -> Self {
        let Coordinate { lat, lng } = from;
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_decoded_coordinate() {
        let c: Coordinate = e::geography::decode(r#"{"coordinates":[-9.5,41.2]}"#).into();
        assert_eq!(
            r#"{"lat":41.2,"lng":-9.5}"#,
            serde_json::to_string(&c).unwrap()
        );
    }

    #[test]
    fn convert_back_to_entity() {
        let c: Coordinate = serde_json::from_str(r#"{"lat":52.52,"lng":13.4}"#).unwrap();
        let c: e::geo::Coordinate = c.into();
        assert_eq!(e::geo::Coordinate::new(52.52, 13.4), c);
    }
}
