use std::fmt;

/// A geographical position in WGS84 degrees.
///
/// Both fields are always finite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Stands in for every value that could not be decoded.
    pub const SENTINEL: Self = Self::new(0.0, 0.0);

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self::new(lat, lng)
    }

    pub fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_default() {
        assert_eq!(Coordinate::SENTINEL, Coordinate::default());
        assert!(Coordinate::default().is_sentinel());
        assert!(!Coordinate::new(0.0, 0.1).is_sentinel());
    }

    #[test]
    fn lng_lat_order() {
        let c = Coordinate::from_lng_lat(-9.5, 41.2);
        assert_eq!(41.2, c.latitude);
        assert_eq!(-9.5, c.longitude);
    }

    #[test]
    fn display_lat_first() {
        assert_eq!("48.7755,9.1827", Coordinate::new(48.7755, 9.1827).to_string());
    }

    #[test]
    fn finite() {
        assert!(Coordinate::new(90.0, -180.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_finite());
    }
}
