use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use crate::algorithm::Utils;
use crate::error::{NavError, NavResult};

/// A WGS84 latitude/longitude pair, in degrees.
///
/// Built through [`GeoPoint::new`], which enforces `lat` in [-90, 90] and `lon`
/// in [-180, 180]. Deserialized points must go through [`GeoPoint::checked`].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Tsify, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct GeoPoint {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> NavResult<Self> {
        if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(NavError::InvalidCoordinate { latitude: lat, longitude: lon });
        }

        Ok(GeoPoint { lat, lon })
    }

    pub fn checked(self) -> NavResult<Self> {
        Self::new(self.lat, self.lon)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl TryFrom<(f64, f64)> for GeoPoint {
    type Error = NavError;

    fn try_from(latlon: (f64, f64)) -> Result<Self, Self::Error> {
        GeoPoint::new(latlon.0, latlon.1)
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = NavError;

    fn try_from(latlon: [f64; 2]) -> Result<Self, Self::Error> {
        GeoPoint::new(latlon[0], latlon[1])
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// One GPS fix delivered by the sensor side.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PositionSample {
    pub point: GeoPoint,
    pub timestamp: DateTime<Utc>,
}

impl PositionSample {
    pub fn new(point: GeoPoint, timestamp: DateTime<Utc>) -> Self {
        Self { point, timestamp }
    }

    /// Validates raw coordinates before wrapping them.
    pub fn from_raw(lat: f64, lon: f64, timestamp: DateTime<Utc>) -> NavResult<Self> {
        Ok(Self::new(GeoPoint::new(lat, lon)?, timestamp))
    }
}

/// Device compass heading, clockwise from north, normalised into [0, 360).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct HeadingSample {
    degrees: f64,
}

impl HeadingSample {
    pub fn new(degrees: f64) -> NavResult<Self> {
        if !degrees.is_finite() {
            return Err(NavError::InvalidHeading(degrees));
        }

        Ok(Self { degrees: degrees.wrap360() })
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }
}

impl Display for HeadingSample {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "heading {}", self.degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert_eq!(GeoPoint::new(90.1, 0.0), Err(NavError::InvalidCoordinate { latitude: 90.1, longitude: 0.0 }));
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn deserialized_points_are_checked() {
        let point: GeoPoint = serde_json::from_str(r#"{"lat": 123.0, "lon": 3.0}"#).unwrap();
        assert!(point.checked().is_err());

        let point: GeoPoint = serde_json::from_str(r#"{"lat": 50.67648, "lon": 3.15159}"#).unwrap();
        assert_eq!(point.checked(), GeoPoint::new(50.67648, 3.15159));
    }

    #[test]
    fn heading_is_normalised() {
        assert_eq!(HeadingSample::new(370.0).unwrap().degrees(), 10.0);
        assert_eq!(HeadingSample::new(-90.0).unwrap().degrees(), 270.0);
        assert_eq!(HeadingSample::new(360.0).unwrap().degrees(), 0.0);
        assert!(matches!(HeadingSample::new(f64::NAN), Err(NavError::InvalidHeading(_))));
    }
}
