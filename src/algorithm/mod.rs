use crate::position::GeoPoint;
use crate::utils::Distance;

pub(crate) mod haversine;

pub use haversine::Haversine;

pub(crate) const MEAN_EARTH_RADIUS: Distance = Distance::from_m(6371000.0);

pub trait Algorithm {
    fn distance_to(&self, from: &GeoPoint, to: &GeoPoint) -> Distance;

    fn heading_to(&self, from: &GeoPoint, to: &GeoPoint) -> f64;

    fn distance_and_heading_to(&self, from: &GeoPoint, to: &GeoPoint) -> (Distance, f64) {
        (self.distance_to(from, to), self.heading_to(from, to))
    }

    fn destination(&self, from: &GeoPoint, heading: f64, distance: &Distance) -> GeoPoint;
}

/// Great-circle distance in meters.
pub fn distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    Haversine {}.distance_to(a, b).m()
}

/// Initial great-circle bearing in degrees, in [0, 360). Identical points give 0.
pub fn initial_bearing_degrees(from: &GeoPoint, to: &GeoPoint) -> f64 {
    Haversine {}.heading_to(from, to)
}

pub(crate) trait Utils {
    fn wrap360(self) -> Self;

    fn wrap180(self) -> Self;
}

impl Utils for f64 {
    /// Into [0, 360).
    fn wrap360(self) -> Self {
        if 0.0 <= self && self < 360.0 {
            return self
        }
        let d = self.rem_euclid(360.0);
        // rem_euclid rounds tiny negatives up to exactly 360
        if d >= 360.0 {
            0.0
        } else {
            d
        }
    }

    /// Into (-180, 180].
    fn wrap180(self) -> Self {
        let d = self.wrap360();
        if d > 180.0 {
            d - 360.0
        } else {
            d
        }
    }
}
