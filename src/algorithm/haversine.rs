use crate::algorithm::{Algorithm, MEAN_EARTH_RADIUS, Utils};
use crate::position::GeoPoint;
use crate::utils::Distance;

/// Great-circle navigation on a spherical earth.
pub struct Haversine {
}

impl Algorithm for Haversine {
    fn distance_to(&self, from: &GeoPoint, to: &GeoPoint) -> Distance {
        let φ1 = from.lat.to_radians();
        let φ2 = to.lat.to_radians();
        let δφ = φ2 - φ1;
        let δλ = (to.lon - from.lon).to_radians();

        let a = (δφ / 2.0).sin().powi(2) + φ1.cos() * φ2.cos() * (δλ / 2.0).sin().powi(2);
        // rounding can push a slightly out of [0, 1] for antipodes
        let a = a.max(0.0).min(1.0);
        let δ = 2.0 * libm::atan2(a.sqrt(), (1.0 - a).sqrt());

        MEAN_EARTH_RADIUS * δ
    }

    fn heading_to(&self, from: &GeoPoint, to: &GeoPoint) -> f64 {
        if from == to {
            return 0.0
        }

        let φ1 = from.lat.to_radians();
        let φ2 = to.lat.to_radians();
        let δλ = (to.lon - from.lon).to_radians();

        let y = δλ.sin() * φ2.cos();
        let x = φ1.cos() * φ2.sin() - φ1.sin() * φ2.cos() * δλ.cos();
        let θ = libm::atan2(y, x);

        let b = θ.to_degrees();
        if b.is_nan() {
            return 0.0
        }

        b.wrap360()
    }

    fn destination(&self, from: &GeoPoint, heading: f64, distance: &Distance) -> GeoPoint {
        let φ1 = from.lat.to_radians();
        let λ1 = from.lon.to_radians();
        let θ = heading.to_radians();
        let δ = distance.m() / MEAN_EARTH_RADIUS.m();

        let sin_φ2 = (φ1.sin() * δ.cos() + φ1.cos() * δ.sin() * θ.cos()).max(-1.0).min(1.0);
        let φ2 = sin_φ2.asin();
        let λ2 = λ1 + libm::atan2(θ.sin() * δ.sin() * φ1.cos(), δ.cos() - φ1.sin() * sin_φ2);

        let mut lon = λ2.to_degrees();
        if lon.abs() > 180.0 {
            lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
        }

        GeoPoint {
            lat: φ2.to_degrees().max(-90.0).min(90.0),
            lon: lon.max(-180.0).min(180.0),
        }
    }
}
