use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithm::{Algorithm, Haversine, Utils};
use crate::position::{GeoPoint, PositionSample};
use crate::sensor::{Sample, SensorSource};
use crate::utils::Distance;

/// Fake walker used when there is no GPS: every tick it takes a random step
/// toward the target, never closer than `floor`, while the compass spins.
pub struct SimulatedSensor {
    algorithm: Haversine,
    rng: StdRng,
    position: GeoPoint,
    target: GeoPoint,
    compass: Option<f64>,
    clock: DateTime<Utc>,
    interval: Duration,
    max_step: Distance,
    floor: Distance,
    jitter: f64,
}

impl SimulatedSensor {
    const COMPASS_STEP: f64 = 5.0;

    pub fn new(start: GeoPoint, target: GeoPoint, seed: u64) -> Self {
        Self {
            algorithm: Haversine {},
            rng: StdRng::seed_from_u64(seed),
            position: start,
            target,
            compass: Some(0.0),
            clock: Utc::now(),
            interval: Duration::seconds(2),
            max_step: Distance::from_m(30.0),
            floor: Distance::from_m(10.0),
            jitter: 15.0,
        }
    }

    /// Starts `distance` away from `target`, in the `bearing` direction.
    pub fn around(target: GeoPoint, bearing: f64, distance: Distance, seed: u64) -> Self {
        let start = Haversine {}.destination(&target, bearing, &distance);
        Self::new(start, target, seed)
    }

    /// Behaves like a device with no magnetometer.
    pub fn without_compass(mut self) -> Self {
        self.compass = None;
        self
    }

    pub fn starting_at(mut self, clock: DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn position(&self) -> &GeoPoint {
        &self.position
    }

    fn walk(&mut self) {
        let (remaining, bearing) = self.algorithm.distance_and_heading_to(&self.position, &self.target);

        let step = self.rng.gen_range(0.0..self.max_step.m());
        let step = step.min((remaining.m() - self.floor.m()).max(0.0));
        if step <= 0.0 {
            return
        }

        let heading = (bearing + self.rng.gen_range(-self.jitter..=self.jitter)).wrap360();
        self.position = self.algorithm.destination(&self.position, heading, &Distance::from_m(step));

        debug!("Simulated walk {:.1}m heading {:.0} to {}", step, heading, self.position);
    }
}

impl SensorSource for SimulatedSensor {
    fn tick(&mut self) -> Vec<Sample> {
        self.walk();
        self.clock = self.clock + self.interval;
        self.compass = self.compass.map(|c| (c + Self::COMPASS_STEP).wrap360());

        vec![
            Sample::Position(PositionSample::new(self.position, self.clock)),
            Sample::Heading(self.compass),
        ]
    }
}
