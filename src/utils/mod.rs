use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A length on the ground, in meters.
#[derive(Clone, Copy, Debug)]
pub struct Distance {
    meters: f64,
}

impl Distance {
    pub const fn from_m(meters: f64) -> Self {
        Distance {
            meters
        }
    }

    pub fn m(&self) -> f64 {
        self.meters
    }

    /// Whole meters, as shown to the player.
    pub fn display_m(&self) -> u32 {
        self.meters.round().max(0.0) as u32
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}m", self.meters)
    }
}

impl PartialEq<Self> for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.meters.eq(&other.meters)
    }
}

impl PartialOrd<Self> for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.meters.partial_cmp(&other.meters)
    }
}

impl ops::Mul<f64> for Distance {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Distance::from_m(self.meters * rhs)
    }
}

impl Serialize for Distance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.meters)
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D>(deserializer: D) -> Result<Distance, D::Error>
        where
            D: Deserializer<'de>,
    {
        let m = f64::deserialize(deserializer)?;

        Ok(Distance::from_m(m))
    }
}
