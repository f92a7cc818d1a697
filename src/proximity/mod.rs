use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use crate::error::{NavError, NavResult};

/// How close the player is to the target, the "temperature" of the hunt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Proximity {
    Hot,
    Warm,
    Cold,
}

impl Proximity {
    /// The portal can only be scanned once the player is hot.
    pub fn can_scan(&self) -> bool {
        *self == Proximity::Hot
    }
}

impl Display for Proximity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Proximity::Hot => write!(f, "hot"),
            Proximity::Warm => write!(f, "warm"),
            Proximity::Cold => write!(f, "cold"),
        }
    }
}

/// Upper bounds, in meters, of the hot and warm tiers. Both are exclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase", default)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ProximityThresholds {
    pub hot_m: f64,
    pub warm_m: f64,
}

impl ProximityThresholds {
    pub const HOT_M: f64 = 20.0;
    pub const WARM_M: f64 = 100.0;

    pub fn validate(&self) -> NavResult<()> {
        if !self.hot_m.is_finite() || !self.warm_m.is_finite() || self.hot_m <= 0.0 || self.hot_m >= self.warm_m {
            return Err(NavError::InvalidConfig(format!("proximity thresholds must satisfy 0 < hot < warm, got {} / {}", self.hot_m, self.warm_m)));
        }

        Ok(())
    }

    pub fn classify(&self, distance_m: f64) -> Proximity {
        if distance_m < self.hot_m {
            Proximity::Hot
        } else if distance_m < self.warm_m {
            Proximity::Warm
        } else {
            Proximity::Cold
        }
    }
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        Self {
            hot_m: Self::HOT_M,
            warm_m: Self::WARM_M,
        }
    }
}

/// Classifies with the default thresholds.
pub fn classify(distance_m: f64) -> Proximity {
    ProximityThresholds::default().classify(distance_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(classify(0.0), Proximity::Hot);
        assert_eq!(classify(19.99), Proximity::Hot);
        assert_eq!(classify(20.0), Proximity::Warm);
        assert_eq!(classify(99.99), Proximity::Warm);
        assert_eq!(classify(100.0), Proximity::Cold);
        assert_eq!(classify(20_000_000.0), Proximity::Cold);
    }

    #[test]
    fn only_hot_can_scan() {
        assert!(Proximity::Hot.can_scan());
        assert!(!Proximity::Warm.can_scan());
        assert!(!Proximity::Cold.can_scan());
    }

    #[test]
    fn tiers_by_name() {
        assert_eq!(serde_json::to_string(&Proximity::Warm).unwrap(), r#""warm""#);
        let tier: Proximity = serde_json::from_str(r#""hot""#).unwrap();
        assert_eq!(tier, Proximity::Hot);
        assert_eq!(Proximity::Cold.to_string(), "cold");
    }

    #[test]
    fn custom_thresholds() {
        let thresholds = ProximityThresholds { hot_m: 50.0, warm_m: 150.0 };
        assert!(thresholds.validate().is_ok());
        assert_eq!(thresholds.classify(49.0), Proximity::Hot);
        assert_eq!(thresholds.classify(120.0), Proximity::Warm);
        assert_eq!(thresholds.classify(150.0), Proximity::Cold);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        assert!(ProximityThresholds { hot_m: 100.0, warm_m: 20.0 }.validate().is_err());
        assert!(ProximityThresholds { hot_m: 0.0, warm_m: 20.0 }.validate().is_err());
        assert!(ProximityThresholds { hot_m: 10.0, warm_m: f64::NAN }.validate().is_err());
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let thresholds: ProximityThresholds = serde_json::from_str(r#"{"warmM": 150}"#).unwrap();
        assert_eq!(thresholds, ProximityThresholds { hot_m: 20.0, warm_m: 150.0 });
    }
}
