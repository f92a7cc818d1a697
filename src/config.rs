use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use crate::error::{NavError, NavResult};
use crate::proximity::ProximityThresholds;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase", default)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct QuestConfig {
    pub proximity: ProximityThresholds,
    /// A portal is discovered once the player is within this many meters.
    pub arrival_threshold_m: f64,
}

impl QuestConfig {
    pub const ARRIVAL_THRESHOLD_M: f64 = 20.0;

    pub fn from_json(json: &str) -> NavResult<Self> {
        let config: QuestConfig = serde_json::from_str(json).map_err(|e| NavError::InvalidConfig(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> NavResult<()> {
        self.proximity.validate()?;

        if !self.arrival_threshold_m.is_finite() || self.arrival_threshold_m < 0.0 {
            return Err(NavError::InvalidConfig(format!("arrival threshold must be a positive distance, got {}", self.arrival_threshold_m)));
        }

        Ok(())
    }
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            proximity: ProximityThresholds::default(),
            arrival_threshold_m: Self::ARRIVAL_THRESHOLD_M,
        }
    }
}
