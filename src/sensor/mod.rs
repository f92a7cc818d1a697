use serde::{Deserialize, Serialize};

use crate::position::PositionSample;

pub mod simulated;

pub use simulated::SimulatedSensor;

/// One reading pushed by the sensor side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sample {
    Position(PositionSample),
    /// `None` when no compass is available.
    Heading(Option<f64>),
}

/// Anything that produces location and orientation readings: the device, a
/// replay, a simulation. The navigation core cannot tell them apart.
pub trait SensorSource {
    /// Readings produced since the last call, oldest first.
    fn tick(&mut self) -> Vec<Sample>;
}
