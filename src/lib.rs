//! Navigation core of a location-based treasure hunt.
//!
//! Players walk to fixed real-world portals. From raw GPS fixes and compass
//! headings this crate computes how far the portal is, which way to go, how
//! "hot" the player is, and when the portal is discovered.

pub mod algorithm;
pub mod catalog;
pub mod config;
pub mod direction;
pub mod error;
pub mod position;
pub mod proximity;
pub mod quest;
pub mod sensor;
pub mod session;
pub mod utils;
mod wasm_binding;

pub use algorithm::{distance_meters, initial_bearing_degrees};
pub use catalog::{Catalog, Portal, Progress};
pub use config::QuestConfig;
pub use direction::{resolve, RelativeDirection};
pub use error::{NavError, NavResult};
pub use position::{GeoPoint, HeadingSample, PositionSample};
pub use proximity::{classify, Proximity, ProximityThresholds};
pub use quest::Quest;
pub use sensor::{Sample, SensorSource, SimulatedSensor};
pub use session::{NavigationSession, NavigationState, SampleOutcome, SessionPhase};

/// Routes panics to `console.error` when built with the
/// `console_error_panic_hook` feature. Safe to call more than once.
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
