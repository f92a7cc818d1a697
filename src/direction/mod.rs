use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use crate::algorithm::Utils;

/// Where the target is relative to the way the device points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum RelativeDirection {
    #[default]
    Ahead,
    AheadRight,
    Right,
    BehindRight,
    Behind,
    BehindLeft,
    Left,
    AheadLeft,
}

impl RelativeDirection {
    /// Clockwise from straight ahead, one per 45° sector.
    const SECTORS: [RelativeDirection; 8] = [
        RelativeDirection::Ahead,
        RelativeDirection::AheadRight,
        RelativeDirection::Right,
        RelativeDirection::BehindRight,
        RelativeDirection::Behind,
        RelativeDirection::BehindLeft,
        RelativeDirection::Left,
        RelativeDirection::AheadLeft,
    ];

    /// Center of the sector, clockwise from ahead. Handy to rotate an arrow.
    pub fn angle(&self) -> f64 {
        let index = Self::SECTORS.iter().position(|d| d == self).unwrap_or(0);
        index as f64 * 45.0
    }
}

impl Display for RelativeDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RelativeDirection::Ahead => "ahead",
            RelativeDirection::AheadRight => "ahead right",
            RelativeDirection::Right => "right",
            RelativeDirection::BehindRight => "behind right",
            RelativeDirection::Behind => "behind",
            RelativeDirection::BehindLeft => "behind left",
            RelativeDirection::Left => "left",
            RelativeDirection::AheadLeft => "ahead left",
        };
        write!(f, "{}", label)
    }
}

/// Target bearing relative to the device heading, in (-180, 180].
///
/// A missing heading counts as north, so the result is the absolute bearing.
pub fn relative_bearing(target_bearing: f64, device_heading: Option<f64>) -> f64 {
    let heading = device_heading.filter(|h| h.is_finite()).unwrap_or(0.0);
    (target_bearing - heading).wrap180()
}

/// Buckets the relative bearing into 8 sectors centred on 0°, 45°, ... 315°.
///
/// A value sitting on a sector boundary goes to the clockwise neighbour.
pub fn resolve(target_bearing: f64, device_heading: Option<f64>) -> RelativeDirection {
    if !target_bearing.is_finite() {
        return RelativeDirection::Ahead
    }

    let relative = relative_bearing(target_bearing, device_heading).wrap360();
    let index = ((relative + 22.5) / 45.0).floor() as usize % 8;

    RelativeDirection::SECTORS[index]
}
