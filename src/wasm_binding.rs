use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{TimeZone, Utc};
use log::{debug, error, Level};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;
use web_sys::js_sys;

use crate::algorithm;
use crate::catalog::{Portal, Progress};
use crate::direction::{self, RelativeDirection};
use crate::position::GeoPoint;
use crate::proximity::Proximity;
use crate::quest::Quest;
use crate::session::{NavigationState, SampleOutcome};
use crate::set_panic_hook;

static QUEST: Lazy<RwLock<Quest>> = Lazy::new(|| {
    RwLock::new(Quest::new())
});

fn quest() -> RwLockReadGuard<'static, Quest> {
    QUEST.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn quest_mut() -> RwLockWriteGuard<'static, Quest> {
    QUEST.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

#[wasm_bindgen(start)]
fn run() {
    set_panic_hook();
    let _ = console_log::init_with_level(Level::Debug);
}

/// Replaces the built-in hunt with a JSON portal list and optional JSON config.
#[wasm_bindgen]
pub fn load_quest(catalog: String, config: Option<String>) -> Result<(), JsValue> {
    match Quest::from_json(&catalog, config.as_deref()) {
        Ok(quest) => {
            *quest_mut() = quest;
            Ok(())
        },
        Err(e) => {
            error!("Error loading quest : {:?}", e);
            Err(js_error(e))
        },
    }
}

#[derive(Deserialize, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct VecPortals {
    #[tsify(type = "Portal[]")]
    pub vec: Vec<Portal>,
}

#[wasm_bindgen]
pub fn list_portals() -> VecPortals {
    VecPortals {
        vec: quest().list_portals()
    }
}

#[wasm_bindgen]
pub fn get_portal(id: u32) -> Result<Portal, JsValue> {
    quest().get_portal(id).map_err(js_error)
}

#[wasm_bindgen]
pub fn progress() -> Progress {
    quest().progress()
}

#[wasm_bindgen]
pub fn start_navigation(portal_id: u32) -> Result<NavigationState, JsValue> {
    debug!("start_navigation {}", portal_id);
    match quest_mut().start_navigation(portal_id) {
        Ok(state) => Ok(state),
        Err(e) => {
            error!("Error starting navigation : {:?}", e);
            Err(js_error(e))
        },
    }
}

#[wasm_bindgen]
pub fn stop_navigation() {
    quest_mut().stop_navigation()
}

fn settle(outcome: anyhow::Result<SampleOutcome>) -> Result<NavigationState, JsValue> {
    match outcome {
        Ok(SampleOutcome::Rejected(e)) => Err(js_error(e)),
        Ok(_) => quest().navigation_state().map_err(js_error),
        Err(e) => Err(js_error(e)),
    }
}

/// Feeds a GPS fix. A rejected fix throws and leaves the state untouched.
#[wasm_bindgen]
pub fn push_position(lat: f64, lon: f64, m: js_sys::Date) -> Result<NavigationState, JsValue> {
    let m = match Utc.timestamp_millis_opt(m.get_time() as i64).single() {
        Some(m) => m,
        None => return Err(js_error("invalid date")),
    };

    let outcome = quest_mut().push_position(lat, lon, m);
    settle(outcome)
}

#[wasm_bindgen]
pub fn push_heading(heading: Option<f64>) -> Result<NavigationState, JsValue> {
    let outcome = quest_mut().push_heading(heading);
    settle(outcome)
}

#[wasm_bindgen]
pub fn navigation_state() -> Result<NavigationState, JsValue> {
    quest().navigation_state().map_err(js_error)
}

#[wasm_bindgen]
pub fn distance(from: GeoPoint, to: GeoPoint) -> Result<f64, JsValue> {
    let from = from.checked().map_err(js_error)?;
    let to = to.checked().map_err(js_error)?;

    Ok(algorithm::distance_meters(&from, &to))
}

#[wasm_bindgen]
pub fn bearing(from: GeoPoint, to: GeoPoint) -> Result<f64, JsValue> {
    let from = from.checked().map_err(js_error)?;
    let to = to.checked().map_err(js_error)?;

    Ok(algorithm::initial_bearing_degrees(&from, &to))
}

#[wasm_bindgen]
pub fn relative_direction(bearing: f64, heading: Option<f64>) -> RelativeDirection {
    direction::resolve(bearing, heading)
}

/// Uses the thresholds of the loaded quest.
#[wasm_bindgen]
pub fn classify(distance: f64) -> Proximity {
    quest().config().proximity.classify(distance)
}
