use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use crate::algorithm::{Algorithm, Haversine, Utils};
use crate::catalog::{Catalog, Portal};
use crate::config::QuestConfig;
use crate::direction::{self, RelativeDirection};
use crate::error::{NavError, NavResult};
use crate::position::{HeadingSample, PositionSample};
use crate::proximity::Proximity;
use crate::utils::Distance;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum SessionPhase {
    AwaitingFirstFix,
    Tracking,
    Arrived,
}

impl Display for SessionPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::AwaitingFirstFix => write!(f, "awaiting first fix"),
            SessionPhase::Tracking => write!(f, "tracking"),
            SessionPhase::Arrived => write!(f, "arrived"),
        }
    }
}

/// What a sample did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleOutcome {
    Updated,
    /// The portal was just discovered. Happens once per session.
    Arrived,
    /// The session already arrived, the sample was dropped.
    Ignored,
    /// The sample was malformed, the state is unchanged.
    Rejected(NavError),
}

/// Read-only view of a session, as handed to the UI after every sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct NavigationState {
    pub portal_id: u32,
    pub portal_name: String,
    pub hint: String,
    pub phase: SessionPhase,
    /// Rounded to the meter.
    pub distance_m: Option<u32>,
    /// Whole degrees in [0, 360).
    pub bearing_deg: Option<u16>,
    pub heading_deg: Option<f64>,
    pub relative_direction: RelativeDirection,
    pub proximity: Option<Proximity>,
    pub arrived: bool,
    pub can_scan: bool,
    /// The portal had been discovered before this session started.
    pub already_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional, type = "string")]
    pub last_fix: Option<DateTime<Utc>>,
}

/// Guides the player toward one portal.
///
/// Samples are processed in delivery order and only the last one of each kind
/// is kept. The session holds no resources, dropping it ends the navigation.
pub struct NavigationSession {
    algorithm: Haversine,
    config: QuestConfig,
    portal: Portal,
    already_found: bool,
    phase: SessionPhase,
    last_fix: Option<DateTime<Utc>>,
    distance: Option<Distance>,
    bearing: Option<f64>,
    heading: Option<HeadingSample>,
    direction: RelativeDirection,
    proximity: Option<Proximity>,
}

impl NavigationSession {
    pub fn start(catalog: &Catalog, portal_id: u32, config: &QuestConfig) -> NavResult<Self> {
        let portal = catalog.get(portal_id)?.clone();

        info!("Start navigation to portal {} ({}) at {}", portal.id, portal.name, portal.location);

        Ok(Self {
            algorithm: Haversine {},
            config: config.clone(),
            already_found: portal.found,
            portal,
            phase: SessionPhase::AwaitingFirstFix,
            last_fix: None,
            distance: None,
            bearing: None,
            heading: None,
            direction: RelativeDirection::Ahead,
            proximity: None,
        })
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn arrived(&self) -> bool {
        self.phase == SessionPhase::Arrived
    }

    pub fn distance(&self) -> Option<&Distance> {
        self.distance.as_ref()
    }

    pub fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading.map(|h| h.degrees())
    }

    pub fn relative_direction(&self) -> RelativeDirection {
        self.direction
    }

    pub fn proximity(&self) -> Option<Proximity> {
        self.proximity
    }

    /// Feeds a GPS fix. Arrival flags the portal as found in `catalog`.
    pub fn on_position(&mut self, catalog: &mut Catalog, sample: &PositionSample) -> SampleOutcome {
        if self.arrived() {
            debug!("Position {} ignored, portal {} already reached", sample.point, self.portal.id);
            return SampleOutcome::Ignored
        }

        let point = match sample.point.checked() {
            Ok(point) => point,
            Err(e) => {
                warn!("Rejected position sample : {}", e);
                return SampleOutcome::Rejected(e)
            }
        };

        let (distance, bearing) = self.algorithm.distance_and_heading_to(&point, &self.portal.location);
        let proximity = self.config.proximity.classify(distance.m());

        if self.phase == SessionPhase::AwaitingFirstFix {
            debug!("First fix {} for portal {}", point, self.portal.id);
            self.phase = SessionPhase::Tracking;
        }

        self.last_fix = Some(sample.timestamp);
        self.bearing = Some(bearing);
        self.proximity = Some(proximity);
        self.direction = direction::resolve(bearing, self.heading());

        debug!("At {} : {} to portal {}, bearing {:.1}, {}, {}", point, distance, self.portal.id, bearing, proximity, self.direction);

        let reached = distance.m() <= self.config.arrival_threshold_m;
        self.distance = Some(distance);

        if reached {
            self.arrive(catalog);
            return SampleOutcome::Arrived
        }

        SampleOutcome::Updated
    }

    /// Feeds a compass reading. `None` means the compass is unavailable.
    pub fn on_heading(&mut self, heading: Option<f64>) -> SampleOutcome {
        if self.arrived() {
            return SampleOutcome::Ignored
        }

        let heading = match heading.map(HeadingSample::new).transpose() {
            Ok(heading) => heading,
            Err(e) => {
                warn!("Rejected heading sample : {}", e);
                return SampleOutcome::Rejected(e)
            }
        };

        self.heading = heading;
        if let Some(bearing) = self.bearing {
            self.direction = direction::resolve(bearing, self.heading());
        }

        SampleOutcome::Updated
    }

    fn arrive(&mut self, catalog: &mut Catalog) {
        self.phase = SessionPhase::Arrived;

        info!("Arrived at portal {} ({})", self.portal.id, self.portal.name);

        if let Err(e) = catalog.mark_found(self.portal.id) {
            warn!("Could not flag portal {} as found : {}", self.portal.id, e);
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            portal_id: self.portal.id,
            portal_name: self.portal.name.clone(),
            hint: self.portal.hint.clone(),
            phase: self.phase,
            distance_m: self.distance.as_ref().map(|d| d.display_m()),
            bearing_deg: self.bearing.map(|b| b.round().wrap360() as u16),
            heading_deg: self.heading(),
            relative_direction: self.direction,
            proximity: self.proximity,
            arrived: self.arrived(),
            can_scan: self.proximity.map_or(false, |p| p.can_scan()),
            already_found: self.already_found,
            last_fix: self.last_fix,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::position::GeoPoint;

    const JEAN_JAURES: u32 = 1;

    fn fix(lat: f64, lon: f64) -> PositionSample {
        PositionSample::new(GeoPoint::new(lat, lon).unwrap(), Utc::now())
    }

    fn session(catalog: &Catalog) -> NavigationSession {
        NavigationSession::start(catalog, JEAN_JAURES, &QuestConfig::default()).unwrap()
    }

    #[test]
    fn unknown_target() {
        let catalog = Catalog::croix();
        let result = NavigationSession::start(&catalog, 99, &QuestConfig::default());
        assert!(matches!(result, Err(NavError::UnknownTarget(99))));
    }

    #[test]
    fn awaiting_first_fix() {
        let catalog = Catalog::croix();
        let session = session(&catalog);
        let state = session.state();

        assert_eq!(state.phase, SessionPhase::AwaitingFirstFix);
        assert_eq!(state.distance_m, None);
        assert_eq!(state.bearing_deg, None);
        assert_eq!(state.proximity, None);
        assert_eq!(state.relative_direction, RelativeDirection::Ahead);
        assert!(!state.arrived);
        assert!(!state.can_scan);
        assert!(!state.already_found);
    }

    #[test]
    fn heading_before_first_fix_is_kept() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        assert_eq!(session.on_heading(Some(180.0)), SampleOutcome::Updated);
        assert_eq!(session.relative_direction(), RelativeDirection::Ahead);

        // portal is due north-west, the device points south
        session.on_position(&mut catalog, &fix(50.6763, 3.1518));
        assert_eq!(session.relative_direction(), RelativeDirection::BehindRight);
    }

    #[test]
    fn sample_position_from_the_brief_is_warm() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        assert_eq!(session.on_position(&mut catalog, &fix(50.6763, 3.1518)), SampleOutcome::Updated);

        let state = session.state();
        assert_eq!(state.phase, SessionPhase::Tracking);
        assert_eq!(state.distance_m, Some(25));
        assert_eq!(state.bearing_deg, Some(324));
        assert_eq!(state.proximity, Some(Proximity::Warm));
        assert_eq!(state.relative_direction, RelativeDirection::AheadLeft);
        assert!(!catalog.get(JEAN_JAURES).unwrap().found());
    }

    #[test]
    fn arrival_flags_the_portal_once() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        // about 9 m south of the portal
        let near = fix(50.67640, 3.15159);
        assert_eq!(session.on_position(&mut catalog, &near), SampleOutcome::Arrived);

        let state = session.state();
        assert_eq!(state.phase, SessionPhase::Arrived);
        assert_eq!(state.distance_m, Some(9));
        assert_eq!(state.bearing_deg, Some(0));
        assert_eq!(state.proximity, Some(Proximity::Hot));
        assert!(state.arrived);
        assert!(state.can_scan);
        assert!(catalog.get(JEAN_JAURES).unwrap().found());
        assert_eq!(catalog.progress().found, 2);

        for _ in 0..10 {
            assert_eq!(session.on_position(&mut catalog, &near), SampleOutcome::Ignored);
        }
        assert_eq!(catalog.progress().found, 2);
        assert_eq!(session.state(), state);
    }

    #[test]
    fn found_flag_only_lives_in_the_catalog() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        session.on_position(&mut catalog, &fix(50.67640, 3.15159));
        assert!(session.arrived());
        assert!(catalog.get(JEAN_JAURES).unwrap().found());
        assert!(!session.portal().found());
        assert!(!session.state().already_found);
    }

    #[test]
    fn no_tracking_after_arrival() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        session.on_position(&mut catalog, &fix(50.67648, 3.15159));
        assert!(session.arrived());
        assert_eq!(session.distance().map(|d| d.m()), Some(0.0));

        assert_eq!(session.on_position(&mut catalog, &fix(50.6700, 3.1400)), SampleOutcome::Ignored);
        assert_eq!(session.on_heading(Some(90.0)), SampleOutcome::Ignored);
        assert_eq!(session.phase(), SessionPhase::Arrived);
        assert_eq!(session.distance().map(|d| d.m()), Some(0.0));
        assert_eq!(session.heading(), None);
    }

    #[test]
    fn approach_gets_hotter() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);
        let algorithm = Haversine {};
        let portal = *catalog.get(JEAN_JAURES).unwrap().location();

        // 500 m due south, walking north 10 m at a time
        let start = algorithm.destination(&portal, 180.0, &Distance::from_m(500.0));
        let mut tiers = vec![];
        let mut t = Utc::now();

        for step in 0..=50 {
            let point = algorithm.destination(&start, 0.0, &Distance::from_m(step as f64 * 10.0));
            t = t + Duration::seconds(2);
            session.on_position(&mut catalog, &PositionSample::new(point, t));

            if let Some(proximity) = session.proximity() {
                if tiers.last() != Some(&proximity) {
                    tiers.push(proximity);
                }
            }
            if session.arrived() {
                break
            }
        }

        assert_eq!(tiers, vec![Proximity::Cold, Proximity::Warm, Proximity::Hot]);
        assert!(session.arrived());
        assert!(catalog.get(JEAN_JAURES).unwrap().found());
    }

    #[test]
    fn malformed_samples_keep_the_previous_state() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        session.on_position(&mut catalog, &fix(50.6763, 3.1518));
        session.on_heading(Some(45.0));
        let before = session.state();

        let bad = PositionSample::new(GeoPoint { lat: 123.0, lon: 3.0 }, Utc::now());
        assert!(matches!(session.on_position(&mut catalog, &bad), SampleOutcome::Rejected(NavError::InvalidCoordinate { .. })));
        assert!(matches!(session.on_heading(Some(f64::INFINITY)), SampleOutcome::Rejected(NavError::InvalidHeading(_))));

        assert_eq!(session.state(), before);
    }

    #[test]
    fn compass_loss_falls_back_to_absolute_bearing() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        session.on_position(&mut catalog, &fix(50.6763, 3.1518));
        session.on_heading(Some(323.0));
        assert_eq!(session.relative_direction(), RelativeDirection::Ahead);

        session.on_heading(None);
        assert_eq!(session.heading(), None);
        assert_eq!(session.relative_direction(), direction::resolve(session.bearing().unwrap(), None));
    }

    #[test]
    fn heading_is_reused_for_new_positions() {
        let mut catalog = Catalog::croix();
        let mut session = session(&catalog);

        session.on_heading(Some(90.0));
        // portal due north of this fix, device pointing east
        session.on_position(&mut catalog, &fix(50.67, 3.15159));
        assert_eq!(session.relative_direction(), RelativeDirection::Left);
    }

    #[test]
    fn already_found_portal_can_be_visited_again() {
        let mut catalog = Catalog::croix();
        let mut session = NavigationSession::start(&catalog, 3, &QuestConfig::default()).unwrap();
        assert!(session.state().already_found);

        assert_eq!(session.on_position(&mut catalog, &fix(50.67801, 3.15298)), SampleOutcome::Arrived);
        assert!(catalog.get(3).unwrap().found());
        assert_eq!(catalog.progress().found, 1);
    }

    #[test]
    fn arrival_threshold_is_independent_from_hot() {
        let mut catalog = Catalog::croix();
        let config = QuestConfig { arrival_threshold_m: 30.0, ..QuestConfig::default() };
        let mut session = NavigationSession::start(&catalog, JEAN_JAURES, &config).unwrap();

        assert_eq!(session.on_position(&mut catalog, &fix(50.6763, 3.1518)), SampleOutcome::Arrived);
        assert_eq!(session.proximity(), Some(Proximity::Warm));
        assert!(!session.state().can_scan);
    }
}
