use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::catalog::{Catalog, Portal, Progress};
use crate::config::QuestConfig;
use crate::position::PositionSample;
use crate::sensor::{Sample, SensorSource};
use crate::session::{NavigationSession, NavigationState, SampleOutcome};

/// A treasure hunt: the portals to find, the rules, and the navigation in
/// progress, if any.
pub struct Quest {
    config: QuestConfig,
    catalog: Catalog,
    session: Option<NavigationSession>,
}

impl Quest {

    pub fn new() -> Self {
        Quest {
            config: QuestConfig::default(),
            catalog: Catalog::croix(),
            session: None,
        }
    }

    pub fn with(catalog: Catalog, config: QuestConfig) -> Result<Self> {
        config.validate()?;

        Ok(Quest {
            config,
            catalog,
            session: None,
        })
    }

    /// Builds a quest from a JSON portal list and an optional JSON config.
    pub fn from_json(catalog: &str, config: Option<&str>) -> Result<Self> {
        let catalog = Catalog::from_json(catalog)?;
        let config = match config {
            Some(config) => QuestConfig::from_json(config)?,
            None => QuestConfig::default(),
        };

        Self::with(catalog, config)
    }

    pub fn config(&self) -> &QuestConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn list_portals(&self) -> Vec<Portal> {
        self.catalog.list()
    }

    pub fn get_portal(&self, id: u32) -> Result<Portal> {
        Ok(self.catalog.get(id)?.clone())
    }

    pub fn progress(&self) -> Progress {
        self.catalog.progress()
    }

    /// Replaces any navigation in progress.
    pub fn start_navigation(&mut self, portal_id: u32) -> Result<NavigationState> {
        let session = NavigationSession::start(&self.catalog, portal_id, &self.config)?;
        let state = session.state();

        if let Some(previous) = self.session.replace(session) {
            info!("Navigation to portal {} abandoned", previous.portal().id());
        }

        Ok(state)
    }

    pub fn stop_navigation(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Navigation to portal {} stopped", session.portal().id());
        }
    }

    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    pub fn navigation_state(&self) -> Result<NavigationState> {
        match &self.session {
            Some(session) => Ok(session.state()),
            None => bail!("No navigation in progress"),
        }
    }

    pub fn push(&mut self, sample: Sample) -> Result<SampleOutcome> {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => bail!("No navigation in progress"),
        };

        let outcome = match &sample {
            Sample::Position(position) => session.on_position(&mut self.catalog, position),
            Sample::Heading(heading) => session.on_heading(*heading),
        };

        Ok(outcome)
    }

    /// Raw coordinates straight from the device. Out of range values come back
    /// as a rejected sample.
    pub fn push_position(&mut self, lat: f64, lon: f64, timestamp: DateTime<Utc>) -> Result<SampleOutcome> {
        if self.session.is_none() {
            bail!("No navigation in progress");
        }

        match PositionSample::from_raw(lat, lon, timestamp) {
            Ok(sample) => self.push(Sample::Position(sample)),
            Err(e) => {
                warn!("Rejected position sample : {}", e);
                Ok(SampleOutcome::Rejected(e))
            }
        }
    }

    pub fn push_heading(&mut self, heading: Option<f64>) -> Result<SampleOutcome> {
        self.push(Sample::Heading(heading))
    }

    /// Pumps one tick of `sensor` through the current navigation.
    pub fn poll(&mut self, sensor: &mut dyn SensorSource) -> Result<Vec<SampleOutcome>> {
        sensor.tick().into_iter().map(|sample| self.push(sample)).collect()
    }
}

impl Default for Quest {
    fn default() -> Self {
        Self::new()
    }
}
