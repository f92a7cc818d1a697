use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use crate::error::{NavError, NavResult};
use crate::position::GeoPoint;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Portal {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) hint: String,
    pub(crate) location: GeoPoint,
    #[serde(default)]
    pub(crate) found: bool,
}

impl Portal {
    pub fn new(id: u32, name: impl Into<String>, hint: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            hint: hint.into(),
            location,
            found: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn location(&self) -> &GeoPoint {
        &self.location
    }

    pub fn found(&self) -> bool {
        self.found
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Progress {
    pub found: usize,
    pub total: usize,
}

impl Progress {
    pub fn completed(&self) -> bool {
        self.total > 0 && self.found == self.total
    }
}

/// The fixed set of portals of a hunt.
///
/// `found` is only ever raised, through [`Catalog::mark_found`], which is
/// reserved to the navigation session.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    portals: BTreeMap<u32, Portal>,
}

impl Catalog {
    pub fn new(portals: Vec<Portal>) -> NavResult<Self> {
        let mut by_id = BTreeMap::new();

        for mut portal in portals {
            portal.location = portal.location.checked()?;
            if by_id.contains_key(&portal.id) {
                return Err(NavError::InvalidConfig(format!("duplicate portal id {}", portal.id)));
            }
            by_id.insert(portal.id, portal);
        }

        Ok(Self { portals: by_id })
    }

    /// Loads a JSON array of portals.
    pub fn from_json(json: &str) -> NavResult<Self> {
        let portals: Vec<Portal> = serde_json::from_str(json).map_err(|e| NavError::InvalidConfig(e.to_string()))?;

        Self::new(portals)
    }

    /// The portals of Croix.
    pub fn croix() -> Self {
        let portals = [
            (1, "Place Jean Jaurès", "Au centre de la place", 50.67648, 3.15159, false),
            (2, "Parc Barbieux", "Près de l'étang", 50.67204, 3.14502, false),
            (3, "Église Saint-Martin", "Devant le parvis", 50.67801, 3.15298, true),
            (4, "Mairie de Croix", "À l'entrée principale", 50.67502, 3.15001, false),
            (5, "Stade Amédée Prouvost", "Près du terrain", 50.68001, 3.15798, false),
            (6, "Decathlon", "proche d'ynov", 50.67289594117399, 3.148318881734259, false),
        ];

        let portals = portals.into_iter()
            .map(|(id, name, hint, lat, lon, found)| (id, Portal {
                id,
                name: name.into(),
                hint: hint.into(),
                location: GeoPoint { lat, lon },
                found,
            }))
            .collect();

        Self { portals }
    }

    pub fn list(&self) -> Vec<Portal> {
        self.portals.values().cloned().collect()
    }

    pub fn get(&self, id: u32) -> NavResult<&Portal> {
        self.portals.get(&id).ok_or(NavError::UnknownTarget(id))
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            found: self.portals.values().filter(|p| p.found).count(),
            total: self.portals.len(),
        }
    }

    /// Lowest id not discovered yet.
    pub fn next_undiscovered(&self) -> Option<&Portal> {
        self.portals.values().find(|p| !p.found)
    }

    /// Returns true when the flag actually changed.
    pub(crate) fn mark_found(&mut self, id: u32) -> NavResult<bool> {
        let portal = self.portals.get_mut(&id).ok_or(NavError::UnknownTarget(id))?;

        if portal.found {
            return Ok(false)
        }

        info!("Portal {} ({}) found", portal.id, portal.name);
        portal.found = true;

        Ok(true)
    }
}
