use std::env;

use anyhow::{Context, Result};
use log::info;

use portal_quest::{Quest, SampleOutcome, SimulatedSensor};
use portal_quest::utils::Distance;

/// Walks a simulated player to a portal of Croix and logs what the app would
/// show along the way.
///
/// Usage: portal-quest [portal id] [seed]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let portal_id: u32 = match args.next() {
        Some(id) => id.parse().context("portal id must be a number")?,
        None => 1,
    };
    let seed: u64 = match args.next() {
        Some(seed) => seed.parse().context("seed must be a number")?,
        None => 0,
    };

    let mut quest = Quest::new();
    let state = quest.start_navigation(portal_id)?;
    info!("Looking for {} : {}", state.portal_name, state.hint);

    let target = *quest.get_portal(portal_id)?.location();
    let mut sensor = SimulatedSensor::around(target, 225.0, Distance::from_m(600.0), seed);

    for _ in 0..500 {
        let outcomes = quest.poll(&mut sensor)?;
        let state = quest.navigation_state()?;

        info!(
            "{}m bearing {}° go {} ({})",
            state.distance_m.unwrap_or_default(),
            state.bearing_deg.unwrap_or_default(),
            state.relative_direction,
            state.proximity.map(|p| p.to_string()).unwrap_or_default(),
        );

        if outcomes.contains(&SampleOutcome::Arrived) {
            info!("Portal {} discovered !", state.portal_name);
            break
        }
    }

    let progress = quest.progress();
    info!("{} / {} portals found", progress.found, progress.total);

    Ok(())
}
