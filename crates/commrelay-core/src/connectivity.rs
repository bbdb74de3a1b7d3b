//! Reachable-target queries over the fleet.
//!
//! When the comm-network layer is switched off entirely, every eligible
//! vessel is "reachable" at strength 0 — transfers still work, boosts do
//! not. Otherwise the work is delegated to relay discovery.

use commrelay_logic::policy::RelaySettings;

use crate::discovery;
use crate::path;
use crate::provider::CommProvider;
use crate::vessel::{Fleet, VesselId};

/// All vessels reachable from `origin`, strongest connection first.
/// Rebuilt from current fleet state on every call; nothing is cached
/// across queries.
pub fn reachable_from<P: CommProvider>(
    provider: &P,
    fleet: &Fleet,
    origin: VesselId,
    settings: &RelaySettings,
) -> Vec<(VesselId, f64)> {
    let Some(origin_vessel) = fleet.get(origin) else {
        return Vec::new();
    };

    if !settings.network_enabled {
        return fleet
            .iter()
            .filter(|v| discovery::eligible(origin, v, settings))
            .map(|v| (v.id, 0.0))
            .collect();
    }

    discovery::discover(provider, fleet, origin_vessel, settings)
}

/// Validated single-target connection strength: `curve(path_strength) + 1`,
/// or 0 when the network is disabled, either node is missing, or no valid
/// path terminates at the target.
pub fn connection_strength<P: CommProvider>(
    provider: &P,
    fleet: &Fleet,
    origin: VesselId,
    target: VesselId,
    settings: &RelaySettings,
) -> f64 {
    if !settings.network_enabled {
        return 0.0;
    }
    let Some(origin_node) = fleet.get(origin).and_then(|v| v.node.as_ref()) else {
        return 0.0;
    };
    let Some(target_node) = fleet.get(target).and_then(|v| v.node.as_ref()) else {
        return 0.0;
    };
    let Some(found) = path::find_path(provider, origin_node.id, target_node.id) else {
        return 0.0;
    };
    provider.evaluate_curve(origin_node.science_curve, found.signal_strength) + 1.0
}
