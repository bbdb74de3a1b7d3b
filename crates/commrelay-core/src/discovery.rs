//! Relay discovery: which vessels can hear us, and how well.
//!
//! Two phases. Phase 1 asks the network for the best path to every
//! eligible candidate and credits `curve(path_strength) + 1`, while
//! recording the corridor strength of every non-home node those paths
//! touch. Phase 2 then scans from each recorded relay node for further
//! vessels in direct line-of-sight range, crediting them through the same
//! strength curve. A candidate found by both phases keeps its best value.

use std::collections::HashMap;

use commrelay_logic::policy::RelaySettings;
use commrelay_logic::reachability::ReachabilityMap;

use crate::path;
use crate::provider::CommProvider;
use crate::signal;
use crate::vessel::{CommNode, Fleet, NodeId, Vessel, VesselId};

/// Eligibility filters applied before any geometry work, for both path
/// candidates and direct-scan candidates.
pub fn eligible(origin: VesselId, candidate: &Vessel, settings: &RelaySettings) -> bool {
    if candidate.id == origin {
        return false;
    }
    if !candidate.kind.participates() {
        return false;
    }
    if !candidate.has_storage() {
        return false;
    }
    if settings.require_lab && !candidate.has_crewed_lab() {
        return false;
    }
    true
}

/// All vessels reachable from `origin`, with their connection strengths,
/// strongest first. No vessel appears twice.
pub fn discover<P: CommProvider>(
    provider: &P,
    fleet: &Fleet,
    origin: &Vessel,
    settings: &RelaySettings,
) -> Vec<(VesselId, f64)> {
    let Some(origin_node) = origin.node.as_ref() else {
        return Vec::new();
    };

    // Node lookup over the whole fleet, ineligible vessels included —
    // intermediate relay endpoints can belong to anyone.
    let mut nodes: HashMap<NodeId, &CommNode> = HashMap::new();
    for vessel in fleet.iter() {
        if let Some(node) = vessel.node.as_ref() {
            nodes.insert(node.id, node);
        }
    }

    let mut relays: ReachabilityMap<NodeId> = ReachabilityMap::new();
    if !settings.require_relay_hop {
        // The origin may act as its own relay at full corridor strength.
        relays.upsert_max(origin_node.id, 1.0);
    }

    let mut connected: ReachabilityMap<VesselId> = ReachabilityMap::new();

    // Phase 1: best path to every eligible candidate.
    for candidate in fleet.iter() {
        if !eligible(origin.id, candidate, settings) {
            continue;
        }
        let Some(candidate_node) = candidate.node.as_ref() else {
            continue;
        };
        let Some(found) = path::find_path(provider, origin_node.id, candidate_node.id) else {
            continue;
        };

        let strength =
            provider.evaluate_curve(origin_node.science_curve, found.signal_strength) + 1.0;
        connected.upsert_max(candidate.id, strength);

        for (node_id, corridor) in found.corridor_strengths() {
            let Some(node) = nodes.get(&node_id) else {
                continue;
            };
            if node.is_home {
                continue;
            }
            relays.upsert_max(node_id, corridor);
        }
    }

    // Phase 2: direct line-of-sight scan from every recorded relay node.
    for (relay_id, corridor) in relays.iter() {
        let relay_id = *relay_id;
        let Some(relay_node) = nodes.get(&relay_id) else {
            continue;
        };

        for candidate in fleet.iter() {
            if !eligible(origin.id, candidate, settings) {
                continue;
            }
            let Some(candidate_node) = candidate.node.as_ref() else {
                continue;
            };
            // A relay does not receive as an end target in this phase; it
            // was already given its chance through the path query.
            if candidate_node.is_relay() {
                continue;
            }

            let distance = relay_node.position.distance(&candidate_node.position);
            if signal::occluded(provider, relay_node, candidate_node, distance) {
                continue;
            }

            let power = signal::direct_strength(
                provider,
                relay_node,
                candidate_node,
                distance,
                relay_id == origin_node.id,
                corridor,
            );
            if power <= 0.0 {
                continue;
            }

            let strength = provider.evaluate_curve(origin_node.science_curve, power) + 1.0;
            connected.upsert_max(candidate.id, strength);
        }
    }

    let mut result = connected.into_vec();
    result.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    result
}
