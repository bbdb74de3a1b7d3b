//! Per-link signal strength between two comm nodes.
//!
//! Strength for a usable pairing is `sqrt(curve_a(r) * curve_b(r))`, scaled
//! by the symmetric pairwise attenuation both endpoints contribute (plasma
//! blackout and the like) and by the corridor strength already accumulated
//! to reach the near node.

use crate::provider::CommProvider;
use crate::vessel::{AntennaSpec, CommNode};

/// Direct connection strength from node `a` to node `b` over `distance`.
///
/// When `a_is_source`, the transmit/transmit pairing is tried first and the
/// relay/transmit pairing is the fallback; otherwise only relay/transmit is
/// attempted. Returns 0 if no pairing yields positive normalized range.
///
/// `corridor` is the accumulated corridor strength to reach `a`; pass 1.0
/// for a first-hop query.
pub fn direct_strength<P: CommProvider>(
    provider: &P,
    a: &CommNode,
    b: &CommNode,
    distance: f64,
    a_is_source: bool,
    corridor: f64,
) -> f64 {
    let attenuation =
        provider.signal_multiplier(a.id, b.id) * provider.signal_multiplier(b.id, a.id);

    let pairings: &[(AntennaSpec, AntennaSpec)] = if a_is_source {
        &[(a.transmit, b.transmit), (a.relay, b.transmit)]
    } else {
        &[(a.relay, b.transmit)]
    };

    for (tx, rx) in pairings {
        let range = provider.normalized_range(tx.power, rx.power, distance);
        if range > 0.0 {
            let power = (provider.evaluate_curve(tx.range_curve, range)
                * provider.evaluate_curve(rx.range_curve, range))
            .sqrt();
            return power * attenuation * corridor;
        }
    }

    0.0
}

/// Line-of-sight check between two nodes. Any error running the test is
/// treated as occluded.
pub fn occluded<P: CommProvider>(provider: &P, a: &CommNode, b: &CommNode, distance: f64) -> bool {
    match provider.test_occlusion(a.position, a.occluder, b.position, b.occluder, distance) {
        Ok(clear) => !clear,
        Err(err) => {
            log::warn!(
                "occlusion test failed between node {:?} and node {:?}: {err}; treating as occluded",
                a.id,
                b.id
            );
            true
        }
    }
}
