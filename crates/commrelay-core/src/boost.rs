//! Policy- and environment-aware boost computation.
//!
//! The ceiling math lives in `commrelay_logic::boost`; this wrapper
//! resolves the payload's subject against the environment's value curve
//! and applies the session policy gates.

use commrelay_logic::boost::boost_factor;
use commrelay_logic::policy::RelaySettings;

use crate::payload::SciencePayload;
use crate::provider::CommProvider;
use crate::vessel::Vessel;

/// Transmission-efficiency boost for sending `payload` to `target` at
/// connection strength `raw_strength`.
///
/// Returns 0 when boosting is disabled, the target is absent or lacks a
/// staffed lab under the crewed-lab policy, the strength is non-positive,
/// the payload is absent, or the value curve cannot price the subject.
pub fn compute_boost<P: CommProvider>(
    provider: &P,
    settings: &RelaySettings,
    target: Option<&Vessel>,
    payload: Option<&SciencePayload>,
    raw_strength: f64,
    transmit_efficiency: f64,
) -> f64 {
    if !settings.boost_enabled {
        return 0.0;
    }
    let Some(target) = target else {
        return 0.0;
    };
    if settings.require_crewed_lab_for_boost && !target.has_crewed_lab() {
        return 0.0;
    }
    let Some(payload) = payload else {
        return 0.0;
    };
    if raw_strength <= 0.0 {
        return 0.0;
    }

    let Some(full_value) = provider.science_value(payload.amount, &payload.subject, 1.0) else {
        return 0.0;
    };
    let Some(sent_value) =
        provider.science_value(payload.amount, &payload.subject, transmit_efficiency)
    else {
        return 0.0;
    };

    boost_factor(raw_strength, full_value, sent_value, settings.penalty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::StaticNet;
    use crate::vessel::{PartId, ScienceLab, VesselId, VesselKind};

    fn target_with_lab(staffed: bool) -> Vessel {
        let mut v = Vessel::new(VesselId(2), "Target", VesselKind::Station);
        v.labs.push(ScienceLab {
            part: PartId(1),
            crew_required: 2,
            crew_present: if staffed { 2 } else { 1 },
        });
        v
    }

    fn priced_net() -> StaticNet {
        let mut net = StaticNet::new();
        net.add_subject("gravScan@Mun", 10.0);
        net
    }

    fn payload() -> SciencePayload {
        SciencePayload::new("gravScan@Mun", "Gravity Scan", 30.0, PartId(1)).with_transmit_value(0.5)
    }

    #[test]
    fn test_worked_scenario() {
        // strength 2.0, penalty 0.5, full 10, sent 5 → boost 0.5.
        let net = priced_net();
        let settings = RelaySettings::default();
        let target = target_with_lab(true);
        let p = payload();
        let boost = compute_boost(&net, &settings, Some(&target), Some(&p), 2.0, 0.5);
        assert!((boost - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_when_disabled() {
        let net = priced_net();
        let settings = RelaySettings {
            boost_enabled: false,
            ..RelaySettings::default()
        };
        let target = target_with_lab(true);
        let p = payload();
        assert_eq!(
            compute_boost(&net, &settings, Some(&target), Some(&p), 2.0, 0.5),
            0.0
        );
    }

    #[test]
    fn test_crewed_lab_policy() {
        let net = priced_net();
        let settings = RelaySettings {
            require_crewed_lab_for_boost: true,
            ..RelaySettings::default()
        };
        let p = payload();
        let staffed = target_with_lab(true);
        let understaffed = target_with_lab(false);
        assert!(compute_boost(&net, &settings, Some(&staffed), Some(&p), 2.0, 0.5) > 0.0);
        assert_eq!(
            compute_boost(&net, &settings, Some(&understaffed), Some(&p), 2.0, 0.5),
            0.0
        );
    }

    #[test]
    fn test_zero_on_missing_inputs() {
        let net = priced_net();
        let settings = RelaySettings::default();
        let target = target_with_lab(true);
        let p = payload();
        assert_eq!(compute_boost(&net, &settings, None, Some(&p), 2.0, 0.5), 0.0);
        assert_eq!(
            compute_boost(&net, &settings, Some(&target), None, 2.0, 0.5),
            0.0
        );
        assert_eq!(
            compute_boost(&net, &settings, Some(&target), Some(&p), 0.0, 0.5),
            0.0
        );
    }

    #[test]
    fn test_zero_on_unresolvable_subject() {
        let net = StaticNet::new(); // no subjects priced
        let settings = RelaySettings::default();
        let target = target_with_lab(true);
        let p = payload();
        assert_eq!(
            compute_boost(&net, &settings, Some(&target), Some(&p), 2.0, 0.5),
            0.0
        );
    }
}
