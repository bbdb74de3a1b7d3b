//! Transmission-boost ceiling math.
//!
//! The boost can never push the effective recovered value above what a
//! full, non-transmitted recovery would yield: the ratio saturates at
//! `full_value / sent_value`. The final factor is then reduced by the
//! session penalty.

/// Compute the boost factor from a raw connection strength.
///
/// * `raw_strength` — connection strength from the connectivity engine
///   (already passed through the origin's strength curve, +1 based).
/// * `full_value` — science value of a full, non-transmitted recovery.
/// * `sent_value` — science value at the payload's transmit efficiency.
/// * `penalty` — fraction of the boost withheld, clamped to `[0, 1]`.
///
/// Returns exactly 0 when any of the three inputs is non-positive.
pub fn boost_factor(raw_strength: f64, full_value: f64, sent_value: f64, penalty: f64) -> f64 {
    if raw_strength <= 0.0 || full_value <= 0.0 || sent_value <= 0.0 {
        return 0.0;
    }

    let ratio = if sent_value * raw_strength > full_value {
        full_value / sent_value
    } else {
        raw_strength
    };

    (ratio - 1.0) * (1.0 - penalty.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_on_nonpositive_inputs() {
        assert_eq!(boost_factor(0.0, 10.0, 5.0, 0.0), 0.0);
        assert_eq!(boost_factor(-1.0, 10.0, 5.0, 0.0), 0.0);
        assert_eq!(boost_factor(2.0, 0.0, 5.0, 0.0), 0.0);
        assert_eq!(boost_factor(2.0, 10.0, 0.0, 0.0), 0.0);
        assert_eq!(boost_factor(2.0, 10.0, -3.0, 0.0), 0.0);
    }

    #[test]
    fn test_below_ceiling_uses_raw_strength() {
        // sent * raw = 5 * 1.5 = 7.5 <= full = 10, so ratio = raw.
        let f = boost_factor(1.5, 10.0, 5.0, 0.0);
        assert!((f - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ceiling_saturates() {
        // Once sent * raw exceeds full, the factor stops growing.
        let at_ceiling = boost_factor(2.0 + 1e-9, 10.0, 5.0, 0.0);
        let way_past = boost_factor(1_000.0, 10.0, 5.0, 0.0);
        assert!((at_ceiling - way_past).abs() < 1e-6);
        assert!((way_past - 1.0).abs() < 1e-12, "(10/5 - 1) * 1 = 1");
    }

    #[test]
    fn test_penalty_scales_factor() {
        let full = boost_factor(1.5, 10.0, 5.0, 0.0);
        let half = boost_factor(1.5, 10.0, 5.0, 0.5);
        let none = boost_factor(1.5, 10.0, 5.0, 1.0);
        assert!((half - full * 0.5).abs() < 1e-12);
        assert_eq!(none, 0.0);
    }

    #[test]
    fn test_penalty_clamped() {
        let f = boost_factor(1.5, 10.0, 5.0, 2.0);
        assert_eq!(f, 0.0);
        let g = boost_factor(1.5, 10.0, 5.0, -1.0);
        assert_eq!(g, boost_factor(1.5, 10.0, 5.0, 0.0));
    }

    #[test]
    fn test_worked_scenario() {
        // strength 2.0, penalty 0.5, full 10, sent 5:
        // ratio saturates at 10/5 = 2 → boost = (2 - 1) * 0.5 = 0.5.
        let f = boost_factor(2.0, 10.0, 5.0, 0.5);
        assert!((f - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_weak_link_yields_negative_factor() {
        // Strength below 1 means the relayed route is worse than sending
        // home; the factor goes negative, never amplified past the ceiling.
        let f = boost_factor(0.5, 10.0, 5.0, 0.0);
        assert!(f < 0.0);
        assert!((f + 0.5).abs() < 1e-12);
    }
}
