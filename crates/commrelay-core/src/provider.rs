//! External capability traits supplied by the host environment.
//!
//! The engine owns no geometry, curves, or radios. Everything it needs
//! from the environment comes through these two traits, injected into a
//! [`crate::transfer::RelaySession`] at construction.

use commrelay_logic::geometry::Vec3;

use crate::error::OcclusionError;
use crate::path::CommPath;
use crate::payload::SciencePayload;
use crate::vessel::{CurveId, NodeId, OccluderId, SubjectId, TransmitterId, Vessel};

/// Geometry, curve, and path queries answered by the comm network.
pub trait CommProvider {
    /// Best path between two nodes, or `None` when disconnected. Each call
    /// returns a fresh path value; results are never shared or reused
    /// between queries.
    ///
    /// The network may return a best-effort partial path toward an
    /// unreachable node — [`crate::path::find_path`] rejects those.
    fn find_path(&self, origin: NodeId, destination: NodeId) -> Option<CommPath>;

    /// Normalized range for an antenna-power pairing at `distance`.
    /// Non-positive means out of range.
    fn normalized_range(&self, tx_power: f64, rx_power: f64, distance: f64) -> f64;

    /// Evaluate an environment-owned curve at `x`.
    fn evaluate_curve(&self, curve: CurveId, x: f64) -> f64;

    /// Line-of-sight test between two adjusted positions. `Ok(true)` means
    /// unobstructed. Errors are treated as occluded by all callers.
    fn test_occlusion(
        &self,
        a: Vec3,
        occluder_a: OccluderId,
        b: Vec3,
        occluder_b: OccluderId,
        distance: f64,
    ) -> Result<bool, OcclusionError>;

    /// Directed pairwise attenuation contributed by node `a` toward `b`
    /// (e.g. plasma blackout). Both directions are multiplied into a link.
    fn signal_multiplier(&self, _a: NodeId, _b: NodeId) -> f64 {
        1.0
    }

    /// Science value of `amount` data for `subject` at a transmission
    /// efficiency. `None` when the subject cannot be resolved.
    fn science_value(&self, amount: f64, subject: &SubjectId, efficiency: f64) -> Option<f64>;
}

/// The asynchronous transmission subsystem.
///
/// `transmit` does not block; completion arrives later through
/// [`crate::transfer::RelaySession::on_transmission_result`] on the same
/// cooperative execution context.
pub trait TransmissionQueue {
    /// Best usable transmitter on `vessel`, or `None` if it cannot
    /// transmit at all.
    fn best_transmitter(&self, vessel: &Vessel) -> Option<TransmitterId>;

    /// Queue the payload for transmission on `transmitter`.
    fn transmit(&mut self, transmitter: TransmitterId, payload: &SciencePayload);
}
