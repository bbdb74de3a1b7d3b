//! In-memory provider and radio stubs shared by the unit tests.

use std::collections::{HashMap, HashSet};

use commrelay_logic::geometry::Vec3;

use crate::error::OcclusionError;
use crate::path::CommPath;
use crate::payload::SciencePayload;
use crate::provider::{CommProvider, TransmissionQueue};
use crate::vessel::{
    AntennaSpec, CommNode, CurveId, NodeId, OccluderId, SubjectId, TransmitterId, Vessel, VesselId,
    VesselKind,
};

/// Deterministic comm network backed by explicit tables.
///
/// Range model: reach = sqrt(tx * rx); normalized range is
/// `1 - distance / reach`, zero at or beyond reach. Curves are linear with
/// a configurable slope (default 1). Science value is
/// `base(subject) * efficiency`.
#[derive(Default)]
pub struct StaticNet {
    paths: HashMap<(NodeId, NodeId), CommPath>,
    curve_slopes: HashMap<CurveId, f64>,
    blocked: HashSet<(OccluderId, OccluderId)>,
    failing: HashSet<(OccluderId, OccluderId)>,
    multipliers: HashMap<(NodeId, NodeId), f64>,
    subjects: HashMap<SubjectId, f64>,
}

impl StaticNet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_path(&mut self, origin: NodeId, destination: NodeId, path: CommPath) {
        self.paths.insert((origin, destination), path);
    }

    pub fn set_curve_slope(&mut self, curve: CurveId, slope: f64) {
        self.curve_slopes.insert(curve, slope);
    }

    /// Block line of sight between two occluder-adjusted endpoints.
    pub fn block(&mut self, a: OccluderId, b: OccluderId) {
        self.blocked.insert((a, b));
        self.blocked.insert((b, a));
    }

    /// Make the occlusion test itself error for this pair.
    pub fn fail_occlusion(&mut self, a: OccluderId, b: OccluderId) {
        self.failing.insert((a, b));
        self.failing.insert((b, a));
    }

    pub fn set_multiplier(&mut self, a: NodeId, b: NodeId, value: f64) {
        self.multipliers.insert((a, b), value);
    }

    pub fn add_subject(&mut self, subject: impl Into<SubjectId>, base_value: f64) {
        self.subjects.insert(subject.into(), base_value);
    }
}

impl CommProvider for StaticNet {
    fn find_path(&self, origin: NodeId, destination: NodeId) -> Option<CommPath> {
        self.paths.get(&(origin, destination)).cloned()
    }

    fn normalized_range(&self, tx_power: f64, rx_power: f64, distance: f64) -> f64 {
        if tx_power <= 0.0 || rx_power <= 0.0 {
            return 0.0;
        }
        let reach = (tx_power * rx_power).sqrt();
        if distance >= reach {
            0.0
        } else {
            1.0 - distance / reach
        }
    }

    fn evaluate_curve(&self, curve: CurveId, x: f64) -> f64 {
        self.curve_slopes.get(&curve).copied().unwrap_or(1.0) * x
    }

    fn test_occlusion(
        &self,
        _a: Vec3,
        occluder_a: OccluderId,
        _b: Vec3,
        occluder_b: OccluderId,
        _distance: f64,
    ) -> Result<bool, OcclusionError> {
        if self.failing.contains(&(occluder_a, occluder_b)) {
            return Err(OcclusionError("synthetic failure".to_string()));
        }
        Ok(!self.blocked.contains(&(occluder_a, occluder_b)))
    }

    fn signal_multiplier(&self, a: NodeId, b: NodeId) -> f64 {
        self.multipliers.get(&(a, b)).copied().unwrap_or(1.0)
    }

    fn science_value(&self, _amount: f64, subject: &SubjectId, efficiency: f64) -> Option<f64> {
        self.subjects.get(subject).map(|base| base * efficiency)
    }
}

/// Radio stub: one optional transmitter per vessel, fire-and-forget.
#[derive(Default)]
pub struct StaticRadios {
    transmitters: HashMap<VesselId, TransmitterId>,
}

impl StaticRadios {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit_transmitter(&mut self, vessel: VesselId, transmitter: TransmitterId) {
        self.transmitters.insert(vessel, transmitter);
    }
}

impl TransmissionQueue for StaticRadios {
    fn best_transmitter(&self, vessel: &Vessel) -> Option<TransmitterId> {
        self.transmitters.get(&vessel.id).copied()
    }

    fn transmit(&mut self, _transmitter: TransmitterId, _payload: &SciencePayload) {}
}

/// A loaded vessel with a comm node at `position`.
pub fn vessel_with_node(
    vessel_id: u64,
    name: &str,
    kind: VesselKind,
    node_id: u64,
    position: Vec3,
    relay_power: f64,
    transmit_power: f64,
) -> Vessel {
    let mut v = Vessel::new(VesselId(vessel_id), name, kind);
    v.node = Some(CommNode {
        id: NodeId(node_id),
        position,
        occluder: OccluderId(node_id as u32),
        relay: AntennaSpec::new(relay_power, CurveId(1)),
        transmit: AntennaSpec::new(transmit_power, CurveId(1)),
        is_home: false,
        science_curve: CurveId(2),
    });
    v
}
