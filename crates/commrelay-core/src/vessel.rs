//! Vessels, comm nodes, and the fleet collection.

use serde::{Deserialize, Serialize};

use commrelay_logic::geometry::Vec3;

use crate::payload::SciencePayload;
use crate::snapshot::VesselSnapshot;

/// Stable vessel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VesselId(pub u64);

/// Stable comm-node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Part identifier within a vessel (container/lab host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartId(pub u32);

/// Handle to an environment-owned range-to-strength curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveId(pub u32);

/// Handle to an environment-owned occluder body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccluderId(pub u32);

/// Handle to a transmitter part resolved by the transmission subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransmitterId(pub u32);

/// Science subject identifier (experiment + situation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vessel classification. Non-participant kinds never appear in the
/// reachable set and never receive transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VesselKind {
    Ship,
    Station,
    Lander,
    Probe,
    Relay,
    Base,
    Debris,
    SpaceObject,
    Unknown,
    Marker,
}

impl VesselKind {
    /// Whether vessels of this kind take part in science relay.
    pub fn participates(self) -> bool {
        !matches!(
            self,
            Self::Debris | Self::SpaceObject | Self::Unknown | Self::Marker
        )
    }
}

/// One antenna band: power scalar plus a range-to-strength curve handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AntennaSpec {
    pub power: f64,
    pub range_curve: CurveId,
}

impl AntennaSpec {
    pub fn new(power: f64, range_curve: CurveId) -> Self {
        Self { power, range_curve }
    }

    /// A dead band that never yields positive range.
    pub fn none() -> Self {
        Self {
            power: 0.0,
            range_curve: CurveId(0),
        }
    }
}

/// A vessel's comm endpoint. Owned by exactly one vessel, never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommNode {
    pub id: NodeId,
    pub position: Vec3,
    pub occluder: OccluderId,
    /// Relay antenna band — positive power marks this node as a relay.
    pub relay: AntennaSpec,
    /// Direct-transmit antenna band.
    pub transmit: AntennaSpec,
    /// Fixed ground terminus; home nodes never act as relays here.
    pub is_home: bool,
    /// Strength curve converting aggregate path strength into credit.
    pub science_curve: CurveId,
}

impl CommNode {
    pub fn is_relay(&self) -> bool {
        self.relay.power > 0.0
    }
}

/// Live science storage container on a loaded vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScienceContainer {
    pub part: PartId,
    /// Capacity 0 means unlimited.
    pub capacity: u32,
    pub allow_repeated: bool,
    pub data: Vec<SciencePayload>,
}

impl ScienceContainer {
    pub fn new(part: PartId, capacity: u32, allow_repeated: bool) -> Self {
        Self {
            part,
            capacity,
            allow_repeated,
            data: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.capacity != 0 && self.data.len() >= self.capacity as usize
    }

    pub fn has_subject(&self, subject: &SubjectId) -> bool {
        self.data.iter().any(|p| p.subject == *subject)
    }
}

/// Live science lab on a loaded vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScienceLab {
    pub part: PartId,
    pub crew_required: u32,
    pub crew_present: u32,
}

impl ScienceLab {
    pub fn is_staffed(&self) -> bool {
        self.crew_present >= self.crew_required
    }
}

/// A mobile unit owning zero-or-one comm node and some science hardware.
///
/// `loaded` selects the representation every consumer must handle: live
/// containers/labs when true, the serialized snapshot when false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub kind: VesselKind,
    pub loaded: bool,
    pub node: Option<CommNode>,
    /// Live representation (meaningful when `loaded`).
    pub containers: Vec<ScienceContainer>,
    pub labs: Vec<ScienceLab>,
    /// Offline representation (meaningful when `!loaded`).
    pub snapshot: Option<VesselSnapshot>,
}

impl Vessel {
    pub fn new(id: VesselId, name: &str, kind: VesselKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            loaded: true,
            node: None,
            containers: Vec::new(),
            labs: Vec::new(),
            snapshot: None,
        }
    }

    /// Whether the vessel can receive science in its current representation.
    pub fn has_storage(&self) -> bool {
        if self.loaded {
            !self.containers.is_empty()
        } else {
            self.snapshot.as_ref().map_or(false, |s| s.has_storage())
        }
    }

    /// Whether a lab with its required crew is present, in either
    /// representation.
    pub fn has_crewed_lab(&self) -> bool {
        if self.loaded {
            self.labs.iter().any(ScienceLab::is_staffed)
        } else {
            self.snapshot.as_ref().map_or(false, |s| s.has_crewed_lab())
        }
    }

    pub fn container_mut(&mut self, part: PartId) -> Option<&mut ScienceContainer> {
        self.containers.iter_mut().find(|c| c.part == part)
    }

    pub fn container(&self, part: PartId) -> Option<&ScienceContainer> {
        self.containers.iter().find(|c| c.part == part)
    }
}

/// The set of vessels visible to one relay session, keyed by id with a
/// stable iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fleet {
    vessels: Vec<Vessel>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a vessel by id.
    pub fn insert(&mut self, vessel: Vessel) {
        match self.vessels.iter_mut().find(|v| v.id == vessel.id) {
            Some(slot) => *slot = vessel,
            None => self.vessels.push(vessel),
        }
    }

    pub fn get(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.id == id)
    }

    pub fn get_mut(&mut self, id: VesselId) -> Option<&mut Vessel> {
        self.vessels.iter_mut().find(|v| v.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.iter()
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }
}
