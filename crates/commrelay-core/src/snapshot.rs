//! Serialized offline representation of a vessel.
//!
//! Unloaded vessels are represented by a snapshot: a list of part records,
//! each carrying typed module capabilities and serialized payload records.
//! Delivery to an unloaded vessel appends a record here without touching
//! any live object. Bincode round-trips the whole snapshot for persistence.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;

use crate::payload::SciencePayload;
use crate::vessel::{PartId, SubjectId};

/// Version number for the snapshot format (increment when it changes).
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("unsupported snapshot version {0} (expected {SNAPSHOT_VERSION})")]
    Version(u32),
}

/// One serialized payload inside a snapshot module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadRecord {
    pub subject: SubjectId,
    pub title: String,
    pub amount: f64,
    pub transmit_value: f64,
    pub bonus: f64,
    /// Part id of the container module owning this record.
    pub container: PartId,
}

impl PayloadRecord {
    /// Record a payload as resident in `container`.
    pub fn from_payload(payload: &SciencePayload, container: PartId) -> Self {
        Self {
            subject: payload.subject.clone(),
            title: payload.title.clone(),
            amount: payload.amount,
            transmit_value: payload.transmit_value,
            bonus: payload.bonus,
            container,
        }
    }

    /// Rehydrate into a live payload (never in flight).
    pub fn to_payload(&self) -> SciencePayload {
        SciencePayload {
            subject: self.subject.clone(),
            title: self.title.clone(),
            amount: self.amount,
            transmit_value: self.transmit_value,
            bonus: self.bonus,
            in_flight: false,
            container: self.container,
            transmit_warning: false,
        }
    }
}

/// Typed module capability — resolution is by declared capability, never by
/// module-name string comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleCapability {
    /// Science storage. Capacity 0 means unlimited.
    Storage { capacity: u32, allow_repeated: bool },
    /// Science lab requiring a minimum crew to operate.
    Lab { crew_required: u32 },
}

/// One serialized part module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    pub capability: ModuleCapability,
    /// Serialized payloads resident in this module (storage only).
    pub records: Vec<PayloadRecord>,
}

impl ModuleSnapshot {
    pub fn storage(capacity: u32, allow_repeated: bool) -> Self {
        Self {
            capability: ModuleCapability::Storage {
                capacity,
                allow_repeated,
            },
            records: Vec::new(),
        }
    }

    pub fn lab(crew_required: u32) -> Self {
        Self {
            capability: ModuleCapability::Lab { crew_required },
            records: Vec::new(),
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self.capability, ModuleCapability::Storage { .. })
    }

    pub fn has_subject(&self, subject: &SubjectId) -> bool {
        self.records.iter().any(|r| r.subject == *subject)
    }
}

/// One serialized part: identity, crew aboard, and its modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSnapshot {
    pub part: PartId,
    pub crew: u32,
    pub modules: Vec<ModuleSnapshot>,
}

/// Serialized offline vessel state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselSnapshot {
    pub parts: Vec<PartSnapshot>,
}

impl VesselSnapshot {
    /// Whether any part carries a storage module.
    pub fn has_storage(&self) -> bool {
        self.parts
            .iter()
            .any(|p| p.modules.iter().any(ModuleSnapshot::is_storage))
    }

    /// Whether any lab module has its required crew aboard its part.
    pub fn has_crewed_lab(&self) -> bool {
        self.parts.iter().any(|p| {
            p.modules.iter().any(|m| match m.capability {
                ModuleCapability::Lab { crew_required } => p.crew >= crew_required,
                _ => false,
            })
        })
    }

    /// Write a versioned snapshot to `writer`.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<(), SnapshotError> {
        bincode::serialize_into(&mut *writer, &SNAPSHOT_VERSION)?;
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Read a versioned snapshot from `reader`.
    pub fn load<R: Read>(reader: &mut R) -> Result<Self, SnapshotError> {
        let version: u32 = bincode::deserialize_from(&mut *reader)?;
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(version));
        }
        Ok(bincode::deserialize_from(reader)?)
    }
}
