//! Error types for the relay engine.

use thiserror::Error;

use crate::vessel::{PartId, SubjectId, VesselId};

/// Failures surfaced to the caller. Unreachable targets are not errors —
/// they are simply absent from the reachable set.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Terminal for the requested transfer; the caller must pick another
    /// origin. The origin container is left untouched.
    #[error("no usable transmitter on vessel {0:?}; cannot transmit data")]
    NoTransmitter(VesselId),

    #[error("vessel {0:?} is not part of this session")]
    UnknownVessel(VesselId),

    #[error("payload {subject} not found in container {container:?}")]
    PayloadMissing {
        container: PartId,
        subject: SubjectId,
    },

    #[error("no eligible science container on vessel {0:?}")]
    NoEligibleDestination(VesselId),
}

/// The environment's visibility test failed to run. Callers treat the
/// node pair as occluded (fail closed).
#[derive(Debug, Error)]
#[error("occlusion test failed: {0}")]
pub struct OcclusionError(pub String);
