//! CommRelay Core - Science Relay Engine
//!
//! Moves science payloads between vessels across a dynamic comm network:
//! discovers which vessels a given origin can reach (through relays or
//! direct line of sight), prices the transmission boost the connection
//! earns, and runs each transfer through an asynchronous
//! dispatch/complete/revert state machine.
//!
//! The engine never talks to an environment directly. A host supplies two
//! capabilities — a [`provider::CommProvider`] for pathing, curves, and
//! occlusion, and a [`provider::TransmissionQueue`] for radio hardware —
//! and drives a [`transfer::RelaySession`] built over its fleet.
//!
//! # Example
//!
//! ```rust,ignore
//! use commrelay_core::prelude::*;
//!
//! let mut session = RelaySession::new(provider, radios, settings, fleet);
//!
//! let reachable = session.list_reachable(origin);
//! let token = session.begin_transfer(request)?;
//! // ... later, when the radio reports back:
//! session.on_transmission_result(&subject, origin, false);
//! ```

pub mod boost;
pub mod connectivity;
pub mod discovery;
pub mod error;
pub mod path;
pub mod payload;
pub mod provider;
pub mod signal;
pub mod snapshot;
pub mod storage;
pub mod transfer;
pub mod vessel;

#[cfg(test)]
mod testutil;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::error::RelayError;
    pub use crate::payload::SciencePayload;
    pub use crate::provider::{CommProvider, TransmissionQueue};
    pub use crate::transfer::{
        OpenPage, RelaySession, RequestToken, TransferOutcome, TransferRequest, TransferState,
    };
    pub use crate::vessel::{
        CommNode, Fleet, NodeId, PartId, ScienceContainer, ScienceLab, SubjectId, Vessel, VesselId,
        VesselKind,
    };
}
