//! The science payload being moved between vessels.

use serde::{Deserialize, Serialize};

use crate::vessel::{PartId, SubjectId};

/// A transferable science data unit.
///
/// `container` remembers the part the payload was removed from so a failed
/// transfer can return it to the exact same place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SciencePayload {
    pub subject: SubjectId,
    /// Human-readable experiment title for notices.
    pub title: String,
    /// Data amount, mutated on successful delivery.
    pub amount: f64,
    /// Base transmission efficiency in `(0, 1]`; reset to 1 after delivery.
    pub transmit_value: f64,
    /// Bonus multiplier; reset to 1 after delivery.
    pub bonus: f64,
    /// Set while an asynchronous transmission is outstanding.
    pub in_flight: bool,
    /// Part id of the container this payload was last resident in.
    pub container: PartId,
    /// Warn before transmitting — the experiment cannot be repeated.
    pub transmit_warning: bool,
}

impl SciencePayload {
    pub fn new(subject: impl Into<SubjectId>, title: &str, amount: f64, container: PartId) -> Self {
        Self {
            subject: subject.into(),
            title: title.to_string(),
            amount,
            transmit_value: 1.0,
            bonus: 1.0,
            in_flight: false,
            container,
            transmit_warning: false,
        }
    }

    /// Builder-style override for the base transmission efficiency.
    pub fn with_transmit_value(mut self, value: f64) -> Self {
        self.transmit_value = value;
        self
    }
}
