//! Destination store selection and delivery.
//!
//! Container selection scans last-to-first: the first repeat-allowing
//! container encountered wins immediately; otherwise the last eligible
//! container scanned (the lowest index) is selected. The same rule applies
//! to live containers and to snapshot storage modules, so loaded and
//! unloaded targets behave identically.

use crate::payload::SciencePayload;
use crate::snapshot::{ModuleCapability, PayloadRecord};
use crate::vessel::{PartId, Vessel};

/// Outcome of a successful delivery, for notices and bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    /// Container part the payload landed in.
    pub container: PartId,
    /// Amount after transmission scaling.
    pub amount: f64,
    pub title: String,
}

/// Deliver `payload` into the best storage on `target`.
///
/// On success the payload's `in_flight` flag is cleared, its amount is
/// scaled by `transmit_value * (1 + boost)`, and its transmit value and
/// bonus reset to 1 — post-transmission it is plain data. On failure the
/// payload is handed back untouched.
pub fn deliver(
    target: &mut Vessel,
    payload: SciencePayload,
    boost: f64,
) -> Result<DeliveryReceipt, SciencePayload> {
    if target.loaded {
        deliver_live(target, payload, boost)
    } else {
        deliver_snapshot(target, payload, boost)
    }
}

fn finalize(payload: &mut SciencePayload, container: PartId, boost: f64) {
    payload.in_flight = false;
    payload.amount *= payload.transmit_value * (1.0 + boost);
    payload.transmit_value = 1.0;
    payload.bonus = 1.0;
    payload.container = container;
}

fn deliver_live(
    target: &mut Vessel,
    mut payload: SciencePayload,
    boost: f64,
) -> Result<DeliveryReceipt, SciencePayload> {
    let mut selected: Option<usize> = None;

    for j in (0..target.containers.len()).rev() {
        let container = &target.containers[j];
        if container.is_full() {
            continue;
        }
        if container.allow_repeated {
            selected = Some(j);
            break;
        }
        if container.has_subject(&payload.subject) {
            continue;
        }
        selected = Some(j);
    }

    match selected {
        Some(j) => {
            let part = target.containers[j].part;
            finalize(&mut payload, part, boost);
            let receipt = DeliveryReceipt {
                container: part,
                amount: payload.amount,
                title: payload.title.clone(),
            };
            target.containers[j].data.push(payload);
            Ok(receipt)
        }
        None => Err(payload),
    }
}

fn deliver_snapshot(
    target: &mut Vessel,
    mut payload: SciencePayload,
    boost: f64,
) -> Result<DeliveryReceipt, SciencePayload> {
    let Some(snapshot) = target.snapshot.as_mut() else {
        return Err(payload);
    };

    let mut selected: Option<(usize, usize)> = None;

    for i in (0..snapshot.parts.len()).rev() {
        let part = &snapshot.parts[i];
        // Last storage module on the part, matching the live scan order.
        let Some(m) = part.modules.iter().rposition(|m| m.is_storage()) else {
            continue;
        };
        let module = &part.modules[m];
        let ModuleCapability::Storage {
            capacity,
            allow_repeated,
        } = module.capability
        else {
            continue;
        };
        if capacity != 0 && module.records.len() >= capacity as usize {
            continue;
        }
        if allow_repeated {
            selected = Some((i, m));
            break;
        }
        if module.has_subject(&payload.subject) {
            continue;
        }
        selected = Some((i, m));
    }

    match selected {
        Some((i, m)) => {
            let part = snapshot.parts[i].part;
            finalize(&mut payload, part, boost);
            let receipt = DeliveryReceipt {
                container: part,
                amount: payload.amount,
                title: payload.title.clone(),
            };
            // Append a stamped record; no live object mutation occurs.
            snapshot.parts[i]
                .modules[m]
                .records
                .push(PayloadRecord::from_payload(&payload, part));
            Ok(receipt)
        }
        None => Err(payload),
    }
}
