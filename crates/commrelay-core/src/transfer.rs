//! The transfer fulfillment state machine.
//!
//! A transfer moves Requested → Dispatched → {Completed | Reverted}.
//! Dispatch removes the payload from its origin container, queues a
//! pending entry, and hands the payload to the asynchronous transmission
//! subsystem. Completion arrives later through
//! [`RelaySession::on_transmission_result`] on the same cooperative
//! execution context; an aborted notification leaves the request queued
//! for a retry, and a failed delivery returns the payload to the exact
//! container it came from.

use commrelay_logic::policy::RelaySettings;

use crate::boost;
use crate::connectivity;
use crate::error::RelayError;
use crate::payload::SciencePayload;
use crate::provider::{CommProvider, TransmissionQueue};
use crate::storage;
use crate::vessel::{Fleet, PartId, SubjectId, VesselId};

/// Unique handle for one dispatched transfer. Correlation of completion
/// notifications is by subject id (first match), but removal from the
/// outstanding set is by token, so a request is consumed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

/// Lifecycle of one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Requested,
    Dispatched,
    Completed,
    Reverted,
}

/// Caller-supplied description of one transfer.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Vessel carrying the outgoing transmitter and losing the payload.
    pub origin: VesselId,
    pub target: VesselId,
    /// Origin container part currently holding the payload.
    pub container: PartId,
    pub subject: SubjectId,
    /// Precomputed boost factor (see [`RelaySession::compute_boost`]).
    pub boost: f64,
}

/// One open payload page for [`RelaySession::transfer_all`].
#[derive(Debug, Clone)]
pub struct OpenPage {
    pub container: PartId,
    pub subject: SubjectId,
}

/// Result of correlating a completion notification.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    Completed {
        target: VesselId,
        container: PartId,
        amount: f64,
        /// User-visible success notice.
        notice: String,
    },
    Reverted {
        origin: VesselId,
        /// Whether the payload made it back into its origin container.
        returned: bool,
    },
    /// Aborted transmission: the request stays queued awaiting a retry.
    AbortedPending { token: RequestToken },
}

impl TransferOutcome {
    pub fn state(&self) -> TransferState {
        match self {
            Self::Completed { .. } => TransferState::Completed,
            Self::Reverted { .. } => TransferState::Reverted,
            Self::AbortedPending { .. } => TransferState::Dispatched,
        }
    }
}

/// A dispatched transfer awaiting its completion notification.
#[derive(Debug)]
struct PendingTransfer {
    token: RequestToken,
    state: TransferState,
    origin: VesselId,
    target: VesselId,
    boost: f64,
    payload: SciencePayload,
}

/// One relay session: the explicit context object owning the fleet, the
/// injected environment capabilities, the settings, and the outstanding
/// transfer set. Constructed once per session and passed around — there
/// is no process-wide instance.
pub struct RelaySession<P: CommProvider, T: TransmissionQueue> {
    provider: P,
    transmissions: T,
    settings: RelaySettings,
    fleet: Fleet,
    outstanding: Vec<PendingTransfer>,
    next_token: u64,
}

impl<P: CommProvider, T: TransmissionQueue> RelaySession<P, T> {
    pub fn new(provider: P, transmissions: T, settings: RelaySettings, fleet: Fleet) -> Self {
        Self {
            provider,
            transmissions,
            settings,
            fleet,
            outstanding: Vec::new(),
            next_token: 0,
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    /// Number of dispatched transfers still awaiting notification.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// State of a queued transfer, `None` once it has been consumed.
    pub fn pending_state(&self, token: RequestToken) -> Option<TransferState> {
        self.outstanding
            .iter()
            .find(|p| p.token == token)
            .map(|p| p.state)
    }

    /// All vessels reachable from `origin`, strongest first.
    pub fn list_reachable(&self, origin: VesselId) -> Vec<(VesselId, f64)> {
        connectivity::reachable_from(&self.provider, &self.fleet, origin, &self.settings)
    }

    /// Validated single-target connection strength.
    pub fn connection_strength(&self, origin: VesselId, target: VesselId) -> f64 {
        connectivity::connection_strength(
            &self.provider,
            &self.fleet,
            origin,
            target,
            &self.settings,
        )
    }

    /// Boost factor for sending `payload` to `target` at `raw_strength`.
    pub fn compute_boost(
        &self,
        raw_strength: f64,
        target: VesselId,
        payload: &SciencePayload,
        transmit_efficiency: f64,
    ) -> f64 {
        boost::compute_boost(
            &self.provider,
            &self.settings,
            self.fleet.get(target),
            Some(payload),
            raw_strength,
            transmit_efficiency,
        )
    }

    /// Whether the host should warn before dispatching this payload:
    /// the experiment is non-repeatable and warnings are enabled.
    pub fn needs_transmit_warning(&self, payload: &SciencePayload) -> bool {
        self.settings.show_transmit_warning && payload.transmit_warning
    }

    /// Dispatch one transfer: Requested → Dispatched.
    ///
    /// Fails with [`RelayError::NoTransmitter`] before any state changes;
    /// in that case the origin container is untouched and nothing is
    /// queued.
    pub fn begin_transfer(&mut self, request: TransferRequest) -> Result<RequestToken, RelayError> {
        let origin = self
            .fleet
            .get(request.origin)
            .ok_or(RelayError::UnknownVessel(request.origin))?;
        let transmitter = self
            .transmissions
            .best_transmitter(origin)
            .ok_or(RelayError::NoTransmitter(request.origin))?;

        let Some(origin) = self.fleet.get_mut(request.origin) else {
            return Err(RelayError::UnknownVessel(request.origin));
        };
        let missing = RelayError::PayloadMissing {
            container: request.container,
            subject: request.subject.clone(),
        };
        let Some(container) = origin.container_mut(request.container) else {
            return Err(missing);
        };
        let Some(index) = container
            .data
            .iter()
            .position(|p| p.subject == request.subject)
        else {
            return Err(missing);
        };

        let mut pending = PendingTransfer {
            token: RequestToken(self.next_token),
            state: TransferState::Requested,
            origin: request.origin,
            target: request.target,
            boost: request.boost,
            payload: container.data.remove(index),
        };
        self.next_token += 1;

        pending.payload.in_flight = true;
        pending.payload.container = request.container;

        self.transmissions.transmit(transmitter, &pending.payload);
        pending.state = TransferState::Dispatched;

        log::debug!(
            "dispatched {} from vessel {:?} to vessel {:?} (boost {:.3})",
            pending.payload.subject,
            pending.origin,
            pending.target,
            pending.boost
        );

        let token = pending.token;
        self.outstanding.push(pending);
        Ok(token)
    }

    /// Expand one user action into a transfer per open payload page, each
    /// with its own boost against the same destination.
    pub fn transfer_all(
        &mut self,
        origin: VesselId,
        target: VesselId,
        raw_strength: f64,
        pages: &[OpenPage],
    ) -> Vec<Result<RequestToken, RelayError>> {
        let mut results = Vec::with_capacity(pages.len());
        for page in pages {
            let payload = self
                .fleet
                .get(origin)
                .and_then(|v| v.container(page.container))
                .and_then(|c| c.data.iter().find(|p| p.subject == page.subject))
                .cloned();
            let Some(payload) = payload else {
                results.push(Err(RelayError::PayloadMissing {
                    container: page.container,
                    subject: page.subject.clone(),
                }));
                continue;
            };
            let boost =
                self.compute_boost(raw_strength, target, &payload, payload.transmit_value);
            results.push(self.begin_transfer(TransferRequest {
                origin,
                target,
                container: page.container,
                subject: page.subject.clone(),
                boost,
            }));
        }
        results
    }

    /// Correlate a completion notification: Dispatched → Completed or
    /// Reverted, or left queued when aborted.
    ///
    /// Returns `None` when no outstanding request matches — notifications
    /// for transfers this session never issued are ignored.
    pub fn on_transmission_result(
        &mut self,
        subject: &SubjectId,
        origin: VesselId,
        aborted: bool,
    ) -> Option<TransferOutcome> {
        let position = self
            .outstanding
            .iter()
            .position(|p| p.origin == origin && p.payload.subject == *subject)?;

        if aborted {
            // The request stays correlated for a future retry notification.
            let token = self.outstanding[position].token;
            log::debug!("transmission of {subject} aborted; request {token:?} stays queued");
            return Some(TransferOutcome::AbortedPending { token });
        }

        let pending = self.outstanding.remove(position);
        let origin_id = pending.origin;
        let target_id = pending.target;
        let boost = pending.boost;

        let delivered = match self.fleet.get_mut(target_id) {
            Some(target) => {
                let target_name = target.name.clone();
                storage::deliver(target, pending.payload, boost).map(|r| (r, target_name))
            }
            None => Err(pending.payload),
        };

        match delivered {
            Ok((receipt, target_name)) => {
                let notice = format!(
                    "[{}] {:.1} data received on {}",
                    target_name, receipt.amount, receipt.title
                );
                log::info!("{notice}");
                Some(TransferOutcome::Completed {
                    target: target_id,
                    container: receipt.container,
                    amount: receipt.amount,
                    notice,
                })
            }
            Err(payload) => {
                let returned = self.return_payload(origin_id, payload);
                log::warn!(
                    "{}; payload returned: {returned}",
                    RelayError::NoEligibleDestination(target_id)
                );
                Some(TransferOutcome::Reverted {
                    origin: origin_id,
                    returned,
                })
            }
        }
    }

    /// Put a failed payload back into the container it was removed from.
    fn return_payload(&mut self, origin: VesselId, mut payload: SciencePayload) -> bool {
        payload.in_flight = false;
        if let Some(vessel) = self.fleet.get_mut(origin) {
            if let Some(container) = vessel.container_mut(payload.container) {
                container.data.push(payload);
                return true;
            }
        }
        log::error!(
            "origin container {:?} on vessel {origin:?} vanished; payload {} dropped",
            payload.container,
            payload.subject
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{vessel_with_node, StaticNet, StaticRadios};
    use crate::vessel::{ScienceContainer, TransmitterId, Vessel, VesselKind};
    use commrelay_logic::geometry::Vec3;

    const SUBJECT: &str = "gravScan@Mun";

    fn session(
        target_containers: Vec<ScienceContainer>,
    ) -> RelaySession<StaticNet, StaticRadios> {
        let mut net = StaticNet::new();
        net.add_subject(SUBJECT, 10.0);

        let mut origin = vessel_with_node(1, "Lab Ship", VesselKind::Ship, 1, Vec3::ZERO, 0.0, 100.0);
        let mut container = ScienceContainer::new(PartId(1), 0, false);
        container.data.push(
            SciencePayload::new(SUBJECT, "Gravity Scan", 20.0, PartId(1)).with_transmit_value(0.5),
        );
        origin.containers.push(container);

        let mut target = Vessel::new(VesselId(2), "Receiver", VesselKind::Station);
        target.containers = target_containers;

        let mut fleet = Fleet::new();
        fleet.insert(origin);
        fleet.insert(target);

        let mut radios = StaticRadios::new();
        radios.fit_transmitter(VesselId(1), TransmitterId(1));

        RelaySession::new(net, radios, RelaySettings::default(), fleet)
    }

    fn request(boost: f64) -> TransferRequest {
        TransferRequest {
            origin: VesselId(1),
            target: VesselId(2),
            container: PartId(1),
            subject: SubjectId::from(SUBJECT),
            boost,
        }
    }

    fn origin_payload_count(session: &RelaySession<StaticNet, StaticRadios>) -> usize {
        session
            .fleet()
            .get(VesselId(1))
            .unwrap()
            .container(PartId(1))
            .unwrap()
            .data
            .len()
    }

    #[test]
    fn test_dispatch_removes_payload_and_queues() {
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, false)]);
        let token = s.begin_transfer(request(0.5)).expect("dispatched");
        assert_eq!(origin_payload_count(&s), 0);
        assert_eq!(s.outstanding(), 1);
        assert_eq!(s.pending_state(token), Some(TransferState::Dispatched));
    }

    #[test]
    fn test_no_transmitter_is_terminal_and_touches_nothing() {
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, false)]);
        // Replace the session with one whose origin has no radio.
        let mut radios = StaticRadios::new();
        radios.fit_transmitter(VesselId(42), TransmitterId(1));
        let mut s2 = RelaySession::new(
            StaticNet::new(),
            radios,
            RelaySettings::default(),
            s.fleet().clone(),
        );
        match s2.begin_transfer(request(0.5)) {
            Err(RelayError::NoTransmitter(id)) => assert_eq!(id, VesselId(1)),
            other => panic!("expected NoTransmitter, got {other:?}"),
        }
        assert_eq!(origin_payload_count(&s2), 1);
        assert_eq!(s2.outstanding(), 0);
        // Payload untouched.
        let p = &s2
            .fleet()
            .get(VesselId(1))
            .unwrap()
            .container(PartId(1))
            .unwrap()
            .data[0];
        assert!(!p.in_flight);
        assert_eq!(p.amount, 20.0);
    }

    #[test]
    fn test_completed_transfer_worked_scenario() {
        // boost 0.5, efficiency 0.5: delivered amount = 20 * 0.5 * 1.5.
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, false)]);
        s.begin_transfer(request(0.5)).unwrap();
        let outcome = s
            .on_transmission_result(&SubjectId::from(SUBJECT), VesselId(1), false)
            .expect("correlated");
        match &outcome {
            TransferOutcome::Completed {
                target,
                container,
                amount,
                notice,
            } => {
                assert_eq!(*target, VesselId(2));
                assert_eq!(*container, PartId(9));
                assert!((*amount - 15.0).abs() < 1e-9);
                assert!(notice.contains("Receiver"));
                assert!(notice.contains("Gravity Scan"));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
        assert_eq!(outcome.state(), TransferState::Completed);
        assert_eq!(s.outstanding(), 0);
        let stored = &s
            .fleet()
            .get(VesselId(2))
            .unwrap()
            .container(PartId(9))
            .unwrap()
            .data[0];
        assert!(!stored.in_flight);
        assert_eq!(stored.transmit_value, 1.0);
    }

    #[test]
    fn test_reverted_transfer_restores_payload() {
        // Target has no containers at all: delivery fails, payload comes
        // home with its pre-dispatch fields intact.
        let mut s = session(vec![]);
        s.begin_transfer(request(0.5)).unwrap();
        let outcome = s
            .on_transmission_result(&SubjectId::from(SUBJECT), VesselId(1), false)
            .expect("correlated");
        assert_eq!(
            outcome,
            TransferOutcome::Reverted {
                origin: VesselId(1),
                returned: true
            }
        );
        assert_eq!(s.outstanding(), 0);
        assert_eq!(origin_payload_count(&s), 1);
        let p = &s
            .fleet()
            .get(VesselId(1))
            .unwrap()
            .container(PartId(1))
            .unwrap()
            .data[0];
        assert!(!p.in_flight);
        assert_eq!(p.amount, 20.0);
        assert_eq!(p.transmit_value, 0.5);
    }

    #[test]
    fn test_aborted_leaves_request_queued_for_retry() {
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, false)]);
        let token = s.begin_transfer(request(0.5)).unwrap();
        let outcome = s
            .on_transmission_result(&SubjectId::from(SUBJECT), VesselId(1), true)
            .expect("correlated");
        assert_eq!(outcome, TransferOutcome::AbortedPending { token });
        assert_eq!(s.outstanding(), 1);

        // Retry notification completes the same request.
        let outcome = s
            .on_transmission_result(&SubjectId::from(SUBJECT), VesselId(1), false)
            .expect("correlated");
        assert!(matches!(outcome, TransferOutcome::Completed { .. }));
        assert_eq!(s.outstanding(), 0);
    }

    #[test]
    fn test_unmatched_notification_ignored() {
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, false)]);
        s.begin_transfer(request(0.5)).unwrap();
        assert!(s
            .on_transmission_result(&SubjectId::from("unknown"), VesselId(1), false)
            .is_none());
        // Wrong origin vessel.
        assert!(s
            .on_transmission_result(&SubjectId::from(SUBJECT), VesselId(2), false)
            .is_none());
        assert_eq!(s.outstanding(), 1);
    }

    #[test]
    fn test_transfer_all_expands_pages() {
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, false)]);
        // Second payload in the origin container.
        s.fleet_mut()
            .get_mut(VesselId(1))
            .unwrap()
            .container_mut(PartId(1))
            .unwrap()
            .data
            .push(SciencePayload::new("tempScan@Mun", "Temp Scan", 8.0, PartId(1)));

        let pages = vec![
            OpenPage {
                container: PartId(1),
                subject: SubjectId::from(SUBJECT),
            },
            OpenPage {
                container: PartId(1),
                subject: SubjectId::from("tempScan@Mun"),
            },
        ];
        let results = s.transfer_all(VesselId(1), VesselId(2), 2.0, &pages);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(s.outstanding(), 2);
        assert_eq!(origin_payload_count(&s), 0);

        // Each completes independently.
        s.on_transmission_result(&SubjectId::from("tempScan@Mun"), VesselId(1), false)
            .expect("second page correlated");
        assert_eq!(s.outstanding(), 1);
        s.on_transmission_result(&SubjectId::from(SUBJECT), VesselId(1), false)
            .expect("first page correlated");
        assert_eq!(s.outstanding(), 0);
    }

    #[test]
    fn test_concurrent_same_subject_first_match_consumed_once() {
        // Two outstanding requests with the same subject: each
        // notification consumes exactly one.
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, true)]);
        s.fleet_mut()
            .get_mut(VesselId(1))
            .unwrap()
            .container_mut(PartId(1))
            .unwrap()
            .data
            .push(
                SciencePayload::new(SUBJECT, "Gravity Scan", 12.0, PartId(1))
                    .with_transmit_value(0.5),
            );
        s.begin_transfer(request(0.0)).unwrap();
        s.begin_transfer(request(0.0)).unwrap();
        assert_eq!(s.outstanding(), 2);
        s.on_transmission_result(&SubjectId::from(SUBJECT), VesselId(1), false)
            .unwrap();
        assert_eq!(s.outstanding(), 1);
        s.on_transmission_result(&SubjectId::from(SUBJECT), VesselId(1), false)
            .unwrap();
        assert_eq!(s.outstanding(), 0);
    }

    #[test]
    fn test_transmit_warning_gated_by_settings() {
        let s = session(vec![]);
        let mut payload = SciencePayload::new(SUBJECT, "Gravity Scan", 20.0, PartId(1));
        payload.transmit_warning = true;
        assert!(
            !s.needs_transmit_warning(&payload),
            "warnings disabled by default"
        );

        let warned = RelaySession::new(
            StaticNet::new(),
            StaticRadios::new(),
            RelaySettings {
                show_transmit_warning: true,
                ..RelaySettings::default()
            },
            s.fleet().clone(),
        );
        assert!(warned.needs_transmit_warning(&payload));
        payload.transmit_warning = false;
        assert!(!warned.needs_transmit_warning(&payload));
    }

    #[test]
    fn test_missing_payload_error() {
        let mut s = session(vec![ScienceContainer::new(PartId(9), 0, false)]);
        let mut req = request(0.0);
        req.subject = SubjectId::from("nothing@here");
        assert!(matches!(
            s.begin_transfer(req),
            Err(RelayError::PayloadMissing { .. })
        ));
        assert_eq!(s.outstanding(), 0);
    }

    #[test]
    fn test_unknown_origin_error() {
        let mut s = session(vec![]);
        let mut req = request(0.0);
        req.origin = VesselId(77);
        assert!(matches!(
            s.begin_transfer(req),
            Err(RelayError::UnknownVessel(_))
        ));
    }
}
