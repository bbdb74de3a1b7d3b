//! CommRelay Headless Relay Harness
//!
//! Validates connectivity, boost, and transfer logic without a host
//! environment. Runs entirely in-process — no game engine, no networking.
//!
//! Usage:
//!   cargo run -p commrelay-simtest
//!   cargo run -p commrelay-simtest -- --verbose

use std::collections::HashMap;

use commrelay_core::error::OcclusionError;
use commrelay_core::path::{CommLink, CommPath};
use commrelay_core::prelude::*;
use commrelay_core::snapshot::{
    ModuleSnapshot, PartSnapshot, SnapshotError, VesselSnapshot, SNAPSHOT_VERSION,
};
use commrelay_core::vessel::{AntennaSpec, CurveId, OccluderId, TransmitterId};
use commrelay_logic::boost::boost_factor;
use commrelay_logic::geometry::Vec3;
use commrelay_logic::policy::{Preset, RelaySettings};
use commrelay_logic::reachability::ReachabilityMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// ── Relay scenario (a small Mun network) ────────────────────────────────
const SCENARIO_JSON: &str = include_str!("../../../data/relay_scenario.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    vessels: Vec<VesselSpec>,
    paths: Vec<PathSpec>,
    subjects: Vec<SubjectSpec>,
}

#[derive(Debug, Deserialize)]
struct VesselSpec {
    id: u64,
    name: String,
    kind: VesselKind,
    node: NodeSpec,
    containers: Vec<ContainerSpec>,
    labs: Vec<LabSpec>,
    payloads: Vec<PayloadSpec>,
    transmitter: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct NodeSpec {
    node_id: u64,
    position: Vec3,
    relay_power: f64,
    transmit_power: f64,
}

#[derive(Debug, Deserialize)]
struct ContainerSpec {
    part: u32,
    capacity: u32,
    allow_repeated: bool,
}

#[derive(Debug, Deserialize)]
struct LabSpec {
    part: u32,
    crew_required: u32,
    crew_present: u32,
}

#[derive(Debug, Deserialize)]
struct PayloadSpec {
    container: u32,
    subject: String,
    title: String,
    amount: f64,
    transmit_value: f64,
}

#[derive(Debug, Deserialize)]
struct PathSpec {
    origin: u64,
    destination: u64,
    links: Vec<LinkSpec>,
    signal_strength: f64,
}

#[derive(Debug, Deserialize)]
struct LinkSpec {
    a: u64,
    b: u64,
    strength: f64,
}

#[derive(Debug, Deserialize)]
struct SubjectSpec {
    id: String,
    base_value: f64,
}

// ── Provider stubs ──────────────────────────────────────────────────────

/// Table-backed comm network with identity curves and clear skies.
#[derive(Default)]
struct ScenarioNet {
    paths: HashMap<(NodeId, NodeId), CommPath>,
    subjects: HashMap<SubjectId, f64>,
}

impl CommProvider for ScenarioNet {
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

    fn evaluate_curve(&self, _curve: CurveId, x: f64) -> f64 {
        x
    }

    fn test_occlusion(
        &self,
        _a: Vec3,
        _occluder_a: OccluderId,
        _b: Vec3,
        _occluder_b: OccluderId,
        _distance: f64,
    ) -> Result<bool, OcclusionError> {
        Ok(true)
    }

    fn science_value(&self, _amount: f64, subject: &SubjectId, efficiency: f64) -> Option<f64> {
        self.subjects.get(subject).map(|base| base * efficiency)
    }
}

/// Fire-and-forget radio stub; completion is driven manually.
#[derive(Default)]
struct ScenarioRadios {
    transmitters: HashMap<VesselId, TransmitterId>,
}

impl TransmissionQueue for ScenarioRadios {
    fn best_transmitter(&self, vessel: &Vessel) -> Option<TransmitterId> {
        self.transmitters.get(&vessel.id).copied()
    }

    fn transmit(&mut self, _transmitter: TransmitterId, _payload: &SciencePayload) {}
}

// ── Scenario → session ──────────────────────────────────────────────────

fn build_vessel(spec: &VesselSpec) -> Vessel {
    let mut v = Vessel::new(VesselId(spec.id), &spec.name, spec.kind);
    v.node = Some(CommNode {
        id: NodeId(spec.node.node_id),
        position: spec.node.position,
        occluder: OccluderId(spec.node.node_id as u32),
        relay: AntennaSpec::new(spec.node.relay_power, CurveId(1)),
        transmit: AntennaSpec::new(spec.node.transmit_power, CurveId(1)),
        is_home: false,
        science_curve: CurveId(2),
    });
    for c in &spec.containers {
        v.containers
            .push(ScienceContainer::new(PartId(c.part), c.capacity, c.allow_repeated));
    }
    for l in &spec.labs {
        v.labs.push(ScienceLab {
            part: PartId(l.part),
            crew_required: l.crew_required,
            crew_present: l.crew_present,
        });
    }
    for p in &spec.payloads {
        if let Some(container) = v.container_mut(PartId(p.container)) {
            container.data.push(
                SciencePayload::new(p.subject.as_str(), &p.title, p.amount, PartId(p.container))
                    .with_transmit_value(p.transmit_value),
            );
        }
    }
    v
}

fn build_session(
    scenario: &Scenario,
    settings: RelaySettings,
) -> RelaySession<ScenarioNet, ScenarioRadios> {
    let mut net = ScenarioNet::default();
    for p in &scenario.paths {
        let links = p
            .links
            .iter()
            .map(|l| CommLink::new(NodeId(l.a), NodeId(l.b), l.strength))
            .collect();
        net.paths.insert(
            (NodeId(p.origin), NodeId(p.destination)),
            CommPath::new(links, p.signal_strength),
        );
    }
    for s in &scenario.subjects {
        net.subjects
            .insert(SubjectId::from(s.id.as_str()), s.base_value);
    }

    let mut radios = ScenarioRadios::default();
    let mut fleet = Fleet::new();
    for spec in &scenario.vessels {
        if let Some(t) = spec.transmitter {
            radios
                .transmitters
                .insert(VesselId(spec.id), TransmitterId(t));
        }
        fleet.insert(build_vessel(spec));
    }

    RelaySession::new(net, radios, settings, fleet)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== CommRelay Relay Harness ===\n");

    let mut results = Vec::new();

    let scenario: Scenario = match serde_json::from_str(SCENARIO_JSON) {
        Ok(s) => s,
        Err(e) => {
            println!("✗ scenario_parse: JSON parse error: {}", e);
            std::process::exit(1);
        }
    };

    // 1. Scenario sanity
    results.extend(validate_scenario(&scenario));

    // 2. Discovery and connection strength
    results.extend(validate_connectivity(&scenario));

    // 3. Boost ceiling math and presets
    results.extend(validate_boost(&scenario));

    // 4. Transfer lifecycle: dispatch, complete, revert, abort
    results.extend(validate_transfers(&scenario));

    // 5. Snapshot persistence and unloaded delivery
    results.extend(validate_snapshots(&scenario));

    // 6. Randomized sweeps
    results.extend(validate_random_sweeps());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Scenario sanity ──────────────────────────────────────────────────

fn validate_scenario(scenario: &Scenario) -> Vec<TestResult> {
    println!("--- Scenario ---");
    let mut results = Vec::new();

    results.push(check(
        "scenario_vessels",
        scenario.vessels.len() == 5,
        format!("{} vessels loaded", scenario.vessels.len()),
    ));

    let mut node_ids: Vec<_> = scenario.vessels.iter().map(|v| v.node.node_id).collect();
    node_ids.sort_unstable();
    node_ids.dedup();
    results.push(check(
        "scenario_unique_nodes",
        node_ids.len() == scenario.vessels.len(),
        format!("{} distinct comm nodes", node_ids.len()),
    ));

    let origin = scenario.vessels.iter().find(|v| v.id == 1);
    results.push(check(
        "scenario_origin_has_science",
        origin.map_or(false, |v| !v.payloads.is_empty() && v.transmitter.is_some()),
        "origin carries payloads and a transmitter".into(),
    ));

    let priced = scenario.vessels.iter().all(|v| {
        v.payloads
            .iter()
            .all(|p| scenario.subjects.iter().any(|s| s.id == p.subject))
    });
    results.push(check(
        "scenario_subjects_priced",
        priced,
        "every stored payload has a value entry".into(),
    ));

    results
}

// ── 2. Discovery and connection strength ────────────────────────────────

fn validate_connectivity(scenario: &Scenario) -> Vec<TestResult> {
    println!("--- Connectivity ---");
    let mut results = Vec::new();

    let session = build_session(scenario, RelaySettings::default());
    let reachable = session.list_reachable(VesselId(1));

    // Relay via its 0.8 path; lander through the relay corridor:
    // (1 - 1000/sqrt(250000 * 10000)) * 0.8 = 0.784.
    results.push(check(
        "discovery_reachable_set",
        reachable.len() == 2
            && reachable[0].0 == VesselId(2)
            && reachable[1].0 == VesselId(3),
        format!("reachable: {:?}", reachable),
    ));
    let relay_ok = reachable
        .iter()
        .any(|(id, s)| *id == VesselId(2) && (s - 1.8).abs() < 1e-9);
    let lander_ok = reachable
        .iter()
        .any(|(id, s)| *id == VesselId(3) && (s - 1.784).abs() < 1e-9);
    results.push(check(
        "discovery_strengths",
        relay_ok && lander_ok,
        "relay at 1.8, lander at 1.784 via corridor".into(),
    ));

    results.push(check(
        "discovery_excludes",
        !reachable
            .iter()
            .any(|(id, _)| *id == VesselId(4) || *id == VesselId(5)),
        "out-of-range station and debris not listed".into(),
    ));

    let sorted = reachable.windows(2).all(|w| w[0].1 >= w[1].1);
    results.push(check(
        "discovery_sorted",
        sorted,
        "strongest connection first".into(),
    ));

    // The path to the station stops short of it; validation must reject it.
    let station = session.connection_strength(VesselId(1), VesselId(4));
    results.push(check(
        "strength_rejects_partial_path",
        station == 0.0,
        format!("station strength {}", station),
    ));
    let relay = session.connection_strength(VesselId(1), VesselId(2));
    results.push(check(
        "strength_valid_path",
        (relay - 1.8).abs() < 1e-9,
        format!("relay strength {}", relay),
    ));

    // Network switched off: flat scan at strength zero, labs still gate.
    let disabled = build_session(
        scenario,
        RelaySettings {
            network_enabled: false,
            ..RelaySettings::default()
        },
    );
    let flat = disabled.list_reachable(VesselId(1));
    results.push(check(
        "disabled_network_flat_scan",
        flat.len() == 3 && flat.iter().all(|(_, s)| *s == 0.0),
        format!("{} vessels at strength 0", flat.len()),
    ));

    // Relay-hop policy: the origin may not act as its own relay, so the
    // lander's only corridor is still the relay satellite.
    let hop = build_session(
        scenario,
        RelaySettings {
            require_relay_hop: true,
            ..RelaySettings::default()
        },
    );
    let hop_reachable = hop.list_reachable(VesselId(1));
    results.push(check(
        "relay_hop_policy",
        hop_reachable.len() == 2,
        format!("reachable with hop required: {:?}", hop_reachable),
    ));

    results
}

// ── 3. Boost ceiling math ───────────────────────────────────────────────

fn validate_boost(scenario: &Scenario) -> Vec<TestResult> {
    println!("--- Boost ---");
    let mut results = Vec::new();

    // Worked scenario: strength 2, full 10, sent 5, penalty 0.5 → 0.5.
    let worked = boost_factor(2.0, 10.0, 5.0, 0.5);
    results.push(check(
        "boost_worked_scenario",
        (worked - 0.5).abs() < 1e-12,
        format!("factor {}", worked),
    ));

    // The ceiling holds across a strength sweep.
    let ceiling = (0..100).all(|i| {
        let raw = 0.1 + i as f64 * 0.5;
        boost_factor(raw, 10.0, 5.0, 0.0) <= 1.0 + 1e-12
    });
    results.push(check(
        "boost_ceiling_sweep",
        ceiling,
        "factor never exceeds full/sent - 1".into(),
    ));

    // Harder presets always withhold more of the boost.
    let presets = [Preset::Easy, Preset::Normal, Preset::Moderate, Preset::Hard];
    let factors: Vec<f64> = presets
        .iter()
        .map(|p| boost_factor(1.8, 10.0, 5.0, RelaySettings::preset(*p).penalty()))
        .collect();
    let monotonic = factors.windows(2).all(|w| w[0] >= w[1]);
    results.push(check(
        "boost_preset_monotonic",
        monotonic,
        format!("factors by preset: {:?}", factors),
    ));

    // Through the session: relay connection at 1.8 prices the gravity scan.
    let session = build_session(scenario, RelaySettings::default());
    let payload = session
        .fleet()
        .get(VesselId(1))
        .and_then(|v| v.container(PartId(1)))
        .map(|c| c.data[0].clone());
    let boost = payload.as_ref().map_or(-1.0, |p| {
        session.compute_boost(1.8, VesselId(2), p, p.transmit_value)
    });
    results.push(check(
        "boost_session_pricing",
        (boost - 0.4).abs() < 1e-9,
        format!("session boost {}", boost),
    ));

    // Crewed-lab gate: vessel 3's one-man lab passes, an empty target fails.
    let strict = build_session(
        scenario,
        RelaySettings {
            require_crewed_lab_for_boost: true,
            ..RelaySettings::default()
        },
    );
    let gated = payload.as_ref().map_or(-1.0, |p| {
        strict.compute_boost(1.8, VesselId(3), p, p.transmit_value)
    });
    let ungated = payload.as_ref().map_or(-1.0, |p| {
        strict.compute_boost(1.8, VesselId(1), p, p.transmit_value)
    });
    results.push(check(
        "boost_crewed_lab_gate",
        gated > 0.0 && ungated == 0.0,
        format!("staffed lab {}, no lab {}", gated, ungated),
    ));

    results
}

// ── 4. Transfer lifecycle ───────────────────────────────────────────────

fn validate_transfers(scenario: &Scenario) -> Vec<TestResult> {
    println!("--- Transfers ---");
    let mut results = Vec::new();
    let grav = SubjectId::from("gravScan@Mun");
    let temp = SubjectId::from("tempScan@Mun");

    // Dispatch-and-complete: 20 * 0.5 * (1 + 0.4) = 14.
    let mut session = build_session(scenario, RelaySettings::default());
    let dispatched = session.begin_transfer(TransferRequest {
        origin: VesselId(1),
        target: VesselId(2),
        container: PartId(1),
        subject: grav.clone(),
        boost: 0.4,
    });
    results.push(check(
        "transfer_dispatch",
        dispatched.is_ok() && session.outstanding() == 1,
        format!("{:?}", dispatched),
    ));
    let outcome = session.on_transmission_result(&grav, VesselId(1), false);
    let completed_amount = match &outcome {
        Some(TransferOutcome::Completed { amount, .. }) => *amount,
        _ => f64::NAN,
    };
    results.push(check(
        "transfer_complete_scaling",
        (completed_amount - 14.0).abs() < 1e-9,
        format!("delivered {}", completed_amount),
    ));

    // Revert: the lander already holds the temperature scan.
    let mut session = build_session(scenario, RelaySettings::default());
    if let Some(c) = session
        .fleet_mut()
        .get_mut(VesselId(3))
        .and_then(|v| v.container_mut(PartId(3)))
    {
        c.data.push(SciencePayload::new(
            "tempScan@Mun",
            "Temperature Scan",
            4.0,
            PartId(3),
        ));
    }
    let _ = session.begin_transfer(TransferRequest {
        origin: VesselId(1),
        target: VesselId(3),
        container: PartId(1),
        subject: temp.clone(),
        boost: 0.0,
    });
    let outcome = session.on_transmission_result(&temp, VesselId(1), false);
    let reverted = matches!(
        outcome,
        Some(TransferOutcome::Reverted { returned: true, .. })
    );
    let restored = session
        .fleet()
        .get(VesselId(1))
        .and_then(|v| v.container(PartId(1)))
        .map_or(false, |c| {
            c.data
                .iter()
                .any(|p| p.subject == temp && !p.in_flight && p.amount == 8.0)
        });
    results.push(check(
        "transfer_revert_restores",
        reverted && restored,
        format!("reverted: {}, payload restored: {}", reverted, restored),
    ));

    // Abort leaves the request queued; the retry completes it.
    let mut session = build_session(scenario, RelaySettings::default());
    let _ = session.begin_transfer(TransferRequest {
        origin: VesselId(1),
        target: VesselId(2),
        container: PartId(1),
        subject: grav.clone(),
        boost: 0.0,
    });
    let aborted = session.on_transmission_result(&grav, VesselId(1), true);
    let still_queued = matches!(aborted, Some(TransferOutcome::AbortedPending { .. }))
        && session.outstanding() == 1;
    let retried = session.on_transmission_result(&grav, VesselId(1), false);
    results.push(check(
        "transfer_abort_then_retry",
        still_queued && matches!(retried, Some(TransferOutcome::Completed { .. })),
        format!("queued after abort: {}", still_queued),
    ));

    // Transfer-all expands to one request per open page.
    let mut session = build_session(scenario, RelaySettings::default());
    let pages = vec![
        OpenPage {
            container: PartId(1),
            subject: grav.clone(),
        },
        OpenPage {
            container: PartId(1),
            subject: temp.clone(),
        },
    ];
    let tokens = session.transfer_all(VesselId(1), VesselId(2), 1.8, &pages);
    let all_dispatched = tokens.iter().all(Result::is_ok) && session.outstanding() == 2;
    let _ = session.on_transmission_result(&grav, VesselId(1), false);
    let _ = session.on_transmission_result(&temp, VesselId(1), false);
    let stored = session
        .fleet()
        .get(VesselId(2))
        .and_then(|v| v.container(PartId(2)))
        .map_or(0, |c| c.data.len());
    results.push(check(
        "transfer_all_pages",
        all_dispatched && stored == 2,
        format!("{} payloads stored on relay", stored),
    ));

    // A vessel with no radio can never dispatch.
    let mut session = build_session(scenario, RelaySettings::default());
    let no_radio = session.begin_transfer(TransferRequest {
        origin: VesselId(2),
        target: VesselId(1),
        container: PartId(2),
        subject: grav.clone(),
        boost: 0.0,
    });
    results.push(check(
        "transfer_requires_transmitter",
        matches!(no_radio, Err(RelayError::NoTransmitter(VesselId(2)))),
        format!("{:?}", no_radio),
    ));

    results
}

// ── 5. Snapshot persistence ─────────────────────────────────────────────

fn validate_snapshots(scenario: &Scenario) -> Vec<TestResult> {
    println!("--- Snapshots ---");
    let mut results = Vec::new();

    let snapshot = VesselSnapshot {
        parts: vec![PartSnapshot {
            part: PartId(60),
            crew: 1,
            modules: vec![ModuleSnapshot::storage(0, false), ModuleSnapshot::lab(1)],
        }],
    };

    let mut buf = Vec::new();
    let round_trip = snapshot.save(&mut buf).is_ok()
        && VesselSnapshot::load(&mut buf.as_slice()).map_or(false, |s| s == snapshot);
    results.push(check(
        "snapshot_round_trip",
        round_trip,
        format!("{} bytes", buf.len()),
    ));

    let mut stale = Vec::new();
    let version_ok = bincode::serialize_into(&mut stale, &(SNAPSHOT_VERSION + 1)).is_ok()
        && bincode::serialize_into(&mut stale, &VesselSnapshot::default()).is_ok()
        && matches!(
            VesselSnapshot::load(&mut stale.as_slice()),
            Err(SnapshotError::Version(_))
        );
    results.push(check(
        "snapshot_version_gate",
        version_ok,
        "future version rejected".into(),
    ));

    // Delivery to an unloaded vessel appends a stamped record.
    let mut session = build_session(scenario, RelaySettings::default());
    let mut frozen = Vessel::new(VesselId(6), "Mothball Station", VesselKind::Station);
    frozen.loaded = false;
    frozen.snapshot = Some(snapshot);
    session.fleet_mut().insert(frozen);

    let grav = SubjectId::from("gravScan@Mun");
    let _ = session.begin_transfer(TransferRequest {
        origin: VesselId(1),
        target: VesselId(6),
        container: PartId(1),
        subject: grav.clone(),
        boost: 0.0,
    });
    let outcome = session.on_transmission_result(&grav, VesselId(1), false);
    let recorded = session
        .fleet()
        .get(VesselId(6))
        .and_then(|v| v.snapshot.as_ref())
        .map_or(false, |s| {
            s.parts[0].modules[0]
                .records
                .iter()
                .any(|r| r.subject == grav && (r.amount - 10.0).abs() < 1e-9)
        });
    results.push(check(
        "snapshot_unloaded_delivery",
        matches!(outcome, Some(TransferOutcome::Completed { .. })) && recorded,
        format!("record appended: {}", recorded),
    ));

    results
}

// ── 6. Randomized sweeps ────────────────────────────────────────────────

fn validate_random_sweeps() -> Vec<TestResult> {
    println!("--- Random Sweeps ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(42);

    // Reachability records stay monotonic under arbitrary update orders.
    let mut map: ReachabilityMap<u32> = ReachabilityMap::new();
    let mut expected: HashMap<u32, f64> = HashMap::new();
    for _ in 0..2_000 {
        let key = rng.gen_range(0..10u32);
        let strength = rng.gen_range(0.0..1.0);
        map.upsert_max(key, strength);
        let best = expected.entry(key).or_insert(strength);
        if strength > *best {
            *best = strength;
        }
    }
    let monotonic = expected
        .iter()
        .all(|(k, v)| map.get(k).map_or(false, |s| (s - v).abs() < 1e-15));
    results.push(check(
        "sweep_reachability_monotonic",
        monotonic,
        format!("{} keys tracked", map.len()),
    ));

    // Random probe field around one transmitter: a probe is listed exactly
    // when it sits inside direct range, and always at strength above 1.
    let mut fleet = Fleet::new();
    let mut origin = Vessel::new(VesselId(1), "Surveyor", VesselKind::Ship);
    origin.node = Some(CommNode {
        id: NodeId(1),
        position: Vec3::ZERO,
        occluder: OccluderId(1),
        relay: AntennaSpec::none(),
        transmit: AntennaSpec::new(10_000.0, CurveId(1)),
        is_home: false,
        science_curve: CurveId(2),
    });
    fleet.insert(origin);

    let mut in_range = Vec::new();
    for i in 0..40u64 {
        let position = Vec3::new(
            rng.gen_range(-15_000.0..15_000.0),
            rng.gen_range(-15_000.0..15_000.0),
            rng.gen_range(-15_000.0..15_000.0),
        );
        if position.length() < 10_000.0 {
            in_range.push(VesselId(2 + i));
        }
        let mut probe = Vessel::new(VesselId(2 + i), "Probe", VesselKind::Probe);
        probe.node = Some(CommNode {
            id: NodeId(2 + i),
            position,
            occluder: OccluderId(2 + i as u32),
            relay: AntennaSpec::none(),
            transmit: AntennaSpec::new(10_000.0, CurveId(1)),
            is_home: false,
            science_curve: CurveId(2),
        });
        probe
            .containers
            .push(ScienceContainer::new(PartId(1), 0, false));
        fleet.insert(probe);
    }

    let session = RelaySession::new(
        ScenarioNet::default(),
        ScenarioRadios::default(),
        RelaySettings {
            require_lab: false,
            ..RelaySettings::default()
        },
        fleet,
    );
    let reachable = session.list_reachable(VesselId(1));

    let mut listed: Vec<_> = reachable.iter().map(|(id, _)| *id).collect();
    listed.sort_unstable();
    in_range.sort_unstable();
    results.push(check(
        "sweep_range_boundary",
        listed == in_range,
        format!("{} of 40 probes in range", in_range.len()),
    ));
    results.push(check(
        "sweep_strengths_above_one",
        reachable.iter().all(|(_, s)| *s > 1.0),
        "every credited strength beats the +1 floor".into(),
    ));

    results
}
