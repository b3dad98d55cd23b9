//! Outbreak Headless Validation Harness
//!
//! Runs the infection rules, queue policies, and scenario tapes entirely
//! in-process. No device, no display, no networking.
//!
//! Usage:
//!   cargo run -p outbreak-simtest
//!   cargo run -p outbreak-simtest -- --verbose
//!
//! Set RUST_LOG=debug to surface the engine's per-tick logs while the
//! scenario tapes run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use outbreak_core::prelude::*;
use outbreak_logic::bands::{self, band_bounds};
use outbreak_logic::progression::{exposure_update, treatment_update};

// ── Scenario tapes (shared JSON under data/) ────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

/// One queued event row in a tape. A row with neither `treatment` nor any
/// counts is an idle report (zero exposure); `repeat` expands the row.
#[derive(Debug, Deserialize)]
struct EventSpec {
    #[serde(default)]
    humans: u32,
    #[serde(default)]
    cats: u32,
    #[serde(default)]
    treatment: bool,
    #[serde(default = "default_repeat")]
    repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

impl EventSpec {
    fn to_event(&self) -> Event {
        if self.treatment {
            Event::Treatment
        } else {
            Event::exposure(self.humans, self.cats)
        }
    }
}

#[derive(Debug, Deserialize)]
struct Expected {
    tick: u64,
    #[serde(default)]
    magnitude: Option<u32>,
    #[serde(default)]
    band: Option<Band>,
    #[serde(default)]
    cat_resistant: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    #[serde(default)]
    notes: String,
    ticks: Vec<Vec<EventSpec>>,
    expect: Expected,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Outbreak Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Band classification
    results.extend(validate_bands(verbose));

    // 2. Exposure progression rules
    results.extend(validate_progression(verbose));

    // 3. Treatment rules
    results.extend(validate_treatment(verbose));

    // 4. Event queue policies
    results.extend(validate_queue(verbose));

    // 5. Scenario tapes
    results.extend(validate_scenarios(verbose));

    // 6. Determinism
    results.extend(validate_determinism(verbose));

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

// ── 1. Band Classification ──────────────────────────────────────────────

fn validate_bands(verbose: bool) -> Vec<TestResult> {
    println!("--- Band Classification ---");
    let mut results = Vec::new();

    // Spot checks on every boundary magnitude
    let table: [(u32, Band); 14] = [
        (0, Band::Immune),
        (1, Band::Immune),
        (2, Band::SuperHealthy),
        (9, Band::SuperHealthy),
        (10, Band::Healthy),
        (39, Band::Healthy),
        (40, Band::InfectedAsymptomatic),
        (69, Band::InfectedAsymptomatic),
        (70, Band::InfectedSymptomatic),
        (89, Band::InfectedSymptomatic),
        (90, Band::InfectedSymptomaticLate),
        (98, Band::InfectedSymptomaticLate),
        (99, Band::Zombie),
        (u32::MAX, Band::Zombie),
    ];
    let bad: Vec<_> = table
        .iter()
        .filter(|(m, expected)| Band::from_magnitude(*m) != *expected)
        .collect();
    results.push(TestResult {
        name: "bands_boundary_table".into(),
        passed: bad.is_empty(),
        detail: if bad.is_empty() {
            format!("{} boundary magnitudes classified", table.len())
        } else {
            format!("{} misclassified: {:?}", bad.len(), bad)
        },
    });

    // Every magnitude satisfies exactly one band predicate
    let mut exclusive = true;
    for m in 0..=150u32 {
        let hits = [
            bands::is_immune(m),
            bands::is_super_healthy(m),
            bands::is_healthy(m),
            bands::is_infected_asymptomatic(m),
            bands::is_infected_symptomatic(m),
            bands::is_infected_symptomatic_late(m),
            bands::is_zombie(m),
        ]
        .iter()
        .filter(|&&h| h)
        .count();
        if hits != 1 {
            exclusive = false;
        }
    }
    results.push(TestResult {
        name: "bands_exclusive_sweep".into(),
        passed: exclusive,
        detail: "0..=150: exactly one predicate per magnitude".into(),
    });

    // The infected window spans the three sub-bands and nothing else
    let window_ok = !bands::is_infected(39)
        && bands::is_infected(40)
        && bands::is_infected(98)
        && !bands::is_infected(99);
    results.push(TestResult {
        name: "bands_infected_window".into(),
        passed: window_ok,
        detail: "is_infected covers 40..99 exactly".into(),
    });

    // Severity ordering is total
    let ordered = Band::ALL.windows(2).all(|pair| pair[0] < pair[1]);
    results.push(TestResult {
        name: "bands_severity_order".into(),
        passed: ordered && Band::ALL.len() == 7,
        detail: "7 bands strictly ordered Immune < .. < Zombie".into(),
    });

    if verbose {
        println!("  Band spans:");
        for band in Band::ALL {
            let members: Vec<u32> = (0..=120u32)
                .filter(|&m| Band::from_magnitude(m) == band)
                .collect();
            match (members.first(), members.last()) {
                (Some(first), Some(last)) => {
                    println!("    {:24?}: {}..={}", band, first, last)
                }
                _ => println!("    {:24?}: (none below 120)", band),
            }
        }
    }

    results
}

// ── 2. Exposure Progression ─────────────────────────────────────────────

fn validate_progression(_verbose: bool) -> Vec<TestResult> {
    println!("--- Exposure Progression ---");
    let mut results = Vec::new();

    // Boot state
    let boot = HealthState::default();
    results.push(TestResult {
        name: "progression_boot_state".into(),
        passed: boot.magnitude == 2 && !boot.cat_resistant && boot.band() == Band::SuperHealthy,
        detail: format!("boot at magnitude {} ({:?})", boot.magnitude, boot.band()),
    });

    // SuperHealthy drift climbs in twos and parks on the Healthy boundary
    let mut state = HealthState::default();
    let mut trail = vec![state.magnitude];
    for _ in 0..6 {
        state = exposure_update(state, Exposure::default());
        trail.push(state.magnitude);
    }
    results.push(TestResult {
        name: "progression_drift_parks".into(),
        passed: trail == vec![2, 4, 6, 8, 10, 10, 10],
        detail: format!("idle drift trail {:?}", trail),
    });

    // Healthy recovery steps down and floors one above the boundary
    let mut state = HealthState::new(20, false);
    for _ in 0..15 {
        state = exposure_update(state, Exposure::default());
    }
    results.push(TestResult {
        name: "progression_recovery_floor".into(),
        passed: state.magnitude == 11,
        detail: format!("20 idles down to {}", state.magnitude),
    });

    // Per-source pressure rates
    let human = exposure_update(HealthState::new(10, false), Exposure::new(1, 0));
    let cat = exposure_update(HealthState::new(10, false), Exposure::new(0, 1));
    let crowd = exposure_update(HealthState::default(), Exposure::new(3, 1));
    let rates_ok = human.magnitude == 13 && cat.magnitude == 18 && crowd.magnitude == 21;
    results.push(TestResult {
        name: "progression_pressure_rates".into(),
        passed: rates_ok,
        detail: format!(
            "human 10→{}, cat 10→{}, fresh crowd 2→{}",
            human.magnitude, cat.magnitude, crowd.magnitude
        ),
    });

    // Earned resistance removes the cat term
    let resistant = exposure_update(HealthState::new(20, true), Exposure::new(0, 2));
    results.push(TestResult {
        name: "progression_resistant_ignores_cats".into(),
        passed: resistant.magnitude == 19,
        detail: format!("resistant at 20 with 2 cats → {}", resistant.magnitude),
    });

    // Infected players take no further pressure, only the flat step
    let infected = exposure_update(HealthState::new(40, false), Exposure::new(10, 10));
    results.push(TestResult {
        name: "progression_infected_ignores_pressure".into(),
        passed: infected.magnitude == 41,
        detail: format!("infected at 40 under heavy crowd → {}", infected.magnitude),
    });

    // Crossing into the infected range sets the latch
    let crossed = exposure_update(HealthState::new(39, false), Exposure::new(1, 0));
    results.push(TestResult {
        name: "progression_latch_on_entry".into(),
        passed: crossed.magnitude == 41 && crossed.cat_resistant,
        detail: format!(
            "39 + one human → {} (resistant: {})",
            crossed.magnitude, crossed.cat_resistant
        ),
    });

    // Jumping clean over the infected range skips the latch
    let jumped = exposure_update(HealthState::new(39, false), Exposure::new(30, 0));
    results.push(TestResult {
        name: "progression_overshoot_skips_latch".into(),
        passed: jumped.magnitude == band_bounds::ZOMBIE && !jumped.cat_resistant,
        detail: format!(
            "39 + thirty humans → {} (resistant: {})",
            jumped.magnitude, jumped.cat_resistant
        ),
    });

    // Absorbing ends: Immune and Zombie normalize and never move
    let immune = exposure_update(HealthState::new(0, false), Exposure::new(9, 9));
    let zombie = exposure_update(HealthState::new(150, true), Exposure::default());
    let entry = exposure_update(HealthState::new(98, true), Exposure::default());
    let absorbing_ok = immune.magnitude == band_bounds::IMMUNE
        && zombie.magnitude == band_bounds::ZOMBIE
        && entry.magnitude == band_bounds::ZOMBIE;
    results.push(TestResult {
        name: "progression_absorbing_ends".into(),
        passed: absorbing_ok,
        detail: format!(
            "0→{} under crowd, 150→{}, 98 idles into {}",
            immune.magnitude, zombie.magnitude, entry.magnitude
        ),
    });

    results
}

// ── 3. Treatment Rules ──────────────────────────────────────────────────

fn validate_treatment(_verbose: bool) -> Vec<TestResult> {
    println!("--- Treatment Rules ---");
    let mut results = Vec::new();

    // Jump table across the treatable bands
    let jumps: [(u32, u32); 9] = [
        (95, 1),
        (90, 1),
        (75, 10),
        (70, 10),
        (69, 34),
        (45, 10),
        (40, 5),
        (25, 2),
        (10, 2),
    ];
    let bad: Vec<_> = jumps
        .iter()
        .filter(|(from, to)| treatment_update(HealthState::new(*from, false)).magnitude != *to)
        .collect();
    results.push(TestResult {
        name: "treatment_jump_table".into(),
        passed: bad.is_empty(),
        detail: if bad.is_empty() {
            format!("{} band jumps verified", jumps.len())
        } else {
            format!("{} jumps off: {:?}", bad.len(), bad)
        },
    });

    // Immune, SuperHealthy, and Zombie pass through untouched
    let untouched = [0u32, 1, 2, 9, 99, 120]
        .iter()
        .all(|&m| treatment_update(HealthState::new(m, false)).magnitude == m);
    results.push(TestResult {
        name: "treatment_untreatable_unchanged".into(),
        passed: untouched,
        detail: "magnitudes 0,1,2,9,99,120 unchanged".into(),
    });

    // The asymptomatic drop is a raw step, so the landing band varies
    let early = treatment_update(HealthState::new(40, false));
    let late = treatment_update(HealthState::new(69, false));
    results.push(TestResult {
        name: "treatment_asymptomatic_raw_step".into(),
        passed: early.band() == Band::SuperHealthy && late.band() == Band::Healthy,
        detail: format!(
            "40 → {} ({:?}), 69 → {} ({:?})",
            early.magnitude,
            early.band(),
            late.magnitude,
            late.band()
        ),
    });

    // Treatment never touches the cat-resistance latch
    let kept = treatment_update(HealthState::new(75, true));
    results.push(TestResult {
        name: "treatment_preserves_latch".into(),
        passed: kept.cat_resistant && kept.magnitude == 10,
        detail: "resistance survives the jump".into(),
    });

    results
}

// ── 4. Event Queue Policies ─────────────────────────────────────────────

fn validate_queue(_verbose: bool) -> Vec<TestResult> {
    println!("--- Event Queue ---");
    let mut results = Vec::new();

    // Checked policy reports overflow and keeps contents intact
    let mut queue = EventQueue::checked(2);
    let first = queue.enqueue(Event::exposure(1, 0));
    let second = queue.enqueue(Event::exposure(2, 0));
    let third = queue.enqueue(Event::exposure(3, 0));
    let overflow_ok = first.is_ok()
        && second.is_ok()
        && third == Err(QueueError::CapacityExceeded { capacity: 2 })
        && queue.dequeue() == Ok(Event::exposure(1, 0))
        && queue.dequeue() == Ok(Event::exposure(2, 0));
    results.push(TestResult {
        name: "queue_checked_overflow".into(),
        passed: overflow_ok,
        detail: "third enqueue rejected, first two intact".into(),
    });

    // Checked policy reports underflow
    let mut queue = EventQueue::checked(2);
    results.push(TestResult {
        name: "queue_checked_underflow".into(),
        passed: queue.dequeue() == Err(QueueError::Empty),
        detail: "dequeue on empty rejected".into(),
    });

    // FIFO order holds across the physical wrap point
    let mut queue = EventQueue::checked(3);
    let mut order_ok = true;
    queue.enqueue(Event::exposure(1, 0)).unwrap();
    queue.enqueue(Event::exposure(2, 0)).unwrap();
    order_ok &= queue.dequeue() == Ok(Event::exposure(1, 0));
    queue.enqueue(Event::exposure(3, 0)).unwrap();
    queue.enqueue(Event::exposure(4, 0)).unwrap();
    for expected in 2..=4u32 {
        order_ok &= queue.dequeue() == Ok(Event::exposure(expected, 0));
    }
    results.push(TestResult {
        name: "queue_fifo_across_wrap".into(),
        passed: order_ok && queue.is_empty(),
        detail: "4 events through a capacity-3 ring in order".into(),
    });

    // Unchecked policy never errors, and the count stays bounded
    let mut queue = EventQueue::unchecked(2);
    let mut unchecked_ok = true;
    for i in 0..5u32 {
        unchecked_ok &= queue.enqueue(Event::exposure(i, 0)).is_ok();
        unchecked_ok &= queue.len() <= queue.capacity();
    }
    for _ in 0..5 {
        unchecked_ok &= queue.dequeue().is_ok();
    }
    results.push(TestResult {
        name: "queue_unchecked_total".into(),
        passed: unchecked_ok && queue.is_empty(),
        detail: "5 over-capacity enqueues and 5 over-empty dequeues, no errors".into(),
    });

    results
}

// ── 5. Scenario Tapes ───────────────────────────────────────────────────

fn run_scenario(scenario: &Scenario) -> Result<PlayerState, String> {
    let mut engine = GameEngine::default();
    for (tick_index, burst) in scenario.ticks.iter().enumerate() {
        for spec in burst {
            for _ in 0..spec.repeat {
                engine
                    .enqueue(spec.to_event())
                    .map_err(|e| format!("tick {}: {}", tick_index + 1, e))?;
            }
        }
        engine.tick(|_| {}, || {});
    }
    Ok(*engine.player())
}

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario Tapes ---");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "scenarios_loaded".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} tapes loaded", scenarios.len()),
    });

    for scenario in &scenarios {
        let final_state = match run_scenario(scenario) {
            Ok(state) => state,
            Err(e) => {
                results.push(TestResult {
                    name: format!("scenario_{}", scenario.name),
                    passed: false,
                    detail: format!("enqueue failed: {}", e),
                });
                continue;
            }
        };

        let expect = &scenario.expect;
        let mut mismatches = Vec::new();
        if final_state.tick != expect.tick {
            mismatches.push(format!("tick {} != {}", final_state.tick, expect.tick));
        }
        if let Some(magnitude) = expect.magnitude {
            if final_state.health.magnitude != magnitude {
                mismatches.push(format!(
                    "magnitude {} != {}",
                    final_state.health.magnitude, magnitude
                ));
            }
        }
        if let Some(band) = expect.band {
            if final_state.health.band() != band {
                mismatches.push(format!("band {:?} != {:?}", final_state.health.band(), band));
            }
        }
        if let Some(cat_resistant) = expect.cat_resistant {
            if final_state.health.cat_resistant != cat_resistant {
                mismatches.push(format!(
                    "cat_resistant {} != {}",
                    final_state.health.cat_resistant, cat_resistant
                ));
            }
        }

        results.push(TestResult {
            name: format!("scenario_{}", scenario.name),
            passed: mismatches.is_empty(),
            detail: if mismatches.is_empty() {
                format!(
                    "tick {}, magnitude {} ({:?})",
                    final_state.tick,
                    final_state.health.magnitude,
                    final_state.health.band()
                )
            } else {
                mismatches.join("; ")
            },
        });

        if verbose && !scenario.notes.is_empty() {
            println!("    {}: {}", scenario.name, scenario.notes);
        }
    }

    results
}

// ── 6. Determinism ──────────────────────────────────────────────────────

/// A reproducible multi-tick tape of mixed exposures and treatments.
fn scripted_tape(seed: u64, ticks: usize) -> Vec<Vec<Event>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..ticks)
        .map(|_| {
            let burst = rng.gen_range(0..5);
            (0..burst)
                .map(|_| {
                    if rng.gen_bool(0.25) {
                        Event::Treatment
                    } else {
                        Event::exposure(rng.gen_range(0..4), rng.gen_range(0..3))
                    }
                })
                .collect()
        })
        .collect()
}

fn run_tape(tape: &[Vec<Event>]) -> Vec<PlayerState> {
    let mut engine = GameEngine::default();
    let mut trajectory = Vec::with_capacity(tape.len());
    for burst in tape {
        for &event in burst {
            engine.enqueue(event).unwrap();
        }
        engine.tick(|_| {}, || {});
        trajectory.push(*engine.player());
    }
    trajectory
}

fn validate_determinism(verbose: bool) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    // The same tape always produces the same trajectory
    let tape = scripted_tape(0xC0FFEE, 50);
    let first = run_tape(&tape);
    let second = run_tape(&tape);
    results.push(TestResult {
        name: "determinism_replay".into(),
        passed: first == second,
        detail: format!("two runs of a 50-tick tape agree ({} snapshots)", first.len()),
    });

    // A reset engine is indistinguishable from a fresh one
    let mut engine = GameEngine::default();
    for burst in &tape {
        for &event in burst {
            engine.enqueue(event).unwrap();
        }
        engine.tick(|_| {}, || {});
    }
    engine.reset();
    let mut replay = Vec::with_capacity(tape.len());
    for burst in &tape {
        for &event in burst {
            engine.enqueue(event).unwrap();
        }
        engine.tick(|_| {}, || {});
        replay.push(*engine.player());
    }
    results.push(TestResult {
        name: "determinism_reset_equals_fresh".into(),
        passed: replay == first,
        detail: "post-reset replay matches the fresh run".into(),
    });

    if verbose {
        if let Some(last) = first.last() {
            println!(
                "    seeded tape ends at tick {}, magnitude {} ({:?})",
                last.tick,
                last.health.magnitude,
                last.health.band()
            );
        }
    }

    results
}
