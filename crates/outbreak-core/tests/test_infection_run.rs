//! Integration tests for the full event pipeline.
//!
//! Exercises: producer enqueue → EventQueue → advance_tick → progression
//! rules, through the `GameEngine` wiring where possible.
//!
//! All tests are deterministic — the only randomness is seeded and drives
//! input tapes, never the rules.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use outbreak_core::prelude::*;
use outbreak_logic::bands::band_bounds;

// ── Helpers ────────────────────────────────────────────────────────────

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Drive the engine to an exact magnitude of 70 (InfectedSymptomatic) in a
/// single tick: three crowd exposures reach 53, then seventeen idle updates
/// advance the infection by one each.
fn infect_to_symptomatic(engine: &mut GameEngine) {
    for _ in 0..3 {
        engine.enqueue(Event::exposure(3, 1)).unwrap();
    }
    for _ in 0..17 {
        engine.enqueue(Event::exposure(0, 0)).unwrap();
    }
    engine.tick(|_| {}, || {});
    assert_eq!(engine.player().health.magnitude, 70);
}

// ── Whole-game runs ────────────────────────────────────────────────────

#[test]
fn lone_human_contact_eventually_turns_player() {
    init_logs();
    let mut engine = GameEngine::default();

    let mut ticks = 0;
    while engine.player().health.band() != Band::Zombie {
        engine.enqueue(Event::exposure(1, 0)).unwrap();
        engine.tick(|_| {}, || {});
        ticks += 1;
        assert!(ticks < 120, "no zombie after {} ticks", ticks);
    }

    assert_eq!(engine.player().tick, ticks);
    assert_eq!(engine.player().health.magnitude, band_bounds::ZOMBIE);
}

#[test]
fn forty_nine_crowd_exposures_turn_player_in_one_tick() {
    init_logs();
    let mut engine = GameEngine::default();
    for _ in 0..49 {
        engine.enqueue(Event::exposure(3, 1)).unwrap();
    }

    let mut exposures = 0;
    engine.tick(|_| exposures += 1, || {});

    assert_eq!(exposures, 49);
    assert_eq!(engine.player().tick, 1);
    assert_eq!(engine.player().health.band(), Band::Zombie);
    assert!(engine.player().health.cat_resistant);
}

#[test]
fn steady_cat_contact_earns_resistance_on_infection() {
    let mut engine = GameEngine::default();

    let mut ticks = 0;
    while !engine.player().health.cat_resistant {
        engine.enqueue(Event::exposure(0, 1)).unwrap();
        engine.tick(|_| {}, || {});
        ticks += 1;
        assert!(ticks <= 10, "no resistance after {} ticks", ticks);
    }

    // The latch lands exactly when the infected range is entered, and from
    // then on the cat contact only contributes the flat infection step.
    assert!(engine.player().health.band().is_infected());
    let before = engine.player().health.magnitude;
    engine.enqueue(Event::exposure(0, 1)).unwrap();
    engine.tick(|_| {}, || {});
    assert_eq!(engine.player().health.magnitude, before + 1);
}

#[test]
fn late_treatment_leaves_player_immune_for_good() {
    let mut engine = GameEngine::default();
    infect_to_symptomatic(&mut engine);

    // Let the infection run into the late band, then treat it.
    for _ in 0..20 {
        engine.enqueue(Event::exposure(0, 0)).unwrap();
    }
    engine.tick(|_| {}, || {});
    assert_eq!(engine.player().health.band(), Band::InfectedSymptomaticLate);

    engine.enqueue(Event::Treatment).unwrap();
    engine.tick(|_| {}, || {});
    assert_eq!(engine.player().health.magnitude, band_bounds::IMMUNE);

    // Immune is absorbing: heavy exposure changes nothing afterwards.
    engine.enqueue(Event::exposure(9, 9)).unwrap();
    engine.tick(|_| {}, || {});
    assert_eq!(engine.player().health.magnitude, band_bounds::IMMUNE);
}

// ── Treatment latch through the queue ──────────────────────────────────

#[test]
fn queued_double_treatment_applies_once() {
    let mut engine = GameEngine::default();
    infect_to_symptomatic(&mut engine);

    engine.enqueue(Event::Treatment).unwrap();
    engine.enqueue(Event::Treatment).unwrap();

    let mut treatments = 0;
    engine.tick(|_| {}, || treatments += 1);

    // One jump to the Healthy threshold; a leaked latch would carry on to
    // SuperHealthy.
    assert_eq!(treatments, 1);
    assert_eq!(engine.player().health.magnitude, band_bounds::HEALTHY);
}

#[test]
fn treatments_on_separate_ticks_both_apply() {
    let mut engine = GameEngine::default();
    infect_to_symptomatic(&mut engine);

    engine.enqueue(Event::Treatment).unwrap();
    engine.tick(|_| {}, || {});
    engine.enqueue(Event::Treatment).unwrap();
    engine.tick(|_| {}, || {});

    // 70 -> 10 on the first tick, 10 -> 2 on the second.
    assert_eq!(engine.player().health.magnitude, band_bounds::SUPER_HEALTHY);
}

// ── Queue behavior under load ──────────────────────────────────────────

#[test]
fn checked_queue_matches_vecdeque_model() {
    let mut rng = StdRng::seed_from_u64(0x0B57A7E);
    let capacity = 8;
    let mut queue = EventQueue::checked(capacity);
    let mut model: VecDeque<Event> = VecDeque::new();

    for step in 0..2000 {
        if rng.gen_bool(0.55) {
            let event = if rng.gen_bool(0.2) {
                Event::Treatment
            } else {
                Event::exposure(rng.gen_range(0..4), rng.gen_range(0..3))
            };
            let result = queue.enqueue(event);
            if model.len() < capacity {
                assert!(result.is_ok(), "step {}: unexpected reject", step);
                model.push_back(event);
            } else {
                assert_eq!(
                    result,
                    Err(QueueError::CapacityExceeded { capacity }),
                    "step {}",
                    step
                );
            }
        } else {
            let result = queue.dequeue();
            match model.pop_front() {
                Some(expected) => assert_eq!(result, Ok(expected), "step {}", step),
                None => assert_eq!(result, Err(QueueError::Empty), "step {}", step),
            }
        }
        assert_eq!(queue.len(), model.len(), "step {}", step);
        assert_eq!(queue.is_empty(), model.is_empty(), "step {}", step);
    }
}

#[test]
fn unchecked_queue_never_errors() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut queue = EventQueue::unchecked(4);

    for _ in 0..500 {
        if rng.gen_bool(0.6) {
            queue
                .enqueue(Event::exposure(rng.gen_range(0..3), 0))
                .expect("unchecked enqueue must not fail");
        } else {
            queue.dequeue().expect("unchecked dequeue must not fail");
        }
        assert!(queue.len() <= queue.capacity());
    }
}

// ── Determinism ────────────────────────────────────────────────────────

/// Build a reproducible multi-tick tape: for each tick, a burst of events.
fn random_tape(seed: u64, ticks: usize) -> Vec<Vec<Event>> {
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

#[test]
fn identical_tapes_produce_identical_trajectories() {
    let tape = random_tape(7, 40);
    let first = run_tape(&tape);
    let second = run_tape(&tape);
    assert_eq!(first, second);
}

#[test]
fn empty_ticks_advance_time_but_not_health() {
    let quiet: Vec<Vec<Event>> = vec![Vec::new(); 40];
    let trajectory = run_tape(&quiet);
    assert_eq!(trajectory.len(), 40);
    for (index, snapshot) in trajectory.iter().enumerate() {
        assert_eq!(snapshot.tick, index as u64 + 1);
        assert_eq!(snapshot.health, HealthState::default());
    }
}
