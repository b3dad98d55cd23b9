//! The once-per-tick drain loop.
//!
//! One call is one game tick: bump the counter, drain whatever the event
//! source will yield right now, and route each event through the rules.
//! Exposures always apply; treatment is latched to once per tick.

use outbreak_logic::progression::{self, Exposure};

use crate::events::Event;
use crate::player::PlayerState;

/// Advance the player by one tick, draining `next_event` until it yields
/// `None`.
///
/// - The tick counter increments exactly once per call, before any event is
///   pulled.
/// - Every exposure event is applied and then reported through
///   `on_exposure`.
/// - The first treatment event is applied and reported through
///   `on_treatment`; any further treatments this tick are skipped silently,
///   with no state change and no callback.
/// - `None` from the source means "nothing further right now" and ends the
///   call; it says nothing about the source's backing store.
///
/// The call runs to completion on the caller's thread. The source and both
/// callbacks execute in-line and are expected to return promptly.
pub fn advance_tick<S, E, T>(
    player: &mut PlayerState,
    mut next_event: S,
    mut on_exposure: E,
    mut on_treatment: T,
) where
    S: FnMut() -> Option<Event>,
    E: FnMut(&Exposure),
    T: FnMut(),
{
    player.tick += 1;

    let mut treatment_applied = false;
    while let Some(event) = next_event() {
        match event {
            Event::Exposure(exposure) => {
                player.health = progression::exposure_update(player.health, exposure);
                log::trace!(
                    "tick {}: exposure {:?} -> magnitude {}",
                    player.tick,
                    exposure,
                    player.health.magnitude
                );
                on_exposure(&exposure);
            }
            Event::Treatment => {
                if treatment_applied {
                    // One treatment per tick; the rest are dropped silently.
                    continue;
                }
                player.health = progression::treatment_update(player.health);
                treatment_applied = true;
                log::trace!(
                    "tick {}: treatment -> magnitude {}",
                    player.tick,
                    player.health.magnitude
                );
                on_treatment();
            }
        }
    }

    log::debug!(
        "tick {} done: magnitude {} ({:?}), cat_resistant {}",
        player.tick,
        player.health.magnitude,
        player.health.band(),
        player.health.cat_resistant
    );
}
