//! Engine owning the long-lived player/queue pair.
//!
//! `GameEngine` is the shape the badge firmware runs: producers enqueue
//! events as sensors report them, and the main loop calls [`GameEngine::tick`]
//! once per game tick to drain them through the rules. Callers that manage
//! their own queue can use [`advance_tick`](crate::tick::advance_tick)
//! directly; the engine adds nothing but ownership and wiring.

use outbreak_logic::bands::Band;
use outbreak_logic::progression::Exposure;

use crate::events::Event;
use crate::player::PlayerState;
use crate::queue::{EventQueue, OverflowPolicy, QueueError};
use crate::tick;

/// Queue sizing and policy for a [`GameEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Slots in the event queue.
    pub queue_capacity: usize,
    /// Failure policy for queue over/underflow. Leave this checked unless
    /// the producer's capacity bound is proven.
    pub queue_policy: OverflowPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            queue_policy: OverflowPolicy::Checked,
        }
    }
}

/// One player, one queue, and the tick loop that connects them.
#[derive(Debug)]
pub struct GameEngine {
    player: PlayerState,
    queue: EventQueue,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            player: PlayerState::new(),
            queue: EventQueue::new(config.queue_capacity, config.queue_policy),
        }
    }

    /// Queue an event for the next tick.
    pub fn enqueue(&mut self, event: Event) -> Result<(), QueueError> {
        self.queue.enqueue(event)
    }

    /// Run one game tick, draining every currently queued event.
    ///
    /// The drain uses `is_empty` as its exhaustion test, so even an
    /// unchecked queue never fabricates events into the loop.
    pub fn tick<E, T>(&mut self, on_exposure: E, on_treatment: T)
    where
        E: FnMut(&Exposure),
        T: FnMut(),
    {
        let band_before = self.player.health.band();

        let Self { player, queue } = self;
        tick::advance_tick(
            player,
            || {
                if queue.is_empty() {
                    None
                } else {
                    queue.dequeue().ok()
                }
            },
            on_exposure,
            on_treatment,
        );

        let band_after = self.player.health.band();
        if band_after != band_before {
            log::debug!(
                "tick {}: band {:?} -> {:?}",
                self.player.tick,
                band_before,
                band_after
            );
            if band_after == Band::Zombie {
                log::warn!("player turned zombie at tick {}", self.player.tick);
            }
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Events currently waiting for the next tick.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Reboot: restore the boot-state player and drop any queued events.
    pub fn reset(&mut self) {
        self.player.reset();
        self.queue.clear();
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
