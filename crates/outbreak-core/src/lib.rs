//! Outbreak Core - Infection Game Engine
//!
//! The deterministic runtime around the pure rules in `outbreak-logic`: a
//! fixed-capacity event queue, the once-per-tick drain loop, and the player
//! state those mutate. Everything is single-threaded and allocation-bounded,
//! sized for the badge-class hardware the game targets.
//!
//! # Architecture
//!
//! - **Events** ([`events`]): the closed set of queueable game events
//! - **Queue** ([`queue`]): fixed-capacity FIFO ring with checked/unchecked
//!   failure policies
//! - **Tick** ([`tick`]): one run-to-completion drain per game tick, with
//!   observer callbacks
//! - **Engine** ([`engine`]): owns one player and one queue, the shape the
//!   device loop uses
//!
//! # Example
//!
//! ```
//! use outbreak_core::prelude::*;
//!
//! let mut engine = GameEngine::default();
//! engine.enqueue(Event::exposure(3, 1)).unwrap();
//! engine.enqueue(Event::Treatment).unwrap();
//! engine.tick(|_| {}, || {});
//!
//! // One exposure pushed the fresh player into Healthy; the treatment
//! // brought them back to the boot value.
//! assert_eq!(engine.player().tick, 1);
//! assert_eq!(engine.player().health.magnitude, 2);
//! ```

pub mod engine;
pub mod events;
pub mod player;
pub mod queue;
pub mod tick;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{EngineConfig, GameEngine};
    pub use crate::events::Event;
    pub use crate::player::PlayerState;
    pub use crate::queue::{EventQueue, OverflowPolicy, QueueError};
    pub use crate::tick::advance_tick;
    pub use outbreak_logic::bands::{Band, Magnitude};
    pub use outbreak_logic::progression::{Exposure, HealthState};
}
