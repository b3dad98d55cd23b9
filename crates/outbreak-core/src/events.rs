//! Queueable game events.
//!
//! The event set is closed: dispatch is exhaustive and no extension is
//! expected. "No event" is deliberately not a member; sources hand the
//! orchestrator `Option<Event>` and exhaustion is `None`, so the queue never
//! stores a nothing-happened value.

use serde::{Deserialize, Serialize};

use outbreak_logic::progression::Exposure;

/// One queueable occurrence in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Nearby infection sources were observed.
    Exposure(Exposure),
    /// A treatment was administered. Carries no payload.
    Treatment,
}

impl Event {
    /// Shorthand for an exposure report.
    pub fn exposure(humans: u32, cats: u32) -> Self {
        Self::Exposure(Exposure::new(humans, cats))
    }

    pub fn is_exposure(&self) -> bool {
        matches!(self, Self::Exposure(_))
    }

    pub fn is_treatment(&self) -> bool {
        matches!(self, Self::Treatment)
    }
}
