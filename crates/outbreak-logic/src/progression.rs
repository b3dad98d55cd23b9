//! Exposure and treatment state transitions.
//!
//! The two update functions are pure and total: any health state plus any
//! event produces a valid next state, with no error paths. All arithmetic is
//! deterministic; the only persistent flag is the cat-resistance latch, which
//! sets the first time the player enters an infected band and never clears.
//!
//! # Exposure
//!
//! An exposure report combines three deltas: natural progression (the disease
//! moving on its own), passive recovery (a Healthy player drifting back
//! toward the boundary), and exposure pressure from nearby humans and cats.
//!
//! ```
//! use outbreak_logic::bands::Band;
//! use outbreak_logic::progression::{exposure_update, Exposure, HealthState};
//!
//! let fresh = HealthState::default();
//! let after = exposure_update(fresh, Exposure::new(3, 1));
//! assert_eq!(after.magnitude, 21);
//! assert_eq!(after.band(), Band::Healthy);
//! ```
//!
//! # Treatment
//!
//! A treatment is a fixed jump keyed on the current band; it carries no
//! payload and never touches the latch.

use serde::{Deserialize, Serialize};

use crate::bands::{self, band_bounds, Band, Magnitude};

/// Per-update progression and exposure rates.
pub mod rates {
    use super::Magnitude;

    /// Upward drift applied inside the SuperHealthy band (before the
    /// boundary correction).
    pub const SUPER_HEALTHY_DRIFT: Magnitude = 2;
    /// Step a Healthy player recovers by, when the floor allows it.
    pub const HEALTHY_RECOVERY: Magnitude = 1;
    /// Flat worsening per update while in any infected band.
    pub const INFECTION_PROGRESSION: Magnitude = 1;
    /// Pressure contributed by each nearby human.
    pub const HUMAN_EXPOSURE: Magnitude = 3;
    /// Pressure contributed by each nearby cat, until resistance is earned.
    pub const CAT_EXPOSURE: Magnitude = 8;
}

/// Treatment knocks an asymptomatic infection down by this much.
const ASYMPTOMATIC_TREATMENT_DROP: Magnitude = 35;

/// A player's persistent health: raw magnitude plus the cat-resistance latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthState {
    pub magnitude: Magnitude,
    /// Set the first time the player enters an infected band; once true it
    /// never reverts, and cat exposure stops counting.
    pub cat_resistant: bool,
}

impl Default for HealthState {
    /// Boot state: low end of SuperHealthy, no resistance.
    fn default() -> Self {
        Self {
            magnitude: band_bounds::SUPER_HEALTHY,
            cat_resistant: false,
        }
    }
}

impl HealthState {
    pub fn new(magnitude: Magnitude, cat_resistant: bool) -> Self {
        Self {
            magnitude,
            cat_resistant,
        }
    }

    /// The band this magnitude currently falls in.
    pub fn band(&self) -> Band {
        Band::from_magnitude(self.magnitude)
    }
}

/// Counts of nearby infection sources observed in one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exposure {
    pub humans: u32,
    pub cats: u32,
}

impl Exposure {
    pub fn new(humans: u32, cats: u32) -> Self {
        Self { humans, cats }
    }
}

/// Per-update magnitude gain from the disease itself.
///
/// SuperHealthy players drift upward on a bounded formula that tops out at
/// the Healthy boundary; infected players worsen by a flat step; everyone
/// else holds still.
fn natural_progression(magnitude: Magnitude) -> Magnitude {
    if bands::is_super_healthy(magnitude) {
        let sum = magnitude + rates::SUPER_HEALTHY_DRIFT;
        let remainder = sum % band_bounds::HEALTHY;
        let quotient = sum / band_bounds::HEALTHY;
        // sum is 4..=11 inside the band, so the correction leaves +2 or +1
        return rates::SUPER_HEALTHY_DRIFT - remainder * quotient;
    }
    if bands::is_infected(magnitude) {
        return rates::INFECTION_PROGRESSION;
    }
    0
}

/// Per-update magnitude loss from passive recovery.
///
/// Only Healthy players recover, and never across the SuperHealthy boundary:
/// a step that would land at or below the boundary is refused, so recovery
/// floors one above it and an exact boundary magnitude holds still.
fn natural_recovery(magnitude: Magnitude) -> Magnitude {
    if bands::is_healthy(magnitude) {
        // Preview the step before taking it.
        let sum = magnitude - rates::HEALTHY_RECOVERY;
        if sum > band_bounds::HEALTHY {
            return rates::HEALTHY_RECOVERY;
        }
    }
    0
}

/// Magnitude gain from one exposure report.
///
/// Immune and already-infected players take no further pressure. Cats stop
/// counting once cat resistance has been earned.
fn exposure_pressure(state: HealthState, exposure: Exposure) -> Magnitude {
    if bands::is_immune(state.magnitude) || bands::is_infected(state.magnitude) {
        return 0;
    }
    let cat_factor = if state.cat_resistant { 0 } else { 1 };
    exposure.humans * rates::HUMAN_EXPOSURE + exposure.cats * rates::CAT_EXPOSURE * cat_factor
}

/// Apply one exposure report to a health state.
///
/// Zombie and Immune are absorbing: the magnitude normalizes to the band
/// threshold and nothing else changes. Otherwise the three deltas combine,
/// the cat-resistance latch picks up any entry into an infected band, and a
/// result past the Zombie threshold clamps to it.
pub fn exposure_update(state: HealthState, exposure: Exposure) -> HealthState {
    let mut next = state;
    if bands::is_zombie(next.magnitude) {
        next.magnitude = band_bounds::ZOMBIE;
        return next;
    }
    if bands::is_immune(next.magnitude) {
        next.magnitude = band_bounds::IMMUNE;
        return next;
    }
    next.magnitude = next.magnitude + natural_progression(next.magnitude)
        - natural_recovery(next.magnitude)
        + exposure_pressure(state, exposure);
    // The latch only sets, never clears.
    next.cat_resistant = next.cat_resistant || bands::is_infected(next.magnitude);
    if bands::is_zombie(next.magnitude) {
        next.magnitude = band_bounds::ZOMBIE;
    }
    next
}

/// Apply one treatment to a health state.
///
/// A fixed jump keyed on the current band; SuperHealthy, Immune, and Zombie
/// come back unchanged. The cat-resistance latch is untouched.
pub fn treatment_update(state: HealthState) -> HealthState {
    let mut next = state;
    if bands::is_infected_symptomatic_late(next.magnitude) {
        next.magnitude = band_bounds::IMMUNE;
    } else if bands::is_infected_symptomatic(next.magnitude) {
        next.magnitude = band_bounds::HEALTHY;
    } else if bands::is_infected_asymptomatic(next.magnitude) {
        // Deliberately a raw step, not a clamp to a threshold: early in the
        // band this lands in SuperHealthy, later in Healthy.
        next.magnitude -= ASYMPTOMATIC_TREATMENT_DROP;
    } else if bands::is_healthy(next.magnitude) {
        next.magnitude = band_bounds::SUPER_HEALTHY;
    }
    next
}
